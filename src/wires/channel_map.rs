use serde::Serialize;

use super::{View, WireSet};

/// One wire of the channel map, flattened for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRecord {
    pub crm: usize,
    pub view: String,
    pub channel: u32,
    pub center: [f64; 2],
    pub length: f64,
    pub endpoint_a: [f64; 2],
    pub endpoint_b: [f64; 2],
}

/// Mapping from (CRM, view, channel) to wire endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelMap {
    records: Vec<ChannelRecord>,
}

impl ChannelMap {
    /// Creates an empty channel map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every wire of `wires` under the given CRM index.
    pub fn push_set(&mut self, crm: usize, wires: &WireSet) {
        let view = wires.view.to_string();
        self.records.extend(wires.iter().map(|w| ChannelRecord {
            crm,
            view: view.clone(),
            channel: w.channel,
            center: [w.center.x, w.center.y],
            length: w.length,
            endpoint_a: [w.endpoint_a.x, w.endpoint_a.y],
            endpoint_b: [w.endpoint_b.x, w.endpoint_b.y],
        }));
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ChannelRecord] {
        &self.records
    }

    /// Number of channels recorded for a CRM and view.
    #[must_use]
    pub fn count(&self, crm: usize, view: View) -> usize {
        let view = view.to_string();
        self.records
            .iter()
            .filter(|r| r.crm == crm && r.view == view)
            .count()
    }
}
