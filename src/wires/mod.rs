//! Sense-wire layout for the induction views of a cold readout unit.
//!
//! Wires are generated once per view over the full active rectangle of the
//! first panel, rotated by 180° for the second panel, and finally cut at the
//! reflection line into the two half-panels that make up the four CRMs.

mod channel_map;
mod generate;
mod mirror;
mod split;

pub use channel_map::{ChannelMap, ChannelRecord};
pub use generate::{GenerateWires, WireGenParams};
pub use mirror::MirrorWires;
pub use split::{SplitParams, SplitWires};

use std::fmt;

use crate::math::Point2;

/// Induction view of a wire plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    U,
    V,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::U => f.write_str("U"),
            View::V => f.write_str("V"),
        }
    }
}

/// One of the two readout panels, related by a 180° rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    First,
    Second,
}

impl Panel {
    /// Returns the other panel.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Panel::First => Panel::Second,
            Panel::Second => Panel::First,
        }
    }

    /// Zero-based panel index.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Panel::First => 0,
            Panel::Second => 1,
        }
    }
}

/// Which part of the panel a wire set covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelHalf {
    /// The whole active rectangle, before splitting.
    Full,
    /// Below the reflection line.
    Lower,
    /// Above the reflection line.
    Upper,
}

/// A single sense-wire segment in the plane's local frame.
///
/// `center` and `length` are always derived from the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wire {
    pub channel: u32,
    pub center: Point2,
    pub length: f64,
    pub endpoint_a: Point2,
    pub endpoint_b: Point2,
}

impl Wire {
    /// Creates a wire from its two endpoints.
    #[must_use]
    pub fn new(channel: u32, endpoint_a: Point2, endpoint_b: Point2) -> Self {
        Self {
            channel,
            center: nalgebra::center(&endpoint_a, &endpoint_b),
            length: nalgebra::distance(&endpoint_a, &endpoint_b),
            endpoint_a,
            endpoint_b,
        }
    }

    /// Returns a copy of this wire under a different channel number.
    #[must_use]
    pub fn with_channel(self, channel: u32) -> Self {
        Self { channel, ..self }
    }

    /// Returns the wire shifted along y.
    #[must_use]
    pub fn shifted_y(self, dy: f64) -> Self {
        let a = Point2::new(self.endpoint_a.x, self.endpoint_a.y + dy);
        let b = Point2::new(self.endpoint_b.x, self.endpoint_b.y + dy);
        Self::new(self.channel, a, b)
    }

    /// Smallest y-coordinate of the two endpoints.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.endpoint_a.y.min(self.endpoint_b.y)
    }

    /// Largest y-coordinate of the two endpoints.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.endpoint_a.y.max(self.endpoint_b.y)
    }
}

/// An ordered set of wires for one view on one panel (half).
#[derive(Debug, Clone, PartialEq)]
pub struct WireSet {
    pub view: View,
    pub panel: Panel,
    pub half: PanelHalf,
    /// Wires in generation order.
    pub wires: Vec<Wire>,
    /// Channels the generator could not lay out.
    pub skipped: Vec<u32>,
}

impl WireSet {
    /// Creates a wire set with no skipped channels.
    #[must_use]
    pub fn new(view: View, panel: Panel, half: PanelHalf, wires: Vec<Wire>) -> Self {
        Self {
            view,
            panel,
            half,
            wires,
            skipped: Vec::new(),
        }
    }

    /// Number of wires in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    /// Whether the set has no wires.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    /// Iterates over the wires in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Wire> {
        self.wires.iter()
    }
}

impl<'a> IntoIterator for &'a WireSet {
    type Item = &'a Wire;
    type IntoIter = std::slice::Iter<'a, Wire>;

    fn into_iter(self) -> Self::IntoIter {
        self.wires.iter()
    }
}
