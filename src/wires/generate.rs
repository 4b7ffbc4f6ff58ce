use std::f64::consts::FRAC_PI_2;

use tracing::{debug, warn};

use super::{Panel, PanelHalf, View, Wire, WireSet};
use crate::math::clip_2d::clip_line_to_rect;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::units::Angle;

/// Parameters for laying out one induction view over a full panel.
///
/// Lengths are in centimetres. `length` runs along the local x axis and
/// `width` along y; the rectangle origin is its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireGenParams {
    pub length: f64,
    pub width: f64,
    pub n_channels: u32,
    pub pitch: f64,
    pub angle: Angle,
    /// Offset of the first wire's reference point from the starting corner.
    pub offset: Vector2,
}

/// Generates the wires of one view across the full active rectangle.
pub struct GenerateWires {
    view: View,
    params: WireGenParams,
}

impl GenerateWires {
    /// Creates a new `GenerateWires` operation.
    #[must_use]
    pub fn new(view: View, params: WireGenParams) -> Self {
        Self { view, params }
    }

    /// Executes the layout, returning the wires of the first panel.
    ///
    /// Consecutive wires step by `pitch` along the direction perpendicular to
    /// the wire. The starting corner is mirrored in x (y) when that step
    /// direction points towards negative x (y), so the first wire always
    /// lies near a corner of the rectangle. Endpoints are re-centred so the
    /// rectangle centroid becomes the origin.
    ///
    /// A channel whose line misses the rectangle is logged and skipped; its
    /// number is not reused, so the returned channels may have gaps.
    #[must_use]
    pub fn execute(&self) -> WireSet {
        let WireGenParams {
            length,
            width,
            n_channels,
            pitch,
            angle,
            offset,
        } = self.params;

        let theta = angle.radians();
        let wire_dir = Vector2::new(theta.cos(), theta.sin());
        let pitch_dir = Vector2::new((theta - FRAC_PI_2).cos(), (theta - FRAC_PI_2).sin());

        let mut origin = Point2::new(offset.x, offset.y);
        if pitch_dir.x < 0.0 {
            origin.x = length - offset.x;
        }
        if pitch_dir.y < 0.0 {
            origin.y = width - offset.y;
        }

        let to_center = Vector2::new(0.5 * length, 0.5 * width);
        let mut wires = Vec::with_capacity(n_channels as usize);
        let mut skipped = Vec::new();

        for channel in 0..n_channels {
            let reference = origin + pitch_dir * (f64::from(channel) * pitch);
            let Some((a, b)) = clip_line_to_rect(&reference, &wire_dir, length, width) else {
                warn!(view = %self.view, channel, "wire does not cross the active area, skipping");
                skipped.push(channel);
                continue;
            };

            let wire = Wire::new(channel, a - to_center, b - to_center);
            if wire.length < TOLERANCE {
                warn!(view = %self.view, channel, "wire only touches the active area, skipping");
                skipped.push(channel);
                continue;
            }
            wires.push(wire);
        }

        debug!(
            view = %self.view,
            generated = wires.len(),
            skipped = skipped.len(),
            "generated wire plane"
        );

        WireSet {
            view: self.view,
            panel: Panel::First,
            half: PanelHalf::Full,
            wires,
            skipped,
        }
    }
}
