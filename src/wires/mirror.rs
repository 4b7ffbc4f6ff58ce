use super::{Wire, WireSet};
use crate::math::Point2;

/// Rotates a wire set by 180° about the plane centre.
///
/// Used to derive the second panel's layout from the first without running
/// the generator again. Channels and lengths are carried over unchanged.
pub struct MirrorWires;

impl MirrorWires {
    /// Executes the rotation, returning a set tagged with the other panel.
    #[must_use]
    pub fn execute(&self, wires: &WireSet) -> WireSet {
        let mirrored = wires.iter().map(mirror_wire).collect();
        WireSet {
            view: wires.view,
            panel: wires.panel.flipped(),
            half: wires.half,
            wires: mirrored,
            skipped: wires.skipped.clone(),
        }
    }
}

fn mirror_wire(wire: &Wire) -> Wire {
    let a = Point2::new(-wire.endpoint_a.x, -wire.endpoint_a.y);
    let b = Point2::new(-wire.endpoint_b.x, -wire.endpoint_b.y);
    Wire {
        channel: wire.channel,
        center: nalgebra::center(&a, &b),
        length: wire.length,
        endpoint_a: a,
        endpoint_b: b,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector2;
    use crate::units::Angle;
    use crate::wires::{GenerateWires, Panel, PanelHalf, View, WireGenParams};

    fn nominal_u() -> WireSet {
        GenerateWires::new(
            View::U,
            WireGenParams {
                length: 149.0,
                width: 335.8,
                n_channels: 476,
                pitch: 0.765,
                angle: Angle::from_degrees(150.0),
                offset: Vector2::new(1.50, 0.87),
            },
        )
        .execute()
    }

    #[test]
    fn mirrored_endpoints_are_negated() {
        let set = WireSet::new(
            View::V,
            Panel::First,
            PanelHalf::Full,
            vec![Wire::new(4, Point2::new(1.0, 2.0), Point2::new(3.0, -1.0))],
        );
        let out = MirrorWires.execute(&set);
        let w = out.wires[0];
        assert_eq!(out.panel, Panel::Second);
        assert_eq!(w.channel, 4);
        assert_eq!(w.endpoint_a, Point2::new(-1.0, -2.0));
        assert_eq!(w.endpoint_b, Point2::new(-3.0, 1.0));
        assert_relative_eq!(w.center.x, -2.0);
        assert_relative_eq!(w.center.y, -0.5);
    }

    #[test]
    fn mirror_preserves_lengths() {
        let set = nominal_u();
        let out = MirrorWires.execute(&set);
        assert_eq!(out.len(), set.len());
        for (orig, m) in set.iter().zip(&out) {
            assert_eq!(orig.length, m.length);
            assert_eq!(orig.channel, m.channel);
            assert_relative_eq!(m.length, (m.endpoint_a - m.endpoint_b).norm(), epsilon = 1e-12);
        }
    }

    #[test]
    fn mirror_twice_is_identity() {
        let set = nominal_u();
        let back = MirrorWires.execute(&MirrorWires.execute(&set));
        assert_eq!(back.panel, Panel::First);
        for (orig, w) in set.iter().zip(&back) {
            assert_eq!(orig.channel, w.channel);
            assert_eq!(orig.length, w.length);
            assert_relative_eq!(orig.endpoint_a.x, w.endpoint_a.x, epsilon = 1e-12);
            assert_relative_eq!(orig.endpoint_b.y, w.endpoint_b.y, epsilon = 1e-12);
            assert_relative_eq!(orig.center.x, w.center.x, epsilon = 1e-12);
            assert_relative_eq!(orig.center.y, w.center.y, epsilon = 1e-12);
        }
    }
}
