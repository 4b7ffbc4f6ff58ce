use tracing::debug;

use super::{PanelHalf, Wire, WireSet};
use crate::math::{Point2, AXIS_EPSILON};
use crate::units::Angle;

/// Parameters for cutting a panel's wires at its reflection line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitParams {
    /// Full width of the panel (along local y), in centimetres.
    pub width: f64,
    /// Wire angle of the view being split.
    pub angle: Angle,
}

/// Where a wire lies relative to the reflection line `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Lower,
    Upper,
    Straddling,
}

/// A wire with one endpoint strictly on each side is cut. A wire touching the
/// line from above is upper; one touching from below, or lying on the line,
/// is lower.
fn classify(wire: &Wire) -> Side {
    if wire.max_y() <= 0.0 {
        Side::Lower
    } else if wire.min_y() >= 0.0 {
        Side::Upper
    } else {
        Side::Straddling
    }
}

/// Splits a full-panel wire set into its lower and upper half-panels.
pub struct SplitWires {
    params: SplitParams,
}

impl SplitWires {
    /// Creates a new `SplitWires` operation.
    #[must_use]
    pub fn new(params: SplitParams) -> Self {
        Self { params }
    }

    /// Executes the split, returning `(lower, upper)`.
    ///
    /// Wires crossing `y = 0` are cut into two pieces; each piece keeps the
    /// original endpoint on its side and takes the crossing point as its other
    /// endpoint. Channels are renumbered from 0 within each half in the order
    /// the pieces are produced. Once every wire is classified, each half is
    /// moved into its own frame: the lower half by `+width / 4` and the upper
    /// half by `-width / 4`, so both are centred on their half-panel.
    #[must_use]
    pub fn execute(&self, wires: &WireSet) -> (WireSet, WireSet) {
        let theta = self.params.angle.radians();
        let (nx, ny) = (theta.cos(), theta.sin());

        let mut lower: Vec<Wire> = Vec::new();
        let mut upper: Vec<Wire> = Vec::new();
        let mut next_lower = 0u32;
        let mut next_upper = 0u32;

        for wire in wires {
            match classify(wire) {
                Side::Lower => {
                    lower.push(wire.with_channel(next_lower));
                    next_lower += 1;
                }
                Side::Upper => {
                    upper.push(wire.with_channel(next_upper));
                    next_upper += 1;
                }
                Side::Straddling => {
                    let a = wire.endpoint_a;
                    let b = wire.endpoint_b;
                    let cut = Point2::new(crossing_x(&a, &b, nx, ny), 0.0);

                    let (low, high) = if a.y < 0.0 {
                        (Wire::new(next_lower, a, cut), Wire::new(next_upper, cut, b))
                    } else {
                        (Wire::new(next_lower, cut, b), Wire::new(next_upper, a, cut))
                    };
                    lower.push(low);
                    upper.push(high);
                    next_lower += 1;
                    next_upper += 1;
                }
            }
        }

        let quarter = 0.25 * self.params.width;
        let lower: Vec<Wire> = lower.into_iter().map(|w| w.shifted_y(quarter)).collect();
        let upper: Vec<Wire> = upper.into_iter().map(|w| w.shifted_y(-quarter)).collect();

        debug!(
            view = %wires.view,
            input = wires.len(),
            lower = lower.len(),
            upper = upper.len(),
            "split wire plane"
        );

        (
            WireSet::new(wires.view, wires.panel, PanelHalf::Lower, lower),
            WireSet::new(wires.view, wires.panel, PanelHalf::Upper, upper),
        )
    }
}

/// x-coordinate where the wire through `a` crosses `y = 0`.
///
/// Uses the view's direction ratio `nx / ny`; for a near-horizontal view the
/// segment's own slope is used instead.
fn crossing_x(a: &Point2, b: &Point2, nx: f64, ny: f64) -> f64 {
    if ny.abs() < AXIS_EPSILON {
        let t = -a.y / (b.y - a.y);
        return a.x + t * (b.x - a.x);
    }
    a.x - a.y * nx / ny
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::Vector2;
    use crate::wires::{GenerateWires, Panel, View, WireGenParams};

    const W: f64 = 335.8;

    fn params(angle: f64) -> SplitParams {
        SplitParams {
            width: W,
            angle: Angle::from_degrees(angle),
        }
    }

    fn nominal_set(view: View, angle: f64) -> WireSet {
        GenerateWires::new(
            view,
            WireGenParams {
                length: 149.0,
                width: W,
                n_channels: 476,
                pitch: 0.765,
                angle: Angle::from_degrees(angle),
                offset: Vector2::new(1.50, 0.87),
            },
        )
        .execute()
    }

    fn set_of(wires: Vec<Wire>) -> WireSet {
        WireSet::new(View::U, Panel::First, PanelHalf::Full, wires)
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn wires_on_one_side_are_kept_whole_and_renumbered() {
        let input = set_of(vec![
            Wire::new(10, p(-1.0, -5.0), p(1.0, -3.0)),
            Wire::new(11, p(-1.0, 3.0), p(1.0, 5.0)),
            Wire::new(12, p(-1.0, -9.0), p(1.0, -7.0)),
        ]);
        let (lower, upper) = SplitWires::new(params(45.0)).execute(&input);

        assert_eq!(lower.len(), 2);
        assert_eq!(upper.len(), 1);
        assert_eq!(lower.wires[0].channel, 0);
        assert_eq!(lower.wires[1].channel, 1);
        assert_eq!(upper.wires[0].channel, 0);
        assert_eq!(lower.half, PanelHalf::Lower);
        assert_eq!(upper.half, PanelHalf::Upper);

        // Shifted into the half-panel frame; shape unchanged.
        assert_abs_diff_eq!(lower.wires[0].center.y, -4.0 + 0.25 * W, epsilon = 1e-12);
        assert_abs_diff_eq!(upper.wires[0].center.y, 4.0 - 0.25 * W, epsilon = 1e-12);
        assert_abs_diff_eq!(lower.wires[0].length, 8f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn straddling_wire_is_cut_at_the_reflection_line() {
        // 45° wire from (-2, -2) to (2, 2) crosses y = 0 at x = 0.
        let input = set_of(vec![Wire::new(3, p(-2.0, -2.0), p(2.0, 2.0))]);
        let (lower, upper) = SplitWires::new(params(45.0)).execute(&input);

        assert_eq!(lower.len(), 1);
        assert_eq!(upper.len(), 1);
        let q = 0.25 * W;
        let lo = lower.wires[0];
        let hi = upper.wires[0];
        assert_abs_diff_eq!(lo.endpoint_a.y, -2.0 + q, epsilon = 1e-12);
        assert_abs_diff_eq!(lo.endpoint_b.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lo.endpoint_b.y, q, epsilon = 1e-12);
        assert_abs_diff_eq!(hi.endpoint_a.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hi.endpoint_a.y, -q, epsilon = 1e-12);
        assert_abs_diff_eq!(hi.endpoint_b.y, 2.0 - q, epsilon = 1e-12);
        assert_abs_diff_eq!(lo.length + hi.length, 32f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn straddling_wire_keeps_endpoint_positions_when_reversed() {
        // Endpoint a above, b below: lower keeps b in second position.
        let input = set_of(vec![Wire::new(0, p(2.0, 2.0), p(-2.0, -2.0))]);
        let (lower, upper) = SplitWires::new(params(45.0)).execute(&input);
        let q = 0.25 * W;
        assert_abs_diff_eq!(lower.wires[0].endpoint_a.y, q, epsilon = 1e-12);
        assert_abs_diff_eq!(lower.wires[0].endpoint_b.x, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(upper.wires[0].endpoint_a.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(upper.wires[0].endpoint_b.y, -q, epsilon = 1e-12);
    }

    #[test]
    fn wires_touching_the_line_go_to_the_side_they_lie_on() {
        let input = set_of(vec![
            Wire::new(0, p(-1.0, 0.0), p(1.0, 0.0)),
            Wire::new(1, p(-1.0, 0.0), p(1.0, 2.0)),
            Wire::new(2, p(-1.0, -2.0), p(1.0, 0.0)),
        ]);
        let (lower, upper) = SplitWires::new(params(45.0)).execute(&input);
        assert_eq!(lower.len(), 2);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper.wires[0].channel, 0);
        assert_abs_diff_eq!(upper.wires[0].min_y(), -0.25 * W, epsilon = 1e-12);
    }

    #[test]
    fn wire_touching_from_above_stays_inside_its_half_frame() {
        let width = 10.0;
        let split = SplitWires::new(SplitParams {
            width,
            angle: Angle::from_degrees(45.0),
        });
        let input = set_of(vec![Wire::new(0, p(-1.0, 0.0), p(1.0, 2.0))]);
        let (lower, upper) = split.execute(&input);

        assert!(lower.is_empty());
        assert_eq!(upper.len(), 1);
        for w in lower.iter().chain(upper.iter()) {
            assert!(w.min_y() >= -0.25 * width - 1e-12);
            assert!(w.max_y() <= 0.25 * width + 1e-12);
        }
    }

    #[test]
    fn nominal_split_conserves_every_wire() {
        for (view, angle) in [(View::U, 150.0), (View::V, 30.0)] {
            let full = nominal_set(view, angle);
            let straddling = full.iter().filter(|w| w.min_y() < 0.0 && w.max_y() > 0.0).count();
            let (lower, upper) = SplitWires::new(params(angle)).execute(&full);

            assert!(straddling > 0);
            assert_eq!(lower.len() + upper.len(), full.len() + straddling);
            assert_eq!(lower.view, view);
        }
    }

    #[test]
    fn nominal_split_keeps_centers_consistent_and_in_half_panel() {
        for (view, angle) in [(View::U, 150.0), (View::V, 30.0)] {
            let full = nominal_set(view, angle);
            let (lower, upper) = SplitWires::new(params(angle)).execute(&full);
            for w in lower.iter().chain(upper.iter()) {
                let mid = nalgebra::center(&w.endpoint_a, &w.endpoint_b);
                assert_abs_diff_eq!(w.center.x, mid.x, epsilon = 1e-12);
                assert_abs_diff_eq!(w.center.y, mid.y, epsilon = 1e-12);
                assert!(w.center.y.abs() <= 0.5 * W);
                assert!(w.min_y() >= -0.25 * W - 1e-9 && w.max_y() <= 0.25 * W + 1e-9);
            }
        }
    }

    #[test]
    fn nominal_split_channels_are_dense() {
        let full = nominal_set(View::U, 150.0);
        let (lower, upper) = SplitWires::new(params(150.0)).execute(&full);
        for half in [&lower, &upper] {
            for (i, w) in half.iter().enumerate() {
                assert_eq!(w.channel as usize, i);
            }
        }
    }
}
