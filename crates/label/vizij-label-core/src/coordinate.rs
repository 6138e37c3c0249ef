//! Coordinate context handed to animation drivers.
//!
//! Only the part of the coordinate system that affects label motion is
//! modelled: a cartesian plane moves labels in straight lines, a polar
//! coordinate moves them along the arc around its centre.

use serde::{Deserialize, Serialize};

use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Coordinate {
    #[default]
    Cartesian,
    Polar {
        center: [f32; 2],
    },
}

#[inline]
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Coordinate {
    pub fn polar(cx: f32, cy: f32) -> Self {
        Coordinate::Polar { center: [cx, cy] }
    }

    #[inline]
    pub fn is_polar(&self) -> bool {
        matches!(self, Coordinate::Polar { .. })
    }

    /// Interpolate a label position from `from` to `to` at progress `t`.
    ///
    /// Polar: angle takes the shortest arc, radius is linear.
    pub fn interpolate_point(&self, from: [f32; 2], to: [f32; 2], t: f32) -> [f32; 2] {
        match self {
            Coordinate::Cartesian => [lerp_f32(from[0], to[0], t), lerp_f32(from[1], to[1], t)],
            Coordinate::Polar { center } => {
                let (a0, r0) = to_polar(*center, from);
                let (a1, r1) = to_polar(*center, to);
                let mut delta = a1 - a0;
                if delta > PI {
                    delta -= TAU;
                } else if delta < -PI {
                    delta += TAU;
                }
                let angle = a0 + delta * t;
                let radius = lerp_f32(r0, r1, t);
                [
                    center[0] + radius * angle.cos(),
                    center[1] + radius * angle.sin(),
                ]
            }
        }
    }
}

fn to_polar(center: [f32; 2], p: [f32; 2]) -> (f32, f32) {
    let dx = p[0] - center[0];
    let dy = p[1] - center[1];
    (dy.atan2(dx), (dx * dx + dy * dy).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-4, "left={a} right={b}");
    }

    #[test]
    fn cartesian_is_linear() {
        let p = Coordinate::Cartesian.interpolate_point([0.0, 10.0], [10.0, 30.0], 0.5);
        approx(p[0], 5.0);
        approx(p[1], 20.0);
    }

    #[test]
    fn polar_moves_along_the_arc() {
        let c = Coordinate::polar(0.0, 0.0);
        // quarter turn from (10, 0) to (0, 10); midpoint stays on the circle
        let p = c.interpolate_point([10.0, 0.0], [0.0, 10.0], 0.5);
        approx((p[0] * p[0] + p[1] * p[1]).sqrt(), 10.0);
        approx(p[0], p[1]);
    }

    #[test]
    fn polar_takes_the_short_way_round() {
        let c = Coordinate::polar(0.0, 0.0);
        let from = [10.0 * (170f32.to_radians()).cos(), 10.0 * (170f32.to_radians()).sin()];
        let to = [10.0 * (-170f32.to_radians()).cos(), 10.0 * (-170f32.to_radians()).sin()];
        let p = c.interpolate_point(from, to, 0.5);
        approx(p[0], -10.0);
        approx(p[1], 0.0);
    }
}
