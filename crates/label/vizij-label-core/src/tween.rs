//! Frame-driven reference animation driver.
//!
//! - appear: fade in from `opacity = 0` to the target attributes
//! - update: interpolate from the shape's start attributes to the target
//! - leave: fade out to `opacity = 0`, then remove the shape from its group
//!
//! Numbers and colors interpolate; text and other step values switch to the
//! target immediately. Positions follow the request's coordinate.

use std::collections::BTreeMap;

use crate::animation::{AnimationPhase, AnimationRequest, Animator, TransitionSpec};
use crate::coordinate::Coordinate;
use crate::group::LabelGroup;
use crate::ids::ShapeId;
use crate::shape::TextShape;
use crate::value::{AttrValue, LabelAttributes, OPACITY};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

/// Attributes at eased progress `t` between `from` and `to`.
/// The result carries exactly the style keys of `to`.
pub fn blend_attrs(
    from: &LabelAttributes,
    to: &LabelAttributes,
    t: f32,
    coordinate: &Coordinate,
) -> LabelAttributes {
    let mut style = BTreeMap::new();
    for (key, target) in &to.style {
        let value = match (from.style.get(key), target) {
            (Some(AttrValue::Float(a)), AttrValue::Float(b)) => AttrValue::Float(lerp_f32(*a, *b, t)),
            (Some(AttrValue::ColorRgba(a)), AttrValue::ColorRgba(b)) => {
                AttrValue::ColorRgba(lerp_vec4(*a, *b, t))
            }
            _ => target.clone(),
        };
        style.insert(key.clone(), value);
    }
    let [x, y] = coordinate.interpolate_point(from.position(), to.position(), t);
    LabelAttributes {
        x,
        y,
        text: to.text.clone(),
        style,
    }
}

#[derive(Debug)]
struct Tween {
    shape: ShapeId,
    phase: AnimationPhase,
    spec: TransitionSpec,
    from: LabelAttributes,
    to: LabelAttributes,
    /// Attributes applied when an appear/update finishes.
    target: LabelAttributes,
    coordinate: Coordinate,
    elapsed_ms: f32,
    remove_on_finish: bool,
}

#[derive(Debug, Default)]
pub struct Tweener {
    tweens: Vec<Tween>,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase of the running tween on `shape`, if any.
    pub fn phase_of(&self, shape: ShapeId) -> Option<AnimationPhase> {
        self.tweens
            .iter()
            .find(|t| t.shape == shape)
            .map(|t| t.phase)
    }

    /// Stop animating `shape`, leaving it at its current attributes.
    pub fn stop(&mut self, shape: ShapeId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.shape != shape);
        self.tweens.len() != before
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

impl Animator for Tweener {
    fn apply(&mut self, shape: &mut TextShape, request: AnimationRequest) {
        let current = shape.attrs().clone();
        let (from, to, target, remove_on_finish) = match (request.phase, request.to_attrs) {
            (_, None) => {
                let mut from = current.clone();
                from.set_opacity(current.opacity());
                let mut to = current.clone();
                to.set_opacity(0.0);
                (from, to, current, true)
            }
            (AnimationPhase::Appear, Some(target)) => {
                let mut to = target.clone();
                if to.style(OPACITY).is_none() {
                    to.set_opacity(1.0);
                }
                let mut from = to.clone();
                from.set_opacity(0.0);
                (from, to, target, false)
            }
            (_, Some(target)) => (current, target.clone(), target, false),
        };
        shape.set_attrs(from.clone());

        // a newer request on the same shape supersedes the running one
        self.stop(request.shape);
        self.tweens.push(Tween {
            shape: request.shape,
            phase: request.phase,
            spec: request.spec,
            from,
            to,
            target,
            coordinate: request.coordinate,
            elapsed_ms: 0.0,
            remove_on_finish,
        });
    }

    fn advance(&mut self, dt_ms: f32, group: &mut LabelGroup) -> usize {
        let mut finished = 0;
        self.tweens.retain_mut(|tw| {
            tw.elapsed_ms += dt_ms;
            let Some(shape) = group.get_mut(tw.shape) else {
                return false;
            };
            if shape.is_destroyed() {
                return false;
            }
            let active_ms = tw.elapsed_ms - tw.spec.delay as f32;
            if active_ms < 0.0 {
                return true;
            }
            let t = if tw.spec.duration == 0 {
                1.0
            } else {
                (active_ms / tw.spec.duration as f32).min(1.0)
            };
            if t >= 1.0 {
                finished += 1;
                if tw.remove_on_finish {
                    group.remove(tw.shape);
                } else {
                    shape.set_attrs(tw.target.clone());
                }
                return false;
            }
            shape.set_attrs(blend_attrs(
                &tw.from,
                &tw.to,
                tw.spec.easing.apply(t),
                &tw.coordinate,
            ));
            true
        });
        finished
    }

    fn in_flight(&self) -> usize {
        self.tweens.len()
    }
}
