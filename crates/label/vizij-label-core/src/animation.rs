//! Animation contract between the reconciliation engine and a driver.
//!
//! The engine never waits on an animation. Each appear/update/leave decision
//! becomes an [`AnimationRequest`] handed to an [`Animator`]; the driver owns
//! timing and easing from there on.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::group::LabelGroup;
use crate::ids::{LabelId, ShapeId};
use crate::shape::TextShape;
use crate::value::LabelAttributes;

/// Easing curves understood by the bundled drivers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "easeQuadIn")]
    QuadIn,
    #[serde(rename = "easeQuadOut")]
    QuadOut,
    #[serde(rename = "easeQuadInOut")]
    QuadInOut,
    #[serde(rename = "easeCubicIn")]
    CubicIn,
    #[serde(rename = "easeCubicOut")]
    CubicOut,
    #[serde(rename = "easeCubicInOut")]
    CubicInOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
        }
    }
}

/// Timing of one transition. Durations and delays are milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration: u32,
    #[serde(default)]
    pub delay: u32,
    #[serde(default)]
    pub easing: Easing,
}

impl TransitionSpec {
    pub fn new(duration: u32, easing: Easing) -> Self {
        Self {
            duration,
            delay: 0,
            easing,
        }
    }
}

/// Which reconciliation outcome triggered a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationPhase {
    Appear,
    Update,
    Leave,
}

/// Per-geometry animation option, as configured by the chart.
///
/// `enabled: false` switches every phase off; otherwise each phase is
/// independently optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimateOption {
    pub enabled: bool,
    pub appear: Option<TransitionSpec>,
    pub update: Option<TransitionSpec>,
    pub leave: Option<TransitionSpec>,
}

impl Default for AnimateOption {
    fn default() -> Self {
        Self {
            enabled: true,
            appear: Some(TransitionSpec::new(450, Easing::QuadOut)),
            update: Some(TransitionSpec::new(400, Easing::QuadInOut)),
            leave: Some(TransitionSpec::new(350, Easing::QuadIn)),
        }
    }
}

impl AnimateOption {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Resolve into the per-cycle configuration used by reconciliation.
    pub fn resolve(&self) -> AnimateCfg {
        if !self.enabled {
            return AnimateCfg::default();
        }
        AnimateCfg {
            appear: self.appear.clone(),
            update: self.update.clone(),
            leave: self.leave.clone(),
        }
    }
}

/// Animation configuration resolved once per render cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimateCfg {
    pub appear: Option<TransitionSpec>,
    pub update: Option<TransitionSpec>,
    pub leave: Option<TransitionSpec>,
}

impl AnimateCfg {
    pub fn spec(&self, phase: AnimationPhase) -> Option<&TransitionSpec> {
        match phase {
            AnimationPhase::Appear => self.appear.as_ref(),
            AnimationPhase::Update => self.update.as_ref(),
            AnimationPhase::Leave => self.leave.as_ref(),
        }
    }
}

/// One fire-and-forget transition request.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRequest {
    pub shape: ShapeId,
    pub label_id: LabelId,
    pub phase: AnimationPhase,
    pub spec: TransitionSpec,
    /// Goal attributes; `None` animates to an invisible terminal state and
    /// then destroys the shape.
    pub to_attrs: Option<LabelAttributes>,
    pub coordinate: Coordinate,
}

/// Animation driver capability.
///
/// `apply` is called synchronously during reconciliation with the target
/// shape already holding its start attributes. Frame-driven drivers make
/// progress in `advance`.
pub trait Animator {
    fn apply(&mut self, shape: &mut TextShape, request: AnimationRequest);

    /// Advance running transitions by `dt_ms`; returns how many finished.
    fn advance(&mut self, _dt_ms: f32, _group: &mut LabelGroup) -> usize {
        0
    }

    /// Number of transitions still running.
    fn in_flight(&self) -> usize {
        0
    }
}

/// Driver that only records requests. Shapes are left untouched, so leave
/// transients are disposed with the next clear of the group.
#[derive(Debug, Default)]
pub struct RequestLog {
    pub requests: Vec<AnimationRequest>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Requests issued for a phase, in issue order.
    pub fn of_phase(&self, phase: AnimationPhase) -> impl Iterator<Item = &AnimationRequest> {
        self.requests.iter().filter(move |r| r.phase == phase)
    }

    /// Requests issued for one label identity, in issue order.
    pub fn for_label<'a>(&'a self, id: &'a LabelId) -> impl Iterator<Item = &'a AnimationRequest> {
        self.requests.iter().filter(move |r| &r.label_id == id)
    }
}

impl Animator for RequestLog {
    fn apply(&mut self, _shape: &mut TextShape, request: AnimationRequest) {
        self.requests.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_hit_endpoints() {
        for e in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::CubicIn,
            Easing::CubicOut,
            Easing::CubicInOut,
        ] {
            assert!((e.apply(0.0)).abs() < 1e-6, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?} at 1");
        }
        assert!(Easing::QuadIn.apply(0.5) < 0.5);
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
    }

    #[test]
    fn disabled_option_resolves_to_no_phases() {
        let cfg = AnimateOption::disabled().resolve();
        assert_eq!(cfg, AnimateCfg::default());
        assert!(cfg.spec(AnimationPhase::Appear).is_none());
    }

    #[test]
    fn option_json_overrides_single_phase() {
        let opt: AnimateOption = serde_json::from_value(serde_json::json!({
            "leave": null,
            "update": { "duration": 200, "easing": "easeCubicOut" }
        }))
        .expect("parse animate option");
        let cfg = opt.resolve();
        assert_eq!(cfg.appear, Some(TransitionSpec::new(450, Easing::QuadOut)));
        assert_eq!(cfg.update, Some(TransitionSpec::new(200, Easing::CubicOut)));
        assert!(cfg.leave.is_none());
    }
}
