//! Reconciliation of two consecutive label snapshots.
//!
//! Every identity is classified exactly once:
//! - update: in both maps. The live shape is reset to the previous
//!   attributes, then transitioned to the current ones.
//! - appear: only in the current map. Transitioned in towards the attributes
//!   already applied by the pipeline.
//! - leave: only in the previous map. A transient shape is rebuilt from the
//!   previous attributes and transitioned out (`to_attrs = None`).
//!
//! A phase without a transition spec changes state instantly: updated shapes
//! keep their current attributes, leaving labels are simply not redrawn.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimateCfg, AnimationPhase, AnimationRequest, Animator};
use crate::coordinate::Coordinate;
use crate::group::LabelGroup;
use crate::ids::LabelId;
use crate::snapshot::LabelConfigMap;

/// Classification of one reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileReport {
    #[serde(default)]
    pub appeared: Vec<LabelId>,
    #[serde(default)]
    pub updated: Vec<LabelId>,
    /// Updates whose attributes did not change.
    #[serde(default)]
    pub unchanged: usize,
    #[serde(default)]
    pub left: Vec<LabelId>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.appeared.is_empty() && self.updated.is_empty() && self.left.is_empty()
    }
}

/// Diff `previous` against `current` and issue the resulting animations.
pub fn reconcile<A: Animator + ?Sized>(
    previous: &LabelConfigMap,
    current: &LabelConfigMap,
    group: &mut LabelGroup,
    animator: &mut A,
    cfg: &AnimateCfg,
    coordinate: &Coordinate,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut outstanding: HashSet<&LabelId> = previous.ids().collect();

    for (id, attrs) in current.iter() {
        match previous.get(id) {
            Some(prev) => {
                outstanding.remove(id);
                report.updated.push(id.clone());
                if prev == attrs {
                    report.unchanged += 1;
                }
                let Some(spec) = cfg.update.as_ref() else {
                    continue;
                };
                let Some(shape) = group.find_id(id).and_then(|sid| group.get_mut(sid)) else {
                    log::trace!("update '{id}': no live shape, animation skipped");
                    continue;
                };
                log::trace!("update '{id}': {:?}", prev.changed_keys(attrs));
                shape.set_attrs(prev.clone());
                let shape_id = shape.id();
                animator.apply(
                    shape,
                    AnimationRequest {
                        shape: shape_id,
                        label_id: id.clone(),
                        phase: AnimationPhase::Update,
                        spec: spec.clone(),
                        to_attrs: Some(attrs.clone()),
                        coordinate: coordinate.clone(),
                    },
                );
            }
            None => {
                report.appeared.push(id.clone());
                let Some(spec) = cfg.appear.as_ref() else {
                    continue;
                };
                let Some(shape) = group.find_id(id).and_then(|sid| group.get_mut(sid)) else {
                    log::trace!("appear '{id}': no live shape, animation skipped");
                    continue;
                };
                log::trace!("appear '{id}'");
                let shape_id = shape.id();
                animator.apply(
                    shape,
                    AnimationRequest {
                        shape: shape_id,
                        label_id: id.clone(),
                        phase: AnimationPhase::Appear,
                        spec: spec.clone(),
                        to_attrs: Some(attrs.clone()),
                        coordinate: coordinate.clone(),
                    },
                );
            }
        }
    }

    for (id, prev) in previous.iter() {
        if !outstanding.contains(id) {
            continue;
        }
        report.left.push(id.clone());
        let Some(spec) = cfg.leave.as_ref() else {
            log::trace!("leave '{id}': removed without animation");
            continue;
        };
        log::trace!("leave '{id}'");
        let shape_id = group.add_transient(id.clone(), prev.clone());
        if let Some(shape) = group.get_mut(shape_id) {
            animator.apply(
                shape,
                AnimationRequest {
                    shape: shape_id,
                    label_id: id.clone(),
                    phase: AnimationPhase::Leave,
                    spec: spec.clone(),
                    to_attrs: None,
                    coordinate: coordinate.clone(),
                },
            );
        }
    }

    report
}
