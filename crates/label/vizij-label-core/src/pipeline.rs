//! Label drawing pipeline: one pass over a geometry's elements.
//!
//! For every element the attribute source yields label attribute sets; each
//! set gets an identity, a shape and an optional adjustment. Shapes that
//! survive adjustment are recorded in the pass's snapshot map.

use serde::{Deserialize, Serialize};

use crate::capability::LabelStrategy;
use crate::geometry::Geometry;
use crate::group::LabelGroup;
use crate::identity::resolve_label_id;
use crate::shape::ShapeMeta;
use crate::snapshot::LabelConfigMap;

/// Counters for one drawing pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    /// Labels recorded in the snapshot.
    pub drawn: usize,
    /// Labels destroyed by the adjuster.
    pub suppressed: usize,
    /// Attribute sets without any datum to derive an identity from.
    pub skipped: usize,
}

/// Draw the labels of every element of `geometry` into `group`, recording
/// the post-adjustment attributes in `snapshot`.
///
/// The caller clears `group` and `snapshot` beforehand. A missing attribute
/// source draws nothing.
pub fn draw_labels<G: Geometry + ?Sized>(
    geometry: &G,
    strategy: &LabelStrategy,
    group: &mut LabelGroup,
    snapshot: &mut LabelConfigMap,
) -> DrawOutcome {
    let mut outcome = DrawOutcome::default();
    let Some(source) = strategy.attributes.as_deref() else {
        log::trace!("no label attribute source; nothing drawn");
        return outcome;
    };

    for (index, element) in geometry.elements().iter().enumerate() {
        for (i, attrs) in source.compute(element, index).into_iter().enumerate() {
            let Some(datum) = element.datum_for_label(i) else {
                outcome.skipped += 1;
                continue;
            };
            let label_id = resolve_label_id(geometry, datum);
            let meta = ShapeMeta {
                element_index: index,
                datum_index: if i < element.data.len() { i } else { 0 },
                origin: datum.origin.clone(),
            };
            let shape_id = group.add_text(label_id.clone(), attrs, Some(meta));

            let Some(shape) = group.get_mut(shape_id) else {
                continue;
            };
            if let Some(adjuster) = strategy.adjuster.as_deref() {
                adjuster.adjust(shape, element, index);
            }
            if shape.is_destroyed() {
                log::trace!("label '{label_id}' suppressed by adjuster");
                group.remove(shape_id);
                // an earlier duplicate of this identity is gone with the shape
                if snapshot.remove(&label_id).is_some() {
                    outcome.drawn -= 1;
                }
                outcome.suppressed += 1;
                continue;
            }
            if snapshot
                .insert(label_id, shape.attrs().clone())
                .is_none()
            {
                outcome.drawn += 1;
            }
        }
    }
    outcome
}
