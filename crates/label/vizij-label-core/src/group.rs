//! Scene-graph container holding one component's label shapes.

use hashbrown::HashMap;
use indexmap::IndexMap;

use crate::ids::{IdAllocator, LabelId, ShapeId};
use crate::shape::{ShapeMeta, ShapeRole, TextShape};
use crate::value::LabelAttributes;

/// Exclusively owned by one label component.
///
/// Label shapes are indexed by identity (at most one live shape each);
/// exiting transients are reachable by [`ShapeId`] only.
#[derive(Debug)]
pub struct LabelGroup {
    ids: IdAllocator,
    shapes: IndexMap<ShapeId, TextShape>,
    by_label: HashMap<LabelId, ShapeId>,
    visible: bool,
}

impl Default for LabelGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelGroup {
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            shapes: IndexMap::new(),
            by_label: HashMap::new(),
            visible: true,
        }
    }

    /// Draw a label shape, or re-use the live one already drawn for `label_id`.
    pub fn add_text(
        &mut self,
        label_id: LabelId,
        attrs: LabelAttributes,
        meta: Option<ShapeMeta>,
    ) -> ShapeId {
        if let Some(id) = self.find_id(&label_id) {
            if let Some(shape) = self.get_mut(id) {
                shape.set_attrs(attrs);
                shape.set_meta(meta);
                return id;
            }
        }
        let id = self.ids.alloc_shape();
        self.shapes.insert(
            id,
            TextShape::new(id, label_id.clone(), ShapeRole::Label, attrs, meta),
        );
        self.by_label.insert(label_id, id);
        id
    }

    /// Insert an unindexed shape used to animate a leaving label out.
    pub fn add_transient(&mut self, label_id: LabelId, attrs: LabelAttributes) -> ShapeId {
        let id = self.ids.alloc_shape();
        self.shapes.insert(
            id,
            TextShape::new(id, label_id, ShapeRole::Exiting, attrs, None),
        );
        id
    }

    /// Live label shape for an identity. Destroyed shapes are never returned.
    pub fn find(&self, label_id: &LabelId) -> Option<&TextShape> {
        let id = *self.by_label.get(label_id)?;
        self.get(id).filter(|s| !s.is_destroyed())
    }

    pub fn find_id(&self, label_id: &LabelId) -> Option<ShapeId> {
        self.find(label_id).map(TextShape::id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&TextShape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut TextShape> {
        self.shapes.get_mut(&id)
    }

    /// Destroy a shape and drop it from the group and the identity index.
    pub fn remove(&mut self, id: ShapeId) -> Option<TextShape> {
        let mut shape = self.shapes.shift_remove(&id)?;
        shape.destroy();
        self.unindex(&shape);
        Some(shape)
    }

    /// Destroy every shape, exiting transients included.
    pub fn clear(&mut self) -> usize {
        let n = self.shapes.len();
        self.shapes.clear();
        self.by_label.clear();
        n
    }

    /// Live label shapes in drawing order.
    pub fn labels(&self) -> impl Iterator<Item = &TextShape> {
        self.shapes
            .values()
            .filter(|s| s.role() == ShapeRole::Label && !s.is_destroyed())
    }

    /// Exiting transients still in the group.
    pub fn transients(&self) -> impl Iterator<Item = &TextShape> {
        self.shapes
            .values()
            .filter(|s| s.role() == ShapeRole::Exiting && !s.is_destroyed())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn unindex(&mut self, shape: &TextShape) {
        if shape.role() == ShapeRole::Label
            && self.by_label.get(shape.label_id()) == Some(&shape.id())
        {
            self.by_label.remove(shape.label_id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(x: f32) -> LabelAttributes {
        LabelAttributes::new(x, 0.0, "t")
    }

    #[test]
    fn same_identity_reuses_live_shape() {
        let mut g = LabelGroup::new();
        let a = g.add_text("a".into(), attrs(1.0), None);
        let b = g.add_text("a".into(), attrs(2.0), None);
        assert_eq!(a, b);
        assert_eq!(g.labels().count(), 1);
        assert_eq!(g.find(&"a".into()).map(|s| s.attrs().x), Some(2.0));
    }

    #[test]
    fn destroyed_shapes_are_not_found_by_identity() {
        let mut g = LabelGroup::new();
        let a = g.add_text("a".into(), attrs(1.0), None);
        g.get_mut(a).unwrap().destroy();
        assert!(g.find(&"a".into()).is_none());
        assert!(g.remove(a).is_some());
        assert!(g.is_empty());

        // a fresh shape gets a fresh handle
        let b = g.add_text("a".into(), attrs(1.0), None);
        assert_ne!(a, b);
    }

    #[test]
    fn transients_are_not_indexed() {
        let mut g = LabelGroup::new();
        let t = g.add_transient("gone".into(), attrs(3.0));
        assert!(g.find(&"gone".into()).is_none());
        assert_eq!(g.transients().count(), 1);
        assert!(g.remove(t).is_some_and(|s| s.is_destroyed()));
        assert!(g.remove(t).is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let mut g = LabelGroup::new();
        g.add_text("a".into(), attrs(1.0), None);
        g.add_transient("b".into(), attrs(2.0));
        assert_eq!(g.clear(), 2);
        assert!(g.find(&"a".into()).is_none());
        assert_eq!(g.labels().count(), 0);
    }

    #[test]
    fn removal_keeps_drawing_order() {
        let mut g = LabelGroup::new();
        g.add_text("a".into(), attrs(1.0), None);
        let b = g.add_text("b".into(), attrs(2.0), None);
        g.add_text("c".into(), attrs(3.0), None);
        g.remove(b);
        let ids: Vec<&str> = g.labels().map(|s| s.label_id().as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(g.find(&"b".into()).is_none());
    }
}
