//! Text shape primitive owned by a [`crate::group::LabelGroup`].

use crate::geometry::Datum;
use crate::ids::{LabelId, ShapeId};
use crate::value::LabelAttributes;

/// Why a shape is in the group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeRole {
    /// Drawn by the current pass; indexed by label identity.
    Label,
    /// Re-created from a previous snapshot to animate a leaving label out.
    Exiting,
}

/// Data the pipeline attaches to a drawn label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeMeta {
    pub element_index: usize,
    pub datum_index: usize,
    pub origin: Datum,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    id: ShapeId,
    label_id: LabelId,
    role: ShapeRole,
    attrs: LabelAttributes,
    meta: Option<ShapeMeta>,
    destroyed: bool,
}

impl TextShape {
    pub(crate) fn new(
        id: ShapeId,
        label_id: LabelId,
        role: ShapeRole,
        attrs: LabelAttributes,
        meta: Option<ShapeMeta>,
    ) -> Self {
        Self {
            id,
            label_id,
            role,
            attrs,
            meta,
            destroyed: false,
        }
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[inline]
    pub fn label_id(&self) -> &LabelId {
        &self.label_id
    }

    #[inline]
    pub fn role(&self) -> ShapeRole {
        self.role
    }

    #[inline]
    pub fn attrs(&self) -> &LabelAttributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut LabelAttributes {
        &mut self.attrs
    }

    pub fn set_attrs(&mut self, attrs: LabelAttributes) {
        self.attrs = attrs;
    }

    pub fn meta(&self) -> Option<&ShapeMeta> {
        self.meta.as_ref()
    }

    pub(crate) fn set_meta(&mut self, meta: Option<ShapeMeta>) {
        self.meta = meta;
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Flag the shape as destroyed. Adjusters call this to suppress a label;
    /// the pipeline then removes it from the group.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}
