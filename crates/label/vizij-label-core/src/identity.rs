//! Label identity resolution.
//!
//! A label's identity starts from its element's identity. Series geometries
//! own many labels per element, so the datum's x value (line, area) or x and
//! y values (path, which has no ordering) are appended.

use crate::geometry::{Geometry, GeometryKind, MappingDatum};
use crate::ids::LabelId;

/// Combine a base element identity with positional fields for `kind`.
pub fn compose_label_id(kind: GeometryKind, base: &str, x: &str, y: &str) -> LabelId {
    match kind {
        GeometryKind::Line | GeometryKind::Area => LabelId(format!("{base} {x}")),
        GeometryKind::Path => LabelId(format!("{base} {x}-{y}")),
        _ => LabelId(base.to_string()),
    }
}

/// Resolve the identity of the label drawn for `datum`.
pub fn resolve_label_id<G: Geometry + ?Sized>(geometry: &G, datum: &MappingDatum) -> LabelId {
    let kind = geometry.kind();
    let base = geometry.element_id(datum);
    let x = geometry
        .x_field()
        .map(|f| datum.field_text(f))
        .unwrap_or_default();
    let y = match kind {
        GeometryKind::Path => geometry
            .y_field()
            .map(|f| datum.field_text(f))
            .unwrap_or_default(),
        _ => String::new(),
    };
    compose_label_id(kind, &base, &x, &y)
}
