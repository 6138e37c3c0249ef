//! Geometry collaborator contract and a serde-loadable reference geometry.
//!
//! The label engine only reads from a geometry: its kind, its ordered
//! elements, the per-datum element identity, the x/y field names and its
//! animation option.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::animation::AnimateOption;

/// Original (pre-mapping) record of one datum.
pub type Datum = serde_json::Map<String, JsonValue>;

/// Geometry kind tag. Only `Line`, `Area` and `Path` change how label
/// identities are built; the rest use the element identity unmodified.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryKind {
    #[default]
    Point,
    Line,
    Area,
    Path,
    Interval,
    Polygon,
    Schema,
    Edge,
    Heatmap,
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Area => "area",
            Self::Path => "path",
            Self::Interval => "interval",
            Self::Polygon => "polygon",
            Self::Schema => "schema",
            Self::Edge => "edge",
            Self::Heatmap => "heatmap",
        }
    }
}

/// One datum after data-to-visual mapping: screen position plus origin record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingDatum {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub origin: Datum,
}

impl MappingDatum {
    pub fn new(x: f32, y: f32, origin: Datum) -> Self {
        Self { x, y, origin }
    }

    /// Read a field of the origin record.
    pub fn field(&self, name: &str) -> Option<&JsonValue> {
        self.origin.get(name)
    }

    /// Field value as identity text: strings verbatim, other scalars as JSON
    /// text, missing or null as "".
    pub fn field_text(&self, name: &str) -> String {
        match self.origin.get(name) {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// One logical element of a geometry. A point or bar owns a single datum; a
/// line or area owns the whole series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub data: Vec<MappingDatum>,
}

impl Element {
    pub fn single(datum: MappingDatum) -> Self {
        Self { data: vec![datum] }
    }

    pub fn series(data: Vec<MappingDatum>) -> Self {
        Self { data }
    }

    /// Datum aligned with the `i`-th label of this element. Elements with
    /// fewer data than labels share their first datum.
    pub fn datum_for_label(&self, i: usize) -> Option<&MappingDatum> {
        self.data.get(i).or_else(|| self.data.first())
    }
}

/// Read-only view of a geometry as consumed by the label engine.
pub trait Geometry {
    fn kind(&self) -> GeometryKind;

    /// Elements in drawing order.
    fn elements(&self) -> &[Element];

    /// Base identity of the element a datum belongs to.
    fn element_id(&self, datum: &MappingDatum) -> String;

    fn x_field(&self) -> Option<&str>;

    fn y_field(&self) -> Option<&str>;

    fn animate_option(&self) -> &AnimateOption;
}

/// Plain-data geometry, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometrySpec {
    pub kind: GeometryKind,
    #[serde(default)]
    pub x_field: Option<String>,
    #[serde(default)]
    pub y_field: Option<String>,
    /// Fields that split the data into series (color, series name, ...).
    #[serde(default)]
    pub group_fields: Vec<String>,
    #[serde(default)]
    pub dodge_by: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub animate: AnimateOption,
}

impl GeometrySpec {
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_fields(mut self, x: &str, y: &str) -> Self {
        self.x_field = Some(x.to_string());
        self.y_field = Some(y.to_string());
        self
    }

    pub fn with_group_field(mut self, field: &str) -> Self {
        self.group_fields.push(field.to_string());
        self
    }

    pub fn from_json(raw: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl Geometry for GeometrySpec {
    fn kind(&self) -> GeometryKind {
        self.kind
    }

    fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Bars and boxes are keyed by x, series shapes by their kind, everything
    /// else by x and y; group and dodge fields are appended.
    fn element_id(&self, datum: &MappingDatum) -> String {
        let x = datum.field_text(self.x_field.as_deref().unwrap_or("x"));
        let y = datum.field_text(self.y_field.as_deref().unwrap_or("y"));
        let mut id = match self.kind {
            GeometryKind::Interval | GeometryKind::Schema => x,
            GeometryKind::Line | GeometryKind::Area | GeometryKind::Path => {
                self.kind.name().to_string()
            }
            _ => format!("{x}-{y}"),
        };
        for field in &self.group_fields {
            id.push('-');
            id.push_str(&datum.field_text(field));
        }
        if let Some(dodge) = &self.dodge_by {
            id.push('-');
            id.push_str(&datum.field_text(dodge));
        }
        id
    }

    fn x_field(&self) -> Option<&str> {
        self.x_field.as_deref()
    }

    fn y_field(&self) -> Option<&str> {
        self.y_field.as_deref()
    }

    fn animate_option(&self) -> &AnimateOption {
        &self.animate
    }
}
