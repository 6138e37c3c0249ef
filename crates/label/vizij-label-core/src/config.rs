//! Label component configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::value::AttrValue;

/// Configuration for one label component.
/// Keep this minimal; chart types read their own extras from `style`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelConfig {
    /// Registry tag selecting the attribute/adjust strategy.
    #[serde(rename = "type")]
    pub label_type: String,
    /// Origin field rendered as label text. Defaults to the geometry's y field.
    pub content: Option<String>,
    /// Offset from the mapped point: `[dx, dy]`, dy pointing up.
    pub offset: [f32; 2],
    /// Static style applied to every label.
    pub style: BTreeMap<String, AttrValue>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            label_type: "base".to_string(),
            content: None,
            offset: [0.0, 12.0],
            style: BTreeMap::new(),
        }
    }
}

impl LabelConfig {
    pub fn from_json(raw: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Field used for label text: explicit `content`, else the geometry's y field.
    pub fn content_field<G: Geometry + ?Sized>(&self, geometry: &G) -> Option<String> {
        self.content
            .clone()
            .or_else(|| geometry.y_field().map(str::to_string))
    }

    /// Copy with geometry-derived defaults filled in.
    pub fn resolved_for<G: Geometry + ?Sized>(&self, geometry: &G) -> Self {
        Self {
            content: self.content_field(geometry),
            ..self.clone()
        }
    }
}
