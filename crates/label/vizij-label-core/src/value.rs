//! Label attribute values.
//!
//! A [`LabelAttributes`] is the resolved visual state of one text label at one
//! render pass: position, text content and a typed style map. Snapshots are
//! compared structurally, so "did this label change" is plain `==`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Style key read by drivers that fade labels in and out.
pub const OPACITY: &str = "opacity";

/// One style attribute value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum AttrValue {
    /// Scalar (font size, opacity, rotation, ...)
    Float(f32),

    /// Flag; step-only for interpolation
    Bool(bool),

    /// Text (font family, alignment, ...); step-only for interpolation
    Text(String),

    /// RGBA color (linear by convention)
    ColorRgba([f32; 4]),
}

impl AttrValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Resolved visual attributes of a text label.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelAttributes {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, AttrValue>,
}

impl LabelAttributes {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            style: BTreeMap::new(),
        }
    }

    /// Builder-style style insertion.
    pub fn with_style(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.style.insert(key.into(), value);
        self
    }

    #[inline]
    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn set_position(&mut self, p: [f32; 2]) {
        self.x = p[0];
        self.y = p[1];
    }

    pub fn style(&self, key: &str) -> Option<&AttrValue> {
        self.style.get(key)
    }

    pub fn set_style(&mut self, key: impl Into<String>, value: AttrValue) {
        self.style.insert(key.into(), value);
    }

    /// Effective opacity; labels without an explicit value are fully opaque.
    pub fn opacity(&self) -> f32 {
        self.style
            .get(OPACITY)
            .and_then(AttrValue::as_float)
            .unwrap_or(1.0)
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.style
            .insert(OPACITY.to_string(), AttrValue::Float(opacity));
    }

    /// Names of the attributes that differ between `self` and `other`.
    /// Position and text are reported as `"x"`, `"y"` and `"text"`.
    pub fn changed_keys<'a>(&'a self, other: &'a LabelAttributes) -> Vec<&'a str> {
        let mut out = Vec::new();
        if self.x != other.x {
            out.push("x");
        }
        if self.y != other.y {
            out.push("y");
        }
        if self.text != other.text {
            out.push("text");
        }
        for (key, value) in &self.style {
            if other.style.get(key) != Some(value) {
                out.push(key.as_str());
            }
        }
        for key in other.style.keys() {
            if !self.style.contains_key(key) {
                out.push(key.as_str());
            }
        }
        out
    }
}
