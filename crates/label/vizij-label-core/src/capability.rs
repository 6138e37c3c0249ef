//! Per-chart-type label capabilities.
//!
//! The engine depends on two narrow traits: one computing the attribute sets
//! of an element's labels, one adjusting a drawn shape afterwards. Both are
//! optional; a strategy without an attribute source draws nothing.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::LabelConfig;
use crate::geometry::Element;
use crate::shape::TextShape;
use crate::value::{AttrValue, LabelAttributes};

/// Computes zero or more label attribute sets for an element.
pub trait AttributeSource {
    fn compute(&self, element: &Element, index: usize) -> Vec<LabelAttributes>;
}

impl<F> AttributeSource for F
where
    F: Fn(&Element, usize) -> Vec<LabelAttributes>,
{
    fn compute(&self, element: &Element, index: usize) -> Vec<LabelAttributes> {
        self(element, index)
    }
}

/// Repositions or restyles a drawn label. Calling [`TextShape::destroy`]
/// suppresses the label for this pass.
pub trait LabelAdjuster {
    fn adjust(&self, shape: &mut TextShape, element: &Element, index: usize);
}

impl<F> LabelAdjuster for F
where
    F: Fn(&mut TextShape, &Element, usize),
{
    fn adjust(&self, shape: &mut TextShape, element: &Element, index: usize) {
        self(shape, element, index)
    }
}

/// The pair of capabilities a chart type plugs into the pipeline.
#[derive(Default)]
pub struct LabelStrategy {
    pub attributes: Option<Box<dyn AttributeSource>>,
    pub adjuster: Option<Box<dyn LabelAdjuster>>,
}

impl LabelStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(mut self, source: impl AttributeSource + 'static) -> Self {
        self.attributes = Some(Box::new(source));
        self
    }

    pub fn with_adjuster(mut self, adjuster: impl LabelAdjuster + 'static) -> Self {
        self.adjuster = Some(Box::new(adjuster));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_none()
    }
}

impl fmt::Debug for LabelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelStrategy")
            .field("attributes", &self.attributes.is_some())
            .field("adjuster", &self.adjuster.is_some())
            .finish()
    }
}

/// Chart-agnostic strategy: one label per datum at the mapped point.
#[derive(Clone, Debug, Default)]
pub struct BaseLabel {
    pub content: Option<String>,
    pub offset: [f32; 2],
    pub style: BTreeMap<String, AttrValue>,
}

impl BaseLabel {
    pub fn from_config(cfg: &LabelConfig) -> Self {
        Self {
            content: cfg.content.clone(),
            offset: cfg.offset,
            style: cfg.style.clone(),
        }
    }

    /// Strategy bundle registered as `"base"`.
    pub fn strategy(cfg: &LabelConfig) -> LabelStrategy {
        LabelStrategy::new().with_attributes(Self::from_config(cfg))
    }
}

impl AttributeSource for BaseLabel {
    fn compute(&self, element: &Element, _index: usize) -> Vec<LabelAttributes> {
        element
            .data
            .iter()
            .map(|d| {
                let text = self
                    .content
                    .as_deref()
                    .map(|f| d.field_text(f))
                    .unwrap_or_default();
                LabelAttributes {
                    x: d.x + self.offset[0],
                    y: d.y - self.offset[1],
                    text,
                    style: self.style.clone(),
                }
            })
            .collect()
    }
}
