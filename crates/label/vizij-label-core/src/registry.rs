//! Explicit registry of label strategies keyed by chart type tag.
//!
//! Built once during application start-up and handed to whoever assembles
//! label components; nothing is registered implicitly.

use hashbrown::HashMap;
use std::fmt;

use crate::capability::{BaseLabel, LabelStrategy};
use crate::config::LabelConfig;
use crate::error::{LabelError, Result};

pub type LabelFactory = Box<dyn Fn(&LabelConfig) -> LabelStrategy>;

#[derive(Default)]
pub struct LabelRegistry {
    factories: HashMap<String, LabelFactory>,
}

impl LabelRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the chart-agnostic `"base"` strategy.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.register("base", BaseLabel::strategy);
        reg
    }

    /// Register (or replace) the factory for `tag`. Returns true when a
    /// previous factory was replaced.
    pub fn register<F>(&mut self, tag: &str, factory: F) -> bool
    where
        F: Fn(&LabelConfig) -> LabelStrategy + 'static,
    {
        self.factories
            .insert(tag.to_string(), Box::new(factory))
            .is_some()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build the strategy for `cfg.label_type`.
    pub fn create(&self, cfg: &LabelConfig) -> Result<LabelStrategy> {
        match self.factories.get(cfg.label_type.as_str()) {
            Some(factory) => Ok(factory(cfg)),
            None => {
                log::warn!("no label factory registered for type '{}'", cfg.label_type);
                Err(LabelError::UnknownLabelType {
                    tag: cfg.label_type.clone(),
                })
            }
        }
    }
}

impl fmt::Debug for LabelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("LabelRegistry").field("tags", &tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_base() {
        let reg = LabelRegistry::with_defaults();
        assert!(reg.contains("base"));
        let strategy = reg.create(&LabelConfig::default()).expect("base strategy");
        assert!(strategy.attributes.is_some());
        assert!(strategy.adjuster.is_none());
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let reg = LabelRegistry::new();
        let cfg = LabelConfig {
            label_type: "pie".into(),
            ..LabelConfig::default()
        };
        match reg.create(&cfg) {
            Err(LabelError::UnknownLabelType { tag }) => assert_eq!(tag, "pie"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn register_replaces() {
        let mut reg = LabelRegistry::with_defaults();
        assert!(!reg.register("bar", |_cfg: &LabelConfig| LabelStrategy::new()));
        assert!(reg.register("bar", BaseLabel::strategy));
        let mut tags: Vec<&str> = reg.tags().collect();
        tags.sort_unstable();
        assert_eq!(tags, vec!["bar", "base"]);
    }
}
