//! Error types for label component assembly.
//!
//! Render cycles never fail; these errors only surface while wiring a
//! component together (registry lookup, loading JSON configuration).

/// Errors raised while assembling label components.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum LabelError {
    /// No factory registered under the requested label type
    #[error("Unknown label type: {tag}")]
    UnknownLabelType { tag: String },

    /// Configuration or geometry JSON did not parse
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LabelError>;
