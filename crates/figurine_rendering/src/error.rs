//! # Rendering Error Types
//!
//! Startup operations (config, catalogs, shared resources) return these.
//! Per-frame compositing never does: it logs and skips the broken layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or feeding the compositor.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A declared visual trait has no resolvable asset.
    #[error("missing graphic asset: {0}")]
    MissingAsset(String),

    /// A raw facing index outside `0..=3`.
    #[error("invalid facing value: {0}")]
    InvalidFacing(i32),

    /// Two depth tags are out of canonical order.
    #[error("depth table out of order: {lower} ({lower_value}) must be below {upper} ({upper_value})")]
    DepthOrder {
        /// Tag that must render underneath.
        lower: &'static str,
        /// Its configured offset.
        lower_value: f32,
        /// Tag that must render on top.
        upper: &'static str,
        /// Its configured offset.
        upper_value: f32,
    },

    /// The posture lookup table failed startup validation.
    #[error("invalid posture table: {0}")]
    InvalidPostureTable(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A config or catalog file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A config or catalog file is not valid TOML for its schema.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for rendering setup operations.
pub type RenderResult<T> = Result<T, RenderError>;
