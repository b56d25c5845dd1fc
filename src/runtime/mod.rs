//! Runtime for the codec transform.
//!
//! This module holds the configuration layer, the per-record transformer and
//! the tag rewriting used by the output-style integration.

pub mod config_loader;
pub mod transformer;
pub mod tag;

// Re-export key types
pub use config_loader::{CodecConfig, ConfigError, OutputConfig, TransformSettings};
pub use transformer::RecordTransformer;
pub use tag::TagRewriter;
