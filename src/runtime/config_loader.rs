//! Codec transform configuration loader and validation.
//!
//! Loads the transform configuration from YAML and validates it once, before
//! any record is processed. A configuration that fails validation never yields
//! a [`TransformSettings`], so no transformer can be built from it.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::codec::Codec;
use crate::codec_registry::CodecRegistry;

/// Configuration errors. Fatal: the transformer is never produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `field` or `codec` missing or empty
    #[error("'{0}' is required to be set (both 'field' and 'codec' are required)")]
    MissingRequired(&'static str),

    /// Codec name does not resolve in the registry
    #[error("unknown codec: {name} (available: {available})")]
    UnknownCodec { name: String, available: String },

    /// Output-style integration configured without any tag rewrite
    #[error(
        "at least one of remove_tag_prefix/remove_tag_suffix/add_tag_prefix/add_tag_suffix is required to be set"
    )]
    MissingTagRewrite,

    /// Config file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for this configuration
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Raw, unvalidated codec transform configuration.
///
/// # Example
/// ```yaml
/// field: key1
/// output_field: key2
/// codec: base64-decode
/// error_value: foo
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Source field name (required)
    #[serde(default)]
    pub field: Option<String>,

    /// Output field name; defaults to `field`
    #[serde(default)]
    pub output_field: Option<String>,

    /// Codec name (required, must be registered)
    #[serde(default)]
    pub codec: Option<String>,

    /// Value written to the output field when the codec fails
    #[serde(default)]
    pub error_value: String,
}

impl CodecConfig {
    /// Create a config with the two required settings.
    pub fn new(field: impl Into<String>, codec: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            codec: Some(codec.into()),
            ..Self::default()
        }
    }

    /// Sets the output field.
    pub fn with_output_field(mut self, output_field: impl Into<String>) -> Self {
        self.output_field = Some(output_field.into());
        self
    }

    /// Sets the error value.
    pub fn with_error_value(mut self, error_value: impl Into<String>) -> Self {
        self.error_value = error_value.into();
        self
    }

    /// Load configuration from a YAML file.
    ///
    /// The file is only parsed here; call [`CodecConfig::validate`] (or build a
    /// transformer) to check it.
    ///
    /// # Example
    /// ```ignore
    /// use fieldcodec::CodecConfig;
    ///
    /// let config = CodecConfig::load_from_file("config/codec.yaml")?;
    /// let settings = config.validate()?;
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Validate against the built-in codec registry.
    pub fn validate(&self) -> Result<TransformSettings, ConfigError> {
        self.validate_with(CodecRegistry::builtin())
    }

    /// Validate against a specific registry.
    ///
    /// # Errors
    /// * [`ConfigError::MissingRequired`] - `field` or `codec` is missing or empty
    /// * [`ConfigError::UnknownCodec`] - `codec` is not registered
    pub fn validate_with(&self, registry: &CodecRegistry) -> Result<TransformSettings, ConfigError> {
        let field = non_empty(&self.field).ok_or(ConfigError::MissingRequired("field"))?;
        let codec_name = non_empty(&self.codec).ok_or(ConfigError::MissingRequired("codec"))?;

        let codec = registry
            .lookup(codec_name)
            .ok_or_else(|| ConfigError::UnknownCodec {
                name: codec_name.to_string(),
                available: registry.list_codecs().join(", "),
            })?;

        let output_field = non_empty(&self.output_field).unwrap_or(field);

        Ok(TransformSettings {
            source_field: field.to_string(),
            output_field: output_field.to_string(),
            codec,
            error_value: self.error_value.clone(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Validated transform configuration.
///
/// Only produced by [`CodecConfig::validate`], so the codec is always a
/// registered one and the source field is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSettings {
    source_field: String,
    output_field: String,
    codec: Codec,
    error_value: String,
}

impl TransformSettings {
    pub fn source_field(&self) -> &str {
        &self.source_field
    }

    pub fn output_field(&self) -> &str {
        &self.output_field
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn error_value(&self) -> &str {
        &self.error_value
    }

    /// True when the result overwrites the source field.
    pub fn in_place(&self) -> bool {
        self.source_field == self.output_field
    }
}

/// Configuration for the output-style integration: the codec settings plus
/// tag rewriting.
///
/// # Example
/// ```yaml
/// add_tag_prefix: decoded.
/// field: key1
/// codec: base64-decode
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(flatten)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub remove_tag_prefix: Option<String>,

    #[serde(default)]
    pub remove_tag_suffix: Option<String>,

    #[serde(default)]
    pub add_tag_prefix: Option<String>,

    #[serde(default)]
    pub add_tag_suffix: Option<String>,
}

impl OutputConfig {
    pub fn new(codec: CodecConfig) -> Self {
        Self {
            codec,
            ..Self::default()
        }
    }

    pub fn with_add_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.add_tag_prefix = Some(prefix.into());
        self
    }

    pub fn with_add_tag_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.add_tag_suffix = Some(suffix.into());
        self
    }

    pub fn with_remove_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.remove_tag_prefix = Some(prefix.into());
        self
    }

    pub fn with_remove_tag_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.remove_tag_suffix = Some(suffix.into());
        self
    }

    /// Load output configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse output configuration from a YAML string.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// True when at least one non-empty tag rewrite option is set.
    pub fn has_tag_rewrite(&self) -> bool {
        [
            &self.remove_tag_prefix,
            &self.remove_tag_suffix,
            &self.add_tag_prefix,
            &self.add_tag_suffix,
        ]
        .into_iter()
        .any(|opt| non_empty(opt).is_some())
    }
}
