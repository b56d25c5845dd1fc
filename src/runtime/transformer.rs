//! Per-record codec transform.
//!
//! [`RecordTransformer`] is the ready-to-use handle produced from a validated
//! configuration. It reads the source field, runs the codec, and writes the
//! result (or the configured error value) to the output field. Codec failures
//! are recovered here and never reach the caller.

use tracing::{debug, info};
use crate::codec::CodecError;
use crate::record::{FieldValue, Record};
use crate::runtime::config_loader::{CodecConfig, ConfigError, TransformSettings};

/// Validated, stateless codec transform.
///
/// Holds only immutable settings, so one transformer can be shared between
/// threads as long as each call gets its own record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTransformer {
    settings: TransformSettings,
}

impl RecordTransformer {
    /// Validate `config` and build a transformer.
    ///
    /// # Errors
    /// Any [`ConfigError`] from validation; no transformer is produced.
    ///
    /// # Example
    /// ```
    /// use fieldcodec::{CodecConfig, RecordTransformer};
    ///
    /// let config = CodecConfig::new("key1", "base64-encode").with_output_field("key2");
    /// let transformer = RecordTransformer::new(&config).unwrap();
    /// assert_eq!(transformer.settings().output_field(), "key2");
    /// ```
    pub fn new(config: &CodecConfig) -> Result<Self, ConfigError> {
        let settings = config.validate()?;
        Ok(Self::from_settings(settings))
    }

    /// Build a transformer from already validated settings.
    pub fn from_settings(settings: TransformSettings) -> Self {
        info!(
            field = settings.source_field(),
            output_field = settings.output_field(),
            codec = %settings.codec(),
            "codec transform configured"
        );
        Self { settings }
    }

    pub fn settings(&self) -> &TransformSettings {
        &self.settings
    }

    /// Apply the codec to one record in place.
    ///
    /// A missing or `null` source field leaves the record untouched. Otherwise
    /// the output field receives the codec result, the original value when the
    /// result is falsy, or the error value when the codec fails.
    pub fn transform<'a>(&self, record: &'a mut Record) -> &'a mut Record {
        let value_out = match record.get_present(self.settings.source_field()) {
            Some(value_in) => self.process_value(value_in),
            None => return record,
        };

        record.insert(self.settings.output_field(), value_out);
        record
    }

    /// Owned variant of [`RecordTransformer::transform`].
    pub fn transform_owned(&self, mut record: Record) -> Record {
        self.transform(&mut record);
        record
    }

    /// Codec-then-fallback step for a single present value.
    pub fn process_value(&self, value_in: &FieldValue) -> FieldValue {
        match self.apply(value_in) {
            Ok(value_out) if value_out.is_truthy() => value_out,
            Ok(_) => value_in.clone(),
            Err(e) => {
                debug!(
                    field = self.settings.source_field(),
                    error = %e,
                    "codec failed, writing error value"
                );
                FieldValue::String(self.settings.error_value().to_string())
            }
        }
    }

    /// Run the configured codec on a value without any fallback.
    pub fn apply(&self, value: &FieldValue) -> Result<FieldValue, CodecError> {
        let codec = self.settings.codec();
        let input = value.as_bytes().ok_or(CodecError::UnsupportedValue {
            codec,
            kind: value.kind(),
        })?;

        codec.apply(input).map(FieldValue::from_bytes)
    }
}
