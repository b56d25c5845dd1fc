//! # Fieldcodec: Single-Field Codec Transform for Log Records
//!
//! Fieldcodec reads one field of a structured log record, runs it through a
//! named base64 codec, and writes the result back into the record (in place or
//! into a separate output field). Malformed values never abort a stream: they
//! are replaced by a configurable error value.
//!
//! ## Features
//!
//! - **Codec registry**: fixed name-keyed table of the built-in codecs
//!   (`base64-decode`, `base64-encode`, `urlsafe64-decode`, `urlsafe64-encode`)
//! - **Record transformer**: validated, thread-safe handle applying one codec per record
//! - **Padding recovery**: URL-safe decode tolerates up to two truncated `=` characters
//! - **Host integrations**: filter-style and output-style (tag rewriting) plugins
//!   sharing one transformer
//! - **NDJSON I/O**: reader and writer used by the `fieldcodec` CLI
//!
//! ## Example: YAML configuration
//!
//! ```yaml
//! field: payload
//! output_field: payload_decoded
//! codec: urlsafe64-decode
//! error_value: "<invalid>"
//! ```
//!
//! ## Example: Library use
//!
//! ```
//! use fieldcodec::{CodecConfig, FieldValue, Record, RecordTransformer};
//!
//! let config = CodecConfig::new("key1", "base64-decode");
//! let transformer = RecordTransformer::new(&config).unwrap();
//!
//! let mut record = Record::new();
//! record.insert("key1", "Tmljb2xhcyBDYWdl");
//! transformer.transform(&mut record);
//!
//! assert_eq!(record.get("key1"), Some(&FieldValue::from("Nicolas Cage")));
//! ```

// Core modules
pub mod record;
pub mod codec;
pub mod codec_registry;
pub mod serialization;

// Configuration, per-record transform and tag handling
pub mod runtime;

// Host pipeline integrations
pub mod plugin;

// Re-export key types
pub use record::{FieldValue, Record};
pub use codec::{Codec, CodecError};
pub use codec_registry::{register_builtin_codecs, CodecRegistry};
pub use serialization::{NdjsonReader, NdjsonWriter, SerializationError};

// Re-export runtime types
pub use runtime::{
    CodecConfig, ConfigError, OutputConfig, RecordTransformer, TagRewriter, TransformSettings,
};

// Re-export plugin types
pub use plugin::{CodecFilter, CodecOutput, Event, EventSink};
