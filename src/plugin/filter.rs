//! Filter-style integration: records are transformed and handed back to the
//! pipeline under their original tag.

use crate::plugin::Event;
use crate::record::Record;
use crate::runtime::{CodecConfig, ConfigError, RecordTransformer};

/// Codec filter. One instance per configured filter block.
#[derive(Debug, Clone)]
pub struct CodecFilter {
    transformer: RecordTransformer,
}

impl CodecFilter {
    /// Name the filter is registered under in the host pipeline.
    pub const NAME: &'static str = "codec";

    /// Validate the configuration and build the filter.
    pub fn configure(config: &CodecConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            transformer: RecordTransformer::new(config)?,
        })
    }

    pub fn transformer(&self) -> &RecordTransformer {
        &self.transformer
    }

    /// Transform one record. Tag and time are not used by the codec.
    pub fn filter(&self, _tag: &str, _time: i64, record: Record) -> Record {
        self.transformer.transform_owned(record)
    }

    /// Transform a stream of events, preserving order and tags.
    pub fn filter_stream<'a, I>(&'a self, events: I) -> impl Iterator<Item = Event> + 'a
    where
        I: IntoIterator<Item = Event>,
        I::IntoIter: 'a,
    {
        events.into_iter().map(move |mut event| {
            self.transformer.transform(&mut event.record);
            event
        })
    }
}
