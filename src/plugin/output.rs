//! Output-style integration: records are transformed and re-emitted under a
//! rewritten tag.

use tracing::trace;
use crate::plugin::{Event, EventSink};
use crate::record::Record;
use crate::runtime::{ConfigError, OutputConfig, RecordTransformer, TagRewriter};

/// Codec output. Transforms each record and re-emits it into a sink.
#[derive(Debug, Clone)]
pub struct CodecOutput {
    transformer: RecordTransformer,
    tags: TagRewriter,
}

impl CodecOutput {
    /// Name the output is registered under in the host pipeline.
    pub const NAME: &'static str = "filter_codec";

    /// Validate the configuration and build the output.
    ///
    /// # Errors
    /// Codec configuration errors, or [`ConfigError::MissingTagRewrite`] when
    /// no tag option is set.
    pub fn configure(config: &OutputConfig) -> Result<Self, ConfigError> {
        let transformer = RecordTransformer::new(&config.codec)?;
        let tags = TagRewriter::new(config)?;

        Ok(Self { transformer, tags })
    }

    pub fn transformer(&self) -> &RecordTransformer {
        &self.transformer
    }

    /// Transform every `(time, record)` pair received under `tag` and emit it
    /// to `sink` in input order. Returns the number of events emitted.
    pub fn emit<I, S>(&self, tag: &str, events: I, sink: &mut S) -> usize
    where
        I: IntoIterator<Item = (i64, Record)>,
        S: EventSink + ?Sized,
    {
        let new_tag = self.tags.rewrite(tag);
        trace!(tag, new_tag = %new_tag, "re-emitting chunk");

        let mut count = 0;
        for (time, mut record) in events {
            self.transformer.transform(&mut record);
            sink.emit(Event::new(new_tag.clone(), time, record));
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use crate::runtime::CodecConfig;

    #[test]
    fn test_configure_requires_tag_option() {
        let config = OutputConfig::new(CodecConfig::new("key1", "base64-decode"));
        assert!(matches!(
            CodecOutput::configure(&config),
            Err(ConfigError::MissingTagRewrite)
        ));
    }

    #[test]
    fn test_configure_checks_codec_first() {
        let config = OutputConfig::new(CodecConfig::new("key1", "unknown-codec"))
            .with_add_tag_prefix("decoded.");
        assert!(matches!(
            CodecOutput::configure(&config),
            Err(ConfigError::UnknownCodec { .. })
        ));
    }

    #[test]
    fn test_emit_rewrites_tag_and_transforms() {
        let config = OutputConfig::new(CodecConfig::new("key1", "base64-decode"))
            .with_add_tag_prefix("decoded.");
        let output = CodecOutput::configure(&config).unwrap();

        let mut sink: Vec<Event> = Vec::new();
        let events = vec![
            (10, Record::new().with_field("key1", "Tmljb2xhcyBDYWdl")),
            (11, Record::new().with_field("foo", "bar")),
        ];
        let count = output.emit("test", events, &mut sink);

        assert_eq!(count, 2);
        assert_eq!(sink[0].tag, "decoded.test");
        assert_eq!(sink[0].time, 10);
        assert_eq!(sink[0].record.get("key1"), Some(&FieldValue::from("Nicolas Cage")));
        assert_eq!(sink[1].tag, "decoded.test");
        assert_eq!(sink[1].record, Record::new().with_field("foo", "bar"));
    }
}
