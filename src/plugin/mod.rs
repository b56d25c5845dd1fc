//! Host pipeline integrations.
//!
//! Both integrations delegate to one [`RecordTransformer`](crate::RecordTransformer);
//! the codec table is never re-derived per integration.

pub mod filter;
pub mod output;

use serde::{Deserialize, Serialize};
use crate::record::Record;

pub use filter::CodecFilter;
pub use output::CodecOutput;

/// A tagged, timestamped record as seen by the host pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub tag: String,
    /// Event time in seconds since the Unix epoch
    pub time: i64,
    pub record: Record,
}

impl Event {
    pub fn new(tag: impl Into<String>, time: i64, record: Record) -> Self {
        Self {
            tag: tag.into(),
            time,
            record,
        }
    }
}

/// Destination for events re-emitted by the output-style integration.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}
