//! NDJSON (newline-delimited JSON) reading and writing of records.

use serde::Serialize;
use std::io::{BufRead, Write};
use thiserror::Error;
use crate::record::Record;

/// Error type for serialization operations
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid UTF-8 on line {line}: {source}")]
    Utf8 {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("JSON error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// NDJSON writer
///
/// Writes values as NDJSON, one JSON object per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a new NDJSON writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single value as an NDJSON line
    pub fn write<T: Serialize>(&mut self, value: &T) -> Result<(), SerializationError> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write multiple values
    pub fn write_all<T: Serialize>(&mut self, values: &[T]) -> Result<(), SerializationError> {
        for value in values {
            self.write(value)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// NDJSON reader
///
/// Yields one [`Record`] per non-blank line. A malformed line (bad UTF-8 or
/// bad JSON) yields an error carrying its 1-based line number; iteration
/// continues with the next line. An I/O error is yielded once and ends
/// iteration.
pub struct NdjsonReader<R: BufRead> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> NdjsonReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
            failed: false,
        }
    }

    /// Line number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for NdjsonReader<R> {
    type Item = Result<Record, SerializationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let line = self.line;
                    let text = match std::str::from_utf8(&self.buf) {
                        Ok(text) => text,
                        Err(source) => return Some(Err(SerializationError::Utf8 { line, source })),
                    };
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(trimmed).map_err(|source| {
                        SerializationError::Json { line, source }
                    }));
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
