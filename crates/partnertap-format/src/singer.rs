//! Singer message output.

use chrono::{DateTime, Utc};
use partnertap_streams::StreamName;
use partnertap_types::Transaction;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

use crate::{FormatError, RecordSink, State};

/// One line of Singer output.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message<'a> {
    /// Schema of the records that follow.
    Schema {
        /// Stream name.
        stream: &'a str,
        /// JSON schema of one record.
        schema: Value,
        /// Fields identifying a record.
        key_properties: &'a [&'a str],
        /// Fields holding the replication position.
        bookmark_properties: &'a [&'a str],
    },
    /// One extracted record.
    Record {
        /// Stream name.
        stream: &'a str,
        /// The record.
        record: &'a Transaction,
        /// When the record was extracted.
        time_extracted: DateTime<Utc>,
    },
    /// Bookmarks to resume from.
    State {
        /// Current state.
        value: &'a State,
    },
}

/// Writes Singer `SCHEMA`, `RECORD` and `STATE` messages as NDJSON.
#[derive(Debug)]
pub struct SingerWriter<W> {
    writer: W,
}

impl<W: Write> SingerWriter<W> {
    /// Creates a writer over `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, message: &Message<'_>) -> Result<(), FormatError> {
        serde_json::to_writer(&mut self.writer, message)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> RecordSink for SingerWriter<W> {
    fn begin(&mut self, stream: StreamName) -> Result<(), FormatError> {
        self.emit(&Message::Schema {
            stream: stream.as_str(),
            schema: stream.schema(),
            key_properties: stream.key_properties(),
            bookmark_properties: &["day"],
        })
    }

    fn write_record(
        &mut self,
        stream: StreamName,
        record: &Transaction,
    ) -> Result<(), FormatError> {
        self.emit(&Message::Record {
            stream: stream.as_str(),
            record,
            time_extracted: Utc::now(),
        })
    }

    fn checkpoint(&mut self, state: &State) -> Result<(), FormatError> {
        self.emit(&Message::State { value: state })?;
        // Bookmarks are only useful once they reach the consumer
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), FormatError> {
        self.writer.flush()?;
        Ok(())
    }
}
