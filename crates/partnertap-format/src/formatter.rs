//! Output format abstraction.

use partnertap_streams::StreamName;
use partnertap_types::Transaction;
use std::io::Write;
use thiserror::Error;

use crate::{NdjsonWriter, SingerWriter, State};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Singer tap messages.
    #[default]
    Singer,
    /// Newline-delimited JSON records.
    Ndjson,
}

impl OutputFormat {
    /// Returns the format name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Singer => "singer",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Singer, Self::Ndjson]
    }

    /// Creates a sink of this format writing to `writer`.
    pub fn sink<'w, W: Write + 'w>(&self, writer: W) -> Box<dyn RecordSink + 'w> {
        match self {
            Self::Singer => Box::new(SingerWriter::new(writer)),
            Self::Ndjson => Box::new(NdjsonWriter::new(writer)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "singer" => Ok(Self::Singer),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur while writing output.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for extracted records.
///
/// Records are handed over one at a time and are committed once written;
/// a later failure does not retract them.
pub trait RecordSink {
    /// Called once before the first record of `stream`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn begin(&mut self, stream: StreamName) -> Result<(), FormatError>;

    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_record(&mut self, stream: StreamName, record: &Transaction)
    -> Result<(), FormatError>;

    /// Reports bookmarks after a day window has been fully emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn checkpoint(&mut self, state: &State) -> Result<(), FormatError>;

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn finish(&mut self) -> Result<(), FormatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("singer".parse::<OutputFormat>().unwrap(), OutputFormat::Singer);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in OutputFormat::all() {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_sink_dispatch() {
        let mut out = Vec::new();
        {
            let mut sink = OutputFormat::Ndjson.sink(&mut out);
            sink.write_record(StreamName::Transactions, &Transaction::for_day("2022-03-01"))
                .unwrap();
            sink.checkpoint(&State::default()).unwrap();
            sink.finish().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
