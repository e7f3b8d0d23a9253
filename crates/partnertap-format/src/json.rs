//! Plain NDJSON output.

use partnertap_streams::StreamName;
use partnertap_types::Transaction;
use std::io::Write;

use crate::{FormatError, RecordSink, State};

/// Writes one normalized record per line and nothing else.
#[derive(Debug)]
pub struct NdjsonWriter<W> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    /// Creates a writer over `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for NdjsonWriter<W> {
    fn begin(&mut self, _stream: StreamName) -> Result<(), FormatError> {
        Ok(())
    }

    fn write_record(
        &mut self,
        _stream: StreamName,
        record: &Transaction,
    ) -> Result<(), FormatError> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn checkpoint(&mut self, _state: &State) -> Result<(), FormatError> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), FormatError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndjson_records() {
        let mut sink = NdjsonWriter::new(Vec::new());
        let mut tx = Transaction::for_day("2022-03-01");
        tx.id = Some("tx1".to_string());

        sink.begin(StreamName::Transactions).unwrap();
        sink.write_record(StreamName::Transactions, &tx).unwrap();
        sink.write_record(StreamName::Transactions, &tx).unwrap();
        sink.checkpoint(&State::default()).unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('{'));
        assert!(lines[0].contains("\"id\":\"tx1\""));
        assert!(lines[0].contains("\"day\":\"2022-03-01\""));
    }
}
