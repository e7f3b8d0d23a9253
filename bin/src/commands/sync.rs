//! Sync command implementation.
//!
//! This module pulls records day by day and writes them to stdout, emitting
//! bookmarks as day windows complete.

use crate::config::{TapConfig, resolve_start_date};
use crate::display::{Format, record_spinner};
use anyhow::{Context, Result};
use futures::{Stream, StreamExt};
use indicatif::ProgressBar;
use partnertap_lib::prelude::*;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

/// Arguments of the sync command.
pub(crate) struct SyncArgs {
    pub(crate) config: PathBuf,
    pub(crate) state: Option<PathBuf>,
    pub(crate) state_output: Option<PathBuf>,
    pub(crate) stream: String,
    pub(crate) start_date: Option<String>,
    pub(crate) format: Format,
}

/// Extract a stream and write it to stdout.
pub(crate) async fn sync(args: SyncArgs, quiet: bool) -> Result<()> {
    let config = TapConfig::load(&args.config)?;
    let stream: StreamName = args.stream.parse()?;

    let mut state = match &args.state {
        Some(path) => State::load(path)
            .with_context(|| format!("Failed to load state file {}", path.display()))?,
        None => State::default(),
    };

    let start_date = resolve_start_date(
        args.start_date.as_deref(),
        state.bookmark(stream),
        config.start_date.as_deref(),
    )
    .map(str::to_string)
    .context(
        "The parameter start_date is required: pass --start-date, set start_date in the \
         config file, or provide a state file with a bookmark",
    )?;

    info!(
        stream = %stream,
        start_date = %start_date,
        format = %args.format,
        "Starting sync"
    );

    let transport =
        HttpTransport::new(config.client_config()).context("Failed to create HTTP client")?;
    let extractor = Extractor::new(transport, config.auth()?)?;
    let records = extractor.stream(stream, Some(start_date.as_str()))?;

    let mut sink = args
        .format
        .output()
        .sink(BufWriter::new(std::io::stdout().lock()));
    let progress = record_spinner(quiet, stream);

    let state_output = args.state_output;
    let persist = |state: &State| match &state_output {
        Some(path) => state
            .save(path)
            .with_context(|| format!("Failed to write state file {}", path.display())),
        None => Ok(()),
    };

    let result = drain(
        records,
        stream,
        sink.as_mut(),
        &mut state,
        || extractor.final_window().map(|window| window.day()),
        &progress,
        persist,
    )
    .await;

    match &result {
        Ok(count) => {
            progress.finish_with_message(format!("({count} total)"));
            info!(stream = %stream, records = count, "Sync complete");
        }
        Err(_) => progress.abandon_with_message("(aborted)"),
    }

    result.map(|_| ())
}

/// Writes every record of `records` to `sink`, checkpointing completed days.
///
/// A day is checkpointed when the first record of a later day arrives, and
/// the day returned by `final_day` once the stream is exhausted. On error the
/// sink is flushed and nothing further is checkpointed.
pub(crate) async fn drain<R, S>(
    records: R,
    stream: StreamName,
    sink: &mut S,
    state: &mut State,
    final_day: impl FnOnce() -> Option<String>,
    progress: &ProgressBar,
    mut persist: impl FnMut(&State) -> Result<()>,
) -> Result<u64>
where
    R: Stream<Item = partnertap_lib::Result<Transaction>>,
    S: RecordSink + ?Sized,
{
    let mut records = std::pin::pin!(records);
    let mut tracker = BookmarkTracker::new();
    let mut count = 0u64;

    sink.begin(stream)?;

    while let Some(record) = records.next().await {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                sink.finish()?;
                return Err(e).with_context(|| format!("Extraction of {stream} failed"));
            }
        };

        if let Some(done) = tracker.observe(&record.day) {
            state.set_bookmark(stream, &done);
            sink.checkpoint(state)?;
            persist(state)?;
        }

        sink.write_record(stream, &record)?;
        count += 1;
        progress.inc(1);
        progress.set_message(record.day);
    }

    if let Some(day) = final_day() {
        state.set_bookmark(stream, &day);
        sink.checkpoint(state)?;
        persist(state)?;
    }

    sink.finish()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use partnertap_lib::SingerWriter;
    use serde_json::Value;

    fn record(id: &str, day: &str) -> partnertap_lib::Result<Transaction> {
        let mut tx = Transaction::for_day(day);
        tx.id = Some(id.to_string());
        Ok(tx)
    }

    fn messages(output: &[u8]) -> Vec<Value> {
        std::str::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn kinds(messages: &[Value]) -> Vec<&str> {
        messages.iter().map(|m| m["type"].as_str().unwrap()).collect()
    }

    #[tokio::test]
    async fn test_drain_checkpoints_completed_days() {
        let records = futures::stream::iter(vec![
            record("tx1", "2022-03-01"),
            record("tx2", "2022-03-01"),
            record("tx3", "2022-03-03"),
        ]);
        let mut output = Vec::new();
        let mut state = State::default();
        let mut persisted = Vec::new();

        let count = {
            let mut sink = SingerWriter::new(&mut output);
            drain(
                records,
                StreamName::Transactions,
                &mut sink,
                &mut state,
                || Some("2022-03-04".to_string()),
                &ProgressBar::hidden(),
                |s: &State| {
                    persisted.push(s.bookmark(StreamName::Transactions).map(str::to_string));
                    Ok(())
                },
            )
            .await
            .unwrap()
        };

        assert_eq!(count, 3);
        let messages = messages(&output);
        assert_eq!(
            kinds(&messages),
            ["SCHEMA", "RECORD", "RECORD", "STATE", "RECORD", "STATE"]
        );
        assert_eq!(
            messages[3]["value"]["bookmarks"]["transactions"]["start_date"],
            "2022-03-01"
        );
        assert_eq!(
            messages[5]["value"]["bookmarks"]["transactions"]["start_date"],
            "2022-03-04"
        );
        assert_eq!(
            persisted,
            [Some("2022-03-01".to_string()), Some("2022-03-04".to_string())]
        );
        assert_eq!(state.bookmark(StreamName::Transactions), Some("2022-03-04"));
    }

    #[tokio::test]
    async fn test_drain_stops_on_error() {
        let records = futures::stream::iter(vec![
            record("tx1", "2022-03-01"),
            record("tx2", "2022-03-02"),
            Err(TapError::Transport {
                day: "2022-03-03".to_string(),
                status: Some(402),
                message: "HTTP 402 Payment Required".to_string(),
            }),
        ]);
        let mut output = Vec::new();
        let mut state = State::default();

        let result = {
            let mut sink = SingerWriter::new(&mut output);
            drain(
                records,
                StreamName::Transactions,
                &mut sink,
                &mut state,
                || Some("2022-03-04".to_string()),
                &ProgressBar::hidden(),
                |_: &State| Ok(()),
            )
            .await
        };

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Extraction of transactions failed"));
        assert_eq!(
            err.downcast_ref::<TapError>().and_then(TapError::status),
            Some(402)
        );

        // Records already written stay written; the failing day is never bookmarked
        let messages = messages(&output);
        assert_eq!(kinds(&messages), ["SCHEMA", "RECORD", "STATE", "RECORD"]);
        assert_eq!(state.bookmark(StreamName::Transactions), Some("2022-03-01"));
    }

    #[tokio::test]
    async fn test_drain_empty_run_still_bookmarks() {
        let records = futures::stream::iter(Vec::<partnertap_lib::Result<Transaction>>::new());
        let mut output = Vec::new();
        let mut state = State::default();

        let count = {
            let mut sink = OutputFormat::Ndjson.sink(&mut output);
            drain(
                records,
                StreamName::Transactions,
                sink.as_mut(),
                &mut state,
                || Some("2022-03-04".to_string()),
                &ProgressBar::hidden(),
                |_: &State| Ok(()),
            )
            .await
            .unwrap()
        };

        assert_eq!(count, 0);
        assert!(output.is_empty());
        assert_eq!(state.bookmark(StreamName::Transactions), Some("2022-03-04"));
    }
}
