//! Output sinks for partnertap.
//!
//! This crate provides sinks for writing extracted records and the bookmark
//! state used to resume a run:
//!
//! - [`SingerWriter`] - Singer `SCHEMA` / `RECORD` / `STATE` messages
//! - [`NdjsonWriter`] - One normalized record per line
//! - [`State`] - Per-stream bookmarks, loaded from and saved to JSON files
//! - [`BookmarkTracker`] - Detects when a day window has been fully emitted

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/partnertap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod formatter;
mod json;
mod singer;
mod state;

pub use formatter::{FormatError, OutputFormat, RecordSink};
pub use json::NdjsonWriter;
pub use singer::{Message, SingerWriter};
pub use state::{Bookmark, BookmarkTracker, State};
