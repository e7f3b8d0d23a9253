//! Core types for the partnertap Shopify Partners extractor.
//!
//! This crate provides the fundamental data structures used throughout partnertap:
//!
//! - [`ExtractionWindow`] - One UTC calendar day bounding a request
//! - [`DayWindows`] - Day-by-day iteration from a start date through today
//! - [`AuthContext`] - Organization id and access token
//! - [`Transaction`] - Normalized transaction record
//! - [`TapError`] - Error taxonomy shared by every crate

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/partnertap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod auth;
mod error;
mod transaction;
mod window;

pub use auth::AuthContext;
pub use error::{Result, TapError};
pub use transaction::Transaction;
pub use window::{
    Clock, DAY_FORMAT, DayWindows, ExtractionWindow, TIMESTAMP_FORMAT, parse_start_date, utc_today,
};
