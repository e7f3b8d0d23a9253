//! HTTP transport and day-windowed extraction for partnertap.
//!
//! This crate provides the extraction pipeline:
//!
//! - [`request`] - Endpoint URL, auth headers and per-day query bodies
//! - [`Transport`] / [`HttpTransport`] - Sends one request, no retries
//! - [`parse_edges`] - Status checks and edge extraction
//! - [`Extractor`] - Lazy stream of normalized records, one day at a time
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use partnertap_fetch::{Extractor, HttpTransport};
//! use partnertap_types::AuthContext;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthContext::new("1234567", "prtapi_token")?;
//! let extractor = Extractor::new(HttpTransport::with_defaults()?, auth)?;
//!
//! let mut stream = std::pin::pin!(extractor.transactions(Some("2022-03-01"))?);
//! while let Some(tx) = stream.next().await {
//!     println!("{:?}", tx?);
//! }
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/partnertap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod parse;
pub mod request;
mod stream;

pub use client::{ClientConfig, HttpTransport, RawResponse, SendError, Transport};
pub use parse::parse_edges;
pub use request::DayRequest;
pub use stream::Extractor;
