//! Incremental Shopify Partners transaction extraction.
//!
//! This is a facade crate that re-exports functionality from the partnertap
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use partnertap_lib::prelude::*;
//! use futures::StreamExt;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = AuthContext::new("1234567", "prtapi_token")?;
//!     let extractor = Extractor::new(HttpTransport::with_defaults()?, auth)?;
//!
//!     let mut stream = std::pin::pin!(extractor.transactions(Some("2022-03-01"))?);
//!     while let Some(tx) = stream.next().await {
//!         let tx = tx?;
//!         println!("{} {:?}", tx.day, tx.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/partnertap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use partnertap_types::*;

// Re-export the stream registry
pub use partnertap_streams::{Catalog, CatalogEntry, Normalizer, StreamName, normalize_transaction};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use partnertap_fetch::{
    ClientConfig, DayRequest, Extractor, HttpTransport, RawResponse, SendError, Transport,
    parse_edges,
};

// Re-export output sinks
#[cfg(feature = "format")]
pub use partnertap_format::{
    Bookmark, BookmarkTracker, FormatError, Message, NdjsonWriter, OutputFormat, RecordSink,
    SingerWriter, State,
};

/// Prelude module for convenient imports.
///
/// ```
/// use partnertap_lib::prelude::*;
/// ```
pub mod prelude {
    pub use partnertap_types::{
        AuthContext, DayWindows, ExtractionWindow, Result, TapError, Transaction,
    };

    pub use partnertap_streams::{Catalog, StreamName};

    #[cfg(feature = "fetch")]
    pub use partnertap_fetch::{ClientConfig, Extractor, HttpTransport, Transport};

    #[cfg(feature = "format")]
    pub use partnertap_format::{BookmarkTracker, OutputFormat, RecordSink, State};
}
