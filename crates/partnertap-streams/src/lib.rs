//! Stream registry for partnertap.
//!
//! Every supported stream is a [`StreamName`] variant. Its query template,
//! normalizer and schema are resolved by exhaustive `match`, so a name with
//! no registry entry is rejected at parse time instead of falling back to an
//! empty template or a pass-through normalizer.
//!
//! # Example
//!
//! ```
//! use partnertap_streams::StreamName;
//!
//! let stream: StreamName = "transactions".parse().unwrap();
//! let normalize = stream.normalizer();
//! let tx = normalize("2022-03-01", &serde_json::json!({ "id": "tx1" }));
//! assert_eq!(tx.day, "2022-03-01");
//!
//! assert!("orders".parse::<StreamName>().is_err());
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/partnertap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod normalize;
pub mod queries;
mod schema;

use partnertap_types::TapError;
use serde_json::Value;

pub use normalize::{Normalizer, normalize_transaction};
pub use schema::{Catalog, CatalogEntry};

/// A supported extraction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamName {
    /// Partner transaction history.
    Transactions,
}

impl StreamName {
    /// Returns all registered streams.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Transactions]
    }

    /// Returns the stream identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
        }
    }

    /// Returns the GraphQL query template for one day window.
    #[must_use]
    pub const fn query_template(&self) -> &'static str {
        match self {
            Self::Transactions => queries::TRANSACTIONS,
        }
    }

    /// Returns the function normalizing one raw edge of this stream.
    #[must_use]
    pub const fn normalizer(&self) -> Normalizer {
        match self {
            Self::Transactions => normalize_transaction,
        }
    }

    /// Returns the JSON pointer to the array of raw edges in a response.
    #[must_use]
    pub const fn edges_pointer(&self) -> &'static str {
        match self {
            Self::Transactions => "/data/transactions/edges",
        }
    }

    /// Returns the fields identifying a record.
    #[must_use]
    pub const fn key_properties(&self) -> &'static [&'static str] {
        match self {
            Self::Transactions => &["id", "day"],
        }
    }

    /// Returns the JSON schema of a normalized record.
    #[must_use]
    pub fn schema(&self) -> Value {
        match self {
            Self::Transactions => schema::transaction_schema(),
        }
    }
}

impl std::fmt::Display for StreamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StreamName {
    type Err = TapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transactions" | "shopify_partners_transactions" => Ok(Self::Transactions),
            _ => Err(TapError::UnknownStream(s.to_string())),
        }
    }
}
