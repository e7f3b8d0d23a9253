//! CLI command implementations.

pub(crate) mod discover;
pub(crate) mod sync;
