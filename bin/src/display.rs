//! Display utilities and output selection for the partnertap CLI.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use partnertap_lib::prelude::*;
use std::time::Duration;

/// Output format for extracted records.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Singer,
    Ndjson,
}

impl Format {
    /// Returns the library output format.
    pub(crate) const fn output(self) -> OutputFormat {
        match self {
            Self::Singer => OutputFormat::Singer,
            Self::Ndjson => OutputFormat::Ndjson,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output())
    }
}

/// Creates the stderr spinner counting extracted records.
pub(crate) fn record_spinner(quiet: bool, stream: StreamName) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} {prefix} records {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_prefix(stream.as_str());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
