//! Discover command implementation.

use anyhow::Result;
use partnertap_lib::prelude::*;
use std::io::Write;

/// Print the catalog of supported streams.
pub(crate) fn discover(pretty: bool) -> Result<()> {
    let catalog = Catalog::discover();
    let mut stdout = std::io::stdout().lock();

    if pretty {
        serde_json::to_writer_pretty(&mut stdout, &catalog)?;
    } else {
        serde_json::to_writer(&mut stdout, &catalog)?;
    }
    writeln!(stdout)?;

    Ok(())
}
