// SPDX-License-Identifier: MIT OR Apache-2.0

//! Corpus summary command

use anyhow::Result;

use crate::cli::OutputFormat;
use conc::config::Config;
use conc::output::{print_json, render_summary_text};

/// Run the info command.
pub fn run(dir: Option<&str>, config: &Config, format: OutputFormat, compact: bool) -> Result<()> {
    let corpus = super::load_corpus(dir, config.case_sensitive(false))?;
    let summary = corpus.summary();

    match format {
        OutputFormat::Text => print!("{}", render_summary_text(&summary)),
        OutputFormat::Json => print_json(&summary, compact)?,
    }

    Ok(())
}
