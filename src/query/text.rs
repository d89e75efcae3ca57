// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document display command

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use conc::corpus::Text;
use conc::output::{print_json, render_text};

#[derive(Debug, Serialize)]
struct TextPayload<'a> {
    doc_id: usize,
    tokens: usize,
    truncated: bool,
    metadata: &'a std::collections::BTreeMap<String, String>,
    text: String,
}

/// Run the text command.
pub fn run(
    doc_id: usize,
    dir: Option<&str>,
    max_tokens: Option<usize>,
    format: OutputFormat,
    compact: bool,
) -> Result<()> {
    let corpus = super::load_corpus(dir, false)?;
    let text: Text = corpus.text(doc_id)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&text, max_tokens)),
        OutputFormat::Json => {
            let payload = TextPayload {
                doc_id,
                tokens: text.tokens_count(),
                truncated: text.is_truncated(max_tokens),
                metadata: &text.metadata,
                text: text.as_string(max_tokens),
            };
            print_json(&payload, compact)?;
        }
    }

    Ok(())
}
