// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concordance command

use anyhow::Result;
use std::sync::Arc;

use crate::cli::OutputFormat;
use conc::concordance::Concordance;
use conc::config::{ConcordanceOverrides, Config};
use conc::errors::suggestions;
use conc::output::{print_json, render_concordance_text, use_colors};

/// Arguments of one concordance invocation
#[derive(Debug, Clone)]
pub struct Request {
    pub query: String,
    pub dir: Option<String>,
    pub context: Option<usize>,
    pub order: Option<String>,
    pub page_size: Option<usize>,
    pub page: Option<usize>,
    pub all_columns: bool,
    pub case_sensitive: bool,
    pub no_cache: bool,
}

/// Run the concordance command.
pub fn run(request: &Request, config: &Config, format: OutputFormat, compact: bool) -> Result<()> {
    let options = config.concordance_options(&ConcordanceOverrides {
        context_length: request.context,
        page_size: request.page_size,
        order: request.order.clone(),
        page: request.page,
        show_all_columns: request.all_columns,
        no_cache: request.no_cache,
    });
    let corpus = super::load_corpus(
        request.dir.as_deref(),
        config.case_sensitive(request.case_sensitive),
    )?;

    let conc = Concordance::new(Arc::new(corpus));
    let report = conc.concordance(&request.query, &options)?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_concordance_text(&report, use_colors()));
            if report.is_empty() {
                eprintln!("\n{}", suggestions::no_matches_suggestion(&request.query));
            }
        }
        OutputFormat::Json => print_json(&report, compact)?,
    }

    Ok(())
}
