// SPDX-License-Identifier: MIT OR Apache-2.0

//! conc - corpus concordancer
//!
//! Builds an in-memory corpus from a directory of texts and prints
//! collocate-sorted keyword-in-context pages.

mod cli;
mod query;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use conc::config::{Config, ConfigOutputFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load();
    let format = cli.format.unwrap_or(match config.output_format() {
        Some(ConfigOutputFormat::Json) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    match cli.command {
        Commands::Concordance {
            query,
            dir,
            context,
            order,
            page_size,
            page,
            all_columns,
            case_sensitive,
            no_cache,
        } => {
            let request = query::concordance::Request {
                query,
                dir,
                context,
                order,
                page_size,
                page,
                all_columns,
                case_sensitive,
                no_cache,
            };
            query::concordance::run(&request, &config, format, cli.compact)?;
        }
        Commands::Text {
            doc_id,
            dir,
            max_tokens,
        } => {
            query::text::run(doc_id, dir.as_deref(), max_tokens, format, cli.compact)?;
        }
        Commands::Info { dir } => {
            query::info::run(dir.as_deref(), &config, format, cli.compact)?;
        }
    }

    Ok(())
}
