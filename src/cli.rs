// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};

/// conc - corpus concordancer
///
/// Keyword-in-context lines for a word or phrase, sorted on the words
/// around it and served one page at a time.
#[derive(Parser, Debug)]
#[command(name = "conc")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Quickstart:\n  conc concordance \"sat\" --dir texts/\n  conc kwic \"on the\" -d texts/ --order LEFT --page 2\n\nOrders:\n  1L2L3L (LEFT), 3L2L1L, 2L1L1R, 1L1R2R, 1R2R3R (RIGHT)"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Log phase timings and cache use to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Concordance lines for a word or phrase
    #[command(visible_aliases = ["kwic", "c"])]
    Concordance {
        /// Word or phrase to find
        query: String,

        /// Corpus directory of .txt/.md documents (defaults to current directory)
        #[arg(short, long)]
        dir: Option<String>,

        /// Tokens of context on each side of the node
        #[arg(short, long)]
        context: Option<usize>,

        /// Sort order: 1L2L3L, 3L2L1L, 2L1L1R, 1L1R2R, 1R2R3R, LEFT, RIGHT
        #[arg(short, long)]
        order: Option<String>,

        /// Lines per page
        #[arg(short = 'n', long)]
        page_size: Option<usize>,

        /// Page to show (1-indexed; out-of-range pages show the last page)
        #[arg(short, long)]
        page: Option<usize>,

        /// Include positions, sort ranks and context token ids
        #[arg(long)]
        all_columns: bool,

        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Recompute instead of reusing cached coarse tables
        #[arg(long)]
        no_cache: bool,
    },

    /// Show one document of the corpus
    Text {
        /// Document id, as reported in concordance lines
        doc_id: usize,

        /// Corpus directory (defaults to current directory)
        #[arg(short, long)]
        dir: Option<String>,

        /// Stop after this many tokens
        #[arg(short = 'm', long)]
        max_tokens: Option<usize>,
    },

    /// Summarize the corpus
    Info {
        /// Corpus directory (defaults to current directory)
        #[arg(short, long)]
        dir: Option<String>,
    },
}
