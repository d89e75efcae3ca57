// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output helpers: JSON printing and colored KWIC text rendering

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::concordance::ConcordanceReport;
use crate::corpus::{CorpusSummary, Text};

/// Print a value as JSON to stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

/// Whether stdout should get ANSI colors
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

pub fn colorize_node(node: &str, colors: bool) -> String {
    if colors {
        node.yellow().bold().to_string()
    } else {
        node.to_string()
    }
}

pub fn colorize_doc_id(doc_id: u32, colors: bool) -> String {
    let label = format!("[{doc_id}]");
    if colors {
        label.cyan().to_string()
    } else {
        label
    }
}

/// Render a report as aligned keyword-in-context lines.
pub fn render_concordance_text(report: &ConcordanceReport, colors: bool) -> String {
    let mut out = String::new();
    let title = if colors {
        report.title.bold().to_string()
    } else {
        report.title.clone()
    };
    out.push_str(&title);
    out.push('\n');
    out.push_str(&report.description);
    out.push('\n');
    for line in &report.formatted {
        out.push_str(line);
        out.push('\n');
    }
    if report.rows.is_empty() {
        return out;
    }
    out.push('\n');

    let left_width = report
        .rows
        .iter()
        .map(|row| row.left.chars().count())
        .max()
        .unwrap_or(0);
    let doc_width = report
        .rows
        .iter()
        .map(|row| row.document_id.to_string().len() + 2)
        .max()
        .unwrap_or(0);

    for row in &report.rows {
        let doc_label = format!("[{}]", row.document_id);
        let doc_pad = " ".repeat(doc_width - doc_label.len());
        let left_pad = " ".repeat(left_width - row.left.chars().count());
        out.push_str(&format!(
            "{doc_pad}{}  {left_pad}{}  {}  {}\n",
            colorize_doc_id(row.document_id, colors),
            row.left,
            colorize_node(&row.node, colors),
            row.right
        ));
    }
    out
}

pub fn render_summary_text(summary: &CorpusSummary) -> String {
    format!(
        "Corpus: {}\nDocuments: {}\nTokens: {}\nVocabulary: {}\nCase sensitive: {}\n",
        summary.name, summary.documents, summary.tokens, summary.vocabulary, summary.case_sensitive
    )
}

/// Render a document with its metadata, noting truncation.
pub fn render_text(text: &Text, max_tokens: Option<usize>) -> String {
    let mut out = String::new();
    for (key, value) in &text.metadata {
        out.push_str(&format!("{key}: {value}\n"));
    }
    if !text.metadata.is_empty() {
        out.push('\n');
    }
    out.push_str(&text.as_string(max_tokens));
    if let Some(max) = max_tokens.filter(|_| text.is_truncated(max_tokens)) {
        out.push_str(&format!("… [{} of {} tokens]", max, text.tokens_count()));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concordance::{ConcordanceLine, SortOrder, Summary};
    use std::collections::BTreeMap;

    fn report() -> ConcordanceReport {
        let mut report = ConcordanceReport::empty("sat", SortOrder::RightNatural, 2);
        report.summary = Summary {
            total_count: 2,
            total_docs: 2,
            page: 1,
            total_pages: 1,
        };
        report.formatted = vec!["Page 1 of 1".to_string()];
        report.rows = vec![
            ConcordanceLine {
                document_id: 0,
                left: "the cat".to_string(),
                node: "sat".to_string(),
                right: "on the".to_string(),
                detail: None,
            },
            ConcordanceLine {
                document_id: 12,
                left: "a dog".to_string(),
                node: "sat".to_string(),
                right: "still".to_string(),
                detail: None,
            },
        ];
        report
    }

    #[test]
    fn kwic_lines_align_the_node() {
        let rendered = render_concordance_text(&report(), false);
        let lines: Vec<&str> = rendered.lines().filter(|l| l.contains("sat ")).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].find("sat"), lines[1].find("sat"));
        assert!(rendered.contains("Page 1 of 1"));
    }

    #[test]
    fn text_render_marks_truncation() {
        let text = Text {
            tokens: ["one", "two", "three"].map(String::from).to_vec(),
            has_spaces: vec![true, true, false],
            metadata: BTreeMap::from([("name".to_string(), "a".to_string())]),
        };
        let rendered = render_text(&text, Some(2));
        assert!(rendered.starts_with("name: a\n\none two"));
        assert!(rendered.contains("[2 of 3 tokens]"));
        assert!(!render_text(&text, None).contains("tokens]"));
    }
}
