// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-document view rebuilt from the token stream

use serde::Serialize;
use std::collections::BTreeMap;

/// A document's tokens with their original spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub tokens: Vec<String>,
    pub has_spaces: Vec<bool>,
    pub metadata: BTreeMap<String, String>,
}

impl Text {
    pub fn tokens_count(&self) -> usize {
        self.tokens.len()
    }

    /// Re-join the tokens, optionally stopping after `max_tokens`.
    ///
    /// The space after the final emitted token is dropped when truncating.
    pub fn as_string(&self, max_tokens: Option<usize>) -> String {
        let limit = max_tokens.map_or(self.tokens.len(), |max| max.min(self.tokens.len()));
        let mut out = String::new();
        for (i, (token, &space)) in self.tokens.iter().zip(&self.has_spaces).take(limit).enumerate() {
            out.push_str(token);
            if space && i + 1 < limit {
                out.push(' ');
            }
        }
        out
    }

    /// Whether `as_string(max_tokens)` would drop tokens.
    pub fn is_truncated(&self, max_tokens: Option<usize>) -> bool {
        max_tokens.is_some_and(|max| self.tokens.len() > max)
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string(None))
    }
}
