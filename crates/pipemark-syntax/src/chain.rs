//! Pipe chain parsing.
//!
//! A chain is the text after the first `|` of a block:
//!
//! ```text
//! formatCurrency:'EUR', 2 | toUpperCase
//! └──── stage ──────────┘   └─ stage ─┘
//! ```
//!
//! Each stage is a name, optionally followed by `:` and a comma-separated
//! argument list. All three splits (stages, name/arguments, arguments) are
//! top-level only, so quoted strings and bracketed groups can carry `|`, `:`
//! and `,` freely.

use crate::scan::{split_once_top_level, split_top_level};

/// One `name[:args]` segment of a pipe chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeStage<'a> {
    /// The pipe function name, trimmed. Empty only for malformed stages
    /// such as `:x`, which the generator rejects.
    pub name: &'a str,
    /// The raw argument text after the first top-level `:`, trimmed.
    pub args: &'a str,
}

impl<'a> PipeStage<'a> {
    /// Splits one trimmed stage segment into name and argument text.
    pub fn parse(segment: &'a str) -> Self {
        match split_once_top_level(segment, ':') {
            Some((name, args)) => Self {
                name: name.trim(),
                args: args.trim(),
            },
            None => Self {
                name: segment.trim(),
                args: "",
            },
        }
    }

    /// The stage's arguments in evaluation order.
    pub fn arguments(&self) -> Vec<&'a str> {
        tokenize_args(self.args)
    }
}

/// Splits a chain into its stages, left to right.
///
/// Empty segments (`f | | g`, a trailing `|`) are dropped.
pub fn parse_chain(chain: &str) -> Vec<PipeStage<'_>> {
    split_top_level(chain, '|')
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(PipeStage::parse)
        .collect()
}

/// Splits an argument list on top-level commas.
///
/// Tokens are trimmed and kept verbatim otherwise: `'EUR'` stays quoted,
/// `[1, 2]` stays bracketed. Whitespace between two commas still produces an
/// (empty) token; only an empty trailing remainder is dropped.
pub fn tokenize_args(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }

    let mut tokens: Vec<&str> = split_top_level(args, ',')
        .into_iter()
        .map(str::trim)
        .collect();
    if tokens.last().is_some_and(|last| last.is_empty()) {
        tokens.pop();
    }
    tokens
}
