//! Block location: finding `{expression | chain}` spans in markup.
//!
//! The [`Locator`] walks a document and yields it back as a sequence of
//! [`Segment`]s. Concatenating the raw text of every segment reproduces the
//! input byte for byte, so a rewriter only has to decide, block by block,
//! whether to emit the original span or a replacement.
//!
//! # Grammar restriction
//!
//! Braces do not nest. A candidate block is a `{...}` span whose content has
//! no `{` or `}` of its own; `{a | f:{x: 1}}` is left untouched. This keeps
//! the syntax a single-pass match instead of a recursive one.
//!
//! A brace inside a string literal still ends the span, so `{s | f:'}'}` is
//! cut at the quoted `}`. Such a span ends inside an open string and is never
//! rewritten.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scan::{ends_in_string, split_once_top_level};

/// A brace pair with no brace inside it.
static BRACE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

/// One pipe interpolation block found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationBlock<'a> {
    /// The full matched span, braces included.
    pub raw: &'a str,
    /// Trimmed text before the first top-level `|`.
    pub expression: &'a str,
    /// Trimmed text after the first top-level `|`.
    pub chain: &'a str,
    /// Byte offset of the opening brace.
    pub start: usize,
    /// Byte offset just past the closing brace.
    pub end: usize,
}

impl<'a> InterpolationBlock<'a> {
    /// Parses a raw `{...}` span located at `start`.
    ///
    /// Returns `None` when the content has no top-level `|`, in which case the
    /// span is ordinary markup rather than pipe syntax.
    pub fn parse(raw: &'a str, start: usize) -> Option<Self> {
        let content = raw.strip_prefix('{')?.strip_suffix('}')?;
        let (expression, chain) = split_once_top_level(content, '|')?;
        Some(Self {
            raw,
            expression: expression.trim(),
            chain: chain.trim(),
            start,
            end: start + raw.len(),
        })
    }

    /// Whether both halves are non-empty and the content closes every
    /// string it opens.
    ///
    /// Blocks like `{ | f}`, `{e | }` or `{s | f:'}` are located but must be
    /// emitted verbatim.
    pub fn is_rewritable(&self) -> bool {
        let content = self
            .raw
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(self.raw);
        !self.expression.is_empty() && !self.chain.is_empty() && !ends_in_string(content)
    }
}

/// A piece of a located document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal markup between blocks.
    Text(&'a str),
    /// A pipe interpolation block.
    Block(InterpolationBlock<'a>),
}

impl<'a> Segment<'a> {
    /// The original source text of this segment.
    pub fn raw(&self) -> &'a str {
        match self {
            Segment::Text(text) => *text,
            Segment::Block(block) => block.raw,
        }
    }
}

/// Lazy iterator splitting a document into text and pipe blocks.
///
/// Brace spans that are not pipe syntax (no top-level `|`) are folded into
/// the surrounding text segment.
#[derive(Debug, Clone)]
pub struct Locator<'a> {
    input: &'a str,
    /// Start of the text not yet emitted.
    pos: usize,
    /// Where the next regex search begins.
    search: usize,
    pending: Option<InterpolationBlock<'a>>,
}

impl<'a> Locator<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            search: 0,
            pending: None,
        }
    }

    fn next_block(&mut self) -> Option<InterpolationBlock<'a>> {
        while self.search < self.input.len() {
            let found = BRACE_SPAN.find_at(self.input, self.search)?;
            self.search = found.end();
            if let Some(block) = InterpolationBlock::parse(found.as_str(), found.start()) {
                return Some(block);
            }
        }
        None
    }
}

impl<'a> Iterator for Locator<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(block) = self.pending.take() {
            self.pos = block.end;
            return Some(Segment::Block(block));
        }

        if self.pos >= self.input.len() {
            return None;
        }

        match self.next_block() {
            Some(block) if block.start > self.pos => {
                let text = &self.input[self.pos..block.start];
                self.pos = block.start;
                self.pending = Some(block);
                Some(Segment::Text(text))
            }
            Some(block) => {
                self.pos = block.end;
                Some(Segment::Block(block))
            }
            None => {
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                Some(Segment::Text(text))
            }
        }
    }
}

/// Collects the pipe blocks of a document, skipping the text between them.
pub fn blocks(input: &str) -> impl Iterator<Item = InterpolationBlock<'_>> {
    Locator::new(input).filter_map(|segment| match segment {
        Segment::Block(block) => Some(block),
        Segment::Text(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(input: &str) -> String {
        Locator::new(input).map(|s| s.raw()).collect()
    }

    mod block_parsing {
        use super::*;

        #[test]
        fn splits_expression_and_chain() {
            let block = InterpolationBlock::parse("{ price | currency:'EUR' }", 0).unwrap();
            assert_eq!(block.expression, "price");
            assert_eq!(block.chain, "currency:'EUR'");
            assert!(block.is_rewritable());
        }

        #[test]
        fn splits_at_first_pipe() {
            let block = InterpolationBlock::parse("{a | f | g}", 0).unwrap();
            assert_eq!(block.expression, "a");
            assert_eq!(block.chain, "f | g");
        }

        #[test]
        fn pipe_inside_quoted_expression_is_skipped() {
            let block = InterpolationBlock::parse("{'a|b' | upper}", 0).unwrap();
            assert_eq!(block.expression, "'a|b'");
            assert_eq!(block.chain, "upper");
        }

        #[test]
        fn no_pipe_is_not_a_block() {
            assert_eq!(InterpolationBlock::parse("{name}", 0), None);
            assert_eq!(InterpolationBlock::parse("{a || b}", 0), None);
        }

        #[test]
        fn empty_halves_are_not_rewritable() {
            let block = InterpolationBlock::parse("{ | f}", 0).unwrap();
            assert!(!block.is_rewritable());
            let block = InterpolationBlock::parse("{e | }", 0).unwrap();
            assert!(!block.is_rewritable());
        }

        #[test]
        fn open_string_is_not_rewritable() {
            let block = InterpolationBlock::parse("{s | f:'}", 0).unwrap();
            assert_eq!(block.chain, "f:'");
            assert!(!block.is_rewritable());
        }

        #[test]
        fn offsets_cover_raw() {
            let block = InterpolationBlock::parse("{a | f}", 10).unwrap();
            assert_eq!(block.start, 10);
            assert_eq!(block.end, 17);
        }
    }

    mod locator {
        use super::*;

        #[test]
        fn empty_document() {
            assert_eq!(Locator::new("").count(), 0);
        }

        #[test]
        fn plain_text_is_one_segment() {
            let segments: Vec<_> = Locator::new("<p>hello</p>").collect();
            assert_eq!(segments, vec![Segment::Text("<p>hello</p>")]);
        }

        #[test]
        fn text_block_text() {
            let input = "<p>Text: {text | toUpperCase}</p>";
            let segments: Vec<_> = Locator::new(input).collect();
            assert_eq!(segments.len(), 3);
            assert_eq!(segments[0], Segment::Text("<p>Text: "));
            match segments[1] {
                Segment::Block(block) => {
                    assert_eq!(block.expression, "text");
                    assert_eq!(block.chain, "toUpperCase");
                    assert_eq!(&input[block.start..block.end], block.raw);
                }
                Segment::Text(_) => panic!("expected a block"),
            }
            assert_eq!(segments[2], Segment::Text("</p>"));
        }

        #[test]
        fn adjacent_blocks() {
            let segments: Vec<_> = Locator::new("{a | f}{b | g}").collect();
            assert_eq!(segments.len(), 2);
            assert!(matches!(segments[0], Segment::Block(_)));
            assert!(matches!(segments[1], Segment::Block(_)));
        }

        #[test]
        fn non_pipe_braces_merge_into_text() {
            let segments: Vec<_> = Locator::new("{name} and {other} {x | f}").collect();
            assert_eq!(segments.len(), 2);
            assert_eq!(segments[0], Segment::Text("{name} and {other} "));
        }

        #[test]
        fn nested_braces_only_match_innermost() {
            let found: Vec<_> = blocks("{outer {a | f} b}").collect();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].raw, "{a | f}");
        }

        #[test]
        fn nested_object_argument_is_not_a_block() {
            assert_eq!(blocks("{a | f:{x: 1}}").count(), 0);
        }

        #[test]
        fn unclosed_brace_is_text() {
            assert_eq!(reassemble("{a | f"), "{a | f");
            assert_eq!(blocks("{a | f").count(), 0);
        }

        #[test]
        fn reassembly_is_lossless() {
            let input = "<h1>{title | upper}</h1>\n{#if a || b}<p>{n | pad:3, '0'}</p>{/if}{ | x}";
            assert_eq!(reassemble(input), input);
        }

        #[test]
        fn quoted_closing_brace_cuts_the_span() {
            let found: Vec<_> = blocks("{s | f:'}'}").collect();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].raw, "{s | f:'}");
            assert!(!found[0].is_rewritable());
            assert_eq!(reassemble("{s | f:'}'}"), "{s | f:'}'}");
        }

        #[test]
        fn empty_halves_still_located() {
            let found: Vec<_> = blocks("{ | f} {e | }").collect();
            assert_eq!(found.len(), 2);
            assert!(found.iter().all(|b| !b.is_rewritable()));
        }
    }
}
