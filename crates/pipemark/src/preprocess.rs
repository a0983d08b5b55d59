//! The markup preprocessor.
//!
//! [`Preprocessor::markup`] is the hook a template build calls once per
//! document, before the template compiler sees it. It applies the path
//! exclusions, rewrites every eligible pipe block and reports what it did.
//!
//! Rewriting is fail-open. A block that cannot be turned into a call is
//! kept exactly as written and the rest of the document is still processed;
//! nothing in this module returns an error.

use std::collections::BTreeSet;

use pipemark_syntax::{parse_chain, rewrite_block, InterpolationBlock, Locator, Segment};
use tracing::{debug, trace, warn};

use crate::exclude::PathExclusions;
use crate::options::RewriteOptions;

/// A rewritten block, recorded when debug logging is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRecord {
    /// The block as written.
    pub before: String,
    /// The generated replacement.
    pub after: String,
    /// Byte offset of the block in the input document.
    pub offset: usize,
}

/// The output of one document transform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Processed {
    /// The rewritten document.
    pub code: String,
    /// One record per rewritten block; empty unless debug logging is on.
    pub rewrites: Vec<RewriteRecord>,
    /// The path was excluded and the document returned as-is.
    pub skipped: bool,
}

/// Rewrites pipe syntax in template documents.
///
/// A `Preprocessor` holds only read-only configuration, so one instance can
/// serve any number of documents, from any number of threads.
///
/// # Example
///
/// ```rust
/// use pipemark::{Preprocessor, RewriteOptions};
///
/// let pre = Preprocessor::new(RewriteOptions::new().prefix("utils."))
///     .exclude("node_modules/");
///
/// let out = pre.markup("<p>{name | capitalize}</p>", "src/App.svelte");
/// assert_eq!(out.code, "<p>{utils.capitalize(name)}</p>");
///
/// let out = pre.markup("<p>{name | capitalize}</p>", "node_modules/x/App.svelte");
/// assert!(out.skipped);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: RewriteOptions,
    exclusions: PathExclusions,
}

impl Preprocessor {
    pub fn new(options: RewriteOptions) -> Self {
        Self {
            options,
            exclusions: PathExclusions::new(),
        }
    }

    /// Adds one path exclusion matcher.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclusions.push(pattern);
        self
    }

    /// Replaces the exclusion list.
    pub fn exclusions(mut self, exclusions: PathExclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    pub fn path_exclusions(&self) -> &PathExclusions {
        &self.exclusions
    }

    /// Preprocesses one document.
    ///
    /// `filename` is only consulted for exclusions.
    pub fn markup(&self, content: &str, filename: &str) -> Processed {
        if let Some(pattern) = self.exclusions.matching(filename) {
            trace!(filename, pattern, "skipping excluded document");
            return Processed {
                code: content.to_string(),
                rewrites: Vec::new(),
                skipped: true,
            };
        }

        if self.options.debug_logging {
            debug!(filename, "processing pipes");
        }

        let mut code = String::with_capacity(content.len());
        let mut rewrites = Vec::new();

        for segment in Locator::new(content) {
            match segment {
                Segment::Text(text) => code.push_str(text),
                Segment::Block(block) => match self.rewrite(&block, filename) {
                    Some(replacement) => {
                        if self.options.debug_logging {
                            debug!(before = block.raw, after = %replacement, "rewrote pipe block");
                            rewrites.push(RewriteRecord {
                                before: block.raw.to_string(),
                                after: replacement.clone(),
                                offset: block.start,
                            });
                        }
                        code.push_str(&replacement);
                    }
                    None => code.push_str(block.raw),
                },
            }
        }

        Processed {
            code,
            rewrites,
            skipped: false,
        }
    }

    /// The replacement for one block, or `None` to keep it verbatim.
    fn rewrite(&self, block: &InterpolationBlock<'_>, filename: &str) -> Option<String> {
        if !block.is_rewritable() {
            return None;
        }
        match rewrite_block(block, &self.options.name_prefix) {
            Ok(replacement) => Some(replacement),
            Err(err) => {
                warn!(
                    filename,
                    offset = block.start,
                    block = block.raw,
                    error = %err,
                    "leaving pipe block unchanged"
                );
                None
            }
        }
    }

    /// The prefixed names of every pipe a document calls.
    ///
    /// Only blocks that [`markup`](Self::markup) would rewrite contribute,
    /// so the set is exactly the functions the generated code references.
    /// Exclusions are not consulted.
    pub fn referenced_pipes(&self, content: &str) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for block in pipemark_syntax::blocks(content) {
            if !block.is_rewritable() {
                continue;
            }
            let stages = parse_chain(block.chain);
            if stages.is_empty() || stages.iter().any(|stage| stage.name.is_empty()) {
                continue;
            }
            for stage in stages {
                names.insert(format!("{}{}", self.options.name_prefix, stage.name));
            }
        }
        names
    }
}

/// Rewrites a document with the given options and no exclusions.
pub fn rewrite(content: &str, options: &RewriteOptions) -> String {
    Preprocessor::new(options.clone()).markup(content, "").code
}
