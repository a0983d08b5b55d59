//! # pipemark - pipe syntax for template markup
//!
//! pipemark is a preprocessing stage for template builds. It rewrites
//! filter-style pipe interpolations into plain nested function calls, so the
//! template compiler downstream only ever sees ordinary expressions:
//!
//! ```text
//! <p>{price | formatCurrency:'EUR' | toUpperCase}</p>
//!   => <p>{utils.toUpperCase(utils.formatCurrency(price, 'EUR'))}</p>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pipemark::{Preprocessor, RewriteOptions, PathExclusions};
//!
//! let pre = Preprocessor::new(RewriteOptions::new().prefix("utils."))
//!     .exclusions(PathExclusions::sveltekit_defaults());
//!
//! let out = pre.markup(
//!     "<p>{price | formatCurrency:'EUR' | toUpperCase}</p>",
//!     "src/routes/+page.svelte",
//! );
//! assert_eq!(
//!     out.code,
//!     "<p>{utils.toUpperCase(utils.formatCurrency(price, 'EUR'))}</p>"
//! );
//! ```
//!
//! ## Behavior
//!
//! - Stages apply left to right; the first stage is the innermost call.
//! - Arguments are copied verbatim. Quotes and brackets protect `|`, `:`
//!   and `,` inside them.
//! - Anything that does not parse is left exactly as written (fail-open).
//!   One bad block never stops the rest of the document.
//! - Blocks cannot contain braces of their own.
//!
//! ## Modules
//!
//! - [`Preprocessor`]: per-document hook with exclusions and debug records
//! - [`RewriteOptions`]: call-name prefix and debug switch
//! - [`PathExclusions`]: path matchers that bypass preprocessing
//! - [`Config`]: YAML configuration for front ends
//! - [`syntax`]: the underlying parser, re-exported from `pipemark-syntax`

mod config;
mod exclude;
mod options;
mod preprocess;

pub use config::{Config, ConfigError};
pub use exclude::{PathExclusions, SVELTEKIT_EXCLUDES};
pub use options::RewriteOptions;
pub use preprocess::{rewrite, Preprocessor, Processed, RewriteRecord};

/// The parsing layer, for callers that need blocks or stages directly.
pub use pipemark_syntax as syntax;
