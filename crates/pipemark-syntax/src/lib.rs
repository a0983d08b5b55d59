//! Pipe interpolation syntax for template markup.
//!
//! This crate parses `{expression | pipe:arg1, arg2 | other}` blocks and
//! turns them into nested call expressions a template compiler can evaluate
//! natively:
//!
//! ```rust
//! use pipemark_syntax::{blocks, rewrite_block};
//!
//! let doc = "<p>{price | formatCurrency:'EUR' | toUpperCase}</p>";
//! let block = blocks(doc).next().unwrap();
//! assert_eq!(
//!     rewrite_block(&block, "utils.").unwrap(),
//!     "{utils.toUpperCase(utils.formatCurrency(price, 'EUR'))}"
//! );
//! ```
//!
//! # Syntax
//!
//! ```text
//! block = "{" expression "|" chain "}"
//! chain = stage ("|" stage)*
//! stage = name (":" args)?
//! args  = arg ("," arg)*
//! ```
//!
//! Arguments are host-language expressions copied verbatim. Quoted strings
//! and `()`, `[]`, `{}` groups hide `|`, `:` and `,` from the parser, and
//! `||` is always logical-or. Braces inside a block are not supported: a
//! block is a brace pair with no other brace inside it.
//!
//! The crate is purely syntactic. It never checks that a pipe exists and
//! never evaluates anything.
//!
//! # Layers
//!
//! - [`scan`]: the depth/quote-aware delimiter scan every split uses
//! - [`Locator`]: splits a document into [`Segment`]s of text and blocks
//! - [`parse_chain`] / [`tokenize_args`]: stages and their arguments
//! - [`generate`] / [`rewrite_block`]: the nested call expression

mod chain;
mod error;
mod generate;
mod locate;
pub mod scan;

pub use chain::{parse_chain, tokenize_args, PipeStage};
pub use error::{GenerateError, Result};
pub use generate::{generate, rewrite_block};
pub use locate::{blocks, InterpolationBlock, Locator, Segment};
