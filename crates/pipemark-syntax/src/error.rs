//! Error types for call generation.

use thiserror::Error;

/// Reasons a located block cannot be turned into a call expression.
///
/// None of these abort a document transform: the rewriter keeps the
/// offending block verbatim and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The text before the first `|` is blank.
    #[error("pipe block has an empty expression")]
    EmptyExpression,

    /// The chain contains no stage once empty segments are dropped.
    #[error("pipe block has no stages")]
    EmptyChain,

    /// A stage has arguments but no name, as in `{value | :arg}`.
    #[error("stage {index} has no pipe name (`{stage}`)")]
    EmptyStageName { index: usize, stage: String },
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GenerateError>;
