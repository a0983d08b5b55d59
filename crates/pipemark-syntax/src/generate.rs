//! Call expression generation.
//!
//! Stages fold left over the base expression, so the first stage ends up
//! innermost:
//!
//! ```text
//! {price | formatCurrency:'EUR' | toUpperCase}
//!   => {toUpperCase(formatCurrency(price, 'EUR'))}
//! ```

use crate::chain::{parse_chain, PipeStage};
use crate::error::{GenerateError, Result};
use crate::locate::InterpolationBlock;

/// Folds `stages` over `expression`, prefixing every call name.
///
/// Returns the bare call expression, without braces.
pub fn generate(expression: &str, stages: &[PipeStage<'_>], prefix: &str) -> Result<String> {
    if expression.trim().is_empty() {
        return Err(GenerateError::EmptyExpression);
    }
    if stages.is_empty() {
        return Err(GenerateError::EmptyChain);
    }

    let mut acc = expression.to_string();
    for (index, stage) in stages.iter().enumerate() {
        if stage.name.is_empty() {
            return Err(GenerateError::EmptyStageName {
                index,
                stage: format!(":{}", stage.args),
            });
        }

        let capacity = prefix.len() + stage.name.len() + acc.len() + stage.args.len() + 4;
        let mut call = String::with_capacity(capacity);
        call.push_str(prefix);
        call.push_str(stage.name);
        call.push('(');
        call.push_str(&acc);
        for arg in stage.arguments() {
            call.push_str(", ");
            call.push_str(arg);
        }
        call.push(')');
        acc = call;
    }

    Ok(acc)
}

/// Builds the replacement text for a located block, braces included.
pub fn rewrite_block(block: &InterpolationBlock<'_>, prefix: &str) -> Result<String> {
    let stages = parse_chain(block.chain);
    let call = generate(block.expression, &stages, prefix)?;
    Ok(format!("{{{}}}", call))
}
