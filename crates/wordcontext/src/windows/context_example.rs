//! # Context Examples

use crate::types::{IndexType, Token};

/// A symmetric-window example over vocabulary indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricExample<I: IndexType> {
    /// The `2 * window` surrounding indices, in corpus order, target excluded.
    pub context: Vec<I>,

    /// The center index; never UNKNOWN.
    pub target: I,
}

/// A split-window example over raw tokens.
///
/// Vectorized late, so that UNKNOWN substitution applies to every slot,
/// including `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitExample {
    /// The `window` tokens before `output`.
    pub left: Vec<Token>,

    /// The `window` tokens after `output`.
    pub right: Vec<Token>,

    /// The masked center token.
    pub output: Token,
}
