//! # Context Windows
//!
//! Two window policies turn a token stream into context examples:
//!
//! * [`extract_symmetric_examples`] - a fixed-radius window around each
//!   in-vocabulary position of an index block; see [`SymmetricExample`].
//! * [`SplitWindow`] - a bounded rolling buffer emitting one
//!   [`SplitExample`] per appended token.

mod context_example;
mod split_window;
mod symmetric_window;

#[doc(inline)]
pub use context_example::{SplitExample, SymmetricExample};
#[doc(inline)]
pub use split_window::{DEFAULT_BUFFER_CEILING, SplitWindow};
#[doc(inline)]
pub use symmetric_window::{extract_symmetric_examples, symmetric_positions};
