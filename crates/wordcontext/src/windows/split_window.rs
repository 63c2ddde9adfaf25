//! # Split Window Buffer

use std::collections::VecDeque;

use crate::{types::Token, windows::SplitExample};

/// The default rolling buffer ceiling.
pub const DEFAULT_BUFFER_CEILING: usize = 10_000;

/// A rolling token buffer which emits one [`SplitExample`] per appended token.
///
/// Once the buffer holds more than `2 * window` tokens, each push emits an
/// example built from the newest `2 * window + 1` tokens:
///
/// ```text
/// [ left: window ][ output ][ right: window ]   <- newest
/// ```
///
/// When the buffer grows past its ceiling, the oldest tokens are discarded,
/// keeping the newest `2 * window`.
#[derive(Debug, Clone)]
pub struct SplitWindow {
    window: usize,
    ceiling: usize,
    buffer: VecDeque<Token>,
}

impl SplitWindow {
    /// Create an empty buffer.
    ///
    /// ## Arguments
    /// * `window` - the left and right context length.
    /// * `ceiling` - the length past which the buffer is trimmed.
    pub fn new(
        window: usize,
        ceiling: usize,
    ) -> Self {
        Self {
            window,
            ceiling,
            buffer: VecDeque::with_capacity(ceiling.max(2 * window) + 1),
        }
    }

    /// The context length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// The trim ceiling.
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// The number of buffered tokens.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop all buffered tokens.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Append a token; returning the example it completes, if any.
    pub fn push(
        &mut self,
        token: Token,
    ) -> Option<SplitExample> {
        self.buffer.push_back(token);

        let span = 2 * self.window + 1;
        let example = if self.buffer.len() >= span {
            let center = self.buffer.len() - self.window - 1;
            let left = self.buffer.range(center - self.window..center).cloned().collect();
            let output = self.buffer[center].clone();
            let right = self.buffer.range(center + 1..).cloned().collect();
            Some(SplitExample {
                left,
                right,
                output,
            })
        } else {
            None
        };

        if self.buffer.len() > self.ceiling {
            let keep = 2 * self.window;
            let drop = self.buffer.len().saturating_sub(keep);
            self.buffer.drain(..drop);
        }

        example
    }
}
