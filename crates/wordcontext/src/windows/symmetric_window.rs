//! # Symmetric Window Extraction

use core::ops::Range;

use crate::{types::IndexType, windows::SymmetricExample};

/// The candidate center positions of a block of `len` indices.
///
/// This is `window .. len - window - 1`; the final position which has a
/// full right-hand window is *not* a candidate. Example counts depend on
/// this bound, so it is kept as-is.
pub fn symmetric_positions(
    len: usize,
    window: usize,
) -> Range<usize> {
    let end = len.saturating_sub(window + 1);
    window..end.max(window)
}

/// Extract every symmetric-window example of an index block.
///
/// Positions whose index is `unknown` are skipped. Each context is the
/// `window` indices before the center followed by the `window` after it.
///
/// ## Arguments
/// * `ids` - one ingested block of vocabulary indices.
/// * `window` - the window radius.
/// * `unknown` - the UNKNOWN index.
pub fn extract_symmetric_examples<I: IndexType>(
    ids: &[I],
    window: usize,
    unknown: I,
) -> Vec<SymmetricExample<I>> {
    symmetric_positions(ids.len(), window)
        .filter(|&idx| ids[idx] != unknown)
        .map(|idx| {
            let mut context = Vec::with_capacity(2 * window);
            context.extend_from_slice(&ids[idx - window..idx]);
            context.extend_from_slice(&ids[idx + 1..=idx + window]);
            SymmetricExample {
                context,
                target: ids[idx],
            }
        })
        .collect()
}
