//! # Line Chunk Reads

use std::io::BufRead;

use crate::{WCResult, corpus::CaseMode};

/// Read at most `max_lines` lines, visiting each normalized word.
///
/// Returns the number of lines consumed; `0` means the reader is exhausted.
/// A chunk of blank lines consumes lines but visits no words.
pub fn visit_line_chunk<R, F>(
    reader: &mut R,
    max_lines: usize,
    case: CaseMode,
    mut visit: F,
) -> WCResult<usize>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut line = String::new();
    let mut lines = 0;
    while lines < max_lines {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        lines += 1;
        case.for_each_word(&line, &mut visit);
    }
    Ok(lines)
}
