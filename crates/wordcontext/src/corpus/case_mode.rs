//! # Case Normalization

use std::borrow::Cow;

/// How corpus words are normalized before counting or lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CaseMode {
    /// Words are used verbatim; lookup is case-sensitive.
    #[default]
    Preserve,

    /// Lines are lower-cased before splitting; lookup is case-normalized.
    Lowercase,
}

impl CaseMode {
    /// Normalize a full line.
    pub fn normalize_line<'a>(
        &self,
        line: &'a str,
    ) -> Cow<'a, str> {
        match self {
            CaseMode::Preserve => Cow::Borrowed(line),
            CaseMode::Lowercase => Cow::Owned(line.to_lowercase()),
        }
    }

    /// Normalize a line and visit each whitespace-delimited word.
    pub fn for_each_word<F>(
        &self,
        line: &str,
        mut visit: F,
    ) where
        F: FnMut(&str),
    {
        let line = self.normalize_line(line);
        for word in line.split_whitespace() {
            visit(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve() {
        let mut words = Vec::new();
        CaseMode::Preserve.for_each_word("  The Cat\tsat \n", |w| words.push(w.to_string()));
        assert_eq!(words, vec!["The", "Cat", "sat"]);
    }

    #[test]
    fn test_lowercase() {
        let mut words = Vec::new();
        CaseMode::Lowercase.for_each_word("The CAT sat", |w| words.push(w.to_string()));
        assert_eq!(words, vec!["the", "cat", "sat"]);
        assert_eq!(CaseMode::Lowercase.normalize_line("ÉCOLE"), "école");
    }
}
