//! Pre-tokenization: split raw text into bounded-length segments.
//!
//! The segmenter classifies the input left to right into runs (contraction
//! suffixes, alphabetic runs, digit runs, single punctuation characters,
//! whitespace runs) and packs adjacent non-whitespace runs into segments of
//! at most `max_len` characters. Every maximal whitespace run collapses
//! into exactly one [`Segment::Whitespace`] marker; leading and trailing
//! markers are trimmed from the result.
//!
//! Lengths are measured in characters, not bytes, so multi-byte text is
//! never split inside a code point.

use regex::Regex;

use super::tokenizer::TokenizerError;

/// Classification grammar, leftmost-first alternation:
/// contraction suffixes, alphabetic runs, digit runs, any single character
/// that is neither whitespace nor alphanumeric, whitespace runs.
pub const SPLIT_PATTERN: &str = r"(?i:'s|'t|'re|'ve|'m|'ll|'d)|\p{L}+|\p{N}+|[^\s\p{L}\p{N}]|\s+";

/// One piece of segmenter output: literal text or a whitespace marker.
///
/// A `Whitespace` marker stands for one maximal run of whitespace of any
/// length. Every `Literal` holds at most `max_len` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Whitespace,
}

impl Segment {
    /// Literal text, or `None` for a whitespace marker.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(s) => Some(s),
            Segment::Whitespace => None,
        }
    }
}

/// Splits text into length-bounded segments around whitespace boundaries.
#[derive(Debug, Clone)]
pub struct Segmenter {
    pattern: Regex,
    max_len: usize,
}

impl Segmenter {
    /// Create a segmenter with the given length bound.
    ///
    /// `max_len == 0` is [`TokenizerError::InvalidMaxLen`], checked before
    /// any scanning.
    pub fn new(max_len: usize) -> Result<Self, TokenizerError> {
        if max_len == 0 {
            return Err(TokenizerError::InvalidMaxLen(max_len));
        }
        let pattern = Regex::new(SPLIT_PATTERN)?;
        Ok(Self { pattern, max_len })
    }

    /// The configured length bound.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Split `text` into segments.
    ///
    /// Empty input yields an empty list, as does whitespace-only input
    /// (the lone marker is trimmed).
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;
        let mut in_whitespace = false;

        for m in self.pattern.find_iter(text) {
            let run = m.as_str();
            if run.chars().all(char::is_whitespace) {
                if !in_whitespace {
                    if !current.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current)));
                        current_len = 0;
                    }
                    segments.push(Segment::Whitespace);
                }
                in_whitespace = true;
            } else {
                in_whitespace = false;
                let run_len = run.chars().count();
                if run_len > self.max_len {
                    if !current.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current)));
                        current_len = 0;
                    }
                    self.push_chunks(run, &mut segments);
                } else if current_len + run_len > self.max_len {
                    if !current.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current)));
                    }
                    current.push_str(run);
                    current_len = run_len;
                } else {
                    // Runs on the same side of whitespace fuse with no separator.
                    current.push_str(run);
                    current_len += run_len;
                }
            }
        }
        if !current.is_empty() {
            segments.push(Segment::Literal(current));
        }

        let mut merged = self.merge(segments);

        while merged.first() == Some(&Segment::Whitespace) {
            merged.remove(0);
        }
        while merged.last() == Some(&Segment::Whitespace) {
            merged.pop();
        }
        merged
    }

    /// Hard-split an oversized run into chunks of at most `max_len` chars.
    fn push_chunks(&self, run: &str, segments: &mut Vec<Segment>) {
        let mut chunk = String::new();
        let mut chunk_len = 0usize;
        for ch in run.chars() {
            if chunk_len == self.max_len {
                segments.push(Segment::Literal(std::mem::take(&mut chunk)));
                chunk_len = 0;
            }
            chunk.push(ch);
            chunk_len += 1;
        }
        if !chunk.is_empty() {
            segments.push(Segment::Literal(chunk));
        }
    }

    /// Re-walk the segment list, re-merging undersized literal fragments up
    /// to the bound and dropping adjacent duplicate whitespace markers.
    fn merge(&self, segments: Vec<Segment>) -> Vec<Segment> {
        let mut merged = Vec::with_capacity(segments.len());
        let mut current = String::new();
        let mut current_len = 0usize;

        for segment in segments {
            match segment {
                Segment::Whitespace => {
                    if !current.is_empty() {
                        merged.push(Segment::Literal(std::mem::take(&mut current)));
                        current_len = 0;
                    }
                    if merged.last() != Some(&Segment::Whitespace) {
                        merged.push(Segment::Whitespace);
                    }
                }
                Segment::Literal(s) => {
                    let len = s.chars().count();
                    if current_len + len > self.max_len {
                        if !current.is_empty() {
                            merged.push(Segment::Literal(std::mem::take(&mut current)));
                        }
                        current = s;
                        current_len = len;
                    } else {
                        current.push_str(&s);
                        current_len += len;
                    }
                }
            }
        }
        if !current.is_empty() {
            merged.push(Segment::Literal(current));
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .map(|s| s.as_literal().unwrap_or("<ws>"))
            .collect()
    }

    #[test]
    fn test_simple_sentence() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("This is a test string.");
        assert_eq!(
            literals(&segments),
            vec!["This", "<ws>", "is", "<ws>", "a", "<ws>", "test", "<ws>", "string."]
        );
    }

    #[test]
    fn test_punctuation_fuses_with_words() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("Hello, world! This is a test.");
        assert_eq!(
            literals(&segments),
            vec!["Hello,", "<ws>", "world!", "<ws>", "This", "<ws>", "is", "<ws>", "a", "<ws>", "test."]
        );
    }

    #[test]
    fn test_whitespace_run_collapses_to_one_marker() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("This  is   a    test.");
        assert_eq!(
            literals(&segments),
            vec!["This", "<ws>", "is", "<ws>", "a", "<ws>", "test."]
        );

        let segments = segmenter.segment("Multiple     spaces.");
        assert_eq!(literals(&segments), vec!["Multiple", "<ws>", "spaces."]);
    }

    #[test]
    fn test_tabs_and_newlines_are_whitespace() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("Mixed: spaces, tabs\t, and\nnewlines.");
        assert_eq!(
            literals(&segments),
            vec!["Mixed:", "<ws>", "spaces,", "<ws>", "tabs", "<ws>", ",", "<ws>", "and", "<ws>", "newlines."]
        );
    }

    #[test]
    fn test_oversized_run_hard_split() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("Averylongwordthatexceedsthemaxlength");
        let parts = literals(&segments);
        assert_eq!(
            parts,
            vec!["Averylongw", "ordthatexc", "eedsthemax", "length"]
        );
        let whole: String = parts.concat();
        assert_eq!(whole, "Averylongwordthatexceedsthemaxlength");
    }

    #[test]
    fn test_run_exactly_max_len_not_split() {
        let segmenter = Segmenter::new(5).unwrap();
        let segments = segmenter.segment("abcde");
        assert_eq!(segments, vec![Segment::Literal("abcde".to_string())]);
    }

    #[test]
    fn test_every_literal_within_bound() {
        for max_len in 1..=12 {
            let segmenter = Segmenter::new(max_len).unwrap();
            let segments =
                segmenter.segment("The quick brown fox: 12345, jumps over 'the' lazy dog!!");
            for segment in &segments {
                if let Some(s) = segment.as_literal() {
                    assert!(
                        s.chars().count() <= max_len,
                        "segment {s:?} exceeds bound {max_len}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let segmenter = Segmenter::new(10).unwrap();
        assert_eq!(segmenter.segment(""), vec![]);
    }

    #[test]
    fn test_whitespace_only_input() {
        let segmenter = Segmenter::new(10).unwrap();
        assert_eq!(segmenter.segment("   \t\n  "), vec![]);
    }

    #[test]
    fn test_leading_and_trailing_whitespace_trimmed() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("  hello  ");
        assert_eq!(segments, vec![Segment::Literal("hello".to_string())]);
    }

    #[test]
    fn test_contraction_is_one_unit() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("It's fine, isn't it?");
        assert_eq!(
            literals(&segments),
            vec!["It's", "<ws>", "fine,", "<ws>", "isn't", "<ws>", "it?"]
        );
    }

    #[test]
    fn test_digit_runs() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("room 1234 on floor 9");
        assert_eq!(
            literals(&segments),
            vec!["room", "<ws>", "1234", "<ws>", "on", "<ws>", "floor", "<ws>", "9"]
        );
    }

    #[test]
    fn test_punctuation_chars_fuse_up_to_bound() {
        let segmenter = Segmenter::new(10).unwrap();
        let segments = segmenter.segment("Edge case: !@#$%^&*()_+");
        for segment in &segments {
            if let Some(s) = segment.as_literal() {
                assert!(s.chars().count() <= 10);
            }
        }
        let rejoined: String = segments
            .iter()
            .map(|s| s.as_literal().unwrap_or(" "))
            .collect();
        assert_eq!(rejoined, "Edge case: !@#$%^&*()_+");
    }

    #[test]
    fn test_multibyte_text_counts_chars() {
        let segmenter = Segmenter::new(3).unwrap();
        // Five CJK chars; hard split must land on char boundaries.
        let segments = segmenter.segment("こんにちは");
        assert_eq!(
            literals(&segments),
            vec!["こんに", "ちは"]
        );
    }

    #[test]
    fn test_invalid_max_len() {
        let err = Segmenter::new(0).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMaxLen(0)));
    }
}
