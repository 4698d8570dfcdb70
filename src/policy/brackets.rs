//! Bracket-pair policy - the shipped structural check
//!
//! Scans the buffer left to right with a stack of pending openers. The scan is
//! first-error-wins: an unmatched or mismatched closer stops it immediately,
//! and the character counter reflects exactly the characters examined up to
//! and including the offending closer.

use crate::buffer::ScanBuffer;
use crate::policy::{Policy, PolicyTag};
use crate::result::{PolicyResult, Verdict};
use crate::source::SourceMode;

/// The opener a closer must pop to match, or `None` for non-closer characters
fn matching_opener(closer: char) -> Option<char> {
    match closer {
        ')' => Some('('),
        '}' => Some('{'),
        ']' => Some('['),
        _ => None,
    }
}

fn is_opener(c: char) -> bool {
    matches!(c, '(' | '{' | '[')
}

/// Checks that `()`, `{}`, and `[]` nest correctly; all other characters are
/// ignored
#[derive(Debug, Default)]
pub struct BracketPolicy {
    stack: Vec<char>,
    validations_performed: u32,
    chars_scanned: usize,
}

impl BracketPolicy {
    /// Create a fresh delegate with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    fn result(&self, verdict: Verdict, mode: SourceMode) -> PolicyResult {
        PolicyResult::new(
            self.tag(),
            verdict,
            self.validations_performed,
            self.chars_scanned,
            mode,
        )
    }
}

impl Policy for BracketPolicy {
    fn tag(&self) -> PolicyTag {
        PolicyTag::BracketPairs
    }

    fn scan(&mut self, buffer: &ScanBuffer, mode: SourceMode) -> PolicyResult {
        // empty buffer: vacuously valid, and no scan work is recorded
        if buffer.is_empty() {
            return self.result(Verdict::Valid, mode);
        }

        self.validations_performed += 1;
        for &c in buffer.iter() {
            self.chars_scanned += 1;
            if is_opener(c) {
                self.stack.push(c);
            } else if let Some(expected) = matching_opener(c) {
                // explicit pop-check: underflow is an expected input
                // condition, not a panic
                if self.stack.pop() != Some(expected) {
                    return self.result(Verdict::Invalid, mode);
                }
            }
        }

        let verdict = if self.stack.is_empty() {
            Verdict::Valid
        } else {
            // unclosed openers remain
            Verdict::Invalid
        };
        self.result(verdict, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> PolicyResult {
        let mut buf = ScanBuffer::new();
        buf.push_str(input);
        BracketPolicy::new().scan(&buf, SourceMode::Literal)
    }

    #[test]
    fn test_nested_pairs_are_valid() {
        let result = scan("(({[]}))");
        assert_eq!(result.verdict(), Verdict::Valid);
        assert_eq!(result.chars_scanned(), 8);
        assert_eq!(result.validations_performed(), 1);
    }

    #[test]
    fn test_unclosed_opener_scans_full_input() {
        let result = scan("(({[]})");
        assert_eq!(result.verdict(), Verdict::Invalid);
        assert_eq!(result.chars_scanned(), 7);
    }

    #[test]
    fn test_leading_closer_stops_at_first_char() {
        let result = scan(")(({[]})");
        assert_eq!(result.verdict(), Verdict::Invalid);
        assert_eq!(result.chars_scanned(), 1);
    }

    #[test]
    fn test_extra_trailing_closer_stops_at_offender() {
        let result = scan("(({[]})))");
        assert_eq!(result.verdict(), Verdict::Invalid);
        assert_eq!(result.chars_scanned(), 9);
    }

    #[test]
    fn test_mismatched_closer_type_stops_immediately() {
        // the ']' at position 3 pops '{'
        let result = scan("({]})");
        assert_eq!(result.verdict(), Verdict::Invalid);
        assert_eq!(result.chars_scanned(), 3);
    }

    #[test]
    fn test_non_bracket_chars_are_ignored() {
        let input = "(ajka(g{gagagag[222244]}ggaggg))gggg";
        let result = scan(input);
        assert_eq!(result.verdict(), Verdict::Valid);
        assert_eq!(result.chars_scanned(), input.chars().count());
    }

    #[test]
    fn test_letters_alone_are_valid() {
        let result = scan("no brackets here 123");
        assert_eq!(result.verdict(), Verdict::Valid);
        assert_eq!(result.chars_scanned(), 20);
    }

    #[test]
    fn test_empty_buffer_is_valid_with_no_work_recorded() {
        let buf = ScanBuffer::new();
        let result = BracketPolicy::new().scan(&buf, SourceMode::Literal);
        assert_eq!(result.verdict(), Verdict::Valid);
        assert_eq!(result.validations_performed(), 0);
        assert_eq!(result.chars_scanned(), 0);
    }

    #[test]
    fn test_single_opener_is_invalid() {
        let result = scan("(");
        assert_eq!(result.verdict(), Verdict::Invalid);
        assert_eq!(result.chars_scanned(), 1);
    }

    #[test]
    fn test_interleaved_pair_types() {
        let result = scan("([)]");
        assert_eq!(result.verdict(), Verdict::Invalid);
        // the ')' at position 3 pops '[' and mismatches
        assert_eq!(result.chars_scanned(), 3);
    }

    #[test]
    fn test_non_empty_scan_counts_one_validation() {
        let result = scan("()");
        assert_eq!(result.validations_performed(), 1);
    }

    #[test]
    fn test_result_carries_source_mode() {
        let mut buf = ScanBuffer::new();
        buf.push_str("[]");
        let result = BracketPolicy::new().scan(&buf, SourceMode::Pipe);
        assert_eq!(result.mode(), SourceMode::Pipe);
    }
}
