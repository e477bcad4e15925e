//! Source-text cleaning for embedding input.
//!
//! Strips comments, collapses the file onto a single whitespace-normalized
//! line, and truncates to a character budget. Local model servers reject
//! over-long prompts, so truncation is a hard precondition of every
//! embedding request.

use regex::Regex;

pub struct TextCleaner {
    block_comments: Regex,
    line_comments: Regex,
    max_chars: usize,
}

impl TextCleaner {
    /// `max_chars` is the post-cleaning budget; cleaned text never exceeds it.
    pub fn new(max_chars: usize) -> Self {
        Self {
            // (?s) lets `.` cross newlines; lazy match ends at the first `*/`
            block_comments: Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"),
            line_comments: Regex::new(r"//[^\n]*").expect("valid regex"),
            max_chars,
        }
    }

    /// Clean one source file: drop comments, trim every line, discard empty
    /// lines, join the remainder with single spaces, truncate to the budget.
    pub fn clean(&self, code: &str) -> String {
        let without_blocks = self.block_comments.replace_all(code, "");
        let without_comments = self.line_comments.replace_all(&without_blocks, "");

        let joined = without_comments
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        truncate_chars(&joined, self.max_chars)
    }
}

/// Truncate to at most `max` characters, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}
