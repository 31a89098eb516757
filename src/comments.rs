//! Comment stripping
//!
//! Removes `/** ... */` block comments and `// ...` line comments before any
//! structural parsing happens. Block comments are stripped first.
//!
//! Stripping is not literal-aware: a `//` inside a quoted or raw string is
//! still taken as the start of a comment.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*\*.*?\*/").unwrap());
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\n]*").unwrap());

/// Strip all comments from `source`.
///
/// Stripping twice yields the same text as stripping once.
pub fn strip_comments(source: &str) -> String {
    let mut text = source.to_string();
    // Removing one block comment can splice two halves of text into a new one.
    loop {
        let stripped = BLOCK_COMMENT.replace_all(&text, "");
        if stripped.len() == text.len() {
            break;
        }
        text = stripped.into_owned();
    }
    LINE_COMMENT.replace_all(&text, "").into_owned()
}
