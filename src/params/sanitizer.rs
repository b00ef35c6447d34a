//! Comment and string-literal stripping
//!
//! Produces a copy of the SQL in which no comment or literal content is left
//! that could hide or fake a `:name` placeholder.

use std::sync::LazyLock;

use regex::Regex;

/// `--` up to, but not including, the end of the line.
static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--[^\n]*").unwrap());

/// `/* ... */`, closed by the first `*/`, spanning lines.
static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// `'...'` or `"..."` with no escape handling.
static STRING_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'[^']*'|"[^"]*""#).unwrap());

/// Replacement for every literal span. Must not contain a colon or a word
/// character so that `:a'x'` cannot turn into `:ax`.
const LITERAL_PLACEHOLDER: &str = "''";

/// Strip comments, then neutralize string literals.
///
/// Line comments are removed first, then block comments, each pass working
/// left to right over the previous pass's output. A comment marker inside a
/// literal is therefore still treated as a comment; quotes inside a comment
/// are gone before literals are matched. Unterminated comments or literals
/// are left as they are.
pub fn sanitize(sql: &str) -> String {
    let without_line_comments = LINE_COMMENT_RE.replace_all(sql, "");
    let without_comments = BLOCK_COMMENT_RE.replace_all(&without_line_comments, "");
    STRING_LITERAL_RE
        .replace_all(&without_comments, LITERAL_PLACEHOLDER)
        .into_owned()
}

/// [`sanitize`] for SQL that may be absent. `None` yields an empty string.
pub fn sanitize_opt(sql: Option<&str>) -> String {
    sql.map(sanitize).unwrap_or_default()
}
