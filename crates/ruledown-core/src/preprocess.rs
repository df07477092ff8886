//! Input normalization applied before parsing.
//!
//! [`normalize`] is a pure text-to-text pass and returns the input unchanged
//! (borrowed) when there is nothing to rewrite.

use std::borrow::Cow;

use memchr::memmem;
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br ?/?>").expect("line break pattern is valid"));

const VIDEO_TOKEN: &str = "youtube(";

/// Normalize raw author text:
///
/// 1. `\r\n` becomes `\n`;
/// 2. `<br>`, `<br/>` and `<br />` (any case) become `\n`;
/// 3. a bare `youtube(` at a token boundary becomes `-youtube(`.
///
/// ```
/// use ruledown_core::preprocess::normalize;
///
/// assert_eq!(normalize("a<BR/>b"), "a\nb");
/// assert_eq!(normalize("youtube(x)"), "-youtube(x)");
/// assert_eq!(normalize("www.youtube(x)"), "www.youtube(x)");
/// ```
pub fn normalize(raw: &str) -> Cow<'_, str> {
    let text = unify_newlines(Cow::Borrowed(raw));
    let text = collapse_line_breaks(text);
    mark_video_tokens(text)
}

fn unify_newlines(text: Cow<'_, str>) -> Cow<'_, str> {
    if memmem::find(text.as_bytes(), b"\r\n").is_none() {
        return text;
    }
    Cow::Owned(text.replace("\r\n", "\n"))
}

fn collapse_line_breaks(text: Cow<'_, str>) -> Cow<'_, str> {
    let replaced = match LINE_BREAK_RE.replace_all(&text, "\n") {
        Cow::Borrowed(_) => None,
        Cow::Owned(replaced) => Some(replaced),
    };
    replaced.map_or(text, Cow::Owned)
}

fn mark_video_tokens(text: Cow<'_, str>) -> Cow<'_, str> {
    let starts: Vec<usize> = memmem::find_iter(text.as_bytes(), VIDEO_TOKEN)
        .filter(|&at| at_token_boundary(&text, at))
        .collect();
    if starts.is_empty() {
        return text;
    }

    let mut out = String::with_capacity(text.len() + starts.len());
    let mut copied = 0;
    for at in starts {
        out.push_str(&text[copied..at]);
        out.push('-');
        copied = at;
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

fn at_token_boundary(text: &str, at: usize) -> bool {
    match text[..at].chars().next_back() {
        None => true,
        Some(c) => !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')),
    }
}
