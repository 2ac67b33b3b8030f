//! Text helpers shared by the renderers.

use serde::{Deserialize, Serialize};

/// Line terminator used in rendered markup.
#[cfg(windows)]
pub const NEWLINE: &str = "\r\n";
/// Line terminator used in rendered markup.
#[cfg(not(windows))]
pub const NEWLINE: &str = "\n";

/// How cell values are written into `<td>` elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapePolicy {
    /// Interpolate cell text unchanged. Callers own any sanitizing.
    #[default]
    Verbatim,
    /// Escape `& < > " '` as HTML entities.
    Html,
}

impl EscapePolicy {
    pub fn apply(self, text: &str) -> String {
        match self {
            EscapePolicy::Verbatim => text.to_string(),
            EscapePolicy::Html => escape_html(text),
        }
    }
}

/// Escape the five HTML-significant characters.
///
/// ```
/// use bstable::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & 'Jo'</b>"), "&lt;b&gt;Tom &amp; &#39;Jo&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for a single-quoted JavaScript string literal.
///
/// Line terminators are escaped too, since a raw one ends the literal.
pub(crate) fn escape_js_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}
