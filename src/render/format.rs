//! # Message Formatting
//!
//! Turns raw message text into a small inline tree. Exactly two transforms
//! are applied, in order:
//!
//! 1. literal `\n` → line break
//! 2. `**text**` → emphasis (non-greedy)
//!
//! Everything else stays literal text. Markup only exists as [`Inline`]
//! nodes, so text from the user or the backend can never inject tags;
//! [`to_html`] escapes every text node when serializing.

use std::sync::LazyLock;

use regex::Regex;

/// Non-greedy bold marker. The newline substitution runs first in the
/// pipeline, so emphasis may span `\n`; other line terminators end it.
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^\r\x{2028}\x{2029}]*?)\*\*").expect("emphasis pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    LineBreak,
    /// Emphasized run. Children are only `Text` and `LineBreak`.
    Strong(Vec<Inline>),
}

/// Formats raw message text into inline nodes.
pub fn format_text(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in EMPHASIS.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_lines(&mut out, &text[last..whole.start()]);
        let mut strong = Vec::new();
        push_lines(&mut strong, inner.as_str());
        out.push(Inline::Strong(strong));
        last = whole.end();
    }
    push_lines(&mut out, &text[last..]);
    out
}

/// Splits on `\n`, emitting text runs separated by line breaks.
fn push_lines(out: &mut Vec<Inline>, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(Inline::LineBreak);
        }
        if !line.is_empty() {
            out.push(Inline::Text(line.to_string()));
        }
    }
}

/// Serializes inline nodes as HTML, escaping all text.
pub fn to_html(nodes: &[Inline]) -> String {
    let mut html = String::new();
    write_html(&mut html, nodes);
    html
}

fn write_html(html: &mut String, nodes: &[Inline]) {
    for node in nodes {
        match node {
            Inline::Text(text) => html.push_str(&escape_html(text)),
            Inline::LineBreak => html.push_str("<br>"),
            Inline::Strong(children) => {
                html.push_str("<strong>");
                write_html(html, children);
                html.push_str("</strong>");
            }
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
