//! The two synchronized outputs of every rendering step.
//!
//! `markdown` equals `plain` plus hyperlink markup: removing every
//! `<a href="...">` opening tag and every `</a>` closing tag from `markdown`
//! and decoding its entities gives back `plain` exactly. Text outside link
//! tags is HTML-escaped in `markdown`, since the channel is emitted inside
//! `<pre>` blocks. Every operation here applies the same structural change to
//! both fields so the invariant holds by construction.

use serde::Serialize;

const LINK_OPEN: &str = "<a href=\"";
const LINK_OPEN_END: &str = "\">";
const LINK_CLOSE: &str = "</a>";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPair {
    pub plain: String,
    pub markdown: String,
}

impl RenderedPair {
    /// Same text in both channels.
    pub fn text(text: impl Into<String>) -> Self {
        let plain = text.into();
        Self {
            markdown: escape(&plain),
            plain,
        }
    }

    /// `label` in plain, `<a href="href">label</a>` in markdown.
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            plain: label.to_string(),
            markdown: format!(
                "{LINK_OPEN}{href}{LINK_OPEN_END}{}{LINK_CLOSE}",
                escape(label)
            ),
        }
    }

    /// Join pairs with a separator in both channels.
    pub fn join(items: &[RenderedPair], sep: &str) -> Self {
        Self {
            plain: items
                .iter()
                .map(|i| i.plain.as_str())
                .collect::<Vec<_>>()
                .join(sep),
            markdown: items
                .iter()
                .map(|i| i.markdown.as_str())
                .collect::<Vec<_>>()
                .join(&escape(sep)),
        }
    }

    /// Prefix a modifier such as `*` or `[]`.
    ///
    /// When the markdown starts with a link the modifier goes inside it, in
    /// front of the visible label, so the rendered link reads `*Foo` while
    /// the href stays untouched.
    #[must_use]
    pub fn prefixed(self, modifier: &str) -> Self {
        let escaped = escape(modifier);
        let markdown = match leading_label_offset(&self.markdown) {
            Some(at) => {
                let mut m = String::with_capacity(self.markdown.len() + escaped.len());
                m.push_str(&self.markdown[..at]);
                m.push_str(&escaped);
                m.push_str(&self.markdown[at..]);
                m
            }
            None => format!("{escaped}{}", self.markdown),
        };
        Self {
            plain: format!("{modifier}{}", self.plain),
            markdown,
        }
    }

    /// Surround with fixed text in both channels.
    #[must_use]
    pub fn wrap(self, before: &str, after: &str) -> Self {
        Self {
            markdown: format!("{}{}{}", escape(before), self.markdown, escape(after)),
            plain: format!("{before}{}{after}", self.plain),
        }
    }

    /// Append another pair.
    pub fn push(&mut self, other: &RenderedPair) {
        self.plain.push_str(&other.plain);
        self.markdown.push_str(&other.markdown);
    }

    /// Append fixed text to both channels.
    pub fn push_str(&mut self, text: &str) {
        self.plain.push_str(text);
        self.markdown.push_str(&escape(text));
    }

    /// Indent every line after the first by `prefix`.
    #[must_use]
    pub fn indent_continuation(self, prefix: &str) -> Self {
        let sep = format!("\n{prefix}");
        Self {
            plain: self.plain.replace('\n', &sep),
            markdown: self.markdown.replace('\n', &sep),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }
}

/// Byte offset of the visible label when `markdown` begins with a link tag.
fn leading_label_offset(markdown: &str) -> Option<usize> {
    let rest = markdown.strip_prefix(LINK_OPEN)?;
    let end = rest.find(LINK_OPEN_END)?;
    Some(LINK_OPEN.len() + end + LINK_OPEN_END.len())
}

/// Escape `&`, `<` and `>` for the markdown channel.
pub fn escape(text: &str) -> String {
    if !text.contains(['&', '<', '>']) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape`].
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('&') {
        out.push_str(&rest[..at]);
        rest = &rest[at..];
        let (decoded, len) = if rest.starts_with("&amp;") {
            ('&', 5)
        } else if rest.starts_with("&lt;") {
            ('<', 4)
        } else if rest.starts_with("&gt;") {
            ('>', 4)
        } else {
            ('&', 1)
        };
        out.push(decoded);
        rest = &rest[len..];
    }
    out.push_str(rest);
    out
}

/// Remove link markup and decode entities, leaving the visible text.
pub fn strip_links(markdown: &str) -> String {
    unescape(&remove_link_tags(markdown))
}

fn remove_link_tags(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut rest = markdown;
    loop {
        let open = rest.find(LINK_OPEN);
        let close = rest.find(LINK_CLOSE);
        let open = match (open, close) {
            (None, None) => {
                out.push_str(rest);
                return out;
            }
            (Some(o), Some(c)) if o < c => o,
            (Some(o), None) => o,
            (_, Some(c)) => {
                out.push_str(&rest[..c]);
                rest = &rest[c + LINK_CLOSE.len()..];
                continue;
            }
        };
        out.push_str(&rest[..open]);
        let after = &rest[open + LINK_OPEN.len()..];
        match after.find(LINK_OPEN_END) {
            Some(end) => rest = &after[end + LINK_OPEN_END.len()..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
}
