//! Anchor generation and index entries.
//!
//! Anchors follow the GitHub heading slug for the headings the markdown
//! renderer emits (`## type Widget`, `### func (w *Widget) Close`), reduced to
//! the characters Go signatures can contain.

/// Builtin names that never get a link.
pub const BUILTIN_TYPES: &[&str] = &[
    "bool", "byte", "char", "error", "float", "float32", "float64", "int", "int32", "int64",
    "string",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Exported names start with an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Anchor slug for heading text.
///
/// - lowercase
/// - spaces become hyphens
/// - `(`, `)` and `*` are removed
pub fn anchor(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '*'))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

/// Anchor of the section documenting type `name`.
pub fn type_anchor(name: &str) -> String {
    anchor(&format!("type {}", name))
}

/// Markdown link to a heading in the same document.
pub fn render_toc_link(text: &str, heading: &str) -> String {
    format!("[{}](#{})", text, anchor(heading))
}

/// Index list item, indented by `level` units of four spaces.
pub fn render_toc_item(text: &str, heading: &str, level: usize) -> String {
    format!("{}- {}", "    ".repeat(level), render_toc_link(text, heading))
}
