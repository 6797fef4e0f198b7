//! Fatal rendering errors.
//!
//! These mean the front end produced a tree shape the renderer has no rule
//! for. They abort the current pass; advisory problems go to
//! [`crate::diagnostics::Diagnostics`] instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// A fatal error together with the declaration being rendered when it occurred.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{}", in_declaration_suffix(.declaration))]
pub struct RenderError {
    pub kind: RenderErrorKind,
    pub declaration: Option<String>,
}

impl RenderError {
    #[must_use]
    pub fn new(kind: RenderErrorKind) -> Self {
        Self {
            kind,
            declaration: None,
        }
    }

    /// Attach the surrounding declaration name unless one is already set.
    #[must_use]
    pub fn in_declaration(mut self, name: &str) -> Self {
        if self.declaration.is_none() {
            self.declaration = Some(name.to_string());
        }
        self
    }
}

impl From<RenderErrorKind> for RenderError {
    fn from(kind: RenderErrorKind) -> Self {
        RenderError::new(kind)
    }
}

fn in_declaration_suffix(declaration: &Option<String>) -> String {
    match declaration {
        Some(name) => format!(" (in declaration {name})"),
        None => String::new(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderErrorKind {
    #[error("unsupported node {kind}: {text}")]
    UnsupportedNode { kind: String, text: String },

    #[error("unknown literal kind: {0}")]
    UnknownLiteralKind(String),

    #[error("unsupported composite literal type: {0}")]
    UnsupportedComposite(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_declaration() {
        let err = RenderError::new(RenderErrorKind::UnsupportedNode {
            kind: "channel_type".to_string(),
            text: "chan int".to_string(),
        })
        .in_declaration("Events");
        assert_eq!(
            err.to_string(),
            "unsupported node channel_type: chan int (in declaration Events)"
        );
    }

    #[test]
    fn display_without_declaration() {
        let err = RenderError::from(RenderErrorKind::UnsupportedComposite("Pointer".to_string()));
        assert_eq!(err.to_string(), "unsupported composite literal type: Pointer");
    }

    #[test]
    fn innermost_declaration_wins() {
        let err = RenderError::new(RenderErrorKind::UnknownLiteralKind("x".to_string()))
            .in_declaration("Inner")
            .in_declaration("Outer");
        assert_eq!(err.declaration.as_deref(), Some("Inner"));
    }
}
