//! Advisory warnings collected during a rendering pass.
//!
//! A [`Diagnostics`] sink is created per pass, appended to by the import
//! resolver and the cross-reference resolver, and drained by the caller once
//! the pass is done. Nothing in here aborts rendering.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The same alias maps to different module paths across files of one directory.
    AmbiguousImport {
        alias: String,
        /// Each distinct path with the files that imported it under `alias`.
        paths: Vec<(String, Vec<String>)>,
        chosen: String,
    },
    /// A reference to a name that has no linkable anchor (unexported).
    UnlinkableReference { name: String },
    /// A sibling link points at a document that does not exist.
    MissingCompanionDocument { path: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::AmbiguousImport {
                alias,
                paths,
                chosen,
            } => {
                write!(f, "import alias {alias} is ambiguous:")?;
                for (path, files) in paths {
                    write!(f, " {path} ({})", files.join(", "))?;
                }
                write!(f, "; using {chosen}")
            }
            Warning::UnlinkableReference { name } => {
                write!(f, "internal type {name} cannot be linked")
            }
            Warning::MissingCompanionDocument { path } => {
                write!(f, "linked document {path} does not exist")
            }
        }
    }
}

/// Append-only warning sink for one rendering pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Repeats of an identical warning are kept once.
    pub fn warn(&mut self, warning: Warning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Take every collected warning, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}
