//! Per-pass state threaded through the renderer.

use crate::diagnostics::{Diagnostics, Warning};
use crate::imports::ImportMap;
use std::collections::BTreeSet;

/// Where links point. Built from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// File name of the generated document in every package directory.
    pub document_name: String,
    /// Host serving external package documentation.
    pub reference_host: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            document_name: "README.md".to_string(),
            reference_host: "pkg.go.dev".to_string(),
        }
    }
}

/// Read-only inputs plus the append-only outputs of one rendering pass.
pub struct RenderContext<'a> {
    pub imports: &'a ImportMap,
    pub config: &'a LinkConfig,
    root_module: Option<String>,
    diagnostics: Diagnostics,
    linked_documents: BTreeSet<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(imports: &'a ImportMap, config: &'a LinkConfig) -> Self {
        Self {
            imports,
            config,
            root_module: None,
            diagnostics: Diagnostics::new(),
            linked_documents: BTreeSet::new(),
        }
    }

    /// Module path of the project being documented, used to tell sibling
    /// packages from external dependencies.
    #[must_use]
    pub fn with_root_module(mut self, root: impl Into<String>) -> Self {
        self.root_module = Some(root.into());
        self
    }

    /// Continue an existing sink, e.g. one the import map was built with.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The root module, falling back to the current package path.
    pub fn root_module(&self) -> Option<&str> {
        self.root_module
            .as_deref()
            .or_else(|| self.imports.package_path())
    }

    pub fn warn(&mut self, warning: Warning) {
        self.diagnostics.warn(warning);
    }

    /// Remember a sibling document a link points at, relative to the current
    /// package directory.
    pub fn record_document(&mut self, path: String) {
        self.linked_documents.insert(path);
    }

    /// End the pass, handing back its warnings and linked documents.
    pub fn finish(mut self) -> (Vec<Warning>, Vec<String>) {
        (
            self.diagnostics.drain(),
            self.linked_documents.into_iter().collect(),
        )
    }
}
