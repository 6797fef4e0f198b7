//! godoc-md — render Go package documentation as markdown.
//!
//! The pipeline for one package directory:
//!
//! 1. [`parser::parse_dir`] reads the Go sources into a [`model::Package`]
//! 2. [`imports::ImportMap`] merges the imports of every file
//! 3. a [`render::Renderer`] formats the declarations, resolving cross
//!    references through [`resolve`]
//! 4. the caller drains the collected [`diagnostics::Warning`]s

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod imports;
pub mod model;
pub mod module;
pub mod parser;
pub mod render;
pub mod resolve;
pub mod toc;

use context::{LinkConfig, RenderContext};
use diagnostics::{Diagnostics, Warning};
use imports::ImportMap;
use model::Package;
use render::Renderer;

/// Output of one rendering pass.
#[derive(Debug)]
pub struct Generated {
    pub text: String,
    pub warnings: Vec<Warning>,
    /// Sibling documents linked from `text`, relative to the package directory.
    pub linked_documents: Vec<String>,
}

/// Render one package.
///
/// `root_module` is the module path of the project; imports sharing its first
/// three path segments are linked as sibling documents.
pub fn render_package(
    pkg: &Package,
    renderer: &dyn Renderer,
    config: &LinkConfig,
    root_module: Option<&str>,
) -> anyhow::Result<Generated> {
    let mut diagnostics = Diagnostics::new();
    let imports = ImportMap::from_files(&pkg.imports, &mut diagnostics).with_package_path(&pkg.path);
    let mut ctx = RenderContext::new(&imports, config).with_diagnostics(diagnostics);
    if let Some(root) = root_module {
        ctx = ctx.with_root_module(root);
    }

    let text = renderer.render(pkg, &mut ctx)?;
    let (warnings, linked_documents) = ctx.finish();
    Ok(Generated {
        text,
        warnings,
        linked_documents,
    })
}
