//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the formatted package with both channels of every declaration,
//! so external template engines can choose plain or linked text themselves.

use crate::context::RenderContext;
use crate::model::Package;
use crate::render::decl;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, pkg: &Package, ctx: &mut RenderContext) -> Result<String> {
        let doc = decl::format_package(pkg, ctx)?;
        let mut out = serde_json::to_string_pretty(&doc).context("serializing package")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
