//! Go module discovery: find the enclosing `go.mod` and derive import paths.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_MODULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*module\s+"?([^"\s]+)"?"#).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Directory holding `go.mod`.
    pub root: PathBuf,
    /// Module path declared in `go.mod`, e.g. `example.com/proj`.
    pub module_path: String,
}

impl ModuleInfo {
    /// Import path of a directory inside the module.
    pub fn package_path(&self, dir: &Path) -> String {
        let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let rel = pathdiff::diff_paths(&dir, &self.root).unwrap_or_default();
        let parts: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            self.module_path.clone()
        } else {
            format!("{}/{}", self.module_path, parts.join("/"))
        }
    }
}

/// Walk up from `dir` to the nearest `go.mod`.
pub fn find_module(dir: &Path) -> Result<ModuleInfo> {
    let start = dir
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", dir.display()))?;
    for ancestor in start.ancestors() {
        let go_mod = ancestor.join("go.mod");
        if go_mod.is_file() {
            let content = fs::read_to_string(&go_mod)
                .with_context(|| format!("failed to read {}", go_mod.display()))?;
            let module_path = parse_module_path(&content)
                .with_context(|| format!("no module line in {}", go_mod.display()))?;
            return Ok(ModuleInfo {
                root: ancestor.to_path_buf(),
                module_path,
            });
        }
    }
    bail!("no go.mod found above {}", start.display())
}

/// The path of the `module` directive.
pub fn parse_module_path(go_mod: &str) -> Option<String> {
    RE_MODULE.captures(go_mod).map(|caps| caps[1].to_string())
}
