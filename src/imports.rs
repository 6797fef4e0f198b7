//! Directory-wide import alias map.
//!
//! Every file of a package directory contributes its import statements; the
//! merged map is built once per directory and only read afterwards.

use crate::diagnostics::{Diagnostics, Warning};
use crate::model::ImportSpec;
use std::collections::HashMap;

/// Alias → module path for one package directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMap {
    aliases: HashMap<String, String>,
    /// Module path of the directory currently being documented.
    package_path: Option<String>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the imports of every file in a directory.
    ///
    /// When one alias maps to different paths in different files the
    /// last-seen mapping wins and a single warning lists every path together
    /// with the files that used it.
    pub fn from_files(files: &[(String, Vec<ImportSpec>)], diags: &mut Diagnostics) -> Self {
        let mut map = ImportMap::new();
        // alias -> [(path, [files])] in first-seen order
        let mut seen: HashMap<String, Vec<(String, Vec<String>)>> = HashMap::new();
        let mut alias_order: Vec<String> = Vec::new();

        for (file, specs) in files {
            for spec in specs {
                let Some(alias) = effective_alias(spec) else {
                    continue;
                };
                let uses = seen.entry(alias.clone()).or_insert_with(|| {
                    alias_order.push(alias.clone());
                    Vec::new()
                });
                match uses.iter_mut().find(|(path, _)| *path == spec.path) {
                    Some((_, users)) => {
                        if !users.contains(file) {
                            users.push(file.clone());
                        }
                    }
                    None => uses.push((spec.path.clone(), vec![file.clone()])),
                }
                map.aliases.insert(alias, spec.path.clone());
            }
        }

        for alias in alias_order {
            let Some(paths) = seen.remove(&alias) else {
                continue;
            };
            if paths.len() > 1 {
                let chosen = map.aliases.get(&alias).cloned().unwrap_or_default();
                diags.warn(Warning::AmbiguousImport {
                    alias,
                    paths,
                    chosen,
                });
            }
        }

        map
    }

    #[must_use]
    pub fn with_package_path(mut self, path: impl Into<String>) -> Self {
        self.package_path = Some(path.into());
        self
    }

    pub fn insert(&mut self, alias: impl Into<String>, path: impl Into<String>) {
        self.aliases.insert(alias.into(), path.into());
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn package_path(&self) -> Option<&str> {
        self.package_path.as_deref()
    }
}

/// The name a file uses for an import, or `None` for discard and dot imports.
///
/// `import "github.com/x/pkg"` → `pkg`, `import p "github.com/x/pkg"` → `p`.
pub fn effective_alias(spec: &ImportSpec) -> Option<String> {
    match spec.alias.as_deref() {
        Some("_") | Some(".") => None,
        Some(alias) => Some(alias.to_string()),
        None => spec
            .path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}
