//! Cross-reference resolution: turn a type name into a link target.
//!
//! Three link classes exist:
//!
//! - local anchor (`#type-widget`) for exported names of this package,
//! - relative link to the document of a sibling package in the same project,
//! - external reference URL for everything else that is imported.
//!
//! Only the markdown channel uses this; the plain channel is never linked.

use crate::context::RenderContext;
use crate::diagnostics::Warning;
use crate::toc;
use std::path::{Component, Path};

/// Predeclared Go identifiers outside [`toc::BUILTIN_TYPES`]. Like builtins
/// they are never linked, and they are not reported as internal references.
const PREDECLARED: &[&str] = &[
    "any", "comparable", "complex64", "complex128", "int8", "int16", "rune", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr", "nil", "true", "false", "iota", "new", "make",
    "len", "cap", "append",
];

/// Link target for `name` or `qualifier.name`, or `None` to leave it unlinked.
pub fn resolve_link(qualifier: Option<&str>, name: &str, ctx: &mut RenderContext) -> Option<String> {
    let Some(qualifier) = qualifier else {
        if toc::is_builtin(name) || PREDECLARED.contains(&name) {
            return None;
        }
        return local_anchor(name, name, ctx);
    };

    let label = format!("{qualifier}.{name}");
    let Some(module_path) = ctx.imports.get(qualifier).map(str::to_string) else {
        return local_anchor(name, &label, ctx);
    };

    if is_sibling(&module_path, ctx.root_module()) {
        let base = ctx
            .imports
            .package_path()
            .or_else(|| ctx.root_module())
            .unwrap_or_default()
            .to_string();
        let document = format!(
            "{}/{}",
            relative_dir(&base, &module_path),
            ctx.config.document_name
        );
        let href = format!("{}#{}", document, toc::type_anchor(name));
        ctx.record_document(document);
        return Some(href);
    }

    Some(format!(
        "https://{}/{}#{}",
        ctx.config.reference_host, module_path, name
    ))
}

/// In-document anchor for an exported name; unexported names stay unlinked.
fn local_anchor(name: &str, label: &str, ctx: &mut RenderContext) -> Option<String> {
    if toc::is_exported(name) {
        return Some(format!("#{}", toc::type_anchor(name)));
    }
    ctx.warn(Warning::UnlinkableReference {
        name: label.to_string(),
    });
    None
}

/// A module is a sibling when its first three path segments match the root's.
fn is_sibling(module_path: &str, root: Option<&str>) -> bool {
    let Some(root) = root else {
        return false;
    };
    let module: Vec<&str> = module_path.split('/').collect();
    let root: Vec<&str> = root.split('/').collect();
    module.len() >= 3 && root.len() >= 3 && module[..3] == root[..3]
}

/// Relative directory from one package path to another, `/`-separated.
///
/// `example.com/proj/a/a` → `example.com/proj/a/b` gives `../b`.
fn relative_dir(from: &str, to: &str) -> String {
    let diff = pathdiff::diff_paths(Path::new(to), Path::new(from));
    let parts: Vec<String> = diff
        .iter()
        .flat_map(|p| p.components())
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
