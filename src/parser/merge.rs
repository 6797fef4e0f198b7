//! Package merge: combine the parsed files of one directory into a Package.
//!
//! Methods are attached to their receiver's base type and constructors
//! (functions whose first result is `T` or `*T`) to `T`. Everything is sorted
//! by name so output does not depend on file order.

use crate::model::*;
use std::collections::HashMap;

/// Merge the files of one directory into a single package.
///
/// Files declaring a different package than the first file are skipped with
/// a warning. Returns `None` when there are no files.
pub fn merge(files: Vec<SourceFile>, path: &str) -> Option<Package> {
    let package_name = files.first()?.package.clone();

    let mut pkg = Package {
        name: package_name,
        path: path.to_string(),
        ..Package::default()
    };
    let mut functions: Vec<FunctionDecl> = Vec::new();
    let mut methods: Vec<FunctionDecl> = Vec::new();

    for file in files {
        if file.package != pkg.name {
            tracing::warn!(
                "skipping {}: package {} differs from {}",
                file.file_name,
                file.package,
                pkg.name
            );
            continue;
        }
        if pkg.doc.is_none() {
            pkg.doc = file.doc;
        }
        pkg.imports.push((file.file_name, file.imports));
        for func in file.functions {
            if func.receiver.is_some() {
                methods.push(func);
            } else {
                functions.push(func);
            }
        }
        pkg.types.extend(file.types);
        for group in file.values {
            match group.keyword {
                ValueKeyword::Const => pkg.consts.push(group),
                ValueKeyword::Var => pkg.vars.push(group),
            }
        }
    }

    pkg.types.sort_by(|a, b| a.name.cmp(&b.name));
    let index: HashMap<String, usize> = pkg
        .types
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.clone(), i))
        .collect();

    for method in methods {
        let owner = method
            .receiver
            .as_ref()
            .and_then(|r| r.base_type())
            .and_then(|base| index.get(base).copied());
        match owner {
            Some(i) => pkg.types[i].methods.push(method),
            None => tracing::debug!("dropping method {} without a documented receiver", method.name),
        }
    }

    for func in functions {
        match constructed_type(&func).and_then(|name| index.get(name).copied()) {
            Some(i) => pkg.types[i].functions.push(func),
            None => pkg.functions.push(func),
        }
    }

    pkg.functions.sort_by(|a, b| a.name.cmp(&b.name));
    for ty in &mut pkg.types {
        ty.functions.sort_by(|a, b| a.name.cmp(&b.name));
        ty.methods.sort_by(|a, b| a.name.cmp(&b.name));
    }

    Some(pkg)
}

/// `T` when the first result of `func` is `T` or `*T`.
fn constructed_type(func: &FunctionDecl) -> Option<&str> {
    match func.signature.results.first()? {
        TypeNode::Identifier(name) => Some(name),
        TypeNode::Pointer(inner) => match inner.as_ref() {
            TypeNode::Identifier(name) => Some(name),
            _ => None,
        },
        _ => None,
    }
}
