//! Parser module — read a Go package directory.

pub mod go;
pub mod merge;

use crate::model::{Package, SourceFile};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Parse every non-test `.go` file of `dir` into one package.
///
/// `import_path` is the full import path of the directory. Returns `None`
/// when the directory holds no Go sources.
pub fn parse_dir(dir: &Path, import_path: &str) -> Result<Option<Package>> {
    let mut files = Vec::new();
    for path in go_files(dir)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let file: SourceFile = go::parse_file(&file_name, &content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        files.push(file);
    }
    Ok(merge::merge(files, import_path))
}

/// Non-test Go sources directly inside `dir`, sorted.
pub fn go_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.go", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.ends_with("_test.go"))
        })
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_tests_and_other_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.go"), "package x\n").unwrap();
        fs::write(tmp.path().join("a.go"), "package x\n").unwrap();
        fs::write(tmp.path().join("a_test.go"), "package x\n").unwrap();
        fs::write(tmp.path().join("README.md"), "# x\n").unwrap();

        let files = go_files(tmp.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
    }

    #[test]
    fn empty_dir_has_no_package() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(parse_dir(tmp.path(), "example.com/x").unwrap().is_none());
    }

    #[test]
    fn parses_package() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("x.go"),
            "// Package x does things.\npackage x\n\n// Thing is a thing.\ntype Thing struct{}\n\n// NewThing makes one.\nfunc NewThing() *Thing { return nil }\n",
        )
        .unwrap();
        let pkg = parse_dir(tmp.path(), "example.com/x").unwrap().unwrap();
        assert_eq!(pkg.name, "x");
        assert_eq!(pkg.path, "example.com/x");
        assert_eq!(pkg.types[0].functions[0].name, "NewThing");
        assert_eq!(pkg.types[0].functions[0].location.as_ref().unwrap().line, 8);
    }
}
