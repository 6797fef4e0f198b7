//! godoc-md — generate markdown documentation from Go packages.
//!
//! Two modes:
//!
//! - **single package**: `godoc-md [DIR]` prints the document to stdout, or
//!   writes it with `-o README.md`
//! - **recursive**: `godoc-md -r [DIR]` writes `README.md` (or the `-o` name)
//!   into every package directory below `DIR`

use anyhow::{Context, Result};
use clap::Parser;
use godoc_md::context::LinkConfig;
use godoc_md::diagnostics::Warning;
use godoc_md::module;
use godoc_md::render::{self, Renderer};
use godoc_md::{parser, render_package};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Directories never documented in recursive mode.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

#[derive(Parser)]
#[command(
    name = "godoc-md",
    version,
    about = "Generate markdown documentation from Go packages"
)]
struct Cli {
    /// Package directory
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output file, relative to each package directory in recursive mode.
    /// Without it a single package is printed to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Document every package below DIR
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Skip `package main`
    #[arg(long)]
    ignore_main: bool,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Host serving documentation of external packages
    #[arg(long, default_value = "pkg.go.dev")]
    reference_host: String,

    /// Verbose logging
    #[arg(long)]
    debug: bool,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug, cli.no_color);

    let renderer = render::create_renderer(&cli.format)?;

    let doc_name = document_name(cli.output.as_deref(), renderer.file_extension());
    let config = LinkConfig {
        document_name: doc_name.clone(),
        reference_host: cli.reference_host.clone(),
    };

    let mut written: Vec<(PathBuf, Vec<String>)> = Vec::new();
    if cli.recursive {
        for dir in package_dirs(&cli.dir) {
            let target = dir.join(&doc_name);
            if let Some(links) =
                document(&cli, &dir, renderer.as_ref(), &config, Some(target.as_path()))?
            {
                written.push((dir, links));
            }
        }
    } else {
        let target = cli.output.as_ref().map(|o| cli.dir.join(o));
        if let Some(links) =
            document(&cli, &cli.dir, renderer.as_ref(), &config, target.as_deref())?
        {
            written.push((cli.dir.clone(), links));
        }
    }

    check_companions(&written);
    Ok(())
}

fn init_logging(debug: bool, no_color: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .without_time()
        .init();
}

/// File name sibling links point at: the `-o` file name, else `README.<ext>`.
fn document_name(output: Option<&Path>, ext: &str) -> String {
    output
        .and_then(|o| o.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| format!("README.{}", ext))
}

/// Document one directory. Writes to `target`, or stdout when `None`.
///
/// The module is looked up from `dir` itself, so nested modules get their own
/// import paths. Returns the sibling documents the output links to, or `None`
/// when the directory was skipped.
fn document(
    cli: &Cli,
    dir: &Path,
    renderer: &dyn Renderer,
    config: &LinkConfig,
    target: Option<&Path>,
) -> Result<Option<Vec<String>>> {
    let info = module::find_module(dir)?;
    tracing::debug!(
        "{}: module {} at {}",
        dir.display(),
        info.module_path,
        info.root.display()
    );

    let import_path = info.package_path(dir);
    let Some(pkg) = parser::parse_dir(dir, &import_path)? else {
        tracing::debug!("{}: no Go files", dir.display());
        return Ok(None);
    };
    if cli.ignore_main && pkg.is_main() {
        tracing::info!("{}: skipping package main", dir.display());
        return Ok(None);
    }

    let generated = render_package(&pkg, renderer, config, Some(&info.module_path))
        .with_context(|| format!("failed to render {}", dir.display()))?;
    for warning in &generated.warnings {
        tracing::warn!("{}: {}", dir.display(), warning);
    }

    match target {
        Some(path) => {
            fs::write(path, &generated.text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => print!("{}", generated.text),
    }
    Ok(Some(generated.linked_documents))
}

/// Package directories below `root`, honoring ignore files.
fn package_dirs(root: &Path) -> Vec<PathBuf> {
    let walker = ignore::WalkBuilder::new(root)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !SKIPPED_DIRS.contains(&name.as_ref())
        })
        .build();

    let mut dirs: Vec<PathBuf> = walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("{}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_dir()))
        .map(|entry| entry.into_path())
        .collect();
    dirs.sort();
    dirs
}

/// Warn about sibling links whose target document does not exist.
fn check_companions(written: &[(PathBuf, Vec<String>)]) {
    for (dir, links) in written {
        for link in links {
            if !dir.join(link).is_file() {
                let warning = Warning::MissingCompanionDocument {
                    path: link.clone(),
                };
                tracing::warn!("{}: {}", dir.display(), warning);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_name_from_output() {
        assert_eq!(document_name(Some(Path::new("docs/API.md")), "md"), "API.md");
        assert_eq!(document_name(None, "md"), "README.md");
        assert_eq!(document_name(None, "json"), "README.json");
    }

    #[test]
    fn walks_package_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        for dir in ["a", "a/b", "vendor/x", "testdata"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        let dirs = package_dirs(tmp.path());
        let rel: Vec<String> = dirs
            .iter()
            .map(|d| {
                d.strip_prefix(tmp.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(rel, vec!["", "a", "a/b"]);
    }
}
