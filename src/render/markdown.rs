//! GitHub-flavored markdown renderer.
//!
//! Produces the README layout: title, import snippet, overview, index,
//! constants, variables, functions and types. Declarations are printed inside
//! `<pre>` blocks from the linked channel so that cross references stay
//! clickable; the index uses the plain channel.

use crate::context::RenderContext;
use crate::model::{Package, SourceLocation};
use crate::render::decl::{self, FunctionDoc, PackageDoc, TypeDoc, ValueDoc};
use crate::render::pair::RenderedPair;
use crate::render::Renderer;
use crate::toc;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, pkg: &Package, ctx: &mut RenderContext) -> Result<String> {
        let doc = decl::format_package(pkg, ctx)?;
        Ok(render_document(&doc, pkg.is_main()))
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_document(doc: &PackageDoc, is_main: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}\n", doc.name));
    if !is_main {
        lines.push("```go".to_string());
        lines.push(format!("import \"{}\"", doc.path));
        lines.push("```".to_string());
        lines.push(String::new());
    }

    // Overview
    if let Some(ref text) = doc.doc {
        lines.push("## Overview\n".to_string());
        lines.push(render_doc_text(text));
        lines.push(String::new());
    }

    // Index
    let entries = doc.index_entries();
    if !entries.is_empty() || !doc.consts.is_empty() || !doc.vars.is_empty() {
        lines.push("## Index\n".to_string());
        if !doc.consts.is_empty() {
            lines.push(toc::render_toc_item("Constants", "Constants", 0));
        }
        if !doc.vars.is_empty() {
            lines.push(toc::render_toc_item("Variables", "Variables", 0));
        }
        lines.extend(entries);
        lines.push(String::new());
    }

    if !doc.consts.is_empty() {
        lines.push("## Constants\n".to_string());
        for value in &doc.consts {
            render_value(&mut lines, value);
        }
    }

    if !doc.vars.is_empty() {
        lines.push("## Variables\n".to_string());
        for value in &doc.vars {
            render_value(&mut lines, value);
        }
    }

    if !doc.functions.is_empty() {
        lines.push("## Functions\n".to_string());
        for func in &doc.functions {
            render_function(&mut lines, func, "###");
        }
    }

    if !doc.types.is_empty() {
        lines.push("## Types\n".to_string());
        for ty in &doc.types {
            render_type(&mut lines, ty);
        }
    }

    lines.push("---".to_string());
    lines.push("Generated by godoc-md".to_string());

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn render_value(lines: &mut Vec<String>, value: &ValueDoc) {
    render_location(lines, &value.location);
    render_pre(lines, &value.declaration);
    if let Some(ref text) = value.doc {
        lines.push(render_doc_text(text));
        lines.push(String::new());
    }
}

fn render_function(lines: &mut Vec<String>, func: &FunctionDoc, level: &str) {
    lines.push(format!("{} {}\n", level, func.heading));
    render_location(lines, &func.location);
    render_pre(lines, &func.signature);
    if let Some(ref text) = func.doc {
        lines.push(render_doc_text(text));
        lines.push(String::new());
    }
}

fn render_type(lines: &mut Vec<String>, ty: &TypeDoc) {
    lines.push(format!("### {}\n", ty.heading));
    render_location(lines, &ty.location);
    render_pre(lines, &ty.declaration);
    if let Some(ref text) = ty.doc {
        lines.push(render_doc_text(text));
        lines.push(String::new());
    }
    for func in ty.functions.iter().chain(&ty.methods) {
        render_function(lines, func, "####");
    }
}

/// `Source: [file.go:12](file.go#L12)`; nothing when the location is unknown.
fn render_location(lines: &mut Vec<String>, location: &Option<SourceLocation>) {
    if let Some(loc) = location {
        lines.push(format!(
            "Source: [{}:{}]({}#L{})\n",
            loc.file, loc.line, loc.file, loc.line
        ));
    }
}

fn render_pre(lines: &mut Vec<String>, pair: &RenderedPair) {
    lines.push("<pre>".to_string());
    lines.push(pair.markdown.clone());
    lines.push("</pre>".to_string());
    lines.push(String::new());
}

/// Doc comment text as markdown. Indented runs become fenced code blocks.
fn render_doc_text(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut code: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.starts_with('\t') || line.starts_with(' ') {
            code.push(line.replace('\t', "    "));
            continue;
        }
        if line.is_empty() && !code.is_empty() {
            code.push(String::new());
            continue;
        }
        flush_code(&mut out, &mut code);
        out.push(line.to_string());
    }
    flush_code(&mut out, &mut code);

    out.join("\n")
}

fn flush_code(out: &mut Vec<String>, code: &mut Vec<String>) {
    let mut trailing = 0;
    while code.last().is_some_and(|l| l.is_empty()) {
        code.pop();
        trailing += 1;
    }
    if code.is_empty() {
        return;
    }
    out.push("```go".to_string());
    out.push(unindent(&code.join("\n")));
    out.push("```".to_string());
    out.extend((0..trailing).map(|_| String::new()));
    code.clear();
}

/// Remove common leading indentation from a multi-line string.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let min_indent = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.len() >= min_indent {
                &l[min_indent..]
            } else {
                *l
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LinkConfig;
    use crate::imports::ImportMap;
    use crate::model::{FuncType, FunctionDecl, TypeDecl, TypeNode};

    #[test]
    fn unindent_basic() {
        assert_eq!(unindent("  a\n  b\n  c"), "a\nb\nc");
    }

    #[test]
    fn unindent_mixed() {
        assert_eq!(unindent("  a\n    b\n  c"), "a\n  b\nc");
    }

    #[test]
    fn doc_text_code_block() {
        let text = "Use it like this:\n\n\tw := New()\n\tw.Close()\n\nDone.";
        assert_eq!(
            render_doc_text(text),
            "Use it like this:\n\n```go\nw := New()\nw.Close()\n```\n\nDone."
        );
    }

    #[test]
    fn doc_text_plain_paragraphs() {
        assert_eq!(render_doc_text("One.\n\nTwo."), "One.\n\nTwo.");
    }

    #[test]
    fn location_line() {
        let mut lines = Vec::new();
        render_location(
            &mut lines,
            &Some(SourceLocation {
                file: "widget.go".to_string(),
                line: 7,
            }),
        );
        assert_eq!(lines, vec!["Source: [widget.go:7](widget.go#L7)\n".to_string()]);

        let mut lines = Vec::new();
        render_location(&mut lines, &None);
        assert!(lines.is_empty());
    }

    #[test]
    fn document_layout() {
        let pkg = Package {
            name: "widget".to_string(),
            path: "example.com/proj/widget".to_string(),
            doc: Some("Package widget draws widgets.".to_string()),
            types: vec![TypeDecl {
                name: "Widget".to_string(),
                underlying: TypeNode::Struct(vec![]),
                alias: false,
                functions: vec![],
                methods: vec![FunctionDecl {
                    name: "Close".to_string(),
                    receiver: Some(crate::model::Receiver {
                        name: Some("w".to_string()),
                        ty: TypeNode::pointer(TypeNode::ident("Widget")),
                    }),
                    signature: FuncType {
                        params: vec![],
                        results: vec![TypeNode::ident("error")],
                    },
                    doc: None,
                    location: None,
                }],
                doc: None,
                location: None,
            }],
            ..Package::default()
        };
        let imports = ImportMap::new().with_package_path("example.com/proj/widget");
        let config = LinkConfig::default();
        let mut ctx = RenderContext::new(&imports, &config);
        let out = MarkdownRenderer.render(&pkg, &mut ctx).unwrap();

        assert!(out.starts_with("# widget\n\n```go\nimport \"example.com/proj/widget\"\n```\n"));
        assert!(out.contains("## Overview\n\nPackage widget draws widgets.\n"));
        assert!(out.contains(
            "## Index\n\n- [type Widget](#type-widget)\n    - [func (w *Widget) Close() error](#func-w-widget-close)\n"
        ));
        assert!(out.contains("### type Widget\n\n<pre>\ntype Widget struct{}\n</pre>\n"));
        assert!(out.contains(
            "#### func (w *Widget) Close\n\n<pre>\nfunc (w <a href=\"#type-widget\">*Widget</a>) Close() error\n</pre>\n"
        ));
        assert!(out.ends_with("Generated by godoc-md\n"));
    }
}
