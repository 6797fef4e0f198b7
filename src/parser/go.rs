//! Go source parser built on tree-sitter.
//!
//! Extracts from one `.go` file:
//! - the package clause and the package doc comment above it
//! - import specs
//! - exported `func`, method, `type`, `const` and `var` declarations with
//!   their doc comments and line numbers
//!
//! Syntax without a [`TypeNode`] variant (channels, generics, binary
//! expressions, function literals, ...) becomes [`TypeNode::Unsupported`] so
//! that rendering fails with the offending node kind.

use crate::error::RenderError;
use crate::model::*;
use crate::toc;
use anyhow::{anyhow, Result};
use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::{Node, Parser};

static RE_LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^// ?(.*)$").unwrap());

static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//(go:|line |export |extern |nolint)").unwrap());

/// Parse one Go source file.
pub fn parse_file(file_name: &str, source: &str) -> Result<SourceFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| anyhow!("loading Go grammar: {}", e))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow!("parser produced no tree for {}", file_name))?;
    let root = tree.root_node();
    if root.has_error() {
        tracing::warn!("{}: syntax errors, output may be incomplete", file_name);
    }

    let extractor = Extractor {
        src: source.as_bytes(),
        file: file_name,
    };
    extractor.source_file(root)
}

struct Extractor<'a> {
    src: &'a [u8],
    file: &'a str,
}

impl<'a> Extractor<'a> {
    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn location(&self, node: Node) -> SourceLocation {
        SourceLocation {
            file: self.file.to_string(),
            line: node.start_position().row + 1,
        }
    }

    fn unsupported(&self, node: Node) -> TypeNode {
        TypeNode::Unsupported {
            kind: node.kind().to_string(),
            text: self.text(node).to_string(),
        }
    }

    fn source_file(&self, root: Node) -> Result<SourceFile> {
        let mut file = SourceFile {
            file_name: self.file.to_string(),
            ..SourceFile::default()
        };

        for node in named_children(root) {
            match node.kind() {
                "package_clause" => {
                    file.package = named_children(node)
                        .into_iter()
                        .find(|n| n.kind() == "package_identifier")
                        .map(|n| self.text(n).to_string())
                        .unwrap_or_default();
                    file.doc = self.doc_comment(node);
                }
                "import_declaration" => self.imports(node, &mut file.imports),
                "function_declaration" => {
                    if let Some(func) = self.function(node, None) {
                        file.functions.push(func);
                    }
                }
                "method_declaration" => {
                    let receiver = node
                        .child_by_field_name("receiver")
                        .and_then(|r| self.receiver(r));
                    if let Some(func) = self.function(node, receiver) {
                        file.functions.push(func);
                    }
                }
                "type_declaration" => self.types(node, &mut file.types),
                "const_declaration" => {
                    if let Some(group) = self.values(node, ValueKeyword::Const)? {
                        file.values.push(group);
                    }
                }
                "var_declaration" => {
                    if let Some(group) = self.values(node, ValueKeyword::Var)? {
                        file.values.push(group);
                    }
                }
                _ => {}
            }
        }

        Ok(file)
    }

    // -- Comments ---------------------------------------------------------------

    /// The contiguous run of own-line comments directly above `node`.
    fn doc_comment(&self, node: Node) -> Option<String> {
        let mut comments: Vec<Node> = Vec::new();
        let mut next_row = node.start_position().row;
        let mut cursor = node.prev_named_sibling();

        while let Some(prev) = cursor {
            if prev.kind() != "comment" || prev.end_position().row + 1 != next_row {
                break;
            }
            // A comment trailing code on the same line belongs to that code.
            if prev
                .prev_named_sibling()
                .is_some_and(|p| p.end_position().row == prev.start_position().row)
            {
                break;
            }
            next_row = prev.start_position().row;
            comments.push(prev);
            cursor = prev.prev_named_sibling();
        }
        comments.reverse();

        let mut lines: Vec<String> = Vec::new();
        for comment in comments {
            lines.extend(comment_lines(self.text(comment)));
        }
        let text = lines.join("\n").trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// A comment starting on the row where `node` ends.
    fn trailing_comment(&self, node: Node) -> Option<String> {
        let next = node.next_named_sibling()?;
        if next.kind() == "comment" && next.start_position().row == node.end_position().row {
            Some(self.text(next).to_string())
        } else {
            None
        }
    }

    // -- Imports ----------------------------------------------------------------

    fn imports(&self, node: Node, out: &mut Vec<ImportSpec>) {
        for child in named_children(node) {
            match child.kind() {
                "import_spec" => out.extend(self.import_spec(child)),
                "import_spec_list" => {
                    for spec in named_children(child) {
                        if spec.kind() == "import_spec" {
                            out.extend(self.import_spec(spec));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn import_spec(&self, node: Node) -> Option<ImportSpec> {
        let path = node.child_by_field_name("path")?;
        let path = unquote(self.text(path));
        let alias = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string());
        Some(ImportSpec { alias, path })
    }

    // -- Functions --------------------------------------------------------------

    fn receiver(&self, list: Node) -> Option<Receiver> {
        let decl = named_children(list)
            .into_iter()
            .find(|n| n.kind() == "parameter_declaration")?;
        let ty = self.type_node(decl.child_by_field_name("type")?);
        let name = decl
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string());
        Some(Receiver { name, ty })
    }

    fn function(&self, node: Node, receiver: Option<Receiver>) -> Option<FunctionDecl> {
        let name = self.text(node.child_by_field_name("name")?).to_string();
        if !toc::is_exported(&name) {
            return None;
        }
        if let Some(recv) = &receiver {
            if !recv.base_type().is_some_and(toc::is_exported) {
                return None;
            }
        }

        let mut signature = self.func_type(node);
        if let Some(params) = node.child_by_field_name("type_parameters") {
            signature.params.insert(
                0,
                Param {
                    names: Vec::new(),
                    ty: self.unsupported(params),
                },
            );
        }

        Some(FunctionDecl {
            name,
            receiver,
            signature,
            doc: self.doc_comment(node),
            location: Some(self.location(node)),
        })
    }

    /// Parameters and results of a node with `parameters`/`result` fields.
    fn func_type(&self, node: Node) -> FuncType {
        let params = match node.child_by_field_name("parameters") {
            Some(list) => self.params(list),
            None => Vec::new(),
        };
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => self
                .params(result)
                .into_iter()
                .flat_map(|p| {
                    let count = p.names.len().max(1);
                    std::iter::repeat(p.ty).take(count)
                })
                .collect(),
            Some(result) => vec![self.type_node(result)],
            None => Vec::new(),
        };
        FuncType { params, results }
    }

    fn params(&self, list: Node) -> Vec<Param> {
        let mut params = Vec::new();
        for decl in named_children(list) {
            let variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                "comment" => continue,
                _ => {
                    params.push(Param {
                        names: Vec::new(),
                        ty: self.unsupported(decl),
                    });
                    continue;
                }
            };
            let names = field_texts(decl, "name")
                .into_iter()
                .map(|n| self.text(n).to_string())
                .collect();
            let ty = match decl.child_by_field_name("type") {
                Some(ty) => self.type_node(ty),
                None => self.unsupported(decl),
            };
            let ty = if variadic { TypeNode::ellipsis(ty) } else { ty };
            params.push(Param { names, ty });
        }
        params
    }

    // -- Types ------------------------------------------------------------------

    fn types(&self, decl: Node, out: &mut Vec<TypeDecl>) {
        let specs: Vec<Node> = named_children(decl)
            .into_iter()
            .filter(|n| matches!(n.kind(), "type_spec" | "type_alias"))
            .collect();
        let grouped = has_token(decl, "(");

        for spec in specs {
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(name).to_string();
            if !toc::is_exported(&name) {
                continue;
            }
            let underlying = match (
                spec.child_by_field_name("type_parameters"),
                spec.child_by_field_name("type"),
            ) {
                (Some(params), _) => self.unsupported(params),
                (None, Some(ty)) => self.type_node(ty),
                (None, None) => self.unsupported(spec),
            };
            let (doc, location) = if grouped {
                (
                    self.doc_comment(spec).or_else(|| self.doc_comment(decl)),
                    self.location(spec),
                )
            } else {
                (self.doc_comment(decl), self.location(decl))
            };
            out.push(TypeDecl {
                name,
                underlying,
                alias: spec.kind() == "type_alias",
                functions: Vec::new(),
                methods: Vec::new(),
                doc,
                location: Some(location),
            });
        }
    }

    /// Convert a type expression.
    fn type_node(&self, node: Node) -> TypeNode {
        match node.kind() {
            "type_identifier" | "identifier" => TypeNode::ident(self.text(node)),
            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(pkg), Some(name)) => {
                        TypeNode::qualified(self.text(pkg), self.text(name))
                    }
                    _ => self.unsupported(node),
                }
            }
            "pointer_type" => match first_named(node) {
                Some(elem) => TypeNode::pointer(self.type_node(elem)),
                None => self.unsupported(node),
            },
            // Fixed-length arrays are listed like slices.
            "slice_type" | "array_type" | "implicit_length_array_type" => {
                match node.child_by_field_name("element") {
                    Some(elem) => TypeNode::array(self.type_node(elem)),
                    None => self.unsupported(node),
                }
            }
            "map_type" => match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => TypeNode::map(self.type_node(key), self.type_node(value)),
                _ => self.unsupported(node),
            },
            "function_type" => TypeNode::Function(self.func_type(node)),
            "struct_type" => TypeNode::Struct(self.struct_fields(node)),
            "interface_type" => TypeNode::Interface(self.interface_members(node)),
            "parenthesized_type" => match first_named(node) {
                Some(inner) => self.type_node(inner),
                None => self.unsupported(node),
            },
            _ => self.unsupported(node),
        }
    }

    fn struct_fields(&self, node: Node) -> Vec<Field> {
        let Some(list) = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "field_declaration_list")
        else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        for decl in named_children(list) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let names: Vec<String> = field_texts(decl, "name")
                .into_iter()
                .map(|n| self.text(n).to_string())
                .collect();
            let Some(ty) = decl.child_by_field_name("type") else {
                continue;
            };
            let mut ty = self.type_node(ty);
            if names.is_empty() {
                // Embedded field: `*Base` keeps its star outside the type field.
                if has_token(decl, "*") {
                    ty = TypeNode::pointer(ty);
                }
                if !embedded_name(&ty).is_some_and(toc::is_exported) {
                    continue;
                }
            } else if !names.iter().any(|n| toc::is_exported(n)) {
                continue;
            }
            let names = names.into_iter().filter(|n| toc::is_exported(n)).collect();
            let tag = decl
                .child_by_field_name("tag")
                .map(|t| self.text(t).to_string());
            fields.push(Field { names, ty, tag });
        }
        fields
    }

    fn interface_members(&self, node: Node) -> Vec<Field> {
        let mut members = Vec::new();
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let Some(name) = elem.child_by_field_name("name") else {
                        continue;
                    };
                    let name = self.text(name);
                    if !toc::is_exported(name) {
                        continue;
                    }
                    members.push(Field::new(&[name], TypeNode::Function(self.func_type(elem))));
                }
                "type_elem" | "constraint_elem" => {
                    let types = named_children(elem);
                    let ty = match types.as_slice() {
                        [single] => self.type_node(*single),
                        _ => self.unsupported(elem),
                    };
                    members.push(Field::new(&[], ty));
                }
                "interface_type_name" => {
                    let ty = match first_named(elem) {
                        Some(inner) => self.type_node(inner),
                        None => self.unsupported(elem),
                    };
                    members.push(Field::new(&[], ty));
                }
                "comment" => {}
                _ => members.push(Field::new(&[], self.unsupported(elem))),
            }
        }
        members
    }

    // -- Values -----------------------------------------------------------------

    fn values(&self, decl: Node, keyword: ValueKeyword) -> Result<Option<ValueGroup>> {
        let spec_kind = match keyword {
            ValueKeyword::Const => "const_spec",
            ValueKeyword::Var => "var_spec",
        };
        let mut spec_nodes = Vec::new();
        let mut grouped = has_token(decl, "(");
        for child in named_children(decl) {
            if child.kind() == spec_kind {
                spec_nodes.push(child);
            } else if child.kind() == "var_spec_list" {
                grouped = true;
                spec_nodes.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|n| n.kind() == spec_kind),
                );
            }
        }

        let mut specs = Vec::new();
        for node in spec_nodes {
            let names: Vec<String> = field_texts(node, "name")
                .into_iter()
                .map(|n| self.text(n).to_string())
                .collect();
            if !names.iter().any(|n| toc::is_exported(n)) {
                continue;
            }
            let declared = node.child_by_field_name("type").map(|t| self.type_node(t));
            let values = match node.child_by_field_name("value") {
                Some(list) if list.kind() == "expression_list" => named_children(list)
                    .into_iter()
                    .filter(|n| n.kind() != "comment")
                    .map(|n| self.expr(n))
                    .collect::<Result<Vec<_>>>()?,
                Some(single) => vec![self.expr(single)?],
                None => Vec::new(),
            };
            let comment = if grouped {
                self.trailing_comment(node)
            } else {
                self.trailing_comment(decl)
            };
            specs.push(ValueSpec {
                names,
                declared,
                values,
                comment,
            });
        }

        if specs.is_empty() {
            return Ok(None);
        }
        Ok(Some(ValueGroup {
            keyword,
            specs,
            doc: self.doc_comment(decl),
            location: Some(self.location(decl)),
        }))
    }

    /// Convert an initializer expression.
    fn expr(&self, node: Node) -> Result<TypeNode> {
        let kind = node.kind();
        let converted = match kind {
            "identifier" | "true" | "false" | "nil" | "iota" => TypeNode::ident(self.text(node)),
            "selector_expression" => match (
                node.child_by_field_name("operand"),
                node.child_by_field_name("field"),
            ) {
                (Some(operand), Some(field)) if operand.kind() == "identifier" => {
                    TypeNode::qualified(self.text(operand), self.text(field))
                }
                _ => self.unsupported(node),
            },
            "composite_literal" => {
                let ty = node.child_by_field_name("type").map(|t| self.type_node(t));
                let elements = match node.child_by_field_name("body") {
                    Some(body) => self.literal_elements(body)?,
                    None => Vec::new(),
                };
                TypeNode::composite(ty, elements)
            }
            "literal_value" => TypeNode::composite(None, self.literal_elements(node)?),
            "literal_element" => match first_named(node) {
                Some(inner) => self.expr(inner)?,
                None => self.unsupported(node),
            },
            "call_expression" => {
                let callee = match node.child_by_field_name("function") {
                    Some(f) => self.expr(f)?,
                    None => self.unsupported(node),
                };
                let mut args = Vec::new();
                if let Some(list) = node.child_by_field_name("arguments") {
                    for arg in named_children(list) {
                        if arg.kind() != "comment" {
                            args.push(self.expr(arg)?);
                        }
                    }
                }
                if node.child_by_field_name("type_arguments").is_some() {
                    self.unsupported(node)
                } else {
                    TypeNode::call(callee, args)
                }
            }
            "type_conversion_expression" => match (
                node.child_by_field_name("type"),
                node.child_by_field_name("operand"),
            ) {
                (Some(ty), Some(operand)) => {
                    TypeNode::call(self.type_node(ty), vec![self.expr(operand)?])
                }
                _ => self.unsupported(node),
            },
            "unary_expression" => self.unary(node)?,
            "interpreted_string_literal" | "raw_string_literal" => {
                TypeNode::literal(LiteralKind::String, self.text(node))
            }
            "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal" => {
                let lexical = kind.trim_end_matches("_literal");
                let literal_kind: LiteralKind = lexical.parse().map_err(RenderError::from)?;
                TypeNode::literal(literal_kind, self.text(node))
            }
            // Type expressions appear as arguments, e.g. `make([]T, 0)`.
            "slice_type" | "array_type" | "map_type" | "pointer_type" | "qualified_type"
            | "type_identifier" | "struct_type" | "interface_type" | "function_type" => {
                self.type_node(node)
            }
            _ => self.unsupported(node),
        };
        Ok(converted)
    }

    fn literal_elements(&self, body: Node) -> Result<Vec<TypeNode>> {
        let mut elements = Vec::new();
        for elem in named_children(body) {
            match elem.kind() {
                "comment" => {}
                "keyed_element" => {
                    let parts: Vec<Node> = named_children(elem)
                        .into_iter()
                        .filter(|n| n.kind() != "comment")
                        .collect();
                    match parts.as_slice() {
                        [key, value] => {
                            elements.push(TypeNode::key_value(self.expr(*key)?, self.expr(*value)?))
                        }
                        _ => elements.push(self.unsupported(elem)),
                    }
                }
                _ => elements.push(self.expr(elem)?),
            }
        }
        Ok(elements)
    }

    fn unary(&self, node: Node) -> Result<TypeNode> {
        let operator = node
            .child_by_field_name("operator")
            .map(|o| self.text(o))
            .unwrap_or("");
        let Some(operand) = node.child_by_field_name("operand") else {
            return Ok(self.unsupported(node));
        };
        match operator {
            "&" => Ok(TypeNode::reference(self.expr(operand)?)),
            // A signed number is still a single literal.
            "-" | "+" if is_numeric_literal(operand.kind()) => match self.expr(operand)? {
                TypeNode::Literal { kind, raw } => Ok(TypeNode::literal(kind, format!("{operator}{raw}"))),
                other => Ok(other),
            },
            op => Ok(TypeNode::Unsupported {
                kind: format!("unary_expression({op})"),
                text: self.text(node).to_string(),
            }),
        }
    }
}

// -- Helpers ------------------------------------------------------------------

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn first_named(node: Node) -> Option<Node> {
    named_children(node)
        .into_iter()
        .find(|n| n.kind() != "comment")
}

fn field_texts<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| !c.is_named() && c.kind() == token);
    found
}

fn is_numeric_literal(kind: &str) -> bool {
    matches!(kind, "int_literal" | "float_literal" | "imaginary_literal")
}

/// Name an embedded field is known by: `Base`, `*Base`, `pkg.Base`.
fn embedded_name(ty: &TypeNode) -> Option<&str> {
    match ty {
        TypeNode::Identifier(name) => Some(name),
        TypeNode::Qualified { name, .. } => Some(name),
        TypeNode::Pointer(inner) => embedded_name(inner),
        _ => None,
    }
}

/// Strip the quotes of an import path literal.
fn unquote(literal: &str) -> String {
    literal.trim_matches(|c| c == '"' || c == '`').to_string()
}

/// Text lines of one comment token, markers removed. Tool directives yield nothing.
fn comment_lines(comment: &str) -> Vec<String> {
    if RE_DIRECTIVE.is_match(comment) {
        return Vec::new();
    }
    if let Some(caps) = RE_LINE_COMMENT.captures(comment) {
        return vec![caps[1].trim_end().to_string()];
    }
    if let Some(body) = comment
        .strip_prefix("/*")
        .and_then(|c| c.strip_suffix("*/"))
    {
        return body.lines().map(|l| l.trim_end().to_string()).collect();
    }
    vec![comment.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> SourceFile {
        parse_file("widget.go", src).unwrap()
    }

    #[test]
    fn package_clause_and_doc() {
        let file = parse("// Package widget draws widgets.\n//\n// It is small.\npackage widget\n");
        assert_eq!(file.package, "widget");
        assert_eq!(
            file.doc.as_deref(),
            Some("Package widget draws widgets.\n\nIt is small.")
        );
    }

    #[test]
    fn build_directives_are_not_doc() {
        let file = parse("//go:build linux\n\npackage widget\n");
        assert_eq!(file.doc, None);
    }

    #[test]
    fn imports_with_aliases() {
        let file = parse(
            "package widget\n\nimport (\n\t\"fmt\"\n\tlog \"github.com/sirupsen/logrus\"\n\t_ \"embed\"\n)\n",
        );
        assert_eq!(
            file.imports,
            vec![
                ImportSpec {
                    alias: None,
                    path: "fmt".to_string()
                },
                ImportSpec {
                    alias: Some("log".to_string()),
                    path: "github.com/sirupsen/logrus".to_string()
                },
                ImportSpec {
                    alias: Some("_".to_string()),
                    path: "embed".to_string()
                },
            ]
        );
    }

    #[test]
    fn exported_functions_only() {
        let file = parse(
            "package widget\n\n// New makes a widget.\nfunc New(name string, opts ...Option) (*Widget, error) { return nil, nil }\n\nfunc helper() {}\n",
        );
        assert_eq!(file.functions.len(), 1);
        let func = &file.functions[0];
        assert_eq!(func.name, "New");
        assert_eq!(func.doc.as_deref(), Some("New makes a widget."));
        assert_eq!(func.location.as_ref().map(|l| l.line), Some(4));
        assert_eq!(
            func.signature,
            FuncType {
                params: vec![
                    Param::new(&["name"], TypeNode::ident("string")),
                    Param::new(&["opts"], TypeNode::ellipsis(TypeNode::ident("Option"))),
                ],
                results: vec![
                    TypeNode::pointer(TypeNode::ident("Widget")),
                    TypeNode::ident("error"),
                ],
            }
        );
    }

    #[test]
    fn named_results_expand_per_name() {
        let file = parse("package widget\n\nfunc Size() (w, h int) { return }\n");
        assert_eq!(
            file.functions[0].signature.results,
            vec![TypeNode::ident("int"), TypeNode::ident("int")]
        );
    }

    #[test]
    fn methods_carry_receiver() {
        let file = parse(
            "package widget\n\nfunc (w *Widget) Close() error { return nil }\nfunc (s state) Reset() {}\n",
        );
        assert_eq!(file.functions.len(), 1);
        let recv = file.functions[0].receiver.as_ref().unwrap();
        assert_eq!(recv.name.as_deref(), Some("w"));
        assert_eq!(recv.base_type(), Some("Widget"));
    }

    #[test]
    fn struct_type_with_tags_and_embedding() {
        let file = parse(
            "package widget\n\n// Widget is a thing.\ntype Widget struct {\n\t*Base\n\tName string `json:\"name\"`\n\tsecret int\n\tio.Reader\n}\n",
        );
        let ty = &file.types[0];
        assert_eq!(ty.name, "Widget");
        assert_eq!(ty.doc.as_deref(), Some("Widget is a thing."));
        assert_eq!(
            ty.underlying,
            TypeNode::Struct(vec![
                Field::new(&[], TypeNode::pointer(TypeNode::ident("Base"))),
                Field::new(&["Name"], TypeNode::ident("string")).with_tag("`json:\"name\"`"),
                Field::new(&[], TypeNode::qualified("io", "Reader")),
            ])
        );
    }

    #[test]
    fn interface_type() {
        let file = parse(
            "package widget\n\ntype Closer interface {\n\tio.Reader\n\tClose() error\n\tflush()\n}\n",
        );
        assert_eq!(
            file.types[0].underlying,
            TypeNode::Interface(vec![
                Field::new(&[], TypeNode::qualified("io", "Reader")),
                Field::new(
                    &["Close"],
                    TypeNode::Function(FuncType {
                        params: vec![],
                        results: vec![TypeNode::ident("error")],
                    })
                ),
            ])
        );
    }

    #[test]
    fn grouped_types_and_alias() {
        let file = parse(
            "package widget\n\ntype (\n\t// ID identifies.\n\tID string\n\tHandle = int\n\tinner bool\n)\n",
        );
        assert_eq!(file.types.len(), 2);
        assert_eq!(file.types[0].doc.as_deref(), Some("ID identifies."));
        assert!(!file.types[0].alias);
        assert!(file.types[1].alias);
        assert_eq!(file.types[1].underlying, TypeNode::ident("int"));
    }

    #[test]
    fn const_group_with_comments() {
        let file = parse(
            "package widget\n\n// Sizes.\nconst (\n\tSmall Size = 1 // tiny\n\tLarge Size = -2\n\thidden = 3\n)\n",
        );
        let group = &file.values[0];
        assert_eq!(group.keyword, ValueKeyword::Const);
        assert_eq!(group.doc.as_deref(), Some("Sizes."));
        assert_eq!(group.specs.len(), 2);
        assert_eq!(group.specs[0].comment.as_deref(), Some("// tiny"));
        assert_eq!(group.specs[0].declared, Some(TypeNode::ident("Size")));
        assert_eq!(group.specs[0].values, vec![TypeNode::literal(LiteralKind::Int, "1")]);
        assert_eq!(group.specs[1].values, vec![TypeNode::literal(LiteralKind::Int, "-2")]);
        assert_eq!(group.specs[1].comment, None);
    }

    #[test]
    fn composite_var() {
        let file = parse(
            "package widget\n\nvar Defaults = map[string][]string{\n\t\"a\": {\"x\", \"y\"},\n}\n",
        );
        let spec = &file.values[0].specs[0];
        assert_eq!(
            spec.values,
            vec![TypeNode::composite(
                Some(TypeNode::map(
                    TypeNode::ident("string"),
                    TypeNode::array(TypeNode::ident("string"))
                )),
                vec![TypeNode::key_value(
                    TypeNode::literal(LiteralKind::String, "\"a\""),
                    TypeNode::composite(
                        None,
                        vec![
                            TypeNode::literal(LiteralKind::String, "\"x\""),
                            TypeNode::literal(LiteralKind::String, "\"y\""),
                        ]
                    ),
                )],
            )]
        );
    }

    #[test]
    fn reference_and_call_values() {
        let file = parse(
            "package widget\n\nvar Default = &Widget{}\nvar Timeout = time.Duration(5)\nvar Logger = log.New()\n",
        );
        assert_eq!(
            file.values[0].specs[0].values,
            vec![TypeNode::reference(TypeNode::composite(
                Some(TypeNode::ident("Widget")),
                vec![]
            ))]
        );
        assert_eq!(
            file.values[2].specs[0].values,
            vec![TypeNode::call(TypeNode::qualified("log", "New"), vec![])]
        );
        assert!(matches!(
            &file.values[1].specs[0].values[0],
            TypeNode::CallLike { .. }
        ));
    }

    #[test]
    fn unsupported_syntax_is_preserved() {
        let file = parse(
            "package widget\n\nvar Events chan int\nvar Mask = 1 << 3\nvar Neg = !true\n",
        );
        assert!(matches!(
            file.values[0].specs[0].declared,
            Some(TypeNode::Unsupported { ref kind, .. }) if kind == "channel_type"
        ));
        assert!(matches!(
            file.values[1].specs[0].values[0],
            TypeNode::Unsupported { ref kind, .. } if kind == "binary_expression"
        ));
        assert!(matches!(
            file.values[2].specs[0].values[0],
            TypeNode::Unsupported { ref kind, .. } if kind == "unary_expression(!)"
        ));
    }

    #[test]
    fn generic_function_is_unsupported() {
        let file = parse("package widget\n\nfunc Map[T any](xs []T) []T { return xs }\n");
        assert!(matches!(
            file.functions[0].signature.params[0].ty,
            TypeNode::Unsupported { ref kind, .. } if kind == "type_parameter_list"
        ));
    }

    #[test]
    fn comment_markers() {
        assert_eq!(comment_lines("// hello"), vec!["hello"]);
        assert_eq!(comment_lines("//\thello"), vec!["\thello"]);
        assert_eq!(comment_lines("/* a\nb */"), vec![" a", "b"]);
        assert!(comment_lines("//go:generate stringer").is_empty());
    }
}
