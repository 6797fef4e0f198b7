//! Declaration formatter: functions, types and value groups.
//!
//! Turns the declarations of a [`Package`] into [`PackageDoc`], the
//! format-agnostic view both output formats are built from. Every signature is
//! kept as a [`RenderedPair`]; index entries always use the plain channel.

use crate::context::RenderContext;
use crate::error::Result;
use crate::model::{
    FunctionDecl, Package, SourceLocation, TypeDecl, TypeNode, ValueGroup, ValueKeyword, ValueSpec,
};
use crate::render::pair::RenderedPair;
use crate::render::types;
use crate::toc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDoc {
    pub name: String,
    /// `func (w *Widget) Close`
    pub heading: String,
    pub anchor: String,
    /// Full signature.
    pub signature: RenderedPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl FunctionDoc {
    /// `- [<plain signature>](#<anchor>)`, indented by `level` units.
    pub fn index_entry(&self, level: usize) -> String {
        toc::render_toc_item(&self.signature.plain, &self.heading, level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDoc {
    pub name: String,
    /// `type Widget`
    pub heading: String,
    pub anchor: String,
    /// `type Widget struct {...}` with a closed body.
    pub declaration: RenderedPair,
    /// The underlying type in listing style.
    pub listing: RenderedPair,
    pub functions: Vec<FunctionDoc>,
    pub methods: Vec<FunctionDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl TypeDoc {
    /// The type's index entry followed by one nested entry per associated
    /// function and method.
    pub fn index_entries(&self) -> Vec<String> {
        let mut entries = vec![toc::render_toc_item(&self.heading, &self.heading, 0)];
        entries.extend(
            self.functions
                .iter()
                .chain(&self.methods)
                .map(|f| f.index_entry(1)),
        );
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueDoc {
    pub keyword: &'static str,
    pub names: Vec<String>,
    /// One line per spec of the group.
    pub declaration: RenderedPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDoc {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub consts: Vec<ValueDoc>,
    pub vars: Vec<ValueDoc>,
    pub functions: Vec<FunctionDoc>,
    pub types: Vec<TypeDoc>,
}

impl PackageDoc {
    /// Index list: package functions, then types with their nested entries.
    pub fn index_entries(&self) -> Vec<String> {
        let mut entries: Vec<String> = self.functions.iter().map(|f| f.index_entry(0)).collect();
        for ty in &self.types {
            entries.extend(ty.index_entries());
        }
        entries
    }
}

/// Format every declaration of a package.
pub fn format_package(pkg: &Package, ctx: &mut RenderContext) -> Result<PackageDoc> {
    let consts = pkg
        .consts
        .iter()
        .map(|g| format_value_group(g, ctx))
        .collect::<Result<Vec<_>>>()?;
    let vars = pkg
        .vars
        .iter()
        .map(|g| format_value_group(g, ctx))
        .collect::<Result<Vec<_>>>()?;
    let functions = pkg
        .functions
        .iter()
        .map(|f| format_function(f, ctx))
        .collect::<Result<Vec<_>>>()?;
    let types = pkg
        .types
        .iter()
        .map(|t| format_type(t, ctx))
        .collect::<Result<Vec<_>>>()?;

    Ok(PackageDoc {
        name: pkg.name.clone(),
        path: pkg.path.clone(),
        doc: pkg.doc.clone(),
        consts,
        vars,
        functions,
        types,
    })
}

pub fn format_function(func: &FunctionDecl, ctx: &mut RenderContext) -> Result<FunctionDoc> {
    let declaration = function_name(func);
    format_function_inner(func, ctx).map_err(|e| e.in_declaration(&declaration))
}

fn format_function_inner(func: &FunctionDecl, ctx: &mut RenderContext) -> Result<FunctionDoc> {
    let mut signature = RenderedPair::text("func ");
    let mut heading = String::from("func ");
    if let Some(recv) = &func.receiver {
        let ty = types::render(&recv.ty, 0, false, ctx)?;
        let mut receiver = match &recv.name {
            Some(name) => RenderedPair::text(format!("{name} ")),
            None => RenderedPair::default(),
        };
        receiver.push(&ty);
        let receiver = receiver.wrap("(", ") ");
        heading.push_str(&receiver.plain);
        signature.push(&receiver);
    }
    heading.push_str(&func.name);
    signature.push_str(&func.name);
    signature.push(&types::render_signature(&func.signature, 0, ctx)?);

    Ok(FunctionDoc {
        name: func.name.clone(),
        anchor: toc::anchor(&heading),
        heading,
        signature,
        doc: func.doc.clone(),
        location: func.location.clone(),
    })
}

/// `Widget.Close` for methods, the bare name otherwise.
fn function_name(func: &FunctionDecl) -> String {
    match func.receiver.as_ref().and_then(|r| r.base_type()) {
        Some(base) => format!("{base}.{}", func.name),
        None => func.name.clone(),
    }
}

pub fn format_type(ty: &TypeDecl, ctx: &mut RenderContext) -> Result<TypeDoc> {
    format_type_inner(ty, ctx).map_err(|e| e.in_declaration(&ty.name))
}

fn format_type_inner(ty: &TypeDecl, ctx: &mut RenderContext) -> Result<TypeDoc> {
    let heading = format!("type {}", ty.name);
    let keyword = if ty.alias {
        format!("{heading} = ")
    } else {
        format!("{heading} ")
    };
    let declaration = types::render(&ty.underlying, 0, false, ctx)?.wrap(&keyword, "");
    let listing = types::render(&ty.underlying, 0, true, ctx)?;
    let functions = ty
        .functions
        .iter()
        .map(|f| format_function(f, ctx))
        .collect::<Result<Vec<_>>>()?;
    let methods = ty
        .methods
        .iter()
        .map(|f| format_function(f, ctx))
        .collect::<Result<Vec<_>>>()?;

    Ok(TypeDoc {
        name: ty.name.clone(),
        anchor: toc::anchor(&heading),
        heading,
        declaration,
        listing,
        functions,
        methods,
        doc: ty.doc.clone(),
        location: ty.location.clone(),
    })
}

pub fn format_value_group(group: &ValueGroup, ctx: &mut RenderContext) -> Result<ValueDoc> {
    let names: Vec<String> = group.specs.iter().flat_map(|s| s.names.clone()).collect();
    let label = names.first().cloned().unwrap_or_default();
    let lines = group
        .specs
        .iter()
        .map(|spec| format_value_spec(group.keyword, spec, ctx))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| e.in_declaration(&label))?;

    Ok(ValueDoc {
        keyword: group.keyword.as_str(),
        names,
        declaration: RenderedPair::join(&lines, "\n"),
        doc: group.doc.clone(),
        location: group.location.clone(),
    })
}

/// `<keyword> <names>[ <type>][ = <value>][ <comment>]`
fn format_value_spec(
    keyword: ValueKeyword,
    spec: &ValueSpec,
    ctx: &mut RenderContext,
) -> Result<RenderedPair> {
    let mut declared = match &spec.declared {
        Some(ty) => Some(types::render(ty, 0, false, ctx)?),
        None => None,
    };

    let mut values = Vec::with_capacity(spec.values.len());
    for value in &spec.values {
        let rendered = types::render(value, 0, false, ctx)?;
        match value {
            // A bare array or map type expression takes over the declared type.
            TypeNode::Array(_) | TypeNode::Map { .. } => {
                if let Some(mut absorbed) = declared.take() {
                    absorbed.push(&rendered);
                    values.push(absorbed);
                    continue;
                }
            }
            // The literal already spells out its type.
            TypeNode::CompositeValue { ty: Some(ty), .. }
                if matches!(**ty, TypeNode::Array(_) | TypeNode::Map { .. }) =>
            {
                declared = None;
            }
            _ => {}
        }
        values.push(rendered);
    }

    let mut line = RenderedPair::text(format!("{} {}", keyword.as_str(), spec.names.join(", ")));
    if let Some(declared) = declared {
        line.push(&declared.wrap(" ", ""));
    }
    match values.as_slice() {
        [] => {}
        [single] => {
            line.push_str(" = ");
            line.push(single);
        }
        many => line.push(&RenderedPair::join(many, ", ").wrap(" {\n", "\n}")),
    }
    if let Some(comment) = &spec.comment {
        line.push_str(" ");
        line.push_str(comment);
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LinkConfig;
    use crate::error::RenderErrorKind;
    use crate::imports::ImportMap;
    use crate::model::{Field, FuncType, LiteralKind, Param, Receiver};
    use crate::render::pair::strip_links;

    fn with_ctx<T>(f: impl FnOnce(&mut RenderContext) -> T) -> T {
        let mut imports = ImportMap::new().with_package_path("example.com/proj/widget");
        imports.insert("io", "io");
        let config = LinkConfig::default();
        let mut ctx = RenderContext::new(&imports, &config);
        f(&mut ctx)
    }

    fn close_method() -> FunctionDecl {
        FunctionDecl {
            name: "Close".to_string(),
            receiver: Some(Receiver {
                name: Some("w".to_string()),
                ty: TypeNode::pointer(TypeNode::ident("Widget")),
            }),
            signature: FuncType {
                params: vec![],
                results: vec![TypeNode::ident("error")],
            },
            doc: Some("Close releases the widget.".to_string()),
            location: None,
        }
    }

    fn new_widget() -> FunctionDecl {
        FunctionDecl {
            name: "New".to_string(),
            receiver: None,
            signature: FuncType {
                params: vec![Param::new(&["r"], TypeNode::qualified("io", "Reader"))],
                results: vec![TypeNode::pointer(TypeNode::ident("Widget"))],
            },
            doc: None,
            location: Some(SourceLocation {
                file: "widget.go".to_string(),
                line: 12,
            }),
        }
    }

    #[test]
    fn method_signature_heading_and_anchor() {
        let doc = with_ctx(|ctx| format_function(&close_method(), ctx)).unwrap();
        assert_eq!(doc.heading, "func (w *Widget) Close");
        assert_eq!(doc.anchor, "func-w-widget-close");
        assert_eq!(doc.signature.plain, "func (w *Widget) Close() error");
        assert_eq!(
            doc.signature.markdown,
            "func (w <a href=\"#type-widget\">*Widget</a>) Close() error"
        );
        assert_eq!(
            doc.index_entry(1),
            "    - [func (w *Widget) Close() error](#func-w-widget-close)"
        );
    }

    #[test]
    fn function_signature_links_parameters() {
        let doc = with_ctx(|ctx| format_function(&new_widget(), ctx)).unwrap();
        assert_eq!(doc.signature.plain, "func New(r io.Reader) *Widget");
        assert_eq!(
            doc.signature.markdown,
            "func New(r <a href=\"https://pkg.go.dev/io#Reader\">io.Reader</a>) <a href=\"#type-widget\">*Widget</a>"
        );
        assert_eq!(strip_links(&doc.signature.markdown), doc.signature.plain);
    }

    #[test]
    fn struct_type_with_associated_functions() {
        let ty = TypeDecl {
            name: "Widget".to_string(),
            underlying: TypeNode::Struct(vec![
                Field::new(&["Name"], TypeNode::ident("string")),
                Field::new(&["Size"], TypeNode::ident("int")).with_tag("`json:\"size\"`"),
            ]),
            alias: false,
            functions: vec![new_widget()],
            methods: vec![close_method()],
            doc: None,
            location: None,
        };
        let doc = with_ctx(|ctx| format_type(&ty, ctx)).unwrap();
        assert_eq!(
            doc.declaration.plain,
            "type Widget struct {\n    Name string\n    Size int `json:\"size\"`\n}"
        );
        assert_eq!(doc.listing.plain, "struct\n    - Name string\n    - Size int `json:\"size\"`");
        assert_eq!(
            doc.index_entries(),
            vec![
                "- [type Widget](#type-widget)".to_string(),
                "    - [func New(r io.Reader) *Widget](#func-new)".to_string(),
                "    - [func (w *Widget) Close() error](#func-w-widget-close)".to_string(),
            ]
        );
    }

    #[test]
    fn alias_and_empty_struct() {
        let alias = TypeDecl {
            name: "Handle".to_string(),
            underlying: TypeNode::ident("int"),
            alias: true,
            functions: vec![],
            methods: vec![],
            doc: None,
            location: None,
        };
        let doc = with_ctx(|ctx| format_type(&alias, ctx)).unwrap();
        assert_eq!(doc.declaration.plain, "type Handle = int");

        let empty = TypeDecl {
            name: "Marker".to_string(),
            underlying: TypeNode::Struct(vec![]),
            alias: false,
            ..alias
        };
        let doc = with_ctx(|ctx| format_type(&empty, ctx)).unwrap();
        assert_eq!(doc.declaration.plain, "type Marker struct{}");
    }

    #[test]
    fn value_group_lines() {
        let group = ValueGroup {
            keyword: ValueKeyword::Const,
            specs: vec![
                ValueSpec {
                    names: vec!["A".to_string()],
                    declared: Some(TypeNode::ident("int")),
                    values: vec![TypeNode::literal(LiteralKind::Int, "1")],
                    comment: Some("// first".to_string()),
                },
                ValueSpec {
                    names: vec!["B".to_string(), "C".to_string()],
                    declared: None,
                    values: vec![
                        TypeNode::literal(LiteralKind::String, "\"b\""),
                        TypeNode::literal(LiteralKind::String, "\"c\""),
                    ],
                    comment: None,
                },
            ],
            doc: None,
            location: None,
        };
        let doc = with_ctx(|ctx| format_value_group(&group, ctx)).unwrap();
        assert_eq!(doc.keyword, "const");
        assert_eq!(doc.names, vec!["A", "B", "C"]);
        assert_eq!(
            doc.declaration.plain,
            "const A int = 1 // first\nconst B, C {\n\"b\", \"c\"\n}"
        );
    }

    #[test]
    fn composite_value_drops_declared_type() {
        let group = ValueGroup {
            keyword: ValueKeyword::Var,
            specs: vec![ValueSpec {
                names: vec!["Sizes".to_string()],
                declared: Some(TypeNode::array(TypeNode::ident("int"))),
                values: vec![TypeNode::composite(
                    Some(TypeNode::array(TypeNode::ident("int"))),
                    vec![TypeNode::literal(LiteralKind::Int, "1")],
                )],
                comment: None,
            }],
            doc: None,
            location: None,
        };
        let doc = with_ctx(|ctx| format_value_group(&group, ctx)).unwrap();
        assert_eq!(doc.declaration.plain, "var Sizes = []int{\n    1,\n}");
    }

    #[test]
    fn bare_array_value_absorbs_declared_type() {
        let group = ValueGroup {
            keyword: ValueKeyword::Var,
            specs: vec![ValueSpec {
                names: vec!["T".to_string()],
                declared: Some(TypeNode::ident("Kind")),
                values: vec![TypeNode::array(TypeNode::ident("byte"))],
                comment: None,
            }],
            doc: None,
            location: None,
        };
        let doc = with_ctx(|ctx| format_value_group(&group, ctx)).unwrap();
        assert_eq!(doc.declaration.plain, "var T = Kind[]byte");
        assert_eq!(strip_links(&doc.declaration.markdown), doc.declaration.plain);
    }

    #[test]
    fn errors_name_the_declaration() {
        let mut method = close_method();
        method.signature.results = vec![TypeNode::Unsupported {
            kind: "channel_type".to_string(),
            text: "chan int".to_string(),
        }];
        let err = with_ctx(|ctx| format_function(&method, ctx)).unwrap_err();
        assert_eq!(err.declaration.as_deref(), Some("Widget.Close"));
        assert!(matches!(err.kind, RenderErrorKind::UnsupportedNode { .. }));
    }

    #[test]
    fn package_index_lists_functions_before_types() {
        let pkg = Package {
            name: "widget".to_string(),
            path: "example.com/proj/widget".to_string(),
            functions: vec![FunctionDecl {
                name: "Version".to_string(),
                receiver: None,
                signature: FuncType {
                    params: vec![],
                    results: vec![TypeNode::ident("string")],
                },
                doc: None,
                location: None,
            }],
            types: vec![TypeDecl {
                name: "Widget".to_string(),
                underlying: TypeNode::Struct(vec![]),
                alias: false,
                functions: vec![],
                methods: vec![],
                doc: None,
                location: None,
            }],
            ..Package::default()
        };
        let doc = with_ctx(|ctx| format_package(&pkg, ctx)).unwrap();
        assert_eq!(
            doc.index_entries(),
            vec![
                "- [func Version() string](#func-version)".to_string(),
                "- [type Widget](#type-widget)".to_string(),
            ]
        );
    }
}
