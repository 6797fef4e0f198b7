//! Recursive type-expression printer producing plain and linked text at once.
//!
//! Every arm builds its output from the [`RenderedPair`]s of its children
//! with operations that touch both channels identically, so the linked form
//! only ever differs from the plain one by link markup and HTML escaping.

use crate::context::RenderContext;
use crate::error::{RenderErrorKind, Result};
use crate::model::{Field, FuncType, Param, TypeNode};
use crate::render::pair::RenderedPair;
use crate::resolve::resolve_link;
use crate::toc;

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Render a type or initializer expression.
///
/// `depth` is the nesting level of the enclosing struct; a struct rendered at
/// `depth` indents its field lines by `depth + 1` units. `hyphen` selects the
/// listing style, which bullets field lines and leaves structs unclosed.
pub fn render(node: &TypeNode, depth: usize, hyphen: bool, ctx: &mut RenderContext) -> Result<RenderedPair> {
    match node {
        TypeNode::Identifier(name) => Ok(render_name(None, name, ctx)),
        TypeNode::Qualified { qualifier, name } => Ok(render_name(Some(qualifier), name, ctx)),
        TypeNode::Pointer(elem) => Ok(render(elem, depth, hyphen, ctx)?.prefixed("*")),
        TypeNode::Reference(elem) => Ok(render(elem, depth, hyphen, ctx)?.prefixed("&")),
        TypeNode::Ellipsis(elem) => Ok(render(elem, depth, hyphen, ctx)?.prefixed("...")),
        TypeNode::Array(elem) => Ok(render(elem, depth, hyphen, ctx)?.prefixed("[]")),
        TypeNode::Map { key, value } => {
            let mut out = render(key, depth, hyphen, ctx)?.wrap("map[", "]");
            out.push(&render(value, depth, hyphen, ctx)?);
            Ok(out)
        }
        TypeNode::Function(func) => {
            let mut out = render_params(&func.params, depth, ctx)?.wrap("func(", ")");
            out.push(&render_results(&func.results, depth, ctx)?);
            Ok(out)
        }
        TypeNode::Struct(fields) => render_members("struct", fields, false, depth, hyphen, ctx),
        TypeNode::Interface(methods) => {
            render_members("interface", methods, true, depth, hyphen, ctx)
        }
        TypeNode::CompositeValue { ty, elements } => {
            render_composite(ty.as_deref(), elements, depth, hyphen, ctx)
        }
        TypeNode::KeyValue { key, value } => {
            let key_out = render(key, depth, hyphen, ctx)?;
            let value_out = render(value, depth, hyphen, ctx)?;
            let nested = matches!(**value, TypeNode::CompositeValue { .. })
                && matches!(**key, TypeNode::Literal { .. });
            let mut out = key_out;
            if nested {
                out.push(&value_out.indent_continuation(INDENT).wrap(
                    &format!(": {{\n{INDENT}"),
                    ",\n}",
                ));
            } else {
                out.push_str(": ");
                out.push(&value_out);
            }
            Ok(out)
        }
        TypeNode::Literal { raw, .. } => Ok(RenderedPair::text(raw.as_str())),
        TypeNode::CallLike { callee, args } => {
            // The callee stays unlinked in both channels.
            let mut out = match &**callee {
                TypeNode::Identifier(name) => RenderedPair::text(name.as_str()),
                TypeNode::Qualified { qualifier, name } => {
                    RenderedPair::text(format!("{qualifier}.{name}"))
                }
                other => RenderedPair::text(render(other, depth, hyphen, ctx)?.plain),
            };
            out.push(&render_list(args, ", ", depth, hyphen, ctx)?.wrap("(", ")"));
            Ok(out)
        }
        TypeNode::Unsupported { kind, text } => Err(RenderErrorKind::UnsupportedNode {
            kind: kind.clone(),
            text: text.clone(),
        }
        .into()),
    }
}

/// A name leaf: builtins verbatim, everything else through the resolver.
fn render_name(qualifier: Option<&str>, name: &str, ctx: &mut RenderContext) -> RenderedPair {
    let label = match qualifier {
        Some(q) => format!("{q}.{name}"),
        None => name.to_string(),
    };
    if qualifier.is_none() && toc::is_builtin(name) {
        return RenderedPair::text(label);
    }
    match resolve_link(qualifier, name, ctx) {
        Some(href) => RenderedPair::link(&label, &href),
        None => RenderedPair::text(label),
    }
}

fn render_list(
    nodes: &[TypeNode],
    sep: &str,
    depth: usize,
    hyphen: bool,
    ctx: &mut RenderContext,
) -> Result<RenderedPair> {
    let items = nodes
        .iter()
        .map(|n| render(n, depth, hyphen, ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(RenderedPair::join(&items, sep))
}

/// Parameter list without the surrounding parentheses: `a, b int, opts ...Option`.
pub fn render_params(params: &[Param], depth: usize, ctx: &mut RenderContext) -> Result<RenderedPair> {
    let mut items = Vec::with_capacity(params.len());
    for param in params {
        let ty = render(&param.ty, depth, false, ctx)?;
        if param.names.is_empty() {
            items.push(ty);
        } else {
            let mut item = RenderedPair::text(format!("{} ", param.names.join(", ")));
            item.push(&ty);
            items.push(item);
        }
    }
    Ok(RenderedPair::join(&items, ", "))
}

/// Result list including its leading space: ``, ` error`, ` (int, error)`.
pub fn render_results(results: &[TypeNode], depth: usize, ctx: &mut RenderContext) -> Result<RenderedPair> {
    match results {
        [] => Ok(RenderedPair::default()),
        [single] => Ok(render(single, depth, false, ctx)?.wrap(" ", "")),
        many => Ok(render_list(many, ", ", depth, false, ctx)?.wrap(" (", ")")),
    }
}

/// `(params) results` as used after a function or method name.
pub fn render_signature(func: &FuncType, depth: usize, ctx: &mut RenderContext) -> Result<RenderedPair> {
    let mut out = render_params(&func.params, depth, ctx)?.wrap("(", ")");
    out.push(&render_results(&func.results, depth, ctx)?);
    Ok(out)
}

fn render_members(
    keyword: &str,
    members: &[Field],
    methods: bool,
    depth: usize,
    hyphen: bool,
    ctx: &mut RenderContext,
) -> Result<RenderedPair> {
    if members.is_empty() {
        return Ok(RenderedPair::text(format!("{keyword}{{}}")));
    }
    let lines = members
        .iter()
        .map(|f| render_field(f, methods, depth, hyphen, ctx))
        .collect::<Result<Vec<_>>>()?;
    let body = RenderedPair::join(&lines, "\n");
    if hyphen {
        Ok(body.wrap(&format!("{keyword}\n"), ""))
    } else {
        Ok(body.wrap(&format!("{keyword} {{\n"), "\n}"))
    }
}

/// One field or method line of a struct or interface rendered at `depth`.
pub fn render_field(
    field: &Field,
    method: bool,
    depth: usize,
    hyphen: bool,
    ctx: &mut RenderContext,
) -> Result<RenderedPair> {
    let mut line = RenderedPair::text(INDENT.repeat(depth + 1));
    if hyphen {
        line.push_str("- ");
    }
    match (&field.ty, field.names.as_slice()) {
        (TypeNode::Function(func), [name, ..]) if method => {
            line.push_str(name);
            line.push(&render_signature(func, depth + 1, ctx)?);
        }
        (ty, []) => line.push(&render(ty, depth + 1, hyphen, ctx)?),
        (ty, names) => {
            line.push_str(&names.join(", "));
            line.push_str(" ");
            line.push(&render(ty, depth + 1, hyphen, ctx)?);
        }
    }
    if let Some(tag) = &field.tag {
        line.push_str(" ");
        line.push_str(tag);
    }
    Ok(line)
}

fn render_composite(
    ty: Option<&TypeNode>,
    elements: &[TypeNode],
    depth: usize,
    hyphen: bool,
    ctx: &mut RenderContext,
) -> Result<RenderedPair> {
    let Some(ty) = ty else {
        // Elided type: the enclosing literal supplies the braces.
        return render_list(elements, ",\n", depth, hyphen, ctx);
    };
    match ty {
        TypeNode::Array(_)
        | TypeNode::Map { .. }
        | TypeNode::Qualified { .. }
        | TypeNode::Identifier(_) => {}
        other => return Err(RenderErrorKind::UnsupportedComposite(other.kind_name().to_string()).into()),
    }
    let mut out = render(ty, depth, hyphen, ctx)?;
    if elements.is_empty() {
        out.push_str("{}");
        return Ok(out);
    }
    let body = render_list(elements, ",\n", depth, hyphen, ctx)?.indent_continuation(INDENT);
    out.push(&body.wrap(&format!("{{\n{INDENT}"), ",\n}"));
    Ok(out)
}
