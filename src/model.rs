//! Data model for parsed Go declarations — format-agnostic.
//!
//! [`TypeNode`] is the expression tree the renderer walks. The declaration
//! structs are what the front end produces for one package directory and live
//! only for the duration of a rendering pass.

use crate::error::RenderErrorKind;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A type expression or initializer expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    /// Bare name: a builtin, or a type defined in this package.
    Identifier(String),
    /// `qualifier.name`, where the qualifier is an import alias.
    Qualified { qualifier: String, name: String },
    /// `*T`
    Pointer(Box<TypeNode>),
    /// `&x` (address-of)
    Reference(Box<TypeNode>),
    /// `...T` (variadic marker)
    Ellipsis(Box<TypeNode>),
    /// `[]T`
    Array(Box<TypeNode>),
    Map {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },
    Function(FuncType),
    Struct(Vec<Field>),
    Interface(Vec<Field>),
    /// Composite literal. `ty` is `None` for elided types inside an outer literal.
    CompositeValue {
        ty: Option<Box<TypeNode>>,
        elements: Vec<TypeNode>,
    },
    KeyValue {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },
    Literal { kind: LiteralKind, raw: String },
    CallLike {
        callee: Box<TypeNode>,
        args: Vec<TypeNode>,
    },
    /// Syntax the model has no variant for. Rendering one is a fatal error.
    Unsupported { kind: String, text: String },
}

impl TypeNode {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeNode::Identifier(name.into())
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        TypeNode::Qualified {
            qualifier: qualifier.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeNode) -> Self {
        TypeNode::Pointer(Box::new(elem))
    }

    pub fn reference(elem: TypeNode) -> Self {
        TypeNode::Reference(Box::new(elem))
    }

    pub fn ellipsis(elem: TypeNode) -> Self {
        TypeNode::Ellipsis(Box::new(elem))
    }

    pub fn array(elem: TypeNode) -> Self {
        TypeNode::Array(Box::new(elem))
    }

    pub fn map(key: TypeNode, value: TypeNode) -> Self {
        TypeNode::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn composite(ty: Option<TypeNode>, elements: Vec<TypeNode>) -> Self {
        TypeNode::CompositeValue {
            ty: ty.map(Box::new),
            elements,
        }
    }

    pub fn key_value(key: TypeNode, value: TypeNode) -> Self {
        TypeNode::KeyValue {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn literal(kind: LiteralKind, raw: impl Into<String>) -> Self {
        TypeNode::Literal {
            kind,
            raw: raw.into(),
        }
    }

    pub fn call(callee: TypeNode, args: Vec<TypeNode>) -> Self {
        TypeNode::CallLike {
            callee: Box::new(callee),
            args,
        }
    }

    /// Short variant name used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            TypeNode::Identifier(_) => "Identifier",
            TypeNode::Qualified { .. } => "Qualified",
            TypeNode::Pointer(_) => "Pointer",
            TypeNode::Reference(_) => "Reference",
            TypeNode::Ellipsis(_) => "Ellipsis",
            TypeNode::Array(_) => "Array",
            TypeNode::Map { .. } => "Map",
            TypeNode::Function(_) => "Function",
            TypeNode::Struct(_) => "Struct",
            TypeNode::Interface(_) => "Interface",
            TypeNode::CompositeValue { .. } => "CompositeValue",
            TypeNode::KeyValue { .. } => "KeyValue",
            TypeNode::Literal { .. } => "Literal",
            TypeNode::CallLike { .. } => "CallLike",
            TypeNode::Unsupported { kind, .. } => kind,
        }
    }
}

/// Parameters and results of a function type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    pub params: Vec<Param>,
    pub results: Vec<TypeNode>,
}

/// One parameter group: `a, b int` has two names and one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub names: Vec<String>,
    pub ty: TypeNode,
}

impl Param {
    pub fn new(names: &[&str], ty: TypeNode) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
        }
    }
}

/// Struct field or interface method. Embedded fields have no names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeNode,
    /// Raw tag text including its quotes, e.g. `` `json:"id"` ``.
    pub tag: Option<String>,
}

impl Field {
    pub fn new(names: &[&str], ty: TypeNode) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    Imaginary,
    Char,
    String,
}

impl FromStr for LiteralKind {
    type Err = RenderErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(LiteralKind::Int),
            "float" => Ok(LiteralKind::Float),
            "imaginary" | "imag" => Ok(LiteralKind::Imaginary),
            "char" | "rune" => Ok(LiteralKind::Char),
            "string" => Ok(LiteralKind::String),
            other => Err(RenderErrorKind::UnknownLiteralKind(other.to_string())),
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralKind::Int => "int",
            LiteralKind::Float => "float",
            LiteralKind::Imaginary => "imaginary",
            LiteralKind::Char => "char",
            LiteralKind::String => "string",
        };
        f.write_str(name)
    }
}

// -- Declarations -------------------------------------------------------------

/// Where a declaration starts in the source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// File name relative to the package directory.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub name: Option<String>,
    pub ty: TypeNode,
}

impl Receiver {
    /// Name of the receiver's base type, with any pointer stripped.
    pub fn base_type(&self) -> Option<&str> {
        match &self.ty {
            TypeNode::Identifier(name) => Some(name),
            TypeNode::Pointer(inner) => match inner.as_ref() {
                TypeNode::Identifier(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A documented function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    pub signature: FuncType,
    pub doc: Option<String>,
    pub location: Option<SourceLocation>,
}

/// A documented type declaration with the functions grouped under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub underlying: TypeNode,
    /// `type X = Y` rather than `type X Y`.
    pub alias: bool,
    /// Package functions returning this type.
    pub functions: Vec<FunctionDecl>,
    pub methods: Vec<FunctionDecl>,
    pub doc: Option<String>,
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKeyword {
    Const,
    Var,
}

impl ValueKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKeyword::Const => "const",
            ValueKeyword::Var => "var",
        }
    }
}

/// One `const` or `var` declaration, possibly a parenthesized group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGroup {
    pub keyword: ValueKeyword,
    pub specs: Vec<ValueSpec>,
    pub doc: Option<String>,
    pub location: Option<SourceLocation>,
}

/// One line of a value group: `A, B int = 1, 2 // comment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub declared: Option<TypeNode>,
    pub values: Vec<TypeNode>,
    /// Trailing line comment, verbatim.
    pub comment: Option<String>,
}

/// One import statement as written in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit alias, including `_` and `.`.
    pub alias: Option<String>,
    pub path: String,
}

/// Everything the front end extracted from one `.go` file.
#[derive(Debug, Default)]
pub struct SourceFile {
    pub file_name: String,
    pub package: String,
    pub doc: Option<String>,
    pub imports: Vec<ImportSpec>,
    pub functions: Vec<FunctionDecl>,
    pub types: Vec<TypeDecl>,
    pub values: Vec<ValueGroup>,
}

/// All declarations of one package directory, grouped for rendering.
#[derive(Debug, Default)]
pub struct Package {
    pub name: String,
    /// Full import path, e.g. `example.com/proj/a`.
    pub path: String,
    pub doc: Option<String>,
    /// Imports per file, in file order.
    pub imports: Vec<(String, Vec<ImportSpec>)>,
    /// Functions not associated with any type.
    pub functions: Vec<FunctionDecl>,
    pub types: Vec<TypeDecl>,
    pub consts: Vec<ValueGroup>,
    pub vars: Vec<ValueGroup>,
}

impl Package {
    pub fn is_main(&self) -> bool {
        self.name == "main"
    }
}
