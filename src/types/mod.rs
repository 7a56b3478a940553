//! Type query adapter.
//!
//! The detectors never look at type annotations themselves. They ask a
//! [`TypeQuery`] for the static type of a node, or for the return type of a
//! call, and classify the answer. `None` always means "inconclusive": the
//! detectors treat it as "no finding".

pub mod local;

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::ast::{NodeId, SyntaxTree};

pub use local::LocalTypeOracle;

/// Name of the tagged union the result detector recognises.
pub const RESULT_TYPE_NAME: &str = "Result";

/// Primitive and top/bottom keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Number,
    String,
    Boolean,
    BigInt,
    Symbol,
    Null,
    Undefined,
    Void,
    Any,
    Unknown,
    Never,
}

impl PrimitiveKind {
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "number" => PrimitiveKind::Number,
            "string" => PrimitiveKind::String,
            "boolean" => PrimitiveKind::Boolean,
            "bigint" => PrimitiveKind::BigInt,
            "symbol" => PrimitiveKind::Symbol,
            "null" => PrimitiveKind::Null,
            "undefined" => PrimitiveKind::Undefined,
            "void" => PrimitiveKind::Void,
            "any" => PrimitiveKind::Any,
            "unknown" => PrimitiveKind::Unknown,
            "never" => PrimitiveKind::Never,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::BigInt => "bigint",
            PrimitiveKind::Symbol => "symbol",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
            PrimitiveKind::Never => "never",
        }
    }
}

/// Structured description of a static type.
///
/// `Text` carries a printed type for hosts whose type service can only
/// render strings; everything else is produced by [`LocalTypeOracle`] or a
/// host that exposes structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    /// String, numeric or boolean literal type, kept in its source spelling.
    Literal(String),
    /// Object literal, object type literal or the `object` keyword.
    Object,
    Array(Box<TypeDescriptor>),
    Tuple(Vec<TypeDescriptor>),
    Function,
    /// Named class, interface, object alias or built-in object type.
    Reference {
        name: String,
        args: Vec<TypeDescriptor>,
    },
    /// Enum declared in the file. Enum members are numbers or strings.
    Enum(String),
    Union(Vec<TypeDescriptor>),
    Text(String),
}

/// The two classifications the equality detector cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// Compared by value, or an "unknown-safe" type (any/unknown/never/union).
    Primitive,
    /// Object, array or class-instance shape compared by reference.
    Structural,
}

impl TypeDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Reference {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Reference {
            name: name.into(),
            args,
        }
    }

    /// Build a union, flattening nested unions and collapsing a single member.
    pub fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        let mut flat: Vec<TypeDescriptor> = Vec::new();
        for member in members {
            match member {
                TypeDescriptor::Union(inner) => {
                    for m in inner {
                        if !flat.contains(&m) {
                            flat.push(m);
                        }
                    }
                }
                other => {
                    if !flat.contains(&other) {
                        flat.push(other);
                    }
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            TypeDescriptor::Union(flat)
        }
    }

    pub fn class(&self) -> TypeClass {
        match self {
            TypeDescriptor::Primitive(_)
            | TypeDescriptor::Literal(_)
            | TypeDescriptor::Function
            | TypeDescriptor::Enum(_)
            | TypeDescriptor::Union(_) => TypeClass::Primitive,
            TypeDescriptor::Object
            | TypeDescriptor::Array(_)
            | TypeDescriptor::Tuple(_)
            | TypeDescriptor::Reference { .. } => TypeClass::Structural,
            TypeDescriptor::Text(text) => classify_printed(text),
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.class() == TypeClass::Primitive
    }

    pub fn is_structural(&self) -> bool {
        self.class() == TypeClass::Structural
    }

    /// `undefined`, `null`, `never`, `any`, `unknown`, or any union.
    ///
    /// Unions are treated as safe so optional-reference comparisons such as
    /// `maybeAsset === other` are not flagged.
    pub fn is_safe_nullability(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => matches!(
                kind,
                PrimitiveKind::Null
                    | PrimitiveKind::Undefined
                    | PrimitiveKind::Void
                    | PrimitiveKind::Never
                    | PrimitiveKind::Any
                    | PrimitiveKind::Unknown
            ),
            TypeDescriptor::Union(_) => true,
            TypeDescriptor::Text(text) => {
                let text = text.trim();
                matches!(
                    text,
                    "null" | "undefined" | "void" | "never" | "any" | "unknown"
                ) || is_printed_union(text)
            }
            _ => false,
        }
    }

    /// True for `Result<T, E>` and for the two-variant union `Err<X> | Ok<Y>`.
    pub fn is_result_shaped(&self) -> bool {
        match self {
            TypeDescriptor::Reference { name, args } => {
                name == RESULT_TYPE_NAME && args.len() == 2
            }
            TypeDescriptor::Union(members) => {
                let mut names: Vec<&str> = members
                    .iter()
                    .filter_map(|m| match m {
                        TypeDescriptor::Reference { name, args } if args.len() == 1 => {
                            Some(name.as_str())
                        }
                        _ => None,
                    })
                    .collect();
                names.sort_unstable();
                members.len() == 2 && names == ["Err", "Ok"]
            }
            // Printed-type matching is an approximation of nominal identity.
            TypeDescriptor::Text(text) => result_type_pattern().is_match(text.trim()),
            _ => false,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => f.write_str(kind.as_str()),
            TypeDescriptor::Literal(text) => f.write_str(text),
            TypeDescriptor::Object => f.write_str("{}"),
            TypeDescriptor::Array(elem) => match elem.as_ref() {
                TypeDescriptor::Union(_) => write!(f, "({elem})[]"),
                _ => write!(f, "{elem}[]"),
            },
            TypeDescriptor::Tuple(items) => {
                f.write_str("[")?;
                write_list(f, items, ", ")?;
                f.write_str("]")
            }
            TypeDescriptor::Function => f.write_str("Function"),
            TypeDescriptor::Reference { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    write_list(f, args, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeDescriptor::Enum(name) => f.write_str(name),
            TypeDescriptor::Union(members) => write_list(f, members, " | "),
            TypeDescriptor::Text(text) => f.write_str(text),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeDescriptor], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn result_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(Result<.*, .*>|Err<\w+>\s\|\sOk<\w+>)$").expect("static pattern compiles")
    })
}

/// `sep` at nesting depth zero, outside of angle brackets, parentheses,
/// brackets and braces.
fn has_top_level(text: &str, sep: char) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth -= 1,
            c if c == sep && depth == 0 => return true,
            _ => {}
        }
    }
    false
}

fn is_printed_union(text: &str) -> bool {
    has_top_level(text, '|')
}

/// `T[K]`, but not the array type `T[]` or a tuple `[A, B]`.
fn is_indexed_access(text: &str) -> bool {
    text.ends_with(']') && !text.ends_with("[]") && !text.starts_with('[')
}

/// Type operators whose result may be primitive: `keyof T` is a union of
/// string, number and symbol keys, `T[K]` and `A & B` depend on their
/// operands, and conditional types depend on their branches.
fn is_printed_type_operator(text: &str) -> bool {
    ["keyof ", "typeof ", "unique ", "infer "]
        .iter()
        .any(|prefix| text.starts_with(prefix))
        || text.starts_with('`')
        || has_top_level(text, '&')
        || text.contains(" extends ")
        || is_indexed_access(text)
}

fn classify_printed(text: &str) -> TypeClass {
    let text = text.trim();
    if is_printed_union(text)
        || PrimitiveKind::from_keyword(text).is_some()
        || is_printed_type_operator(text)
    {
        return TypeClass::Primitive;
    }
    let literal = text.starts_with('"')
        || text.starts_with('\'')
        || text == "true"
        || text == "false"
        || text.parse::<f64>().is_ok();
    if literal || text.contains("=>") {
        TypeClass::Primitive
    } else {
        TypeClass::Structural
    }
}

/// Capability that answers static-type questions about nodes of one tree.
///
/// Implementations are bound to a single parsed file and must be read-only:
/// answering the same question twice gives the same answer.
pub trait TypeQuery {
    /// Static type of an expression node, or `None` when it cannot be decided.
    fn type_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<TypeDescriptor>;

    /// Return type of the first call signature of a call's callee.
    ///
    /// `None` when the callee is unresolved or has no call signatures.
    fn return_type_of(&self, tree: &SyntaxTree, call: NodeId) -> Option<TypeDescriptor>;

    /// Whether any type information is bound at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in used when no type service is bound to the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypeInfo;

impl TypeQuery for NoTypeInfo {
    fn type_of(&self, _tree: &SyntaxTree, _node: NodeId) -> Option<TypeDescriptor> {
        None
    }

    fn return_type_of(&self, _tree: &SyntaxTree, _call: NodeId) -> Option<TypeDescriptor> {
        None
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Whether the call's return type is Result-shaped. Unresolvable signatures
/// are "not a Result".
pub fn returns_result(types: &dyn TypeQuery, tree: &SyntaxTree, call: NodeId) -> bool {
    types
        .return_type_of(tree, call)
        .is_some_and(|ty| ty.is_result_shaped())
}
