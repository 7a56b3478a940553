//! Built-in, single-file type oracle.
//!
//! Answers type questions from what one file declares: annotations, literal
//! initializers, `new` expressions, class members and function signatures.
//! Anything it cannot see (imports, globals, inference across generics) is
//! answered with `None`, which the detectors read as "inconclusive".
//!
//! A declared type counts as an object type only when the name is a class,
//! interface or object-valued alias declared in the file, or a global object
//! type such as `Date` or `Map`. Type parameters, imported names and type
//! operators such as `keyof T` or `A & B` stay unresolved.

use std::collections::{HashMap, HashSet};

use crate::ast::{Binding, FunctionFlavor, Literal, NodeId, NodeKind, Parameter, SyntaxTree};
use crate::query;
use crate::types::{PrimitiveKind, RESULT_TYPE_NAME, TypeDescriptor, TypeQuery};

/// Recursion bound for chains like `const a = b; const b = a;` and for
/// alias chains like `type A = B; type B = A;`.
const MAX_DEPTH: usize = 24;

/// Global object types that need no declaration. `Object` and the mapped
/// utility types are left out because primitives are assignable to them.
const BUILTIN_OBJECT_TYPES: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "BigInt64Array",
    "BigUint64Array",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "Float32Array",
    "Float64Array",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Map",
    "Promise",
    "RangeError",
    "ReadonlyArray",
    "ReadonlyMap",
    "ReadonlySet",
    "Record",
    "ReferenceError",
    "RegExp",
    "Set",
    "SyntaxError",
    "TypeError",
    "URIError",
    "URL",
    "URLSearchParams",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakRef",
    "WeakSet",
];

/// Where an identifier was declared.
#[derive(Debug, Clone)]
enum Declaration {
    Variable(NodeId),
    Function(NodeId),
    Class(NodeId),
    Enum(String),
    Parameter(Parameter),
}

/// Per-file oracle. Build once per [`SyntaxTree`] and only query that tree.
#[derive(Debug, Default)]
pub struct LocalTypeOracle {
    aliases: HashMap<String, TypeDescriptor>,
    classes: HashMap<String, NodeId>,
    enums: HashSet<String>,
}

fn primitive(kind: PrimitiveKind) -> TypeDescriptor {
    TypeDescriptor::Primitive(kind)
}

impl LocalTypeOracle {
    pub fn new(tree: &SyntaxTree) -> Self {
        let mut oracle = Self::default();
        for id in tree.ids() {
            match tree.kind(id) {
                NodeKind::TypeAlias { name, value } => {
                    oracle
                        .aliases
                        .entry(name.clone())
                        .or_insert_with(|| value.clone());
                }
                NodeKind::Class {
                    name: Some(name), ..
                } => {
                    oracle.classes.entry(name.clone()).or_insert(id);
                }
                NodeKind::Enum { name, .. } => {
                    oracle.enums.insert(name.clone());
                }
                _ => {}
            }
        }
        oracle
    }

    /// Resolve a declared type. Aliases other than `Result` expand
    /// transitively, enum names become [`TypeDescriptor::Enum`], and a
    /// reference to anything not declared here or built in is inconclusive.
    fn resolve_annotation(&self, ty: &TypeDescriptor, depth: usize) -> Option<TypeDescriptor> {
        if depth > MAX_DEPTH {
            return None;
        }
        match ty {
            TypeDescriptor::Reference { name, .. } if name == RESULT_TYPE_NAME => Some(ty.clone()),
            TypeDescriptor::Reference { name, .. } => {
                if let Some(value) = self.aliases.get(name) {
                    return self.resolve_annotation(value, depth + 1);
                }
                if self.classes.contains_key(name) || BUILTIN_OBJECT_TYPES.contains(&name.as_str())
                {
                    return Some(ty.clone());
                }
                if self.enums.contains(name) {
                    return Some(TypeDescriptor::Enum(name.clone()));
                }
                tracing::trace!(name = name.as_str(), "type name not declared in this file");
                None
            }
            TypeDescriptor::Text(text) => {
                tracing::trace!(text = text.as_str(), "unsupported type form");
                None
            }
            other => Some(other.clone()),
        }
    }

    fn infer(&self, tree: &SyntaxTree, node: NodeId, depth: usize) -> Option<TypeDescriptor> {
        if depth > MAX_DEPTH {
            return None;
        }
        match tree.kind(node) {
            NodeKind::Literal(lit) => Some(match lit {
                Literal::String(_) | Literal::Template => primitive(PrimitiveKind::String),
                Literal::Number(_) => primitive(PrimitiveKind::Number),
                Literal::Boolean(_) => primitive(PrimitiveKind::Boolean),
                Literal::Null => primitive(PrimitiveKind::Null),
                Literal::Undefined => primitive(PrimitiveKind::Undefined),
                Literal::Regex => TypeDescriptor::named("RegExp"),
            }),
            NodeKind::ObjectLiteral { .. } => Some(TypeDescriptor::Object),
            NodeKind::ArrayLiteral { elements } => {
                let elem = elements
                    .first()
                    .and_then(|&e| self.infer(tree, e, depth + 1))
                    .unwrap_or(primitive(PrimitiveKind::Any));
                Some(TypeDescriptor::Array(Box::new(elem)))
            }
            NodeKind::New { callee, .. } => match tree.kind(*callee) {
                NodeKind::Identifier { name } => Some(TypeDescriptor::named(name.as_str())),
                NodeKind::MemberAccess { property, .. } => {
                    Some(TypeDescriptor::named(property.as_str()))
                }
                _ => None,
            },
            NodeKind::Identifier { name } => {
                let decl = self.resolve(tree, node, name)?;
                self.declaration_type(tree, &decl, depth + 1)
            }
            NodeKind::MemberAccess { object, property } => {
                self.member_type(tree, *object, property, depth + 1)
            }
            NodeKind::Call { .. } => self.call_return(tree, node, depth + 1),
            NodeKind::Binary {
                operator,
                left,
                right,
            } => self.binary_type(tree, operator.as_str(), *left, *right, depth + 1),
            NodeKind::Unary { operator, .. } => match operator.as_str() {
                "!" | "delete" => Some(primitive(PrimitiveKind::Boolean)),
                "typeof" => Some(primitive(PrimitiveKind::String)),
                "-" | "+" | "~" => Some(primitive(PrimitiveKind::Number)),
                "void" => Some(primitive(PrimitiveKind::Undefined)),
                _ => None,
            },
            NodeKind::Conditional {
                consequent,
                alternate,
                ..
            } => {
                let a = self.infer(tree, *consequent, depth + 1)?;
                let b = self.infer(tree, *alternate, depth + 1)?;
                Some(TypeDescriptor::union([a, b]))
            }
            NodeKind::Assignment { right, .. } => self.infer(tree, *right, depth + 1),
            NodeKind::Function { .. } | NodeKind::Class { .. } => Some(TypeDescriptor::Function),
            _ => None,
        }
    }

    fn binary_type(
        &self,
        tree: &SyntaxTree,
        operator: &str,
        left: NodeId,
        right: NodeId,
        depth: usize,
    ) -> Option<TypeDescriptor> {
        match operator {
            "===" | "==" | "!==" | "!=" | "<" | ">" | "<=" | ">=" | "instanceof" | "in" => {
                Some(primitive(PrimitiveKind::Boolean))
            }
            "-" | "*" | "/" | "%" | "**" | "<<" | ">>" | ">>>" | "&" | "|" | "^" => {
                Some(primitive(PrimitiveKind::Number))
            }
            "+" => {
                let l = self.infer(tree, left, depth)?;
                let r = self.infer(tree, right, depth)?;
                let string = primitive(PrimitiveKind::String);
                let number = primitive(PrimitiveKind::Number);
                if l == string || r == string {
                    Some(string)
                } else if l == number && r == number {
                    Some(number)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Nearest visible declaration of `name`, walking outwards from `at`.
    fn resolve(&self, tree: &SyntaxTree, at: NodeId, name: &str) -> Option<Declaration> {
        for ancestor in tree.ancestors(at) {
            match tree.kind(ancestor) {
                NodeKind::Block { body } | NodeKind::Program { body } => {
                    if let Some(decl) = declared_in(tree, body, name) {
                        return Some(decl);
                    }
                }
                NodeKind::Function { params, .. } => {
                    if let Some(param) = params
                        .iter()
                        .find(|p| matches!(&p.binding, Binding::Identifier(n) if n == name))
                    {
                        return Some(Declaration::Parameter(param.clone()));
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn declaration_type(
        &self,
        tree: &SyntaxTree,
        decl: &Declaration,
        depth: usize,
    ) -> Option<TypeDescriptor> {
        match decl {
            Declaration::Variable(declarator) => match tree.kind(*declarator) {
                NodeKind::VariableDeclarator {
                    type_annotation: Some(ty),
                    ..
                } => self.resolve_annotation(ty, depth),
                NodeKind::VariableDeclarator {
                    init: Some(init), ..
                } => self.infer(tree, *init, depth),
                _ => None,
            },
            Declaration::Function(_) | Declaration::Class(_) => Some(TypeDescriptor::Function),
            // The enum object itself, not one of its members.
            Declaration::Enum(_) => None,
            Declaration::Parameter(param) => {
                let ty = match (&param.type_annotation, param.default) {
                    (Some(ann), _) => self.resolve_annotation(ann, depth)?,
                    (None, Some(default)) => self.infer(tree, default, depth)?,
                    (None, None) => return None,
                };
                if param.optional {
                    Some(TypeDescriptor::union([ty, primitive(PrimitiveKind::Undefined)]))
                } else {
                    Some(ty)
                }
            }
        }
    }

    fn member_type(
        &self,
        tree: &SyntaxTree,
        object: NodeId,
        property: &str,
        depth: usize,
    ) -> Option<TypeDescriptor> {
        if let NodeKind::Identifier { name } = tree.kind(object)
            && let Some(Declaration::Enum(enum_name)) = self.resolve(tree, object, name)
        {
            return Some(TypeDescriptor::Enum(enum_name));
        }
        let member = self.member_node(tree, object, property, depth)?;
        match tree.kind(member) {
            NodeKind::ClassField {
                type_annotation: Some(ty),
                ..
            } => self.resolve_annotation(ty, depth),
            NodeKind::ClassField {
                init: Some(init), ..
            } => self.infer(tree, *init, depth + 1),
            NodeKind::Function { .. } => Some(TypeDescriptor::Function),
            _ => None,
        }
    }

    /// Class member reached by `object.property`: static when `object` names
    /// a class, instance when `object` has a class-instance type.
    fn member_node(
        &self,
        tree: &SyntaxTree,
        object: NodeId,
        property: &str,
        depth: usize,
    ) -> Option<NodeId> {
        if let NodeKind::Identifier { name } = tree.kind(object)
            && let Some(Declaration::Class(class)) = self.resolve(tree, object, name)
        {
            return class_member(tree, class, property, true);
        }
        match self.infer(tree, object, depth)? {
            TypeDescriptor::Reference { name, .. } => {
                let class = *self.classes.get(&name)?;
                class_member(tree, class, property, false)
            }
            _ => None,
        }
    }

    fn call_return(&self, tree: &SyntaxTree, call: NodeId, depth: usize) -> Option<TypeDescriptor> {
        if depth > MAX_DEPTH {
            return None;
        }
        let NodeKind::Call { callee, .. } = tree.kind(call) else {
            return None;
        };
        let function = match tree.kind(*callee) {
            NodeKind::Identifier { name } => match self.resolve(tree, *callee, name)? {
                Declaration::Function(f) => f,
                Declaration::Variable(declarator) => match tree.kind(declarator) {
                    NodeKind::VariableDeclarator {
                        init: Some(init), ..
                    } if matches!(tree.kind(*init), NodeKind::Function { .. }) => *init,
                    _ => return None,
                },
                Declaration::Class(_) | Declaration::Enum(_) | Declaration::Parameter(_) => {
                    return None;
                }
            },
            NodeKind::MemberAccess { object, property } => {
                self.member_node(tree, *object, property, depth + 1)?
            }
            NodeKind::Function { .. } => *callee,
            _ => return None,
        };
        self.signature_return(tree, function, depth + 1)
    }

    /// Declared return type, else the type of the first returned value.
    fn signature_return(
        &self,
        tree: &SyntaxTree,
        function: NodeId,
        depth: usize,
    ) -> Option<TypeDescriptor> {
        let NodeKind::Function {
            return_type, body, ..
        } = tree.kind(function)
        else {
            return None;
        };
        if let Some(ty) = return_type {
            return self.resolve_annotation(ty, depth);
        }
        let body = (*body)?;
        match tree.kind(body) {
            NodeKind::Block { .. } => match first_return_argument(tree, body) {
                Some(arg) => self.infer(tree, arg, depth),
                None => Some(primitive(PrimitiveKind::Void)),
            },
            _ => self.infer(tree, body, depth),
        }
    }
}

fn declared_in(tree: &SyntaxTree, body: &[NodeId], name: &str) -> Option<Declaration> {
    if let Some(declarator) = query::find_binding_declarator(tree, body, name) {
        return Some(Declaration::Variable(declarator));
    }
    body.iter().find_map(|&stmt| match tree.kind(stmt) {
        NodeKind::Function {
            name: Some(n),
            flavor: FunctionFlavor::Declaration,
            ..
        } if n == name => Some(Declaration::Function(stmt)),
        NodeKind::Class { name: Some(n), .. } if n == name => Some(Declaration::Class(stmt)),
        NodeKind::Enum { name: n, .. } if n == name => Some(Declaration::Enum(n.clone())),
        _ => None,
    })
}

fn class_member(tree: &SyntaxTree, class: NodeId, property: &str, want_static: bool) -> Option<NodeId> {
    let NodeKind::Class { members, .. } = tree.kind(class) else {
        return None;
    };
    members.iter().copied().find(|&m| match tree.kind(m) {
        NodeKind::ClassField {
            name, is_static, ..
        } => name == property && *is_static == want_static,
        NodeKind::Function {
            name: Some(name),
            is_static,
            flavor: FunctionFlavor::Method,
            ..
        } => name == property && *is_static == want_static,
        _ => false,
    })
}

/// First `return <expr>` in a function body in source order, not descending
/// into nested functions or classes.
fn first_return_argument(tree: &SyntaxTree, body: NodeId) -> Option<NodeId> {
    let mut stack: Vec<NodeId> = tree.kind(body).children().into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        match tree.kind(node) {
            NodeKind::ReturnStatement {
                argument: Some(arg),
            } => return Some(*arg),
            NodeKind::Function { .. } | NodeKind::Class { .. } => {}
            kind => stack.extend(kind.children().into_iter().rev()),
        }
    }
    None
}

impl TypeQuery for LocalTypeOracle {
    fn type_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<TypeDescriptor> {
        self.infer(tree, node, 0)
    }

    fn return_type_of(&self, tree: &SyntaxTree, call: NodeId) -> Option<TypeDescriptor> {
        self.call_return(tree, call, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn setup(src: &str) -> (SyntaxTree, LocalTypeOracle) {
        let tree = parse_source(src).expect("parse");
        let oracle = LocalTypeOracle::new(&tree);
        (tree, oracle)
    }

    /// Operands of the last equality comparison in the file.
    fn last_comparison(tree: &SyntaxTree) -> (NodeId, NodeId) {
        tree.ids()
            .filter_map(|id| match tree.kind(id) {
                NodeKind::Binary {
                    operator,
                    left,
                    right,
                } if operator.is_equality() => Some((*left, *right)),
                _ => None,
            })
            .last()
            .expect("comparison")
    }

    fn call_named(tree: &SyntaxTree, name: &str) -> NodeId {
        tree.ids()
            .find(|&id| match tree.kind(id) {
                NodeKind::Call { callee, .. } => match tree.kind(*callee) {
                    NodeKind::Identifier { name: n } => n == name,
                    NodeKind::MemberAccess { property, .. } => property == name,
                    _ => false,
                },
                _ => false,
            })
            .expect("call")
    }

    fn show(ty: Option<TypeDescriptor>) -> String {
        ty.map(|t| t.to_string()).unwrap_or_else(|| "?".into())
    }

    #[test]
    fn literals_and_initializers() {
        let (tree, oracle) = setup("const a = {}; const b = [1]; if (a === b) {}");
        let (l, r) = last_comparison(&tree);
        assert_eq!(show(oracle.type_of(&tree, l)), "{}");
        assert_eq!(show(oracle.type_of(&tree, r)), "number[]");
    }

    #[test]
    fn annotations_win_over_initializers() {
        let (tree, oracle) =
            setup("class Asset {}\nlet asset: Asset | null = null;\nif (asset === null) {}");
        let (l, r) = last_comparison(&tree);
        assert_eq!(show(oracle.type_of(&tree, l)), "Asset | null");
        assert_eq!(show(oracle.type_of(&tree, r)), "null");
    }

    #[test]
    fn resolves_through_nearest_scope() {
        let src = r#"
const a = 1;
function f() {
  const a = {};
  return a === a;
}
const c = a === a;
"#;
        let (tree, oracle) = setup(src);
        let comparisons: Vec<_> = tree
            .ids()
            .filter_map(|id| match tree.kind(id) {
                NodeKind::Binary { left, .. } => Some(*left),
                _ => None,
            })
            .collect();
        assert_eq!(show(oracle.type_of(&tree, comparisons[0])), "{}");
        assert_eq!(show(oracle.type_of(&tree, comparisons[1])), "number");
    }

    #[test]
    fn class_members_and_static_factories() {
        let src = r#"
class Asset {
  public id: string
  constructor(id: string) { this.id = id }
  static init(id: string) { return new Asset(id) }
}
const a = new Asset('1');
const b = Asset.init('2');
const c = a.id === b ? 1 : 0;
"#;
        let (tree, oracle) = setup(src);
        let (l, r) = last_comparison(&tree);
        assert_eq!(show(oracle.type_of(&tree, l)), "string");
        assert_eq!(show(oracle.type_of(&tree, r)), "Asset");
    }

    #[test]
    fn call_returns_follow_declared_signatures() {
        let src = r#"
type Ok<T> = { type: "ok"; value: T };
type Err<E> = { type: "err"; error: E };
function getResult(foo?: number): Result<number, string> { return Result.ok(1) }
function either(): Ok<number> | Err<string> { return { type: "ok", value: 1 } }
const arrow = (): number => 2;
function inferred() { return [1, 2] }
getResult(); either(); arrow(); inferred(); unknownThing();
"#;
        let (tree, oracle) = setup(src);
        let ret = |name| show(oracle.return_type_of(&tree, call_named(&tree, name)));
        assert_eq!(ret("getResult"), "Result<number, string>");
        assert_eq!(ret("either"), "Ok<number> | Err<string>");
        assert_eq!(ret("arrow"), "number");
        assert_eq!(ret("inferred"), "number[]");
        assert_eq!(ret("unknownThing"), "?");
    }

    #[test]
    fn aliases_expand_transitively_except_result() {
        let src = r#"
type Name = Id;
type Id = string;
type Result<T, E> = { type: "ok" } | { type: "err" };
let id: Name = "x";
let r: Result<number, string>;
id === r;
"#;
        let (tree, oracle) = setup(src);
        let (l, r) = last_comparison(&tree);
        assert_eq!(show(oracle.type_of(&tree, l)), "string");
        assert_eq!(show(oracle.type_of(&tree, r)), "Result<number, string>");
    }

    #[test]
    fn optional_parameters_include_undefined() {
        let (tree, oracle) =
            setup("class Asset {}\nfunction f(x?: Asset, y: number) { return x === y }");
        let (l, r) = last_comparison(&tree);
        assert_eq!(show(oracle.type_of(&tree, l)), "Asset | undefined");
        assert_eq!(show(oracle.type_of(&tree, r)), "number");
    }

    #[test]
    fn type_parameters_are_inconclusive() {
        let (tree, oracle) = setup("function eq<T>(a: T, b: T) { return a === b }");
        let (l, r) = last_comparison(&tree);
        assert_eq!(oracle.type_of(&tree, l), None);
        assert_eq!(oracle.type_of(&tree, r), None);
    }

    #[test]
    fn imported_names_are_inconclusive() {
        let src = r#"
import type { UserId } from "./ids";
function same(a: UserId, b: UserId) { return a === b }
"#;
        let (tree, oracle) = setup(src);
        let (l, _) = last_comparison(&tree);
        assert_eq!(oracle.type_of(&tree, l), None);
    }

    #[test]
    fn enum_values_are_primitive() {
        let src = r#"
enum Color { Red, Blue }
function f(a: Color, b: Color) { return a === b }
const c = Color.Red;
c === Color.Blue;
"#;
        let (tree, oracle) = setup(src);
        let (l, r) = last_comparison(&tree);
        for side in [l, r] {
            let ty = oracle.type_of(&tree, side).expect("enum type");
            assert_eq!(ty, TypeDescriptor::Enum("Color".into()));
            assert!(ty.is_primitive());
        }
        let first = tree
            .ids()
            .find_map(|id| match tree.kind(id) {
                NodeKind::Binary { operator, left, .. } if operator.is_equality() => Some(*left),
                _ => None,
            })
            .expect("comparison");
        assert_eq!(show(oracle.type_of(&tree, first)), "Color");
    }

    #[test]
    fn type_operators_are_inconclusive() {
        for annotation in ["keyof O", "O[\"a\"]", "O & { b: 2 }", "typeof o"] {
            let src = format!(
                "type O = {{ a: 1 }};\nconst o: O = {{ a: 1 }};\nfunction f(x: {annotation}, y: O) {{ return x === y }}"
            );
            let (tree, oracle) = setup(&src);
            let (l, r) = last_comparison(&tree);
            assert_eq!(oracle.type_of(&tree, l), None, "{annotation}");
            assert_eq!(show(oracle.type_of(&tree, r)), "{}");
        }
    }

    #[test]
    fn interfaces_and_global_object_types_are_objects() {
        let src = r#"
interface Point { x: number }
function f(d: Date, p: Point, m: Map<string, number>) { return d === p || m === d }
"#;
        let (tree, oracle) = setup(src);
        let (l, r) = last_comparison(&tree);
        assert_eq!(show(oracle.type_of(&tree, l)), "Map<string, number>");
        assert_eq!(show(oracle.type_of(&tree, r)), "Date");
        let point = tree
            .ids()
            .find(|&id| tree.identifier_name(id) == Some("p"))
            .expect("p");
        let ty = oracle.type_of(&tree, point).expect("interface type");
        assert_eq!(ty, TypeDescriptor::Object);
        assert!(ty.is_structural());
    }

    #[test]
    fn alias_cycles_are_inconclusive() {
        let (tree, oracle) = setup("type A = B;\ntype B = A;\nlet a: A;\na === a;");
        let (l, _) = last_comparison(&tree);
        assert_eq!(oracle.type_of(&tree, l), None);
    }

    #[test]
    fn parameter_defaults_supply_the_type() {
        let src = r#"
const a = {};
function g(flag = a === {}, n = 1, s: string = "x") { return flag === n || s === s }
"#;
        let (tree, oracle) = setup(src);
        let comparisons: Vec<_> = tree
            .ids()
            .filter_map(|id| match tree.kind(id) {
                NodeKind::Binary {
                    operator,
                    left,
                    right,
                } if operator.is_equality() => Some((*left, *right)),
                _ => None,
            })
            .collect();
        assert_eq!(comparisons.len(), 3);
        let (default_left, default_right) = comparisons[0];
        assert_eq!(show(oracle.type_of(&tree, default_left)), "{}");
        assert_eq!(show(oracle.type_of(&tree, default_right)), "{}");
        let (flag, n) = comparisons[1];
        assert_eq!(show(oracle.type_of(&tree, flag)), "boolean");
        assert_eq!(show(oracle.type_of(&tree, n)), "number");
        assert_eq!(show(oracle.type_of(&tree, comparisons[2].0)), "string");
    }

    #[test]
    fn returns_are_found_after_long_chains() {
        let terms = ["1"; 5000].join(" + ");
        let src = format!("function f() {{\n  const n = {terms};\n  if (n) {{ return [1] }}\n}}\nf();");
        let (tree, oracle) = setup(&src);
        let call = tree
            .ids()
            .filter(|&id| matches!(tree.kind(id), NodeKind::Call { .. }))
            .last()
            .expect("call");
        assert_eq!(show(oracle.return_type_of(&tree, call)), "number[]");
    }

    #[test]
    fn self_referential_initializers_are_inconclusive() {
        let (tree, oracle) = setup("var a = b; var b = a; a === b;");
        let (l, _) = last_comparison(&tree);
        assert_eq!(oracle.type_of(&tree, l), None);
    }
}
