//! Arena-backed syntax tree for one TypeScript file.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. Every
//! node records its syntactic parent, assigned once while lowering, so
//! ancestor walks are plain index lookups and no node owns its parent.
//! Parentheses are dropped during lowering, the way ESTree does.

use crate::diagnostics::Span;
use crate::types::TypeDescriptor;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionFlavor {
    Declaration,
    Expression,
    Arrow,
    Method,
}

/// Comparison and arithmetic operators. Only the equality family is
/// distinguished; everything else keeps its spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    StrictEq,
    LooseEq,
    StrictNe,
    LooseNe,
    Other(String),
}

impl BinaryOp {
    pub fn from_token(token: &str) -> Self {
        match token {
            "===" => BinaryOp::StrictEq,
            "==" => BinaryOp::LooseEq,
            "!==" => BinaryOp::StrictNe,
            "!=" => BinaryOp::LooseNe,
            other => BinaryOp::Other(other.to_string()),
        }
    }

    pub fn is_equality(&self) -> bool {
        !matches!(self, BinaryOp::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            BinaryOp::StrictEq => "===",
            BinaryOp::LooseEq => "==",
            BinaryOp::StrictNe => "!==",
            BinaryOp::LooseNe => "!=",
            BinaryOp::Other(op) => op,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String contents without quotes.
    String(String),
    Number(String),
    Boolean(bool),
    Null,
    Undefined,
    Template,
    Regex,
}

/// Target of a variable declarator or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Identifier(String),
    /// Object or array destructuring; never resolved to a single name.
    Pattern,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub binding: Binding,
    pub type_annotation: Option<TypeDescriptor>,
    pub optional: bool,
    /// Default value expression, evaluated in the function's scope.
    pub default: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },
    Block {
        body: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    VariableDeclaration {
        kind: DeclarationKind,
        declarators: Vec<NodeId>,
    },
    VariableDeclarator {
        binding: Binding,
        type_annotation: Option<TypeDescriptor>,
        init: Option<NodeId>,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    Function {
        name: Option<String>,
        flavor: FunctionFlavor,
        is_static: bool,
        params: Vec<Parameter>,
        return_type: Option<TypeDescriptor>,
        /// A `Block` for statement bodies, any expression for concise arrows.
        body: Option<NodeId>,
    },
    Class {
        name: Option<String>,
        members: Vec<NodeId>,
    },
    ClassField {
        name: String,
        is_static: bool,
        type_annotation: Option<TypeDescriptor>,
        init: Option<NodeId>,
    },
    /// `type` alias or `interface`; interfaces lower to an object value.
    TypeAlias {
        name: String,
        value: TypeDescriptor,
    },
    Enum {
        name: String,
        members: Vec<NodeId>,
    },
    Identifier {
        name: String,
    },
    This,
    MemberAccess {
        object: NodeId,
        property: String,
    },
    Binary {
        operator: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Unary {
        operator: String,
        argument: NodeId,
    },
    Conditional {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    Call {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    New {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    Assignment {
        left: NodeId,
        right: NodeId,
    },
    Literal(Literal),
    ObjectLiteral {
        children: Vec<NodeId>,
    },
    ArrayLiteral {
        elements: Vec<NodeId>,
    },
    /// Any construct the detectors never inspect directly. Children are still
    /// lowered so calls and comparisons nested inside are visited.
    Other {
        label: String,
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    pub fn label(&self) -> &str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "Block",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::Function { .. } => "Function",
            NodeKind::Class { .. } => "Class",
            NodeKind::ClassField { .. } => "ClassField",
            NodeKind::TypeAlias { .. } => "TypeAlias",
            NodeKind::Enum { .. } => "Enum",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::This => "This",
            NodeKind::MemberAccess { .. } => "MemberAccess",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Conditional { .. } => "Conditional",
            NodeKind::Call { .. } => "Call",
            NodeKind::New { .. } => "New",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::Literal(_) => "Literal",
            NodeKind::ObjectLiteral { .. } => "ObjectLiteral",
            NodeKind::ArrayLiteral { .. } => "ArrayLiteral",
            NodeKind::Other { label, .. } => label,
        }
    }

    /// Child nodes in source order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Program { body } | NodeKind::Block { body } => body.clone(),
            NodeKind::ExpressionStatement { expression } => vec![*expression],
            NodeKind::VariableDeclaration { declarators, .. } => declarators.clone(),
            NodeKind::VariableDeclarator { init, .. } | NodeKind::ClassField { init, .. } => {
                init.iter().copied().collect()
            }
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                let mut out = vec![*test, *consequent];
                out.extend(alternate.iter().copied());
                out
            }
            NodeKind::ReturnStatement { argument } => argument.iter().copied().collect(),
            NodeKind::Function { params, body, .. } => params
                .iter()
                .filter_map(|p| p.default)
                .chain(body.iter().copied())
                .collect(),
            NodeKind::Class { members, .. } | NodeKind::Enum { members, .. } => members.clone(),
            NodeKind::MemberAccess { object, .. } => vec![*object],
            NodeKind::Binary { left, right, .. } | NodeKind::Assignment { left, right } => {
                vec![*left, *right]
            }
            NodeKind::Unary { argument, .. } => vec![*argument],
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => vec![*test, *consequent, *alternate],
            NodeKind::Call { callee, arguments } | NodeKind::New { callee, arguments } => {
                let mut out = vec![*callee];
                out.extend(arguments.iter().copied());
                out
            }
            NodeKind::ObjectLiteral { children }
            | NodeKind::ArrayLiteral { elements: children }
            | NodeKind::Other { children, .. } => children.clone(),
            NodeKind::TypeAlias { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::This
            | NodeKind::Literal(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

/// Immutable tree for one file. Built by [`crate::parser`] or [`TreeBuilder`].
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&cur| self.parent(cur))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn string_literal(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Literal(Literal::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Indented outline of the tree, used by `dump_ast` and tests.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            let detail = match &node.kind {
                NodeKind::Identifier { name } => format!(" {name}"),
                NodeKind::MemberAccess { property, .. } => format!(" .{property}"),
                NodeKind::Binary { operator, .. } => format!(" {}", operator.as_str()),
                NodeKind::Literal(Literal::String(s)) => format!(" {s:?}"),
                NodeKind::Literal(lit) => format!(" {lit:?}"),
                NodeKind::VariableDeclarator {
                    binding: Binding::Identifier(name),
                    ..
                } => format!(" {name}"),
                NodeKind::Function { name: Some(name), .. }
                | NodeKind::Class { name: Some(name), .. }
                | NodeKind::Enum { name, .. }
                | NodeKind::TypeAlias { name, .. } => format!(" {name}"),
                _ => String::new(),
            };
            out.push_str(&format!(
                "{}{}{} @{}:{}\n",
                "  ".repeat(depth),
                node.kind.label(),
                detail,
                node.span.start.row,
                node.span.start.column
            ));
            // Reversed so the first child is printed first.
            for child in node.kind.children().into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

/// Bottom-up builder: children are pushed before their parents, and
/// `finish` assigns every parent link from the recorded child lists.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    pub fn finish(mut self, root: NodeId) -> SyntaxTree {
        for index in 0..self.nodes.len() {
            let parent = NodeId(index as u32);
            for child in self.nodes[index].kind.children() {
                self.nodes[child.index()].parent = Some(parent);
            }
        }
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}
