use std::fmt::{Display, Write};

use super::types::{ExpType, Operator};

/// Maximum number of child slots any node kind uses (`If`).
pub const MAX_CHILDREN: usize = 3;

/// Stable handle to a node inside an [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One case per statement and expression form, each carrying only its own
/// children and attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Statements
    If {
        test: NodeId,
        then_part: NodeId,
        else_part: Option<NodeId>,
    },
    Repeat {
        body: NodeId,
        test: NodeId,
    },
    Assign {
        name: String,
        value: NodeId,
    },
    Read {
        name: String,
    },
    Write {
        value: NodeId,
    },

    // Expressions
    Op {
        op: Operator,
        lhs: NodeId,
        rhs: NodeId,
    },
    Const {
        value: i32,
    },
    Id {
        name: String,
    },
}

impl NodeKind {
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Op { .. } | NodeKind::Const { .. } | NodeKind::Id { .. }
        )
    }

    pub fn is_statement(&self) -> bool {
        !self.is_expression()
    }

    /// Child slots in order. Slots past the kind's arity are always `None`.
    pub fn children(&self) -> [Option<NodeId>; MAX_CHILDREN] {
        match self {
            NodeKind::If {
                test,
                then_part,
                else_part,
            } => [Some(*test), Some(*then_part), *else_part],
            NodeKind::Repeat { body, test } => [Some(*body), Some(*test), None],
            NodeKind::Assign { value, .. } | NodeKind::Write { value } => [Some(*value), None, None],
            NodeKind::Op { lhs, rhs, .. } => [Some(*lhs), Some(*rhs), None],
            NodeKind::Read { .. } | NodeKind::Const { .. } | NodeKind::Id { .. } => {
                [None, None, None]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub line: u32,
    pub sibling: Option<NodeId>,
    exp_type: ExpType,
}

impl Node {
    pub fn exp_type(&self) -> ExpType {
        self.exp_type
    }
}

/// Arena-backed syntax tree.
///
/// Nodes are only ever appended, and a node's children must already exist
/// when it is created, so child links always point at earlier nodes and the
/// tree cannot contain cycles through them. Sibling links are checked when
/// they are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First statement of the program.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.expect_statement(root);
        self.root = Some(root);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn exp_type(&self, id: NodeId) -> ExpType {
        self.nodes[id.0].exp_type
    }

    pub fn set_exp_type(&mut self, id: NodeId, exp_type: ExpType) {
        let node = &mut self.nodes[id.0];
        assert!(
            node.kind.is_expression(),
            "type annotation on statement node {:?} (line {})",
            id,
            node.line
        );
        node.exp_type = exp_type;
    }

    pub fn new_if(
        &mut self,
        line: u32,
        test: NodeId,
        then_part: NodeId,
        else_part: Option<NodeId>,
    ) -> NodeId {
        self.expect_expression(test);
        self.expect_statement(then_part);
        if let Some(else_part) = else_part {
            self.expect_statement(else_part);
        }
        self.push(
            NodeKind::If {
                test,
                then_part,
                else_part,
            },
            line,
        )
    }

    pub fn new_repeat(&mut self, line: u32, body: NodeId, test: NodeId) -> NodeId {
        self.expect_statement(body);
        self.expect_expression(test);
        self.push(NodeKind::Repeat { body, test }, line)
    }

    pub fn new_assign(&mut self, line: u32, name: String, value: NodeId) -> NodeId {
        self.expect_expression(value);
        self.push(NodeKind::Assign { name, value }, line)
    }

    pub fn new_read(&mut self, line: u32, name: String) -> NodeId {
        self.push(NodeKind::Read { name }, line)
    }

    pub fn new_write(&mut self, line: u32, value: NodeId) -> NodeId {
        self.expect_expression(value);
        self.push(NodeKind::Write { value }, line)
    }

    pub fn new_op(&mut self, line: u32, op: Operator, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.expect_expression(lhs);
        self.expect_expression(rhs);
        self.push(NodeKind::Op { op, lhs, rhs }, line)
    }

    pub fn new_const(&mut self, line: u32, value: i32) -> NodeId {
        self.push(NodeKind::Const { value }, line)
    }

    pub fn new_id(&mut self, line: u32, name: String) -> NodeId {
        self.push(NodeKind::Id { name }, line)
    }

    /// Links `next` directly after `prev` in a statement sequence.
    pub fn set_sibling(&mut self, prev: NodeId, next: NodeId) {
        self.expect_statement(prev);
        self.expect_statement(next);
        assert!(
            self.siblings(next).all(|id| id != prev),
            "sibling link {:?} -> {:?} would form a cycle",
            prev,
            next
        );
        self.nodes[prev.0].sibling = Some(next);
    }

    /// Appends `stmt` to the end of the sequence starting at `head`.
    pub fn append_sibling(&mut self, head: NodeId, stmt: NodeId) {
        let tail = self.siblings(head).last().unwrap_or(head);
        self.set_sibling(tail, stmt);
    }

    /// Iterates a sequence from `head` along its sibling links.
    pub fn siblings(&self, head: NodeId) -> Siblings<'_> {
        Siblings {
            ast: self,
            next: Some(head),
        }
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        self.nodes[id.0].kind.children().into_iter().flatten()
    }

    fn push(&mut self, kind: NodeKind, line: u32) -> NodeId {
        self.nodes.push(Node {
            kind,
            line,
            sibling: None,
            exp_type: ExpType::Void,
        });
        NodeId(self.nodes.len() - 1)
    }

    fn expect_expression(&self, id: NodeId) {
        let node = self
            .get(id)
            .unwrap_or_else(|| panic!("malformed tree: no node {:?}", id));
        assert!(
            node.kind.is_expression(),
            "malformed tree: expected an expression at line {}, found {:?}",
            node.line,
            node.kind
        );
    }

    fn expect_statement(&self, id: NodeId) {
        let node = self
            .get(id)
            .unwrap_or_else(|| panic!("malformed tree: no node {:?}", id));
        assert!(
            node.kind.is_statement(),
            "malformed tree: expected a statement at line {}, found {:?}",
            node.line,
            node.kind
        );
    }

    fn print_tree(&self, out: &mut String, head: NodeId, indent: usize) -> std::fmt::Result {
        for id in self.siblings(head) {
            let node = self.node(id);
            write!(out, "{:indent$}", "", indent = indent)?;
            match &node.kind {
                NodeKind::If { .. } => writeln!(out, "If")?,
                NodeKind::Repeat { .. } => writeln!(out, "Repeat")?,
                NodeKind::Assign { name, .. } => writeln!(out, "Assign to: {}", name)?,
                NodeKind::Read { name } => writeln!(out, "Read: {}", name)?,
                NodeKind::Write { .. } => writeln!(out, "Write")?,
                NodeKind::Op { op, .. } => writeln!(out, "Op: {}", op)?,
                NodeKind::Const { value } => writeln!(out, "Const: {}", value)?,
                NodeKind::Id { name } => writeln!(out, "Id: {}", name)?,
            }
            for child in self.children(id) {
                self.print_tree(out, child, indent + 2)?;
            }
        }
        Ok(())
    }
}

/// Listing of the tree in the classic indented form, two spaces per level.
impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.print_tree(&mut out, root, 0)?;
        }
        f.write_str(&out)
    }
}

pub struct Siblings<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.ast.node(current).sibling;
        Some(current)
    }
}
