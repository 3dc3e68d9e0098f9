use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        types::ExpType,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::symbol_table::SymbolTable;

/// Outcome of analyzing one program.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub symbols: SymbolTable,
    /// Type errors in traversal order.
    pub diagnostics: Vec<Error>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Hands the symbol table over for code generation, but only when the
    /// analysis produced no diagnostics.
    pub fn into_symbols(self) -> Result<SymbolTable, Vec<Error>> {
        if self.diagnostics.is_empty() {
            Ok(self.symbols)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// Walks the tree once, binding names on the way down and synthesizing
/// expression types on the way up.
pub struct Analyzer<'a> {
    ast: &'a mut Ast,
    symbols: SymbolTable,
    diagnostics: Vec<Error>,
    file: Rc<String>,
}

impl<'a> Analyzer<'a> {
    pub fn new(ast: &'a mut Ast, file: Rc<String>) -> Self {
        Analyzer {
            ast,
            symbols: SymbolTable::new(),
            diagnostics: vec![],
            file,
        }
    }

    /// Runs the pass over the whole program and returns its results.
    pub fn run(mut self) -> Analysis {
        if let Some(root) = self.ast.root() {
            self.visit_sequence(root);
        }

        debug!(
            symbols = self.symbols.len(),
            diagnostics = self.diagnostics.len(),
            "analysis finished"
        );

        Analysis {
            symbols: self.symbols,
            diagnostics: self.diagnostics,
        }
    }

    fn visit_sequence(&mut self, head: NodeId) {
        let mut next = Some(head);
        while let Some(id) = next {
            self.visit(id);
            next = self.ast.node(id).sibling;
        }
    }

    fn visit(&mut self, id: NodeId) {
        self.bind(id);

        let children = self.ast.node(id).kind.children();
        for child in children.into_iter().flatten() {
            self.visit_sequence(child);
        }

        self.check(id);
    }

    /// Pre-visit: every name occurrence goes through the symbol table.
    fn bind(&mut self, id: NodeId) {
        let node = self.ast.node(id);
        match &node.kind {
            NodeKind::Assign { name, .. } | NodeKind::Read { name } | NodeKind::Id { name } => {
                self.symbols.resolve(name, node.line);
            }
            _ => {}
        }
    }

    /// Post-visit: children are already typed, so the node can be checked.
    fn check(&mut self, id: NodeId) {
        let line = self.ast.node(id).line;

        match self.ast.node(id).kind {
            NodeKind::Op { op, lhs, rhs } => {
                if self.ast.exp_type(lhs) != ExpType::Integer
                    || self.ast.exp_type(rhs) != ExpType::Integer
                {
                    self.type_error(ErrorImpl::OpAppliedToNonInteger, line);
                }
                // Typed even on error so enclosing nodes are checked normally
                self.ast.set_exp_type(id, op.result_type());
            }
            NodeKind::Const { .. } | NodeKind::Id { .. } => {
                self.ast.set_exp_type(id, ExpType::Integer);
            }
            NodeKind::If { test, .. } => {
                if self.ast.exp_type(test) != ExpType::Boolean {
                    self.type_error(ErrorImpl::IfTestNotBoolean, line);
                }
            }
            NodeKind::Repeat { test, .. } => {
                if self.ast.exp_type(test) != ExpType::Boolean {
                    self.type_error(ErrorImpl::RepeatTestNotBoolean, line);
                }
            }
            NodeKind::Assign { value, .. } => {
                if self.ast.exp_type(value) != ExpType::Integer {
                    self.type_error(ErrorImpl::AssignmentOfNonInteger, line);
                }
            }
            NodeKind::Write { value } => {
                if self.ast.exp_type(value) != ExpType::Integer {
                    self.type_error(ErrorImpl::WriteOfNonInteger, line);
                }
            }
            NodeKind::Read { .. } => {}
        }
    }

    fn type_error(&mut self, error: ErrorImpl, line: u32) {
        let error = Error::new(error, Position(line, Rc::clone(&self.file)));
        debug!("type error at {}", error);
        self.diagnostics.push(error);
    }
}

/// Builds the symbol table for `ast` and annotates its expressions in place.
///
/// # Arguments
///
/// * `ast` - A parsed tree; its type annotations are overwritten
/// * `file` - File name attached to diagnostics
///
/// # Returns
///
/// The symbol table and every type error found, in traversal order.
pub fn analyze(ast: &mut Ast, file: Rc<String>) -> Analysis {
    Analyzer::new(ast, file).run()
}
