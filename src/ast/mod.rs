/// AST (Abstract Syntax Tree) module
/// Contains the tree shared by every compiler phase
///
/// Submodules:
/// - ast: The node arena, node kinds, and traversal helpers
/// - types: Expression type annotations and binary operators
pub mod ast;
pub mod types;

#[cfg(test)]
mod tests;
