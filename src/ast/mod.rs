/// Tree module
/// Contains all definitions related to the parse tree structure
///
/// Submodules:
/// - ast: Core node traits, wrappers and discriminant tags
/// - dump: JSON span helpers, s-expression rendering and literal quoting
/// - expressions: Definitions for term expression nodes
/// - statements: Definitions for top-level statement nodes
/// - types: Definitions for type expression nodes
pub mod ast;
pub mod dump;
pub mod expressions;
pub mod statements;
pub mod types;
