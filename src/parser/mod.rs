//! Parser module for building the syntax tree.
//!
//! This module turns the token stream of one file into a `ModuleStmt`. It
//! handles:
//!
//! - Statement splitting on newlines, with per-statement error recovery
//! - Type parsing over the Forall / arrow / sum / primary ladder
//! - Term parsing: keyword-led forms, flat infix chains and application
//! - Deciding whether each application argument is a type or a term
//!
//! Handlers are registered by token kind in lookup tables on the `Parser`,
//! and types use NUD/LED handlers with binding powers for precedence.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
