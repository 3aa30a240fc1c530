//! Lexical analysis module for the parser.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Escape decoding for char and string literals
//! - Newline and comment tokens, kept for the statement splitter

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
