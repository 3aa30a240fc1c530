//! Error types and error handling for the parser.
//!
//! This module defines the error types produced while lexing and parsing:
//!
//! - Error structures with source span information
//! - Specific error variants for lexical and syntactic failures
//! - Error classes used to decide how far a failure propagates
//! - Helpful error messages and suggestions

pub mod errors;
