//! Dispatch and precedence tables.
//!
//! Statements dispatch on their first token, keyword-led term forms dispatch
//! on their keyword, and term primaries dispatch on their first token. Types
//! use a Pratt loop over the `BindingPower` ladder registered in
//! `types::create_token_type_lookups`.

use std::collections::HashMap;

use crate::{
    ast::ast::{ExprWrapper, StmtWrapper},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Type-level precedence ladder, loosest first.
///
/// `Arrow` is right associative, `Sum` left associative and tighter than
/// `Arrow`. Constructor application sits above both and is resolved by
/// position inside the identifier primary rather than through the table.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Arrow,
    Sum,
    Application,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<StmtWrapper, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<ExprWrapper, Error>;

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

/// First tokens of a type that may stand as an application argument.
///
/// Only the non-greedy type primaries qualify: a bare identifier or hole, or
/// a bracketed form. Constructor application is excluded, so `f List Int xs`
/// passes `List` and `Int` as two separate arguments.
pub const TYPE_ARGUMENT_STARTS: [TokenKind; 2] = [TokenKind::TypeIdentifier, TokenKind::Hole];

/// Tokens that, once reached after any run of `(`/`[`, show the bracketed
/// form is a type. Terms never begin with any of them.
pub const TYPE_MARKERS: [TokenKind; 3] =
    [TokenKind::TypeIdentifier, TokenKind::Hole, TokenKind::Forall];

/// Tokens that may begin a top-level statement.
pub const STATEMENT_STARTS: [TokenKind; 6] = [
    TokenKind::Import,
    TokenKind::Infixl,
    TokenKind::Infixr,
    TokenKind::Prefix,
    TokenKind::TermIdentifier,
    TokenKind::TypeIdentifier,
];

pub fn create_token_lookups(parser: &mut Parser) {
    // Keyword-led forms
    parser.form(TokenKind::If, parse_if_expr);
    parser.form(TokenKind::Let, parse_let_expr);
    parser.form(TokenKind::Fun, parse_fun_expr);
    parser.form(TokenKind::Case, parse_case_expr);
    parser.form(TokenKind::Lcase, parse_lcase_expr);

    // Literals and symbols
    parser.nud(TokenKind::Integer, parse_integer_expr);
    parser.nud(TokenKind::True, parse_boolean_expr);
    parser.nud(TokenKind::False, parse_boolean_expr);
    parser.nud(TokenKind::TermIdentifier, parse_identifier_expr);
    parser.nud(TokenKind::Char, parse_char_expr);
    parser.nud(TokenKind::String, parse_string_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_literal_expr);

    // Fixed-arity builtins
    parser.nud(TokenKind::Inl, parse_injection_expr);
    parser.nud(TokenKind::Inr, parse_injection_expr);
    parser.nud(TokenKind::Nil, parse_nil_expr);
    parser.nud(TokenKind::Readline, parse_io_primitive_expr);
    parser.nud(TokenKind::Print, parse_io_primitive_expr);
    parser.nud(TokenKind::Pure, parse_io_primitive_expr);
    parser.nud(TokenKind::Bind, parse_io_primitive_expr);
    parser.nud(TokenKind::Panic, parse_io_primitive_expr);
    parser.nud(TokenKind::Trace, parse_io_primitive_expr);

    // Statements
    parser.stmt(TokenKind::Import, parse_import_stmt);
    parser.stmt(TokenKind::Infixl, parse_infix_decl_stmt);
    parser.stmt(TokenKind::Infixr, parse_infix_decl_stmt);
    parser.stmt(TokenKind::Prefix, parse_prefix_decl_stmt);
    parser.stmt(TokenKind::TermIdentifier, parse_term_stmt);
    parser.stmt(TokenKind::TypeIdentifier, parse_type_alias_stmt);
}
