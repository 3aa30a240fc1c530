//! Statement parsing.
//!
//! Every top-level statement dispatches on its first token. Signatures
//! (`name : T`, `Name : T`) may be followed on the next line by a matching
//! definition line, which is folded into the same statement.

use crate::{
    ast::{
        ast::{Expr, StmtWrapper, Type},
        statements::{
            DeclarationStmt, Fixity, FixityDeclStmt, ImportStmt, TypeAliasDeclStmt, TypeDefinition,
            ValueDefStmt, ValueDefinition,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{parse_binder, parse_expr},
    lookups::{BindingPower, STATEMENT_STARTS},
    parser::Parser,
    types::parse_type,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_stmt_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected(&STATEMENT_STARTS)),
    }
}

/// `import a.b.c`
pub fn parse_import_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::Import)?.span.start;
    let path = parser.expect(TokenKind::TermIdentifier)?;

    if path.value.split('.').any(|segment| segment.is_empty()) {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: path.value.clone(),
                message: String::from("module path segments must not be empty"),
            },
            path.span,
        ));
    }

    Ok(StmtWrapper::new(ImportStmt {
        path: path.value.split('.').map(String::from).collect(),
        span: Span::new(start, path.span.end),
    }))
}

fn parse_operator(parser: &mut Parser) -> Result<String, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().describe(),
            message: String::from("expected an operator symbol"),
        },
        parser.current_token().span.clone(),
    );

    if parser.current_token_kind().is_operator() {
        Ok(parser.advance().value.clone())
    } else {
        Err(error)
    }
}

/// `infixl a op b = body` and `infixr a op b = body`
pub fn parse_infix_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let keyword = parser.expect_one_of(&[TokenKind::Infixl, TokenKind::Infixr])?;
    let fixity = match keyword.kind {
        TokenKind::Infixl => Fixity::InfixL,
        _ => Fixity::InfixR,
    };

    let left = parse_binder(parser)?;
    let operator = parse_operator(parser)?;
    let right = parse_binder(parser)?;

    parser.expect(TokenKind::Assignment)?;
    parser.skip_newlines();
    let body = parse_expr(parser)?;

    Ok(StmtWrapper::new(FixityDeclStmt {
        span: Span::new(keyword.span.start, body.get_span().end.clone()),
        fixity,
        operator,
        binders: vec![left, right],
        body,
    }))
}

/// `prefix op a = body`
pub fn parse_prefix_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.expect(TokenKind::Prefix)?.span.start;
    let operator = parse_operator(parser)?;
    let operand = parse_binder(parser)?;

    parser.expect(TokenKind::Assignment)?;
    parser.skip_newlines();
    let body = parse_expr(parser)?;

    Ok(StmtWrapper::new(FixityDeclStmt {
        span: Span::new(start, body.get_span().end.clone()),
        fixity: Fixity::Prefix,
        operator,
        binders: vec![operand],
        body,
    }))
}

/// Whether the next line is `name =` with `name` of the given kind.
fn continues_with_definition(parser: &Parser, name_kind: TokenKind) -> bool {
    parser.current_token_kind().is_layout()
        && parser.peek_past_layout() == name_kind
        && parser.peek_past_layout_nth(1) == TokenKind::Assignment
}

/// `name : T` with an optional `name = term` line, or a bare `name = term`.
pub fn parse_term_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let name = parser.expect(TokenKind::TermIdentifier)?;

    match parser.current_token_kind() {
        TokenKind::Colon => {
            parser.advance();
            let ty = parse_type(parser, BindingPower::Default)?;

            let definition = if continues_with_definition(parser, TokenKind::TermIdentifier) {
                parser.skip_layout();
                let def_name = parser.expect(TokenKind::TermIdentifier)?;
                parser.expect(TokenKind::Assignment)?;
                parser.skip_newlines();
                let value = parse_expr(parser)?;
                Some(ValueDefinition {
                    span: Span::new(def_name.span.start, value.get_span().end.clone()),
                    name: def_name.value,
                    value,
                })
            } else {
                None
            };

            let end = match &definition {
                Some(def) => def.span.end.clone(),
                None => ty.get_span().end.clone(),
            };

            Ok(StmtWrapper::new(DeclarationStmt {
                span: Span::new(name.span.start, end),
                name: name.value,
                ty,
                definition,
            }))
        }
        TokenKind::Assignment => {
            parser.advance();
            parser.skip_newlines();
            let value = parse_expr(parser)?;

            Ok(StmtWrapper::new(ValueDefStmt {
                span: Span::new(name.span.start, value.get_span().end.clone()),
                name: name.value,
                value,
            }))
        }
        _ => Err(parser.unexpected(&[TokenKind::Colon, TokenKind::Assignment])),
    }
}

/// `Name : T` with an optional `Name = T` line.
pub fn parse_type_alias_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let name = parser.expect(TokenKind::TypeIdentifier)?;
    parser.expect(TokenKind::Colon)?;
    let signature = parse_type(parser, BindingPower::Default)?;

    let definition = if continues_with_definition(parser, TokenKind::TypeIdentifier) {
        parser.skip_layout();
        let def_name = parser.expect(TokenKind::TypeIdentifier)?;
        parser.expect(TokenKind::Assignment)?;
        parser.skip_newlines();
        let ty = parse_type(parser, BindingPower::Default)?;
        Some(TypeDefinition {
            span: Span::new(def_name.span.start, ty.get_span().end.clone()),
            name: def_name.value,
            ty,
        })
    } else {
        None
    };

    let end = match &definition {
        Some(def) => def.span.end.clone(),
        None => signature.get_span().end.clone(),
    };

    Ok(StmtWrapper::new(TypeAliasDeclStmt {
        span: Span::new(name.span.start, end),
        name: name.value,
        signature,
        definition,
    }))
}
