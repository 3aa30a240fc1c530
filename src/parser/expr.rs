//! Term parsing.
//!
//! A term is either a keyword-led form (`if`, `let`, `fun`, `case`,
//! `lcase`), which extends as far right as possible, or an infix chain.
//! Chains are flat: `a op b op c` keeps its operators in order and
//! precedence is left to a later pass. Chain operands are applications of a
//! term primary to zero or more arguments, where each argument is decided
//! to be a type or a term before it is parsed.

use crate::{
    ast::{
        ast::{Expr, ExprWrapper, Type},
        expressions::{
            ApplicationExpr, Binder, BooleanExpr, CaseArm, CaseExpr, CharExpr, FunTermExpr, FunTypeExpr,
            IOPrimitive, IOPrimitiveExpr, IdentifierExpr, IfExpr, InfixChainExpr, InjectionExpr, InjectionTag,
            IntegerExpr, LCaseExpr, LetExpr, ListArm, ListLiteralExpr, ListPattern, NilExpr, PairExpr,
            ParensExpr, PrefixExpr, StringExpr, TypeArgExpr, UnitExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{BindingPower, TYPE_ARGUMENT_STARTS, TYPE_MARKERS},
    parser::Parser,
    types::{parse_type, parse_type_argument},
};

/// Parses a complete term.
pub fn parse_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token_kind = parser.current_token_kind();
    if let Some(form) = parser.get_form_lookup().get(&token_kind).copied() {
        return form(parser);
    }

    if !starts_operand(parser) {
        let expected = parser.term_starts();
        return Err(parser.unexpected(&expected));
    }

    parse_infix_chain(parser)
}

/// `operand (op operand)*`. Returns the lone operand when no operator
/// follows it.
pub fn parse_infix_chain(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let first = parse_operand(parser)?;
    let mut rest = vec![];

    while parser.current_token_kind().is_operator() {
        let operator = parser.advance().value.clone();
        let right = parse_operand(parser)?;
        rest.push((operator, right));
    }

    if rest.is_empty() {
        return Ok(first);
    }

    let span = match rest.last() {
        Some((_, last)) => first.get_span().to(last.get_span()),
        None => first.get_span().clone(),
    };

    Ok(ExprWrapper::new(InfixChainExpr { first, rest, span }))
}

fn starts_operand(parser: &Parser) -> bool {
    let token_kind = parser.current_token_kind();
    token_kind.is_operator() || parser.get_nud_lookup().contains_key(&token_kind)
}

/// An application, or a prefix operator applied to one.
fn parse_operand(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    if !starts_operand(parser) {
        let expected = parser.operand_starts();
        return Err(parser.unexpected(&expected));
    }

    if !parser.current_token_kind().is_operator() {
        return parse_application_expr(parser);
    }

    let operator = parser.advance().clone();
    let operand = parse_application_expr(parser)?;

    Ok(ExprWrapper::new(PrefixExpr {
        span: operator.span.to(operand.get_span()),
        operator: operator.value,
        operand,
    }))
}

/// `f a1 a2 ...`, folded left into binary applications.
pub fn parse_application_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let mut left = parse_primary_expr(parser)?;

    while starts_argument(parser) {
        let argument = parse_argument(parser)?;
        left = ExprWrapper::new(ApplicationExpr {
            span: left.get_span().to(argument.get_span()),
            function: left,
            argument,
        });
    }

    Ok(left)
}

fn starts_argument(parser: &Parser) -> bool {
    let token_kind = parser.current_token_kind();
    TYPE_ARGUMENT_STARTS.contains(&token_kind) || parser.get_nud_lookup().contains_key(&token_kind)
}

/// One application argument. Brackets are looked through to find whether
/// they hold a type, so `(List Int)` and `[Int]` are type arguments while
/// `(g x)` and `[x : Int]` are terms.
fn parse_argument(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    if parser.bracket_starts_with(&TYPE_MARKERS) {
        let ty = parse_type_argument(parser)?;
        return Ok(ExprWrapper::new(TypeArgExpr { ty }));
    }

    let token_kind = parser.current_token_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(Error::new(
            ErrorImpl::Ambiguity {
                message: format!("{} starts neither a type nor a term argument", token_kind.describe()),
            },
            parser.current_token().span.clone(),
        ));
    }

    parse_primary_expr(parser)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud(parser),
        None => {
            let expected = parser.primary_starts();
            Err(parser.unexpected(&expected))
        }
    }
}

/// A term binder: a name or `_`.
pub fn parse_binder(parser: &mut Parser) -> Result<Binder, Error> {
    let token = parser.expect_one_of(&[TokenKind::TermIdentifier, TokenKind::Hole])?;
    Ok(match token.kind {
        TokenKind::Hole => Binder::Hole,
        _ => Binder::Name(token.value),
    })
}

fn parse_u64(token: &Token) -> Result<u64, Error> {
    token.value.parse::<u64>().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.clone(),
        )
    })
}

fn span_to_end(start: Position, node: &ExprWrapper) -> Span {
    Span::new(start, node.get_span().end.clone())
}

// KEYWORD-LED FORMS

pub fn parse_if_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;
    let condition = parse_expr(parser)?;

    parser.expect_after_layout(TokenKind::Then)?;
    parser.skip_newlines();
    let then_branch = parse_expr(parser)?;

    parser.expect_after_layout(TokenKind::Else)?;
    parser.skip_newlines();
    let else_branch = parse_expr(parser)?;

    Ok(ExprWrapper::new(IfExpr {
        span: span_to_end(start, &else_branch),
        condition,
        then_branch,
        else_branch,
    }))
}

/// `let x = value in body`. The bound value is an infix chain, so a
/// keyword-led form there must be parenthesized.
pub fn parse_let_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::Let)?.span.start;
    let binder = parse_binder(parser)?;

    parser.expect(TokenKind::Assignment)?;
    parser.skip_newlines();
    let value = parse_infix_chain(parser)?;

    parser.expect_after_layout(TokenKind::In)?;
    parser.skip_newlines();
    let body = parse_expr(parser)?;

    Ok(ExprWrapper::new(LetExpr {
        span: span_to_end(start, &body),
        binder,
        value,
        body,
    }))
}

/// `fun x : T, body` abstracts a term, `fun T [: sort], body` a type.
pub fn parse_fun_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::Fun)?.span.start;

    match parser.current_token_kind() {
        TokenKind::TermIdentifier | TokenKind::Hole => {
            let binder = parse_binder(parser)?;
            parser.expect(TokenKind::Colon)?;
            let param_type = parse_type(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Comma)?;
            parser.skip_newlines();
            let body = parse_expr(parser)?;

            Ok(ExprWrapper::new(FunTermExpr {
                span: span_to_end(start, &body),
                binder,
                param_type,
                body,
            }))
        }
        TokenKind::TypeIdentifier => {
            let variable = parser.advance().value.clone();
            let sort = if parser.current_token_kind() == TokenKind::Colon {
                parser.advance();
                Some(parse_type(parser, BindingPower::Default)?)
            } else {
                None
            };
            parser.expect(TokenKind::Comma)?;
            parser.skip_newlines();
            let body = parse_expr(parser)?;

            Ok(ExprWrapper::new(FunTypeExpr {
                span: span_to_end(start, &body),
                variable,
                sort,
                body,
            }))
        }
        _ => Err(parser.unexpected(&[
            TokenKind::TermIdentifier,
            TokenKind::Hole,
            TokenKind::TypeIdentifier,
        ])),
    }
}

/// Parses `of`, an optional `{`, then one or more arms, then the matching
/// `}` if one was opened. Returns the arms, whether braces were used, and
/// the end of the block.
fn parse_arm_block<T>(
    parser: &mut Parser,
    parse_arm: fn(&mut Parser) -> Result<T, Error>,
) -> Result<(Vec<T>, bool, Position), Error> {
    parser.expect_after_layout(TokenKind::Of)?;
    parser.skip_newlines();

    let open = if parser.current_token_kind() == TokenKind::OpenCurly {
        Some(parser.open_group(TokenKind::OpenCurly)?)
    } else {
        None
    };

    let braced = open.is_some();
    let mut arms = vec![parse_arm(parser)?];
    while parser.peek_past_layout() == TokenKind::Bar {
        parser.skip_newlines();
        arms.push(parse_arm(parser)?);
    }

    let end = match open {
        Some(open) => {
            if parser.current_token_kind() != TokenKind::CloseCurly {
                let found = parser.current_token();
                return Err(Error::new(
                    ErrorImpl::UnterminatedBlock {
                        found: found.describe(),
                    },
                    open.span.to(&found.span),
                ));
            }
            parser.close_group(TokenKind::CloseCurly)?.span.end
        }
        None => parser.previous_end(),
    };

    Ok((arms, braced, end))
}

fn parse_case_arm(parser: &mut Parser) -> Result<CaseArm, Error> {
    let start = parser.expect(TokenKind::Bar)?.span.start;
    let tag = match parser.expect_one_of(&[TokenKind::Inl, TokenKind::Inr])?.kind {
        TokenKind::Inl => InjectionTag::Inl,
        _ => InjectionTag::Inr,
    };
    let binder = parse_binder(parser)?;

    parser.expect(TokenKind::FatArrow)?;
    parser.skip_newlines();
    let body = parse_expr(parser)?;

    Ok(CaseArm {
        span: span_to_end(start, &body),
        tag,
        binder,
        body,
    })
}

fn parse_list_arm(parser: &mut Parser) -> Result<ListArm, Error> {
    let start = parser.expect(TokenKind::Bar)?.span.start;
    let pattern = match parser.expect_one_of(&[TokenKind::Nil, TokenKind::Cons])?.kind {
        TokenKind::Nil => ListPattern::Nil,
        _ => {
            let head = parse_binder(parser)?;
            let tail = parse_binder(parser)?;
            ListPattern::Cons { head, tail }
        }
    };

    parser.expect(TokenKind::FatArrow)?;
    parser.skip_newlines();
    let body = parse_expr(parser)?;

    Ok(ListArm {
        span: span_to_end(start, &body),
        pattern,
        body,
    })
}

pub fn parse_case_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::Case)?.span.start;
    let scrutinee = parse_expr(parser)?;
    let (arms, braced, end) = parse_arm_block(parser, parse_case_arm)?;

    Ok(ExprWrapper::new(CaseExpr {
        scrutinee,
        arms,
        braced,
        span: Span::new(start, end),
    }))
}

pub fn parse_lcase_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::Lcase)?.span.start;
    let scrutinee = parse_expr(parser)?;
    let (arms, braced, end) = parse_arm_block(parser, parse_list_arm)?;

    Ok(ExprWrapper::new(LCaseExpr {
        scrutinee,
        arms,
        braced,
        span: Span::new(start, end),
    }))
}

// PRIMARIES

pub fn parse_integer_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.expect(TokenKind::Integer)?;
    Ok(ExprWrapper::new(IntegerExpr {
        value: parse_u64(&token)?,
        span: token.span,
    }))
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.expect_one_of(&[TokenKind::True, TokenKind::False])?;
    Ok(ExprWrapper::new(BooleanExpr {
        value: token.kind == TokenKind::True,
        span: token.span,
    }))
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.expect(TokenKind::TermIdentifier)?;
    Ok(ExprWrapper::new(IdentifierExpr {
        name: token.value,
        span: token.span,
    }))
}

pub fn parse_char_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.expect(TokenKind::Char)?;
    let mut chars = token.value.chars();
    match (chars.next(), chars.next()) {
        (Some(value), None) => Ok(ExprWrapper::new(CharExpr {
            value,
            span: token.span,
        })),
        _ => Err(Error::new(
            ErrorImpl::InvalidCharLiteral {
                literal: token.value.clone(),
            },
            token.span,
        )),
    }
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.expect(TokenKind::String)?;
    Ok(ExprWrapper::new(StringExpr {
        value: token.value,
        span: token.span,
    }))
}

/// `()`, `(e)` or `(a, b)`.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.open_group(TokenKind::OpenParen)?.span.start;

    if parser.current_token_kind() == TokenKind::CloseParen {
        let end = parser.close_group(TokenKind::CloseParen)?.span.end;
        return Ok(ExprWrapper::new(UnitExpr {
            span: Span::new(start, end),
        }));
    }

    let inner = parse_expr(parser)?;

    match parser.current_token_kind() {
        TokenKind::Comma => {
            parser.advance();
            let right = parse_expr(parser)?;
            let end = parser.close_group(TokenKind::CloseParen)?.span.end;
            Ok(ExprWrapper::new(PairExpr {
                left: inner,
                right,
                span: Span::new(start, end),
            }))
        }
        TokenKind::CloseParen => {
            let end = parser.close_group(TokenKind::CloseParen)?.span.end;
            Ok(ExprWrapper::new(ParensExpr {
                inner,
                span: Span::new(start, end),
            }))
        }
        _ => Err(parser.unexpected(&[TokenKind::Comma, TokenKind::CloseParen])),
    }
}

/// `[e1, ..., en : T]`, with the element type always required.
pub fn parse_list_literal_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.open_group(TokenKind::OpenBracket)?.span.start;
    let mut elements = vec![];

    while parser.current_token_kind() != TokenKind::Colon {
        elements.push(parse_expr(parser)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::Colon => break,
            _ => return Err(parser.unexpected(&[TokenKind::Comma, TokenKind::Colon])),
        }
    }

    parser.expect(TokenKind::Colon)?;
    let element_type = parse_type(parser, BindingPower::Default)?;
    let end = parser.close_group(TokenKind::CloseBracket)?.span.end;

    Ok(ExprWrapper::new(ListLiteralExpr {
        elements,
        element_type,
        span: Span::new(start, end),
    }))
}

/// `inl v T` and `inr v T`.
pub fn parse_injection_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let keyword = parser.expect_one_of(&[TokenKind::Inl, TokenKind::Inr])?;
    let tag = match keyword.kind {
        TokenKind::Inl => InjectionTag::Inl,
        _ => InjectionTag::Inr,
    };
    let value = parse_primary_expr(parser)?;
    let ty = parse_type_argument(parser)?;

    Ok(ExprWrapper::new(InjectionExpr {
        span: Span::new(keyword.span.start, ty.get_span().end.clone()),
        tag,
        value,
        ty,
    }))
}

pub fn parse_nil_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.expect(TokenKind::Nil)?.span.start;
    let ty = parse_type_argument(parser)?;

    Ok(ExprWrapper::new(NilExpr {
        span: Span::new(start, ty.get_span().end.clone()),
        ty,
    }))
}

/// The IO builtins, each with a fixed number of type and term arguments.
pub fn parse_io_primitive_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let keyword = parser.advance().clone();

    let primitive = match keyword.kind {
        TokenKind::Readline => IOPrimitive::Readline,
        TokenKind::Print => IOPrimitive::Print {
            argument: parse_primary_expr(parser)?,
        },
        TokenKind::Pure => IOPrimitive::Pure {
            ty: parse_type_argument(parser)?,
            argument: parse_primary_expr(parser)?,
        },
        TokenKind::Bind => IOPrimitive::Bind {
            domain: parse_type_argument(parser)?,
            codomain: parse_type_argument(parser)?,
            function: parse_primary_expr(parser)?,
            argument: parse_primary_expr(parser)?,
        },
        TokenKind::Panic => IOPrimitive::Panic {
            ty: parse_type_argument(parser)?,
            argument: parse_primary_expr(parser)?,
        },
        TokenKind::Trace => {
            let index = parser.expect(TokenKind::Integer)?;
            IOPrimitive::Trace {
                index: parse_u64(&index)?,
                argument: parse_primary_expr(parser)?,
            }
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: keyword.describe(),
                    message: String::from("expected an IO builtin"),
                },
                keyword.span,
            ))
        }
    };

    Ok(ExprWrapper::new(IOPrimitiveExpr {
        span: Span::new(keyword.span.start, parser.previous_end()),
        primitive,
    }))
}
