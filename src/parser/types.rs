//! Type parsing implementation.
//!
//! Types are parsed with NUD/LED handlers over four layers, loosest first:
//!
//! - `Forall T [: sort], body`, whose body extends as far right as possible
//! - arrows, right associative
//! - sums, left associative
//! - primaries: identifiers, holes, `( )`, products, `[ ]` and constructor
//!   application
//!
//! Constructor application is right associative (`Either A B` is
//! `Either (A B)`) and only a type identifier may act as constructor.
//! `parse_type_argument` is the restricted entry used wherever a type sits
//! among juxtaposed arguments; it never folds application.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Type, TypeWrapper},
        types::{ApplicationType, ArrowType, ForallType, ListType, ParenType, ProductType, SumType, SymbolType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeWrapper, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeWrapper, BindingPower) -> Result<TypeWrapper, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Tokens a type primary can begin with. `Forall` is a type start but not a
/// primary, so it cannot be a constructor argument without parentheses.
const PRIMARY_STARTS: [TokenKind; 4] = [
    TokenKind::TypeIdentifier,
    TokenKind::Hole,
    TokenKind::OpenParen,
    TokenKind::OpenBracket,
];

const TYPE_STARTS: [TokenKind; 5] = [
    TokenKind::Forall,
    TokenKind::TypeIdentifier,
    TokenKind::Hole,
    TokenKind::OpenParen,
    TokenKind::OpenBracket,
];

/// Initializes the type parsing lookup tables.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Forall, parse_forall_type);
    parser.type_nud(TokenKind::TypeIdentifier, parse_symbol_type);
    parser.type_nud(TokenKind::Hole, parse_hole_type);
    parser.type_nud(TokenKind::OpenParen, parse_paren_type);
    parser.type_nud(TokenKind::OpenBracket, parse_list_type);

    parser.type_led(TokenKind::Arrow, BindingPower::Arrow, parse_arrow_type);
    parser.type_led(TokenKind::Plus, BindingPower::Sum, parse_sum_type);
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeWrapper, Error> {
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected(&TYPE_STARTS)),
    };

    let mut left = nud(parser)?;

    while let Some(power) = parser.get_type_bp_lookup().get(&parser.current_token_kind()).copied() {
        if power <= bp {
            break;
        }

        let token_kind = parser.current_token_kind();
        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => {
                return Err(Error::new(
                    ErrorImpl::Ambiguity {
                        message: format!("{} has a binding power but no type handler", token_kind.describe()),
                    },
                    parser.current_token().span.clone(),
                ))
            }
        };

        left = led(parser, left, power)?;
    }

    Ok(left)
}

/// A type in argument position: an identifier or hole on its own, or a
/// bracketed type.
pub fn parse_type_argument(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    match parser.current_token_kind() {
        TokenKind::TypeIdentifier | TokenKind::Hole => {
            let token = parser.advance().clone();
            Ok(TypeWrapper::new(SymbolType {
                name: token.value,
                span: token.span,
            }))
        }
        TokenKind::OpenParen => parse_paren_type(parser),
        TokenKind::OpenBracket => parse_list_type(parser),
        _ => Err(parser.unexpected(&PRIMARY_STARTS)),
    }
}

fn parse_type_primary(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    match parser.current_token_kind() {
        TokenKind::TypeIdentifier => parse_symbol_type(parser),
        TokenKind::Hole => parse_hole_type(parser),
        TokenKind::OpenParen => parse_paren_type(parser),
        TokenKind::OpenBracket => parse_list_type(parser),
        _ => Err(parser.unexpected(&PRIMARY_STARTS)),
    }
}

pub fn parse_forall_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    let start = parser.expect(TokenKind::Forall)?.span.start;
    let variable = parser.expect(TokenKind::TypeIdentifier)?.value;

    let sort = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Comma)?;
    parser.skip_newlines();
    let body = parse_type(parser, BindingPower::Default)?;

    Ok(TypeWrapper::new(ForallType {
        span: Span::new(start, body.get_span().end.clone()),
        variable,
        sort,
        body,
    }))
}

/// An identifier, applied to the following primary when one follows.
pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    let token = parser.expect(TokenKind::TypeIdentifier)?;

    if !PRIMARY_STARTS.contains(&parser.current_token_kind()) {
        return Ok(TypeWrapper::new(SymbolType {
            name: token.value,
            span: token.span,
        }));
    }

    let argument = parse_type_primary(parser)?;
    Ok(TypeWrapper::new(ApplicationType {
        span: Span::new(token.span.start, argument.get_span().end.clone()),
        constructor: token.value,
        argument,
    }))
}

pub fn parse_hole_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    let token = parser.expect(TokenKind::Hole)?;
    Ok(TypeWrapper::new(SymbolType {
        name: token.value,
        span: token.span,
    }))
}

/// `(T)` or the product `(A, B)`.
pub fn parse_paren_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    let start = parser.open_group(TokenKind::OpenParen)?.span.start;
    let inner = parse_type(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        let right = parse_type(parser, BindingPower::Default)?;
        let end = parser.close_group(TokenKind::CloseParen)?.span.end;
        return Ok(TypeWrapper::new(ProductType {
            left: inner,
            right,
            span: Span::new(start, end),
        }));
    }

    if parser.current_token_kind() != TokenKind::CloseParen {
        return Err(parser.unexpected(&[TokenKind::Comma, TokenKind::CloseParen]));
    }
    let end = parser.close_group(TokenKind::CloseParen)?.span.end;

    Ok(TypeWrapper::new(ParenType {
        inner,
        span: Span::new(start, end),
    }))
}

pub fn parse_list_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    let start = parser.open_group(TokenKind::OpenBracket)?.span.start;
    let element = parse_type(parser, BindingPower::Default)?;
    let end = parser.close_group(TokenKind::CloseBracket)?.span.end;

    Ok(TypeWrapper::new(ListType {
        element,
        span: Span::new(start, end),
    }))
}

pub fn parse_arrow_type(parser: &mut Parser, left: TypeWrapper, _bp: BindingPower) -> Result<TypeWrapper, Error> {
    parser.expect(TokenKind::Arrow)?;

    // Parsing the right side at the lowest power makes arrows right associative
    let right = parse_type(parser, BindingPower::Default)?;

    Ok(TypeWrapper::new(ArrowType {
        span: Span::new(left.get_span().start.clone(), right.get_span().end.clone()),
        left,
        right,
    }))
}

pub fn parse_sum_type(parser: &mut Parser, left: TypeWrapper, bp: BindingPower) -> Result<TypeWrapper, Error> {
    parser.expect(TokenKind::Plus)?;
    let right = parse_type(parser, bp)?;

    Ok(TypeWrapper::new(SumType {
        span: Span::new(left.get_span().start.clone(), right.get_span().end.clone()),
        left,
        right,
    }))
}
