//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Literals and escape decoding
//! - Operators and structural symbols
//! - Newlines and comments
//! - Error cases

use rstest::rstest;

use crate::errors::errors::{ErrorClass, ErrorImpl};

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.stlc".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "import infixl infixr prefix Forall if then else let in fun case lcase of inl inr nil cons true false __readline __print __pure __bind panic trace";
    let tokens = tokenize(source, Some("test.stlc".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Import);
    assert_eq!(tokens[1].kind, TokenKind::Infixl);
    assert_eq!(tokens[2].kind, TokenKind::Infixr);
    assert_eq!(tokens[3].kind, TokenKind::Prefix);
    assert_eq!(tokens[4].kind, TokenKind::Forall);
    assert_eq!(tokens[5].kind, TokenKind::If);
    assert_eq!(tokens[6].kind, TokenKind::Then);
    assert_eq!(tokens[7].kind, TokenKind::Else);
    assert_eq!(tokens[8].kind, TokenKind::Let);
    assert_eq!(tokens[9].kind, TokenKind::In);
    assert_eq!(tokens[10].kind, TokenKind::Fun);
    assert_eq!(tokens[11].kind, TokenKind::Case);
    assert_eq!(tokens[12].kind, TokenKind::Lcase);
    assert_eq!(tokens[13].kind, TokenKind::Of);
    assert_eq!(tokens[14].kind, TokenKind::Inl);
    assert_eq!(tokens[15].kind, TokenKind::Inr);
    assert_eq!(tokens[16].kind, TokenKind::Nil);
    assert_eq!(tokens[17].kind, TokenKind::Cons);
    assert_eq!(tokens[18].kind, TokenKind::True);
    assert_eq!(tokens[19].kind, TokenKind::False);
    assert_eq!(tokens[20].kind, TokenKind::Readline);
    assert_eq!(tokens[21].kind, TokenKind::Print);
    assert_eq!(tokens[22].kind, TokenKind::Pure);
    assert_eq!(tokens[23].kind, TokenKind::Bind);
    assert_eq!(tokens[24].kind, TokenKind::Panic);
    assert_eq!(tokens[25].kind, TokenKind::Trace);
    assert_eq!(tokens[26].kind, TokenKind::EOF);
    assert_eq!(tokens.len(), 27);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_1 std.list x' Int Maybe' _ inner letter";
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::TermIdentifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::TermIdentifier);
    assert_eq!(tokens[1].value, "bar_1");
    assert_eq!(tokens[2].kind, TokenKind::TermIdentifier);
    assert_eq!(tokens[2].value, "std.list");
    assert_eq!(tokens[3].kind, TokenKind::TermIdentifier);
    assert_eq!(tokens[3].value, "x'");
    assert_eq!(tokens[4].kind, TokenKind::TypeIdentifier);
    assert_eq!(tokens[4].value, "Int");
    assert_eq!(tokens[5].kind, TokenKind::TypeIdentifier);
    assert_eq!(tokens[5].value, "Maybe'");
    assert_eq!(tokens[6].kind, TokenKind::Hole);

    // Keywords only win on an exact match
    assert_eq!(tokens[7].kind, TokenKind::TermIdentifier);
    assert_eq!(tokens[7].value, "inner");
    assert_eq!(tokens[8].kind, TokenKind::TermIdentifier);
    assert_eq!(tokens[8].value, "letter");
}

#[test]
fn test_scalar_type_names_are_identifiers() {
    assert_eq!(
        kinds("Int Bool Unit Char String List IO"),
        vec![TokenKind::TypeIdentifier; 7]
            .into_iter()
            .chain(std::iter::once(TokenKind::EOF))
            .collect::<Vec<_>>()
    );
}

#[rstest]
#[case("=", TokenKind::Assignment)]
#[case(":", TokenKind::Colon)]
#[case("|", TokenKind::Bar)]
#[case("->", TokenKind::Arrow)]
#[case("=>", TokenKind::FatArrow)]
#[case("+", TokenKind::Plus)]
#[case("++", TokenKind::Operator)]
#[case("<$>", TokenKind::Operator)]
#[case("==", TokenKind::Operator)]
#[case("||", TokenKind::Operator)]
#[case("-", TokenKind::Operator)]
#[case("::", TokenKind::Operator)]
#[case("\\", TokenKind::Operator)]
fn test_operator_runs_are_classified(#[case] source: &str, #[case] expected: TokenKind) {
    let tokens = tokenize(source, None).unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, expected);
    assert_eq!(tokens[0].value, source);
}

#[test]
fn test_operators_are_maximal_munch() {
    let tokens = tokenize("a<=>b", None).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Operator);
    assert_eq!(tokens[1].value, "<=>");
    assert_eq!(tokens[2].value, "b");
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) [ ] { } ,"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_list_annotation_splits_colon() {
    assert_eq!(
        kinds("[1, 2:Int]"),
        vec![
            TokenKind::OpenBracket,
            TokenKind::Integer,
            TokenKind::Comma,
            TokenKind::Integer,
            TokenKind::Colon,
            TokenKind::TypeIdentifier,
            TokenKind::CloseBracket,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_newlines_and_comments_are_tokens() {
    let tokens = tokenize("x -- note\r\n\ny", None).unwrap();
    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();

    assert_eq!(
        kinds,
        vec![
            TokenKind::TermIdentifier,
            TokenKind::Comment,
            TokenKind::Newline,
            TokenKind::Newline,
            TokenKind::TermIdentifier,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[1].value, "-- note");
}

#[test]
fn test_double_dash_run_is_a_comment() {
    assert_eq!(
        kinds("a --> b"),
        vec![TokenKind::TermIdentifier, TokenKind::Comment, TokenKind::EOF]
    );
}

#[test]
fn test_spans_are_byte_offsets() {
    let tokens = tokenize("f  \"é\" 12", Some("spans.stlc".to_string())).unwrap();

    assert_eq!((tokens[0].span.start.0, tokens[0].span.end.0), (0, 1));
    assert_eq!((tokens[1].span.start.0, tokens[1].span.end.0), (3, 7));
    assert_eq!((tokens[2].span.start.0, tokens[2].span.end.0), (8, 10));
    assert_eq!(tokens[3].kind, TokenKind::EOF);
    assert_eq!((tokens[3].span.start.0, tokens[3].span.end.0), (10, 10));
    assert_eq!(tokens[0].span.start.1.as_str(), "spans.stlc");
}

#[test]
fn test_string_escapes_are_decoded() {
    let tokens = tokenize(r#""a\u{1F600}b""#, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(
        tokens[0].value.chars().collect::<Vec<_>>(),
        vec!['a', '\u{1F600}', 'b']
    );
}

#[rstest]
#[case(r#""\n\r\t\b\f""#, "\n\r\t\u{0008}\u{000C}")]
#[case(r#""\\\/\"""#, "\\/\"")]
#[case(r#""\u{41}\u{10FFFF}""#, "A\u{10FFFF}")]
#[case(r#""""#, "")]
fn test_string_escape_table(#[case] source: &str, #[case] decoded: &str) {
    let tokens = tokenize(source, None).unwrap();
    assert_eq!(tokens[0].value, decoded);
}

#[rstest]
#[case("'a'", "a")]
#[case(r"'\n'", "\n")]
#[case(r"'\''", "'")]
#[case(r"'\u{3bb}'", "\u{3bb}")]
fn test_char_literals(#[case] source: &str, #[case] decoded: &str) {
    let tokens = tokenize(source, None).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value, decoded);
}

#[rstest]
#[case("\"abc", "UnterminatedLiteral", 0)]
#[case("x = \"ab\ncd\"", "UnterminatedLiteral", 4)]
#[case(r#""a\qb""#, "MalformedEscape", 2)]
#[case(r#""\u{}""#, "MalformedEscape", 1)]
#[case(r#""\u{1234567}""#, "MalformedEscape", 1)]
#[case(r#""\u{D800}""#, "MalformedEscape", 1)]
#[case("'ab'", "InvalidCharLiteral", 0)]
#[case("''", "InvalidCharLiteral", 0)]
#[case("x ; y", "UnrecognisedToken", 2)]
#[case("_foo", "InvalidIdentifier", 0)]
fn test_lex_errors(#[case] source: &str, #[case] name: &str, #[case] offset: u32) {
    let error = tokenize(source, None).unwrap_err();

    assert_eq!(error.get_error_name(), name);
    assert_eq!(error.get_position().0, offset);
    assert_eq!(error.get_class(), ErrorClass::Lex);
}

#[test]
fn test_malformed_escape_names_sequence() {
    let error = tokenize(r#""a\qb""#, None).unwrap_err();
    match error.get_impl() {
        ErrorImpl::MalformedEscape { sequence } => assert_eq!(sequence, "\\q"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_token_debug_format() {
    let tokens = tokenize("x = 1", None).unwrap();
    assert_eq!(tokens[0].debug(), "0..1 TermIdentifier (\"x\")");
    assert_eq!(tokens[1].debug(), "2..3 Assignment ()");
    assert_eq!(tokens[2].debug(), "4..5 Integer (\"1\")");
}
