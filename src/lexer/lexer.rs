use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP, STRUCTURAL_OPERATORS};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Ordered pattern table; the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\r?\n").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new(r"^[ \t]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^--[^\n]*").unwrap(), handler: comment_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^'").unwrap(), handler: char_handler },
        RegexPattern { regex: Regex::new(r"^[a-z_][A-Za-z0-9_.']*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^[A-Z][A-Za-z0-9_']*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^[0-9]+").unwrap(), handler: integer_handler },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^[!#$%&*+\-./<=>?@\\^|~:]+").unwrap(), handler: operator_handler },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pub pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    pub fn span_from(&self, start: usize, len: usize) -> Span {
        Span {
            start: self.position(start),
            end: self.position(start + len),
        }
    }

    fn matched_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map(|m| m.end()).unwrap_or(0)
    }
}

fn newline_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let len = lexer.matched_len(regex);
    let span = lexer.span_from(lexer.pos, len);
    lexer.push(MK_TOKEN!(TokenKind::Newline, String::from("\n"), span));
    lexer.advance_n(len);
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let len = lexer.matched_len(regex);
    lexer.advance_n(len);
    Ok(())
}

fn comment_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let len = lexer.matched_len(regex);
    let text = lexer.remainder()[..len].trim_end_matches('\r').to_string();
    let span = lexer.span_from(lexer.pos, len);
    lexer.push(MK_TOKEN!(TokenKind::Comment, text, span));
    lexer.advance_n(len);
    Ok(())
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let len = lexer.matched_len(regex);
    let matched = lexer.remainder()[..len].to_string();
    let span = lexer.span_from(lexer.pos, len);
    lexer.push(MK_TOKEN!(TokenKind::Integer, matched, span));
    lexer.advance_n(len);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let len = lexer.matched_len(regex);
    let value = lexer.remainder()[..len].to_string();
    let span = lexer.span_from(lexer.pos, len);

    let kind = if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        *kind
    } else if value == "_" {
        TokenKind::Hole
    } else if value.starts_with(|c: char| c.is_ascii_lowercase()) {
        TokenKind::TermIdentifier
    } else if value.starts_with(|c: char| c.is_ascii_uppercase()) {
        TokenKind::TypeIdentifier
    } else {
        return Err(Error::new(ErrorImpl::InvalidIdentifier { token: value }, span));
    };

    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
    Ok(())
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let len = lexer.matched_len(regex);
    let value = lexer.remainder()[..len].to_string();
    let span = lexer.span_from(lexer.pos, len);

    let kind = STRUCTURAL_OPERATORS
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Operator);

    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
    Ok(())
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let (value, len) = scan_quoted(lexer, '"', "string")?;
    let span = lexer.span_from(lexer.pos, len);
    lexer.push(MK_TOKEN!(TokenKind::String, value, span));
    lexer.advance_n(len);
    Ok(())
}

fn char_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let (value, len) = scan_quoted(lexer, '\'', "char")?;
    let span = lexer.span_from(lexer.pos, len);

    if value.chars().count() != 1 {
        return Err(Error::new(
            ErrorImpl::InvalidCharLiteral {
                literal: lexer.remainder()[..len].to_string(),
            },
            span,
        ));
    }

    lexer.push(MK_TOKEN!(TokenKind::Char, value, span));
    lexer.advance_n(len);
    Ok(())
}

/// Scans a quoted literal starting at the cursor, decoding escapes.
///
/// Returns the decoded text and the byte length of the literal including
/// both quotes. A newline before the closing quote leaves it unterminated.
fn scan_quoted(lexer: &Lexer, quote: char, kind: &'static str) -> Result<(String, usize), Error> {
    let start = lexer.pos;
    let remainder = lexer.remainder();
    let mut chars = remainder.char_indices().skip(1).peekable();
    let mut result = String::new();

    let unterminated = || {
        Error::at(
            ErrorImpl::UnterminatedLiteral { kind },
            lexer.position(start),
        )
    };

    while let Some((offset, ch)) = chars.next() {
        if ch == quote {
            return Ok((result, offset + ch.len_utf8()));
        }

        match ch {
            '\n' => return Err(unterminated()),
            '\\' => {
                let Some((_, escape)) = chars.next() else {
                    return Err(unterminated());
                };

                let simple = match escape {
                    'n' => Some('\n'),
                    'r' => Some('\r'),
                    't' => Some('\t'),
                    'b' => Some('\u{0008}'),
                    'f' => Some('\u{000C}'),
                    '\\' => Some('\\'),
                    '/' => Some('/'),
                    '"' => Some('"'),
                    '\'' if quote == '\'' => Some('\''),
                    _ => None,
                };

                if let Some(decoded) = simple {
                    result.push(decoded);
                    continue;
                }

                if escape != 'u' {
                    return Err(Error::new(
                        ErrorImpl::MalformedEscape {
                            sequence: format!("\\{}", escape),
                        },
                        lexer.span_from(start + offset, 1 + escape.len_utf8()),
                    ));
                }

                let decoded = scan_unicode_escape(&mut chars).ok_or_else(|| {
                    let end = chars
                        .peek()
                        .map(|(next, _)| *next)
                        .unwrap_or(remainder.len());
                    Error::new(
                        ErrorImpl::MalformedEscape {
                            sequence: remainder[offset..end].to_string(),
                        },
                        lexer.span_from(start + offset, end - offset),
                    )
                })?;
                result.push(decoded);
            }
            _ => result.push(ch),
        }
    }

    Err(unterminated())
}

/// Decodes the `{XXXX}` tail of a `\u` escape: one to six hex digits naming a
/// Unicode scalar value.
fn scan_unicode_escape<I>(chars: &mut std::iter::Peekable<I>) -> Option<char>
where
    I: Iterator<Item = (usize, char)>,
{
    if chars.next_if(|(_, c)| *c == '{').is_none() {
        return None;
    }

    let mut hex = String::new();
    while let Some((_, c)) = chars.next_if(|(_, c)| c.is_ascii_hexdigit()) {
        hex.push(c);
    }

    if hex.is_empty() || hex.len() > 6 {
        return None;
    }
    chars.next_if(|(_, c)| *c == '}')?;

    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}

pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source.to_string(), file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                lex.span_from(lex.pos, lex.at().len_utf8()),
            ));
        }
    }

    let end = lex.pos;
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), lex.span_from(end, 0)));
    Ok(lex.tokens)
}
