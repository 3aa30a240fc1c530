use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("import", TokenKind::Import);
        map.insert("infixl", TokenKind::Infixl);
        map.insert("infixr", TokenKind::Infixr);
        map.insert("prefix", TokenKind::Prefix);
        map.insert("Forall", TokenKind::Forall);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("let", TokenKind::Let);
        map.insert("in", TokenKind::In);
        map.insert("fun", TokenKind::Fun);
        map.insert("case", TokenKind::Case);
        map.insert("lcase", TokenKind::Lcase);
        map.insert("of", TokenKind::Of);
        map.insert("inl", TokenKind::Inl);
        map.insert("inr", TokenKind::Inr);
        map.insert("nil", TokenKind::Nil);
        map.insert("cons", TokenKind::Cons);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("__readline", TokenKind::Readline);
        map.insert("__print", TokenKind::Print);
        map.insert("__pure", TokenKind::Pure);
        map.insert("__bind", TokenKind::Bind);
        map.insert("panic", TokenKind::Panic);
        map.insert("trace", TokenKind::Trace);
        map
    };

    /// Symbolic runs that are structural tokens rather than user operators.
    pub static ref STRUCTURAL_OPERATORS: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("=", TokenKind::Assignment);
        map.insert(":", TokenKind::Colon);
        map.insert("|", TokenKind::Bar);
        map.insert("->", TokenKind::Arrow);
        map.insert("=>", TokenKind::FatArrow);
        map.insert("+", TokenKind::Plus);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Newline,
    Comment,

    Integer,
    Char,
    String,
    TermIdentifier,
    TypeIdentifier,
    Hole,
    Operator,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Comma,
    Colon,      // :
    Assignment, // =
    Arrow,      // ->
    FatArrow,   // =>
    Bar,        // |
    Plus,       // +

    // Reserved
    Import,
    Infixl,
    Infixr,
    Prefix,
    Forall,
    If,
    Then,
    Else,
    Let,
    In,
    Fun,
    Case,
    Lcase,
    Of,
    Inl,
    Inr,
    Nil,
    Cons,
    True,
    False,
    Readline,
    Print,
    Pure,
    Bind,
    Panic,
    Trace,
}

impl TokenKind {
    /// Human readable form used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Integer => "integer",
            TokenKind::Char => "char literal",
            TokenKind::String => "string literal",
            TokenKind::TermIdentifier => "term identifier",
            TokenKind::TypeIdentifier => "type identifier",
            TokenKind::Hole => "`_`",
            TokenKind::Operator => "operator",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::OpenCurly => "`{`",
            TokenKind::CloseCurly => "`}`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Assignment => "`=`",
            TokenKind::Arrow => "`->`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::Bar => "`|`",
            TokenKind::Plus => "`+`",
            TokenKind::Import => "`import`",
            TokenKind::Infixl => "`infixl`",
            TokenKind::Infixr => "`infixr`",
            TokenKind::Prefix => "`prefix`",
            TokenKind::Forall => "`Forall`",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::Let => "`let`",
            TokenKind::In => "`in`",
            TokenKind::Fun => "`fun`",
            TokenKind::Case => "`case`",
            TokenKind::Lcase => "`lcase`",
            TokenKind::Of => "`of`",
            TokenKind::Inl => "`inl`",
            TokenKind::Inr => "`inr`",
            TokenKind::Nil => "`nil`",
            TokenKind::Cons => "`cons`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Readline => "`__readline`",
            TokenKind::Print => "`__print`",
            TokenKind::Pure => "`__pure`",
            TokenKind::Bind => "`__bind`",
            TokenKind::Panic => "`panic`",
            TokenKind::Trace => "`trace`",
        }
    }

    /// Newline and comment tokens, which only separators and bracketed
    /// regions may absorb.
    pub fn is_layout(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Comment)
    }

    /// Tokens usable as an operator in an infix chain or fixity declaration.
    pub fn is_operator(&self) -> bool {
        matches!(self, TokenKind::Operator | TokenKind::Plus)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme, or the decoded text for char and string literals.
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// One-line rendering used by the `tokens` output format.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Char,
            TokenKind::TermIdentifier,
            TokenKind::TypeIdentifier,
            TokenKind::Integer,
            TokenKind::Operator,
            TokenKind::Comment,
        ]) {
            format!(
                "{}..{} {} ({:?})",
                self.span.start.0, self.span.end.0, self.kind, self.value
            )
        } else {
            format!("{}..{} {} ()", self.span.start.0, self.span.end.0, self.kind)
        }
    }

    /// Human readable description of the token for "found ..." messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF | TokenKind::Newline | TokenKind::Comment => {
                self.kind.describe().to_string()
            }
            _ => format!("`{}`", self.value),
        }
    }
}
