//! Parser state and the module-level statement loop.
//!
//! The parser owns the token buffer for one file. Newline and comment tokens
//! stay in the buffer: the statement loop treats them as separators, and
//! while a bracket is open (`nesting > 0`) every lookup steps over them, so
//! `(f\n x)` is one application while `f\n x` is not.
//!
//! A newline directly followed by a statement start in column zero is a hard
//! break. Layout skipping never crosses it, even inside an open bracket, so
//! an unclosed `(` fails at the break and the next statement survives.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::statements::ModuleStmt,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    ParseOutput, Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
        STATEMENT_STARTS,
    },
    stmt::parse_stmt,
    types::{create_token_type_lookups, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler, TypeNUDLookup},
};

/// Caller-imposed limits, checked between statements only.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Stop once more than this many tokens have been consumed.
    pub token_budget: Option<usize>,
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, ending in a single EOF
    tokens: Vec<Token>,
    /// Index of the next raw token
    pos: usize,
    /// Index of the last consumed token
    prev: usize,
    /// Open brackets around the cursor; layout tokens are skipped while > 0
    nesting: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for keyword-led term forms
    form_lookup: NUDLookup,
    /// Lookup table for term primaries
    nud_lookup: NUDLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: BPLookup,
    /// Registration order of `form_lookup`, for expected-token sets
    form_kinds: Vec<TokenKind>,
    /// Registration order of `nud_lookup`, for expected-token sets
    nud_kinds: Vec<TokenKind>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|t| t.span.end.0).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: Position(end, Rc::clone(&file)),
                    end: Position(end, Rc::clone(&file)),
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            prev: 0,
            nesting: 0,
            file,
            stmt_lookup: HashMap::new(),
            form_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
            form_kinds: vec![],
            nud_kinds: vec![],
        }
    }

    /// Index of the token the grammar sees next.
    fn effective_pos(&self) -> usize {
        let mut pos = self.pos;
        if self.nesting > 0 {
            while self.tokens[pos].kind.is_layout() && !self.is_statement_break(pos) {
                pos += 1;
            }
        }
        pos
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.effective_pos()]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the consumed one. EOF is never
    /// consumed.
    pub fn advance(&mut self) -> &Token {
        let index = self.effective_pos();
        self.prev = index;
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos = index + 1;
        } else {
            self.pos = index;
        }
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(&[expected_kind])),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects any of the given kinds.
    pub fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        if kinds.contains(&self.current_token_kind()) {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(kinds))
        }
    }

    /// Expects a mandatory keyword that may sit on a following line.
    ///
    /// Layout is only skipped when the keyword really follows it, so a
    /// failure is reported at the line break and recovery can still find the
    /// next statement.
    pub fn expect_after_layout(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_past_layout() == expected_kind {
            self.skip_newlines();
        }
        self.expect(expected_kind)
    }

    /// Builds an UnexpectedToken error at the current token.
    pub fn unexpected(&self, expected: &[TokenKind]) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.describe(),
                expected: expected.to_vec(),
            },
            token.span.clone(),
        )
    }

    /// Consumes newline and comment tokens at the cursor, stopping at a
    /// statement break.
    pub fn skip_newlines(&mut self) {
        while self.tokens[self.pos].kind.is_layout() && !self.is_statement_break(self.pos) {
            self.pos += 1;
        }
    }

    /// Consumes every newline and comment token at the cursor.
    ///
    /// Only for moving between statements, or onto the definition line of a
    /// signature.
    pub fn skip_layout(&mut self) {
        while self.tokens[self.pos].kind.is_layout() {
            self.pos += 1;
        }
    }

    /// Whether the token at `index` is a newline followed directly by a
    /// statement start in column zero.
    fn is_statement_break(&self, index: usize) -> bool {
        let token = &self.tokens[index];
        let Some(next) = self.tokens.get(index + 1) else {
            return false;
        };
        token.kind == TokenKind::Newline
            && STATEMENT_STARTS.contains(&next.kind)
            && token.span.end.0 == next.span.start.0
    }

    /// Kind of the first non-layout token at or after the cursor.
    pub fn peek_past_layout(&self) -> TokenKind {
        self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .find(|kind| !kind.is_layout())
            .unwrap_or(TokenKind::EOF)
    }

    /// Kind of the `n`th non-layout token at or after the cursor.
    pub fn peek_past_layout_nth(&self, n: usize) -> TokenKind {
        self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .filter(|kind| !kind.is_layout())
            .nth(n)
            .unwrap_or(TokenKind::EOF)
    }

    /// Whether the bracketed form at the cursor is a type.
    ///
    /// Scans past every `(` and `[` to the first other token and checks it
    /// against `markers`.
    pub fn bracket_starts_with(&self, markers: &[TokenKind]) -> bool {
        let mut index = self.effective_pos();
        let mut opened = false;
        loop {
            let kind = self.tokens[index].kind;
            match kind {
                TokenKind::OpenParen | TokenKind::OpenBracket => opened = true,
                _ if opened && kind.is_layout() && !self.is_statement_break(index) => {}
                _ => return markers.contains(&kind),
            }
            index += 1;
        }
    }

    /// Consumes an opening bracket and starts ignoring layout.
    pub fn open_group(&mut self, kind: TokenKind) -> Result<Token, Error> {
        let token = self.expect(kind)?;
        self.nesting += 1;
        Ok(token)
    }

    /// Consumes a closing bracket and restores the enclosing layout mode.
    pub fn close_group(&mut self, kind: TokenKind) -> Result<Token, Error> {
        let token = self.expect(kind)?;
        self.nesting = self.nesting.saturating_sub(1);
        Ok(token)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.tokens[self.pos].kind != TokenKind::EOF
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the keyword-led form lookup table.
    pub fn get_form_lookup(&self) -> &NUDLookup {
        &self.form_lookup
    }

    /// Returns a reference to the term primary lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the type binding power lookup table.
    pub fn get_type_bp_lookup(&self) -> &BPLookup {
        &self.type_binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Returns a reference to the type LED lookup table.
    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a keyword-led term form.
    pub fn form(&mut self, kind: TokenKind, form_fn: NUDHandler) {
        if self.form_lookup.insert(kind, form_fn).is_none() {
            self.form_kinds.push(kind);
        }
    }

    /// Registers a term primary handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        if self.nud_lookup.insert(kind, nud_fn).is_none() {
            self.nud_kinds.push(kind);
        }
    }

    /// Tokens that begin a term primary, in registration order.
    pub fn primary_starts(&self) -> Vec<TokenKind> {
        self.nud_kinds.clone()
    }

    /// Tokens that begin a chain operand: a primary or a prefix operator.
    pub fn operand_starts(&self) -> Vec<TokenKind> {
        let mut kinds = self.primary_starts();
        kinds.extend([TokenKind::Plus, TokenKind::Operator]);
        kinds
    }

    /// Tokens that begin any term.
    pub fn term_starts(&self) -> Vec<TokenKind> {
        let mut kinds = self.form_kinds.clone();
        kinds.extend(self.operand_starts());
        kinds
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: super::lookups::BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Span start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Span end of the last consumed token.
    pub fn previous_end(&self) -> Position {
        self.tokens[self.prev].span.end.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: &Position) -> Span {
        Span {
            start: start.clone(),
            end: self.previous_end(),
        }
    }

    fn at_separator(&self) -> bool {
        let kind = self.tokens[self.pos].kind;
        kind.is_layout() || kind == TokenKind::EOF
    }

    /// Whether the token at the cursor begins a statement in column zero.
    fn at_statement_start(&self) -> bool {
        if self.pos == 0 {
            return true;
        }
        self.is_statement_break(self.pos - 1)
    }

    /// Skips past a failed statement to the next plausible statement start.
    fn synchronize(&mut self) {
        self.nesting = 0;
        loop {
            let kind = self.tokens[self.pos].kind;
            if kind == TokenKind::EOF {
                return;
            }
            self.pos += 1;
            if kind == TokenKind::Newline && self.at_statement_start() {
                return;
            }
        }
    }

    fn end_of_file(&self) -> Position {
        self.tokens[self.tokens.len() - 1].span.end.clone()
    }
}

/// Parses a stream of tokens into a module.
///
/// Each statement is parsed independently: a failure is recorded, the
/// parser skips to the next statement start and carries on, and the failed
/// statement contributes nothing to the tree.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> ParseOutput {
    parse_with_options(tokens, file, ParseOptions::default())
}

pub fn parse_with_options(tokens: Vec<Token>, file: Rc<String>, options: ParseOptions) -> ParseOutput {
    let mut parser = Parser::new(tokens, Rc::clone(&file));
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut body = vec![];
    let mut errors = vec![];

    parser.skip_layout();

    while parser.has_tokens() {
        parser.nesting = 0;

        let stmt = parse_stmt(&mut parser).and_then(|stmt| {
            if parser.at_separator() {
                Ok(stmt)
            } else {
                Err(parser.unexpected(&[TokenKind::Newline, TokenKind::EOF]))
            }
        });

        match stmt {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                errors.push(error);
                parser.synchronize();
            }
        }

        parser.skip_layout();

        if let Some(budget) = options.token_budget {
            if parser.consumed() > budget && parser.has_tokens() {
                errors.push(Error::at(ErrorImpl::BudgetExceeded { budget }, parser.get_position()));
                break;
            }
        }
    }

    let module = ModuleStmt {
        body,
        span: Span {
            start: Position(0, Rc::clone(&file)),
            end: parser.end_of_file(),
        },
    };

    ParseOutput { module, errors }
}
