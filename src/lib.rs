#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::statements::ModuleStmt,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::{parse_with_options, ParseOptions},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// Source range of a token or node. `start` is inclusive, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Joins two spans into one covering both.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

/// Result of parsing one module: every statement that parsed, plus every error
/// met along the way. Both can be non-empty at once.
#[derive(Debug)]
pub struct ParseOutput {
    pub module: ModuleStmt,
    pub errors: Vec<Error>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenizes and parses a whole module.
///
/// A lexical error aborts immediately and yields an empty module carrying
/// that single error.
pub fn parse_source(source: &str, file: Option<String>) -> ParseOutput {
    parse_source_with_options(source, file, ParseOptions::default())
}

pub fn parse_source_with_options(
    source: &str,
    file: Option<String>,
    options: ParseOptions,
) -> ParseOutput {
    let file_name = Rc::new(file.clone().unwrap_or_else(|| String::from("shell")));

    match tokenize(source, file) {
        Ok(tokens) => parse_with_options(tokens, file_name, options),
        Err(error) => ParseOutput {
            module: ModuleStmt::empty(file_name),
            errors: vec![error],
        },
    }
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text and the offset of the
/// position within that line, or `None` when the offset is past the end.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // End of input, possibly right after a trailing newline.
    if content.ends_with('\n') || content.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        let last = content.rsplit('\n').next().unwrap_or("");
        Some((line_number - 1, last.to_string(), last.len()))
    }
}

/// Renders an error against its source in the driver's diagnostic layout.
pub fn render_error(error: &Error, source: &str, file_name: &str) -> String {
    /*
        Error: UnexpectedToken (expected one of `in`, found `then`)
        -> main.stlc
           |
        20 | let x = 2 then x
           | ----------^
    */

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file_name));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = line_text[..line_pos.min(line_text.len())].chars().count();
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str, file_name: &str) {
    eprint!("{}", render_error(error, source, file_name));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nsecond\nthird\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 35).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position("abc", 10).is_none());
        let (line_number, line, line_pos) = super::get_line_at_position("abc", 3).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "abc");
        assert_eq!(line_pos, 3);
    }

    #[test]
    fn test_render_error_points_at_column() {
        let output = super::parse_source("x = 1\ny = let z = 2 then z\n", None);
        assert_eq!(output.errors.len(), 1);

        let rendered = super::render_error(&output.errors[0], "x = 1\ny = let z = 2 then z\n", "t.stlc");
        assert!(rendered.starts_with("Error: UnexpectedToken"));
        assert!(rendered.contains("-> t.stlc"));
        assert!(rendered.contains("2 | y = let z = 2 then z"));
        assert!(rendered.contains("|") && rendered.trim_end().ends_with('^'));
    }
}
