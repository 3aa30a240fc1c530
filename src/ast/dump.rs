//! Tree dumping helpers shared by every node's `to_json`/`to_source`.
//!
//! `to_sexpr` condenses a node's JSON into a span-free s-expression, which is
//! what golden tests and the CLI's `sexpr` format compare against.

use serde_json::{json, Value};

use crate::Span;

pub fn span_json(span: &Span) -> Value {
    json!({ "start": span.start.0, "end": span.end.0 })
}

/// Renders JSON produced by `to_json` as `(Kind child ...)`.
///
/// Object keys keep insertion order, `span` keys and `null` children are
/// dropped, arrays become `[...]`.
pub fn to_sexpr(value: &Value) -> String {
    let mut out = String::new();
    write_sexpr(value, &mut out);
    out
}

fn write_sexpr(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push('_'),
        Value::Bool(b) => out.push_str(&b.to_string()),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&atom(s)),
        Value::Array(items) => {
            out.push('[');
            let mut first = true;
            for item in items {
                if !first {
                    out.push(' ');
                }
                first = false;
                write_sexpr(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('(');
            let mut first = true;
            if let Some(Value::String(kind)) = map.get("kind") {
                out.push_str(kind);
                first = false;
            }
            for (key, child) in map {
                if key == "kind" || key == "span" || child.is_null() {
                    continue;
                }
                if !first {
                    out.push(' ');
                }
                first = false;
                write_sexpr(child, out);
            }
            out.push(')');
        }
    }
}

fn atom(s: &str) -> String {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '[' | ']' | '"'));
    if bare {
        s.to_string()
    } else {
        format!("{:?}", s)
    }
}

/// Quotes decoded literal text so the lexer decodes it back unchanged.
pub fn quote_literal(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\\' => out.push_str("\\\\"),
            '"' if quote == '"' => out.push_str("\\\""),
            '\'' if quote == '\'' => out.push_str("\\'"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
