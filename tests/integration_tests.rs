//! Integration tests for whole-module parsing.
//!
//! These tests drive complete programs through the public entry points:
//! tokenization, statement splitting, the term and type grammars, and error
//! recovery.

use serde_json::Value;
use stlcpp_syntax::{
    ast::{ast::Stmt, dump::to_sexpr},
    errors::errors::ErrorClass,
    parse_source, parse_source_with_options, render_error,
    parser::parser::ParseOptions,
    ParseOutput,
};

const LIST_MODULE: &str = "\
-- Basic list utilities
import std.prelude

infixr x ++ y = append x y
prefix ~ b = if b then false else true

Maybe : Type -> Type
Maybe = Forall A, A + Unit

map : Forall A, Forall B, (A -> B) -> List A -> List B
map = fun A, fun B, fun f : A -> B, fun xs : List A,
  lcase xs of
    | nil => nil B
    | cons h t => append [f h : B] (map A B f t)

main : IO Unit
main = __bind String Unit __readline (fun line : String, __print line)

swap = fun p : Int + Bool, case p of { | inl a => inr a Bool | inr b => inl b Int }
";

fn parse(source: &str) -> ParseOutput {
    parse_source(source, Some(String::from("list.stlc")))
}

fn kind_and_name(json: &Value) -> (String, Option<String>) {
    (
        json["kind"].as_str().unwrap_or_default().to_string(),
        json["name"].as_str().map(String::from),
    )
}

fn sexprs(output: &ParseOutput) -> Vec<String> {
    output.module.iter().map(|stmt| to_sexpr(&stmt.to_json())).collect()
}

#[test]
fn test_parse_realistic_module() {
    let output = parse(LIST_MODULE);
    assert!(
        output.is_ok(),
        "unexpected errors: {:?}",
        output.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>()
    );

    let statements = output
        .module
        .iter()
        .map(|stmt| kind_and_name(&stmt.to_json()))
        .collect::<Vec<_>>();

    assert_eq!(
        statements,
        vec![
            (String::from("Import"), None),
            (String::from("FixityDeclaration"), None),
            (String::from("FixityDeclaration"), None),
            (String::from("TypeAliasDeclaration"), Some(String::from("Maybe"))),
            (String::from("Declaration"), Some(String::from("map"))),
            (String::from("Declaration"), Some(String::from("main"))),
            (String::from("ValueDefinition"), Some(String::from("swap"))),
        ]
    );
}

#[test]
fn test_declarations_carry_their_definitions() {
    let output = parse(LIST_MODULE);
    let json = output.module.to_json();
    let statements = json["statements"].as_array().cloned().unwrap_or_default();

    let maybe = &statements[3];
    assert_eq!(maybe["definition"]["kind"], "TypeDefinition");
    assert_eq!(
        to_sexpr(&maybe["definition"]["type"]),
        "(Forall A (Sum (TypeIdentifier A) (TypeIdentifier Unit)))"
    );

    let map = &statements[4];
    assert_eq!(map["definition"]["kind"], "Definition");
    assert_eq!(map["definition"]["value"]["kind"], "FunType");
}

#[test]
fn test_statement_spans_slice_the_source() {
    let output = parse(LIST_MODULE);
    let prefixes = ["import", "infixr", "prefix", "Maybe :", "map :", "main :", "swap ="];

    for (stmt, prefix) in output.module.iter().zip(prefixes) {
        let span = stmt.get_span();
        let text = &LIST_MODULE[span.start.0 as usize..span.end.0 as usize];

        assert!(text.starts_with(prefix), "{:?} does not start with {:?}", text, prefix);
        assert_eq!(text, text.trim_end());
        assert_eq!(span.start.1.as_str(), "list.stlc");
    }

    let module_span = output.module.get_span();
    assert_eq!(module_span.start.0, 0);
    assert_eq!(module_span.end.0 as usize, LIST_MODULE.len());
}

#[test]
fn test_multiline_definition_spans_every_line() {
    let output = parse(LIST_MODULE);
    let map = &output.module.body[4];
    let span = map.get_span();
    let text = &LIST_MODULE[span.start.0 as usize..span.end.0 as usize];

    assert!(text.starts_with("map : Forall A"));
    assert!(text.ends_with("(map A B f t)"));
}

#[test]
fn test_rendered_module_reparses_identically() {
    let first = parse(LIST_MODULE);
    assert!(first.is_ok());

    let rendered = first.module.to_source();
    let second = parse(&rendered);

    assert!(
        second.is_ok(),
        "rendered source failed to parse:\n{}\n{:?}",
        rendered,
        second.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>()
    );
    assert_eq!(sexprs(&first), sexprs(&second));
}

#[test]
fn test_recovery_keeps_good_statements() {
    let source = "x = 1\ny = let z = 2 then z\nw = )\nv = 3\n";
    let output = parse(source);

    assert_eq!(output.errors.len(), 2);
    assert!(output
        .errors
        .iter()
        .all(|error| error.get_class() == ErrorClass::Parse));
    assert_eq!(
        sexprs(&output),
        vec!["(ValueDefinition x (Integer 1))", "(ValueDefinition v (Integer 3))"]
    );
}

#[test]
fn test_unclosed_brackets_do_not_swallow_later_statements() {
    let source = "\
f = case e of { | inl x => a | inr y => b
g = 1
h = (1 + 2
i : Int
i = [1, 2
j = 5
";
    let output = parse(source);

    assert_eq!(output.errors.len(), 3);
    assert_eq!(output.errors[0].get_class(), ErrorClass::UnterminatedBlock);
    assert_eq!(
        sexprs(&output),
        vec!["(ValueDefinition g (Integer 1))", "(ValueDefinition j (Integer 5))"]
    );
}

#[test]
fn test_errors_are_reported_in_source_order() {
    let source = "a = (1,\nb = 2\nc = [1 : ]\nd = 4\n";
    let output = parse(source);

    assert!(!output.is_ok());
    let offsets = output
        .errors
        .iter()
        .map(|error| error.get_position().0)
        .collect::<Vec<_>>();
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets, sorted);

    let names = output
        .module
        .iter()
        .filter_map(|stmt| kind_and_name(&stmt.to_json()).1)
        .collect::<Vec<_>>();
    assert!(names.contains(&String::from("d")));
}

#[test]
fn test_lex_error_yields_empty_module() {
    let output = parse("x = 1\ny = \"unterminated\nz = 3\n");

    assert!(output.module.is_empty());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_class(), ErrorClass::Lex);
    assert_eq!(output.errors[0].get_error_name(), "UnterminatedLiteral");
}

#[test]
fn test_token_budget_stops_long_modules() {
    let source = (0..50).map(|i| format!("v{} = {}\n", i, i)).collect::<String>();
    let output = parse_source_with_options(
        &source,
        None,
        ParseOptions {
            token_budget: Some(20),
        },
    );

    assert!(output.module.len() < 50);
    assert!(!output.module.is_empty());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_class(), ErrorClass::Budget);
}

#[test]
fn test_json_dump_is_serializable() {
    let output = parse(LIST_MODULE);
    let json = serde_json::to_string(&output.module.to_json()).unwrap_or_default();
    let value: Value = serde_json::from_str(&json).unwrap_or(Value::Null);

    assert_eq!(value["kind"], "Module");
    assert_eq!(value["statements"].as_array().map(|s| s.len()), Some(7));
    assert_eq!(value["statements"][0]["span"]["start"], 24);
}

#[test]
fn test_render_error_for_module() {
    let source = "ok = 1\nbad = if true then 1\n";
    let output = parse(source);

    assert_eq!(output.errors.len(), 1);
    let rendered = render_error(&output.errors[0], source, "list.stlc");
    assert!(rendered.starts_with("Error: UnexpectedToken"));
    assert!(rendered.contains("2 | bad = if true then 1"));
}
