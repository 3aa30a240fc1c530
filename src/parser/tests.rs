//! Unit tests for the parser module.
//!
//! Trees are compared through their span-free s-expression dump. Terms are
//! parsed as the right-hand side of `it = ...` and types as the signature
//! of `T : ...`.

use rstest::rstest;

use crate::{
    ast::{ast::Stmt, dump::to_sexpr},
    errors::errors::{ErrorClass, ErrorImpl},
    lexer::tokens::TokenKind,
    parse_source, parse_source_with_options,
    parser::parser::ParseOptions,
    ParseOutput,
};

fn messages(output: &ParseOutput) -> Vec<String> {
    output.errors.iter().map(|e| e.get_message()).collect()
}

fn parse_ok(source: &str) -> ParseOutput {
    let output = parse_source(source, Some(String::from("test.stlc")));
    assert!(output.is_ok(), "unexpected errors: {:?}", messages(&output));
    output
}

fn term(source: &str) -> String {
    let output = parse_ok(&format!("it = {}\n", source));
    assert_eq!(output.module.len(), 1);
    to_sexpr(&output.module.body[0].to_json()["value"])
}

fn ty(source: &str) -> String {
    let output = parse_ok(&format!("T : {}\n", source));
    assert_eq!(output.module.len(), 1);
    to_sexpr(&output.module.body[0].to_json()["signature"])
}

fn statements(source: &str) -> Vec<String> {
    parse_ok(source)
        .module
        .iter()
        .map(|stmt| to_sexpr(&stmt.to_json()))
        .collect()
}

// APPLICATION

#[test]
fn test_application_is_left_associative() {
    assert_eq!(
        term("f a b c"),
        "(Application (Application (Application (Identifier f) (Identifier a)) (Identifier b)) (Identifier c))"
    );
}

#[test]
fn test_type_argument_does_not_swallow_list_literal() {
    assert_eq!(
        term("count Int [1, 2:Int]"),
        "(Application (Application (Identifier count) (TypeIdentifier Int)) \
         (ListLiteral [(Integer 1) (Integer 2)] (TypeIdentifier Int)))"
    );
}

#[test]
fn test_constructor_application_needs_parentheses_as_argument() {
    assert_eq!(
        term("f List Int [1:Int]"),
        "(Application (Application (Application (Identifier f) (TypeIdentifier List)) (TypeIdentifier Int)) \
         (ListLiteral [(Integer 1)] (TypeIdentifier Int)))"
    );
    assert_eq!(
        term("f (List Int) [1:Int]"),
        "(Application (Application (Identifier f) (TypeParens (TypeApplication List (TypeIdentifier Int)))) \
         (ListLiteral [(Integer 1)] (TypeIdentifier Int)))"
    );
}

#[rstest]
#[case("f [Int]", "(Application (Identifier f) (ListBracket (TypeIdentifier Int)))")]
#[case("f _", "(Application (Identifier f) (Hole))")]
#[case(
    "f (Forall T, T)",
    "(Application (Identifier f) (TypeParens (Forall T (TypeIdentifier T))))"
)]
#[case(
    "f ((Int, Bool))",
    "(Application (Identifier f) (TypeParens (Product (TypeIdentifier Int) (TypeIdentifier Bool))))"
)]
#[case(
    "f ((g x))",
    "(Application (Identifier f) (Parens (Parens (Application (Identifier g) (Identifier x)))))"
)]
#[case(
    "f [x : Int]",
    "(Application (Identifier f) (ListLiteral [(Identifier x)] (TypeIdentifier Int)))"
)]
fn test_argument_kind_is_decided_past_brackets(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(term(source), expected);
}

// TYPES

#[test]
fn test_sum_binds_tighter_than_arrow() {
    assert_eq!(
        ty("A -> B + C -> D"),
        "(Arrow (TypeIdentifier A) (Arrow (Sum (TypeIdentifier B) (TypeIdentifier C)) (TypeIdentifier D)))"
    );
}

#[rstest]
#[case("A + B + C", "(Sum (Sum (TypeIdentifier A) (TypeIdentifier B)) (TypeIdentifier C))")]
#[case("A + B -> C", "(Arrow (Sum (TypeIdentifier A) (TypeIdentifier B)) (TypeIdentifier C))")]
#[case("Either A B", "(TypeApplication Either (TypeApplication A (TypeIdentifier B)))")]
#[case("List (List Int)", "(TypeApplication List (TypeParens (TypeApplication List (TypeIdentifier Int))))")]
#[case("IO Unit -> Int", "(Arrow (TypeApplication IO (TypeIdentifier Unit)) (TypeIdentifier Int))")]
#[case("(Int, [Bool])", "(Product (TypeIdentifier Int) (ListBracket (TypeIdentifier Bool)))")]
#[case("_ -> A", "(Arrow (Hole) (TypeIdentifier A))")]
#[case("Forall T, T -> T", "(Forall T (Arrow (TypeIdentifier T) (TypeIdentifier T)))")]
#[case("Forall T : K, T", "(Forall T (TypeIdentifier K) (TypeIdentifier T))")]
#[case(
    "Int -> Forall T, T + Int",
    "(Arrow (TypeIdentifier Int) (Forall T (Sum (TypeIdentifier T) (TypeIdentifier Int))))"
)]
fn test_type_ladder(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(ty(source), expected);
}

#[test]
fn test_product_type_spans_lines_inside_parentheses() {
    assert_eq!(
        ty("(Int,\n  Bool)"),
        "(Product (TypeIdentifier Int) (TypeIdentifier Bool))"
    );
}

// KEYWORD-LED FORMS

#[test]
fn test_let_value_stops_before_in() {
    assert_eq!(term("let x = 2 in x"), "(Let x (Integer 2) (Identifier x))");
    assert_eq!(
        term("let _ = a + b in c"),
        "(Let _ (InfixChain (Identifier a) [(+ (Identifier b))]) (Identifier c))"
    );
}

#[test]
fn test_let_value_rejects_keyword_forms() {
    let output = parse_source("x = let y = if a then b else c in y\n", None);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_error_name(), "UnexpectedToken");
    assert_eq!(output.errors[0].get_position().0, 12);

    let output = parse_source("x = let y = (if a then b else c) in y\n", None);
    assert!(output.is_ok());
}

#[test]
fn test_if_across_lines() {
    assert_eq!(term("if b then 1 else 2"), "(If (Identifier b) (Integer 1) (Integer 2))");
    assert_eq!(
        term("if b then\n  1\nelse\n  2"),
        "(If (Identifier b) (Integer 1) (Integer 2))"
    );
}

#[rstest]
#[case(
    "fun x : Int, x + 1",
    "(FunTerm x (TypeIdentifier Int) (InfixChain (Identifier x) [(+ (Integer 1))]))"
)]
#[case("fun _ : Unit, 0", "(FunTerm _ (TypeIdentifier Unit) (Integer 0))")]
#[case("fun T, fun x : T, x", "(FunType T (FunTerm x (TypeIdentifier T) (Identifier x)))")]
#[case("fun T : K,\n  0", "(FunType T (TypeIdentifier K) (Integer 0))")]
fn test_fun_forms(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(term(source), expected);
}

#[test]
fn test_case_with_braces() {
    assert_eq!(
        term("case e of { | inl x => a | inr y => b }"),
        "(Case (Identifier e) [(InlArm x (Identifier a)) (InrArm y (Identifier b))])"
    );
    assert_eq!(
        term("case e of {\n  | inl x => a\n  | inr y => b\n}"),
        "(Case (Identifier e) [(InlArm x (Identifier a)) (InrArm y (Identifier b))])"
    );
}

#[test]
fn test_case_missing_close_brace() {
    let output = parse_source("it = case e of { | inl x => a | inr y => b\n", None);
    assert_eq!(output.module.len(), 0);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_class(), ErrorClass::UnterminatedBlock);
    assert!(matches!(
        output.errors[0].get_impl(),
        ErrorImpl::UnterminatedBlock { .. }
    ));
    // The error covers the opening brace
    assert_eq!(output.errors[0].get_position().0, 15);
}

#[test]
fn test_unbraced_arms_continue_across_lines() {
    let stmts = statements("f = lcase xs of\n  | nil => 0\n  | cons h t => h\ng = 1\n");
    assert_eq!(
        stmts,
        vec![
            "(ValueDefinition f (LCase (Identifier xs) [(NilArm (Integer 0)) (ConsArm h t (Identifier h))]))",
            "(ValueDefinition g (Integer 1))",
        ]
    );
}

#[test]
fn test_case_records_braces() {
    let output = parse_ok("a = case e of | inl x => x | inr y => y\nb = case e of { | inl x => x }\n");
    let rendered = output.module.to_source();
    assert_eq!(
        rendered,
        "a = case e of | inl x => x | inr y => y\nb = case e of { | inl x => x }\n"
    );
}

// CHAINS AND PRIMARIES

#[rstest]
#[case("1 + 2 * 3", "(InfixChain (Integer 1) [(+ (Integer 2)) (* (Integer 3))])")]
#[case("f x <> g y", "(InfixChain (Application (Identifier f) (Identifier x)) [(<> (Application (Identifier g) (Identifier y)))])")]
#[case("~ x", "(Prefix ~ (Identifier x))")]
#[case("a - - b", "(InfixChain (Identifier a) [(- (Prefix - (Identifier b)))])")]
#[case("f x", "(Application (Identifier f) (Identifier x))")]
fn test_infix_chain_is_flat(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(term(source), expected);
}

#[rstest]
#[case("42", "(Integer 42)")]
#[case("true", "(Boolean true)")]
#[case("()", "(Unit)")]
#[case("(1, ())", "(Pair (Integer 1) (Unit))")]
#[case("(f x)", "(Parens (Application (Identifier f) (Identifier x)))")]
#[case("[ : Int]", "(ListLiteral [] (TypeIdentifier Int))")]
#[case("[1, : Int]", "(ListLiteral [(Integer 1)] (TypeIdentifier Int))")]
#[case("[1,\n 2 : Int]", "(ListLiteral [(Integer 1) (Integer 2)] (TypeIdentifier Int))")]
#[case("'a'", "(CharLiteral a)")]
#[case("\"hi\"", "(StringLiteral hi)")]
#[case("std.list.map", "(Identifier std.list.map)")]
#[case(
    "inl 1 (Int + Bool)",
    "(Injection inl (Integer 1) (TypeParens (Sum (TypeIdentifier Int) (TypeIdentifier Bool))))"
)]
#[case("inr x Int", "(Injection inr (Identifier x) (TypeIdentifier Int))")]
#[case("nil Int", "(Nil (TypeIdentifier Int))")]
fn test_primaries(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(term(source), expected);
}

#[rstest]
#[case("__readline", "(IOPrimitive Readline)")]
#[case("__print \"hi\"", "(IOPrimitive Print (StringLiteral hi))")]
#[case("__pure Int 1", "(IOPrimitive Pure (TypeIdentifier Int) (Integer 1))")]
#[case(
    "__bind String Unit f __readline",
    "(IOPrimitive Bind (TypeIdentifier String) (TypeIdentifier Unit) (Identifier f) (IOPrimitive Readline))"
)]
#[case("panic Int \"boom\"", "(IOPrimitive Panic (TypeIdentifier Int) (StringLiteral boom))")]
#[case("trace 3 x", "(IOPrimitive Trace 3 (Identifier x))")]
fn test_io_builtins_have_fixed_arity(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(term(source), expected);
}

#[test]
fn test_io_builtin_is_an_ordinary_argument() {
    assert_eq!(
        term("f (__print x) y"),
        "(Application (Application (Identifier f) (Parens (IOPrimitive Print (Identifier x)))) (Identifier y))"
    );
}

// LAYOUT

#[test]
fn test_application_does_not_cross_newline() {
    let output = parse_source("it = f\n  x\n", None);
    assert!(!output.is_ok() || output.module.len() == 2);
    assert_eq!(
        to_sexpr(&output.module.body[0].to_json()["value"]),
        "(Identifier f)"
    );

    assert_eq!(
        term("(f\n  x)"),
        "(Parens (Application (Identifier f) (Identifier x)))"
    );
}

#[test]
fn test_comments_inside_parentheses_are_ignored() {
    assert_eq!(
        term("(f -- the function\n  x)"),
        "(Parens (Application (Identifier f) (Identifier x)))"
    );
}

// STATEMENTS

#[test]
fn test_statements() {
    let stmts = statements(
        "import std.list\n\
         infixl a <+> b = a\n\
         prefix ~ _ = 0\n\
         x = 1\n",
    );
    assert_eq!(
        stmts,
        vec![
            "(Import [std list])",
            "(FixityDeclaration infixl <+> [a b] (Identifier a))",
            "(FixityDeclaration prefix ~ [_] (Integer 0))",
            "(ValueDefinition x (Integer 1))",
        ]
    );
}

#[test]
fn test_declaration_absorbs_following_definition() {
    let stmts = statements("id : Int -> Int\nid = fun x : Int, x\n");
    assert_eq!(
        stmts,
        vec![
            "(Declaration id (Arrow (TypeIdentifier Int) (TypeIdentifier Int)) \
             (Definition id (FunTerm x (TypeIdentifier Int) (Identifier x))))"
        ]
    );
}

#[test]
fn test_declaration_definition_name_is_not_checked() {
    let stmts = statements("f : Int\ng = 1\n");
    assert_eq!(
        stmts,
        vec!["(Declaration f (TypeIdentifier Int) (Definition g (Integer 1)))"]
    );
}

#[test]
fn test_consecutive_signatures_stay_separate() {
    let stmts = statements("f : Int\ng : Bool\n");
    assert_eq!(
        stmts,
        vec![
            "(Declaration f (TypeIdentifier Int))",
            "(Declaration g (TypeIdentifier Bool))",
        ]
    );
}

#[test]
fn test_type_alias_declaration() {
    let stmts = statements("Pair : Type\n-- definition follows\nPair = (Int, Int)\nMaybe : Type -> Type\n");
    assert_eq!(
        stmts,
        vec![
            "(TypeAliasDeclaration Pair (TypeIdentifier Type) \
             (TypeDefinition Pair (Product (TypeIdentifier Int) (TypeIdentifier Int))))",
            "(TypeAliasDeclaration Maybe (Arrow (TypeIdentifier Type) (TypeIdentifier Type)))",
        ]
    );
}

#[test]
fn test_blank_and_comment_lines_are_separators() {
    let stmts = statements("-- header\n\nx = 1 -- trailing\n\n-- between\n\ny = 2");
    assert_eq!(
        stmts,
        vec!["(ValueDefinition x (Integer 1))", "(ValueDefinition y (Integer 2))"]
    );
}

#[test]
fn test_statement_spans() {
    let output = parse_ok("x = f y\nid : Int\nid = 1\n");
    let first = output.module.body[0].to_json();
    assert_eq!(first["span"]["start"], 0);
    assert_eq!(first["span"]["end"], 7);
    assert_eq!(first["value"]["span"]["start"], 4);
    assert_eq!(first["value"]["span"]["end"], 7);

    // The declaration covers both of its lines
    let second = output.module.body[1].get_span();
    assert_eq!(second.start.0, 8);
    assert_eq!(second.end.0, 23);
}

// ERRORS AND RECOVERY

#[test]
fn test_recovery_skips_failed_statement() {
    let output = parse_source("x = 1\ny = )\nz = 3\n", None);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_position().0, 10);
    assert_eq!(output.errors[0].get_class(), ErrorClass::Parse);

    let names = output
        .module
        .iter()
        .map(|stmt| stmt.to_json()["name"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["x", "z"]);
}

#[test]
fn test_errors_accumulate_across_statements() {
    let output = parse_source("a = (\nb = 2\nc = ]\nd = 4\n", None);
    assert_eq!(output.errors.len(), 2);
    assert_eq!(
        statement_sexprs(&output),
        vec!["(ValueDefinition b (Integer 2))", "(ValueDefinition d (Integer 4))"]
    );
}

fn statement_sexprs(output: &ParseOutput) -> Vec<String> {
    output
        .module
        .iter()
        .map(|stmt| to_sexpr(&stmt.to_json()))
        .collect()
}

#[rstest]
#[case("a = (1 + 2\nb = 3\n", ErrorClass::Parse, vec!["(ValueDefinition b (Integer 3))"])]
#[case("x : Int\nx = [1, 2\ny = 5\n", ErrorClass::Parse, vec!["(ValueDefinition y (Integer 5))"])]
#[case(
    "f = case e of { | inl x => a | inr y => b\ng = 1\nh = 2\n",
    ErrorClass::UnterminatedBlock,
    vec!["(ValueDefinition g (Integer 1))", "(ValueDefinition h (Integer 2))"]
)]
#[case("T : (Int,\nU : Bool\n", ErrorClass::Parse, vec!["(TypeAliasDeclaration U (TypeIdentifier Bool))"])]
fn test_unclosed_group_stops_at_next_statement(
    #[case] source: &str,
    #[case] class: ErrorClass,
    #[case] expected: Vec<&str>,
) {
    let output = parse_source(source, None);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_class(), class);
    assert_eq!(statement_sexprs(&output), expected);
}

#[test]
fn test_unclosed_group_fails_at_the_line_break() {
    let output = parse_source("a = (1 + 2\nb = 3\n", None);
    assert_eq!(output.errors[0].get_position().0, 10);
    assert_eq!(
        output.errors[0].get_message(),
        "unexpected token newline, expected one of `,`, `)`"
    );
}

#[test]
fn test_column_zero_continuation_inside_group() {
    let output = parse_ok("x = (1,\n2\n)\ny = [\n  1\n: Int]\n");
    assert_eq!(output.module.len(), 2);
}

#[test]
fn test_signature_still_reaches_its_definition() {
    let stmts = statements("x : Int\n\n-- value\nx = 1\n");
    assert_eq!(
        stmts,
        vec!["(Declaration x (TypeIdentifier Int) (Definition x (Integer 1)))"]
    );
}

#[test]
fn test_error_carries_expected_set() {
    let output = parse_source("x = (1 ]\n", None);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].get_expected(),
        &[TokenKind::Comma, TokenKind::CloseParen]
    );
    assert_eq!(
        output.errors[0].get_message(),
        "unexpected token `]`, expected one of `,`, `)`"
    );
}

#[test]
fn test_expected_set_at_term_start() {
    let output = parse_source("y = )\n", None);
    let expected = output.errors[0].get_expected();

    for kind in [
        TokenKind::If,
        TokenKind::Lcase,
        TokenKind::TermIdentifier,
        TokenKind::Readline,
        TokenKind::Print,
        TokenKind::Pure,
        TokenKind::Bind,
        TokenKind::Panic,
        TokenKind::Trace,
        TokenKind::Operator,
    ] {
        assert!(expected.contains(&kind), "{:?} missing from {:?}", kind, expected);
    }
}

#[test]
fn test_expected_set_after_prefix_operator() {
    let output = parse_source("x = ~ ~ y\n", None);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_position().0, 6);

    let expected = output.errors[0].get_expected();
    assert!(expected.contains(&TokenKind::Readline));
    assert!(expected.contains(&TokenKind::Trace));
    assert!(expected.contains(&TokenKind::OpenParen));
    assert!(!expected.contains(&TokenKind::Operator));
    assert!(!expected.contains(&TokenKind::If));
}

#[test]
fn test_expected_set_for_let_value() {
    let output = parse_source("z = let a = if b then 1 else 2 in a\n", None);
    assert_eq!(output.errors.len(), 1);

    let expected = output.errors[0].get_expected();
    assert!(expected.contains(&TokenKind::Operator));
    assert!(expected.contains(&TokenKind::Integer));
    assert!(!expected.contains(&TokenKind::If));
}

#[rstest]
#[case("import Std.List\n", 7)]
#[case("import std..list\n", 7)]
#[case("import\n", 6)]
fn test_import_path_must_be_a_term_identifier(#[case] source: &str, #[case] offset: u32) {
    let output = parse_source(source, None);
    assert_eq!(output.module.len(), 0);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_position().0, offset);
}

#[test]
fn test_trailing_tokens_fail_the_statement() {
    let output = parse_source("f : Int x\n", None);
    assert_eq!(output.module.len(), 0);
    assert_eq!(
        output.errors[0].get_expected(),
        &[TokenKind::Newline, TokenKind::EOF]
    );
}

#[test]
fn test_integer_overflow() {
    let output = parse_source("x = 99999999999999999999\n", None);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_error_name(), "NumberParseError");
}

#[test]
fn test_lex_error_aborts_module() {
    let output = parse_source("x = 1\ny = 'ab'\n", None);
    assert_eq!(output.module.len(), 0);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].get_class(), ErrorClass::Lex);
}

#[test]
fn test_token_budget_stops_between_statements() {
    let output = parse_source_with_options(
        "a = 1\nb = 2\nc = 3\n",
        None,
        ParseOptions {
            token_budget: Some(4),
        },
    );
    assert_eq!(output.module.len(), 2);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        output.errors[0].get_impl(),
        ErrorImpl::BudgetExceeded { budget: 4 }
    ));
}

// TREE ACCESS

#[test]
fn test_nodes_downcast_by_tag() {
    use crate::ast::{
        ast::{Expr, ExprType, StmtType, Type, TypeType},
        expressions::{ApplicationExpr, IdentifierExpr, TypeArgExpr},
        statements::ValueDefStmt,
        types::SymbolType,
    };

    let output = parse_ok("it = f Int\n");
    let stmt = &output.module.body[0];
    assert_eq!(stmt.get_stmt_type(), StmtType::ValueDefStmt);

    let def = stmt.as_any().downcast_ref::<ValueDefStmt>().unwrap();
    assert_eq!(def.name, "it");
    assert_eq!(def.value.get_expr_type(), ExprType::Application);

    let app = def.value.downcast::<ApplicationExpr>().unwrap();
    assert_eq!(app.function.downcast::<IdentifierExpr>().unwrap().name, "f");
    assert_eq!(app.argument.get_expr_type(), ExprType::TypeArgument);

    let arg = app.argument.downcast::<TypeArgExpr>().unwrap();
    assert_eq!(arg.ty.get_type_type(), TypeType::Symbol);
    assert_eq!(arg.ty.downcast::<SymbolType>().unwrap().name, "Int");
}

// ROUND TRIP

#[rstest]
#[case("x = f a b c\n")]
#[case("count : Forall T, [T] -> Int\ncount = fun T, fun xs : [T], lcase xs of | nil => 0 | cons _ t => 1 + count T t\n")]
#[case("main = __bind String Unit (fun s : String, __print s) __readline\n")]
#[case("infixr a ++ b = append a b\nprefix - a = neg a\ny = - 1 ++ 2\n")]
#[case("s = \"tab\\there \\u{1F600} \\\"q\\\"\"\nc = '\\''\n")]
#[case("e = case inl 1 (Int + Bool) of { | inl x => (x, x) | inr _ => (0, 0) }\n")]
#[case("Pair : Type\nPair = (Int, [Bool])\n")]
#[case("t = if let x = 1 in x then [1, 2 : Int] else nil Int\n")]
fn test_round_trip(#[case] source: &str) {
    let first = parse_ok(source);
    let rendered = first.module.to_source();
    let second = parse_ok(&rendered);

    assert_eq!(
        to_sexpr(&first.module.to_json()),
        to_sexpr(&second.module.to_json()),
        "rendered as {:?}",
        rendered
    );
}
