use std::{any::Any, fmt::Display};

use serde_json::{json, Value};

use crate::Span;

use super::{
    ast::{Expr, ExprType, ExprWrapper, Type, TypeWrapper},
    dump::{quote_literal, span_json},
};

/// A bound name, or the hole `_` when the value is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binder {
    Name(String),
    Hole,
}

impl Display for Binder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binder::Name(name) => write!(f, "{}", name),
            Binder::Hole => write!(f, "_"),
        }
    }
}

/// Which branch of a two-way sum an injection or arm refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionTag {
    Inl,
    Inr,
}

impl InjectionTag {
    pub fn keyword(&self) -> &'static str {
        match self {
            InjectionTag::Inl => "inl",
            InjectionTag::Inr => "inr",
        }
    }
}

// KEYWORD-LED FORMS

/// `if cond then t else u`
#[derive(Debug, Clone)]
pub struct IfExpr {
    pub condition: ExprWrapper,
    pub then_branch: ExprWrapper,
    pub else_branch: ExprWrapper,
    pub span: Span,
}

impl Expr for IfExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::If
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "If",
            "span": span_json(&self.span),
            "condition": self.condition.to_json(),
            "then": self.then_branch.to_json(),
            "else": self.else_branch.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!(
            "if {} then {} else {}",
            self.condition.to_source(),
            self.then_branch.to_source(),
            self.else_branch.to_source()
        )
    }
}

/// `let x = value in body`. The value is an infix chain, never a
/// keyword-led form.
#[derive(Debug, Clone)]
pub struct LetExpr {
    pub binder: Binder,
    pub value: ExprWrapper,
    pub body: ExprWrapper,
    pub span: Span,
}

impl Expr for LetExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Let
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Let",
            "span": span_json(&self.span),
            "binder": self.binder.to_string(),
            "value": self.value.to_json(),
            "body": self.body.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!(
            "let {} = {} in {}",
            self.binder,
            self.value.to_source(),
            self.body.to_source()
        )
    }
}

/// `fun x : T, body`
#[derive(Debug, Clone)]
pub struct FunTermExpr {
    pub binder: Binder,
    pub param_type: TypeWrapper,
    pub body: ExprWrapper,
    pub span: Span,
}

impl Expr for FunTermExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::FunTerm
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "FunTerm",
            "span": span_json(&self.span),
            "binder": self.binder.to_string(),
            "type": self.param_type.to_json(),
            "body": self.body.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!(
            "fun {} : {}, {}",
            self.binder,
            self.param_type.to_source(),
            self.body.to_source()
        )
    }
}

/// `fun T [: sort], body`
#[derive(Debug, Clone)]
pub struct FunTypeExpr {
    pub variable: String,
    pub sort: Option<TypeWrapper>,
    pub body: ExprWrapper,
    pub span: Span,
}

impl Expr for FunTypeExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::FunType
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "FunType",
            "span": span_json(&self.span),
            "variable": self.variable,
            "sort": self.sort.as_ref().map(|sort| sort.to_json()),
            "body": self.body.to_json(),
        })
    }
    fn to_source(&self) -> String {
        match &self.sort {
            Some(sort) => format!(
                "fun {} : {}, {}",
                self.variable,
                sort.to_source(),
                self.body.to_source()
            ),
            None => format!("fun {}, {}", self.variable, self.body.to_source()),
        }
    }
}

/// `| inl x => body` or `| inr x => body`
#[derive(Debug, Clone)]
pub struct CaseArm {
    pub tag: InjectionTag,
    pub binder: Binder,
    pub body: ExprWrapper,
    pub span: Span,
}

impl CaseArm {
    fn to_json(&self) -> Value {
        let kind = match self.tag {
            InjectionTag::Inl => "InlArm",
            InjectionTag::Inr => "InrArm",
        };
        json!({
            "kind": kind,
            "span": span_json(&self.span),
            "binder": self.binder.to_string(),
            "body": self.body.to_json(),
        })
    }

    fn to_source(&self) -> String {
        format!("| {} {} => {}", self.tag.keyword(), self.binder, self.body.to_source())
    }
}

/// `case scrutinee of [{] arm+ [}]`
#[derive(Debug, Clone)]
pub struct CaseExpr {
    pub scrutinee: ExprWrapper,
    pub arms: Vec<CaseArm>,
    pub braced: bool,
    pub span: Span,
}

impl Expr for CaseExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Case
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Case",
            "span": span_json(&self.span),
            "scrutinee": self.scrutinee.to_json(),
            "arms": self.arms.iter().map(|arm| arm.to_json()).collect::<Vec<_>>(),
        })
    }
    fn to_source(&self) -> String {
        let arms = self
            .arms
            .iter()
            .map(|arm| arm.to_source())
            .collect::<Vec<_>>();
        render_arm_block("case", &self.scrutinee, &arms, self.braced)
    }
}

#[derive(Debug, Clone)]
pub enum ListPattern {
    Nil,
    Cons { head: Binder, tail: Binder },
}

/// `| nil => body` or `| cons h t => body`
#[derive(Debug, Clone)]
pub struct ListArm {
    pub pattern: ListPattern,
    pub body: ExprWrapper,
    pub span: Span,
}

impl ListArm {
    fn to_json(&self) -> Value {
        match &self.pattern {
            ListPattern::Nil => json!({
                "kind": "NilArm",
                "span": span_json(&self.span),
                "body": self.body.to_json(),
            }),
            ListPattern::Cons { head, tail } => json!({
                "kind": "ConsArm",
                "span": span_json(&self.span),
                "head": head.to_string(),
                "tail": tail.to_string(),
                "body": self.body.to_json(),
            }),
        }
    }

    fn to_source(&self) -> String {
        match &self.pattern {
            ListPattern::Nil => format!("| nil => {}", self.body.to_source()),
            ListPattern::Cons { head, tail } => {
                format!("| cons {} {} => {}", head, tail, self.body.to_source())
            }
        }
    }
}

/// `lcase scrutinee of [{] arm+ [}]`
#[derive(Debug, Clone)]
pub struct LCaseExpr {
    pub scrutinee: ExprWrapper,
    pub arms: Vec<ListArm>,
    pub braced: bool,
    pub span: Span,
}

impl Expr for LCaseExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::LCase
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "LCase",
            "span": span_json(&self.span),
            "scrutinee": self.scrutinee.to_json(),
            "arms": self.arms.iter().map(|arm| arm.to_json()).collect::<Vec<_>>(),
        })
    }
    fn to_source(&self) -> String {
        let arms = self
            .arms
            .iter()
            .map(|arm| arm.to_source())
            .collect::<Vec<_>>();
        render_arm_block("lcase", &self.scrutinee, &arms, self.braced)
    }
}

fn render_arm_block(keyword: &str, scrutinee: &ExprWrapper, arms: &[String], braced: bool) -> String {
    if braced {
        format!("{} {} of {{ {} }}", keyword, scrutinee.to_source(), arms.join(" "))
    } else {
        format!("{} {} of {}", keyword, scrutinee.to_source(), arms.join(" "))
    }
}

// CHAINS

/// `a op b op c`: one flat, left-associative precedence level. Only built
/// when at least one operator is present.
#[derive(Debug, Clone)]
pub struct InfixChainExpr {
    pub first: ExprWrapper,
    pub rest: Vec<(String, ExprWrapper)>,
    pub span: Span,
}

impl Expr for InfixChainExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::InfixChain
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        let rest = self
            .rest
            .iter()
            .map(|(operator, right)| json!({ "operator": operator, "right": right.to_json() }))
            .collect::<Vec<_>>();
        json!({
            "kind": "InfixChain",
            "span": span_json(&self.span),
            "left": self.first.to_json(),
            "rest": rest,
        })
    }
    fn to_source(&self) -> String {
        let mut out = self.first.to_source();
        for (operator, right) in &self.rest {
            out.push_str(&format!(" {} {}", operator, right.to_source()));
        }
        out
    }
}

/// `op operand`, the use site of a `prefix` declaration.
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: String,
    pub operand: ExprWrapper,
    pub span: Span,
}

impl Expr for PrefixExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Prefix
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Prefix",
            "span": span_json(&self.span),
            "operator": self.operator,
            "operand": self.operand.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("{} {}", self.operator, self.operand.to_source())
    }
}

/// `f x`, binary and left associative.
#[derive(Debug, Clone)]
pub struct ApplicationExpr {
    pub function: ExprWrapper,
    pub argument: ExprWrapper,
    pub span: Span,
}

impl Expr for ApplicationExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Application
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Application",
            "span": span_json(&self.span),
            "function": self.function.to_json(),
            "argument": self.argument.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("{} {}", self.function.to_source(), self.argument.to_source())
    }
}

/// A type standing in term-application argument position, e.g. `Int` in
/// `count Int xs`. Its span and JSON are those of the type itself.
#[derive(Debug, Clone)]
pub struct TypeArgExpr {
    pub ty: TypeWrapper,
}

impl Expr for TypeArgExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::TypeArgument
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        self.ty.get_span()
    }
    fn to_json(&self) -> Value {
        self.ty.to_json()
    }
    fn to_source(&self) -> String {
        self.ty.to_source()
    }
}

// LITERALS

#[derive(Debug, Clone)]
pub struct IntegerExpr {
    pub value: u64,
    pub span: Span,
}

impl Expr for IntegerExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Integer
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "Integer", "span": span_json(&self.span), "value": self.value })
    }
    fn to_source(&self) -> String {
        self.value.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

impl Expr for BooleanExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Boolean
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "Boolean", "span": span_json(&self.span), "value": self.value })
    }
    fn to_source(&self) -> String {
        self.value.to_string()
    }
}

/// `()`
#[derive(Debug, Clone)]
pub struct UnitExpr {
    pub span: Span,
}

impl Expr for UnitExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Unit
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "Unit", "span": span_json(&self.span) })
    }
    fn to_source(&self) -> String {
        String::from("()")
    }
}

/// Identifier Expression
/// A term identifier; may contain `.`, `_` and `'` after the first letter.
#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

impl Expr for IdentifierExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Identifier
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "Identifier", "span": span_json(&self.span), "name": self.name })
    }
    fn to_source(&self) -> String {
        self.name.clone()
    }
}

/// `(expr)`: groups a complete term, keyword-led forms included.
#[derive(Debug, Clone)]
pub struct ParensExpr {
    pub inner: ExprWrapper,
    pub span: Span,
}

impl Expr for ParensExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Parens
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "Parens", "span": span_json(&self.span), "inner": self.inner.to_json() })
    }
    fn to_source(&self) -> String {
        format!("({})", self.inner.to_source())
    }
}

/// `(a, b)`
#[derive(Debug, Clone)]
pub struct PairExpr {
    pub left: ExprWrapper,
    pub right: ExprWrapper,
    pub span: Span,
}

impl Expr for PairExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Pair
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Pair",
            "span": span_json(&self.span),
            "left": self.left.to_json(),
            "right": self.right.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("({}, {})", self.left.to_source(), self.right.to_source())
    }
}

/// `[e1, e2, ... : T]`; the element type annotation is mandatory.
#[derive(Debug, Clone)]
pub struct ListLiteralExpr {
    pub elements: Vec<ExprWrapper>,
    pub element_type: TypeWrapper,
    pub span: Span,
}

impl Expr for ListLiteralExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::ListLiteral
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "ListLiteral",
            "span": span_json(&self.span),
            "elements": self.elements.iter().map(|e| e.to_json()).collect::<Vec<_>>(),
            "type": self.element_type.to_json(),
        })
    }
    fn to_source(&self) -> String {
        let elements = self
            .elements
            .iter()
            .map(|e| e.to_source())
            .collect::<Vec<_>>();
        if elements.is_empty() {
            format!("[ : {}]", self.element_type.to_source())
        } else {
            format!("[{} : {}]", elements.join(", "), self.element_type.to_source())
        }
    }
}

/// `inl v T` / `inr v T`
#[derive(Debug, Clone)]
pub struct InjectionExpr {
    pub tag: InjectionTag,
    pub value: ExprWrapper,
    pub ty: TypeWrapper,
    pub span: Span,
}

impl Expr for InjectionExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Injection
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Injection",
            "span": span_json(&self.span),
            "tag": self.tag.keyword(),
            "value": self.value.to_json(),
            "type": self.ty.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!(
            "{} {} {}",
            self.tag.keyword(),
            self.value.to_source(),
            self.ty.to_source()
        )
    }
}

/// `nil T`
#[derive(Debug, Clone)]
pub struct NilExpr {
    pub ty: TypeWrapper,
    pub span: Span,
}

impl Expr for NilExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Nil
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "Nil", "span": span_json(&self.span), "type": self.ty.to_json() })
    }
    fn to_source(&self) -> String {
        format!("nil {}", self.ty.to_source())
    }
}

/// The fixed-arity IO builtins.
#[derive(Debug, Clone)]
pub enum IOPrimitive {
    Readline,
    Print {
        argument: ExprWrapper,
    },
    Pure {
        ty: TypeWrapper,
        argument: ExprWrapper,
    },
    Bind {
        domain: TypeWrapper,
        codomain: TypeWrapper,
        function: ExprWrapper,
        argument: ExprWrapper,
    },
    Panic {
        ty: TypeWrapper,
        argument: ExprWrapper,
    },
    Trace {
        index: u64,
        argument: ExprWrapper,
    },
}

#[derive(Debug, Clone)]
pub struct IOPrimitiveExpr {
    pub primitive: IOPrimitive,
    pub span: Span,
}

impl Expr for IOPrimitiveExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::IOPrimitive
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        let span = span_json(&self.span);
        match &self.primitive {
            IOPrimitive::Readline => json!({
                "kind": "IOPrimitive", "span": span, "primitive": "Readline",
            }),
            IOPrimitive::Print { argument } => json!({
                "kind": "IOPrimitive", "span": span, "primitive": "Print",
                "argument": argument.to_json(),
            }),
            IOPrimitive::Pure { ty, argument } => json!({
                "kind": "IOPrimitive", "span": span, "primitive": "Pure",
                "type": ty.to_json(),
                "argument": argument.to_json(),
            }),
            IOPrimitive::Bind { domain, codomain, function, argument } => json!({
                "kind": "IOPrimitive", "span": span, "primitive": "Bind",
                "domain": domain.to_json(),
                "codomain": codomain.to_json(),
                "function": function.to_json(),
                "argument": argument.to_json(),
            }),
            IOPrimitive::Panic { ty, argument } => json!({
                "kind": "IOPrimitive", "span": span, "primitive": "Panic",
                "type": ty.to_json(),
                "argument": argument.to_json(),
            }),
            IOPrimitive::Trace { index, argument } => json!({
                "kind": "IOPrimitive", "span": span, "primitive": "Trace",
                "index": index,
                "argument": argument.to_json(),
            }),
        }
    }
    fn to_source(&self) -> String {
        match &self.primitive {
            IOPrimitive::Readline => String::from("__readline"),
            IOPrimitive::Print { argument } => format!("__print {}", argument.to_source()),
            IOPrimitive::Pure { ty, argument } => {
                format!("__pure {} {}", ty.to_source(), argument.to_source())
            }
            IOPrimitive::Bind { domain, codomain, function, argument } => format!(
                "__bind {} {} {} {}",
                domain.to_source(),
                codomain.to_source(),
                function.to_source(),
                argument.to_source()
            ),
            IOPrimitive::Panic { ty, argument } => {
                format!("panic {} {}", ty.to_source(), argument.to_source())
            }
            IOPrimitive::Trace { index, argument } => {
                format!("trace {} {}", index, argument.to_source())
            }
        }
    }
}

/// Char literal, already decoded by the lexer.
#[derive(Debug, Clone)]
pub struct CharExpr {
    pub value: char,
    pub span: Span,
}

impl Expr for CharExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Char
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "CharLiteral", "span": span_json(&self.span), "value": self.value.to_string() })
    }
    fn to_source(&self) -> String {
        quote_literal(&self.value.to_string(), '\'')
    }
}

/// String literal, already decoded by the lexer.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for StringExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::String
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "StringLiteral", "span": span_json(&self.span), "value": self.value })
    }
    fn to_source(&self) -> String {
        quote_literal(&self.value, '"')
    }
}
