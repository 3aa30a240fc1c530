//! Type expression nodes.
//!
//! The type grammar produces these from the four-layer ladder:
//! `Forall` binders, right-associative arrows, left-associative sums, and
//! primaries (identifiers, holes, parentheses, products, list brackets and
//! constructor application).

use std::any::Any;

use serde_json::{json, Value};

use crate::Span;

use super::{
    ast::{Type, TypeType, TypeWrapper},
    dump::span_json,
};

/// `Forall T [: sort], body`
#[derive(Debug, Clone)]
pub struct ForallType {
    pub variable: String,
    pub sort: Option<TypeWrapper>,
    pub body: TypeWrapper,
    pub span: Span,
}

impl Type for ForallType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Forall
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Forall",
            "span": span_json(&self.span),
            "variable": self.variable,
            "sort": self.sort.as_ref().map(|sort| sort.to_json()),
            "body": self.body.to_json(),
        })
    }
    fn to_source(&self) -> String {
        match &self.sort {
            Some(sort) => format!(
                "Forall {} : {}, {}",
                self.variable,
                sort.to_source(),
                self.body.to_source()
            ),
            None => format!("Forall {}, {}", self.variable, self.body.to_source()),
        }
    }
}

/// `A -> B`, right associative.
#[derive(Debug, Clone)]
pub struct ArrowType {
    pub left: TypeWrapper,
    pub right: TypeWrapper,
    pub span: Span,
}

impl Type for ArrowType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Arrow
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Arrow",
            "span": span_json(&self.span),
            "left": self.left.to_json(),
            "right": self.right.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("{} -> {}", self.left.to_source(), self.right.to_source())
    }
}

/// `A + B`, left associative and tighter than arrows.
#[derive(Debug, Clone)]
pub struct SumType {
    pub left: TypeWrapper,
    pub right: TypeWrapper,
    pub span: Span,
}

impl Type for SumType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Sum
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Sum",
            "span": span_json(&self.span),
            "left": self.left.to_json(),
            "right": self.right.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("{} + {}", self.left.to_source(), self.right.to_source())
    }
}

/// A type identifier, or the hole `_`.
///
/// Built-in scalar names such as `Int` are ordinary symbols; resolution
/// happens after parsing.
#[derive(Debug, Clone)]
pub struct SymbolType {
    pub name: String,
    pub span: Span,
}

impl SymbolType {
    pub fn is_hole(&self) -> bool {
        self.name == "_"
    }
}

impl Type for SymbolType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Symbol
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        if self.is_hole() {
            json!({ "kind": "Hole", "span": span_json(&self.span) })
        } else {
            json!({
                "kind": "TypeIdentifier",
                "span": span_json(&self.span),
                "name": self.name,
            })
        }
    }
    fn to_source(&self) -> String {
        self.name.clone()
    }
}

/// `(T)`
#[derive(Debug, Clone)]
pub struct ParenType {
    pub inner: TypeWrapper,
    pub span: Span,
}

impl Type for ParenType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Parens
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "TypeParens",
            "span": span_json(&self.span),
            "inner": self.inner.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("({})", self.inner.to_source())
    }
}

/// `(A, B)`
#[derive(Debug, Clone)]
pub struct ProductType {
    pub left: TypeWrapper,
    pub right: TypeWrapper,
    pub span: Span,
}

impl Type for ProductType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Product
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Product",
            "span": span_json(&self.span),
            "left": self.left.to_json(),
            "right": self.right.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("({}, {})", self.left.to_source(), self.right.to_source())
    }
}

/// `[T]`, sugar for the list type.
#[derive(Debug, Clone)]
pub struct ListType {
    pub element: TypeWrapper,
    pub span: Span,
}

impl Type for ListType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::List
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "ListBracket",
            "span": span_json(&self.span),
            "inner": self.element.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("[{}]", self.element.to_source())
    }
}

/// `Ctor Arg`. Single argument; `Either A B` nests to the right as
/// `Either (A B)` in tree form.
#[derive(Debug, Clone)]
pub struct ApplicationType {
    pub constructor: String,
    pub argument: TypeWrapper,
    pub span: Span,
}

impl Type for ApplicationType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Application
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "TypeApplication",
            "span": span_json(&self.span),
            "constructor": self.constructor,
            "argument": self.argument.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("{} {}", self.constructor, self.argument.to_source())
    }
}
