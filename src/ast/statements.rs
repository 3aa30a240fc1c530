use std::{any::Any, fmt::Display, rc::Rc, slice::Iter};

use serde_json::{json, Value};

use crate::{Position, Span};

use super::{
    ast::{Expr, ExprWrapper, Stmt, StmtType, StmtWrapper, Type, TypeWrapper},
    dump::span_json,
    expressions::Binder,
};

/// Every top-level statement of one source file, in source order.
#[derive(Debug, Clone)]
pub struct ModuleStmt {
    pub body: Vec<StmtWrapper>,
    pub span: Span,
}

impl ModuleStmt {
    pub fn empty(file: Rc<String>) -> Self {
        ModuleStmt {
            body: vec![],
            span: Span {
                start: Position(0, Rc::clone(&file)),
                end: Position(0, file),
            },
        }
    }

    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Stmt for ModuleStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ModuleStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Module",
            "span": span_json(&self.span),
            "statements": self.body.iter().map(|stmt| stmt.to_json()).collect::<Vec<_>>(),
        })
    }
    fn to_source(&self) -> String {
        let mut out = String::new();
        for stmt in &self.body {
            out.push_str(&stmt.to_source());
            out.push('\n');
        }
        out
    }
}

/// `import module.path`
#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub path: Vec<String>,
    pub span: Span,
}

impl Stmt for ImportStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ImportStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({ "kind": "Import", "span": span_json(&self.span), "path": self.path })
    }
    fn to_source(&self) -> String {
        format!("import {}", self.path.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    InfixL,
    InfixR,
    Prefix,
}

impl Display for Fixity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fixity::InfixL => write!(f, "infixl"),
            Fixity::InfixR => write!(f, "infixr"),
            Fixity::Prefix => write!(f, "prefix"),
        }
    }
}

/// `infixl a op b = body`, `infixr a op b = body` or `prefix op a = body`.
///
/// Precedence and associativity are recorded here and applied by a later
/// pass; the parser itself keeps operator chains flat.
#[derive(Debug, Clone)]
pub struct FixityDeclStmt {
    pub fixity: Fixity,
    pub operator: String,
    /// Two binders for infix declarations, one for prefix.
    pub binders: Vec<Binder>,
    pub body: ExprWrapper,
    pub span: Span,
}

impl Stmt for FixityDeclStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::FixityDeclStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "FixityDeclaration",
            "span": span_json(&self.span),
            "fixity": self.fixity.to_string(),
            "operator": self.operator,
            "binders": self.binders.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
            "body": self.body.to_json(),
        })
    }
    fn to_source(&self) -> String {
        match (self.fixity, self.binders.as_slice()) {
            (Fixity::Prefix, [operand]) => format!(
                "prefix {} {} = {}",
                self.operator,
                operand,
                self.body.to_source()
            ),
            (_, [left, right]) => format!(
                "{} {} {} {} = {}",
                self.fixity,
                left,
                self.operator,
                right,
                self.body.to_source()
            ),
            _ => format!("{} {} = {}", self.fixity, self.operator, self.body.to_source()),
        }
    }
}

/// The optional `Name = Type` line following a type signature.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub name: String,
    pub ty: TypeWrapper,
    pub span: Span,
}

/// `Name : Type`, optionally followed by `Name = Type` on the next line.
#[derive(Debug, Clone)]
pub struct TypeAliasDeclStmt {
    pub name: String,
    pub signature: TypeWrapper,
    pub definition: Option<TypeDefinition>,
    pub span: Span,
}

impl Stmt for TypeAliasDeclStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::TypeAliasDeclStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "TypeAliasDeclaration",
            "span": span_json(&self.span),
            "name": self.name,
            "signature": self.signature.to_json(),
            "definition": self.definition.as_ref().map(|def| json!({
                "kind": "TypeDefinition",
                "span": span_json(&def.span),
                "name": def.name,
                "type": def.ty.to_json(),
            })),
        })
    }
    fn to_source(&self) -> String {
        let mut out = format!("{} : {}", self.name, self.signature.to_source());
        if let Some(def) = &self.definition {
            out.push_str(&format!("\n{} = {}", def.name, def.ty.to_source()));
        }
        out
    }
}

/// The optional `name = term` line following a declaration. The name is not
/// required to repeat the declared one; that check belongs to later passes.
#[derive(Debug, Clone)]
pub struct ValueDefinition {
    pub name: String,
    pub value: ExprWrapper,
    pub span: Span,
}

/// `name : Type`, optionally followed by `name = term` on the next line.
#[derive(Debug, Clone)]
pub struct DeclarationStmt {
    pub name: String,
    pub ty: TypeWrapper,
    pub definition: Option<ValueDefinition>,
    pub span: Span,
}

impl Stmt for DeclarationStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::DeclarationStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "Declaration",
            "span": span_json(&self.span),
            "name": self.name,
            "type": self.ty.to_json(),
            "definition": self.definition.as_ref().map(|def| json!({
                "kind": "Definition",
                "span": span_json(&def.span),
                "name": def.name,
                "value": def.value.to_json(),
            })),
        })
    }
    fn to_source(&self) -> String {
        let mut out = format!("{} : {}", self.name, self.ty.to_source());
        if let Some(def) = &self.definition {
            out.push_str(&format!("\n{} = {}", def.name, def.value.to_source()));
        }
        out
    }
}

/// `name = term` with no preceding signature.
#[derive(Debug, Clone)]
pub struct ValueDefStmt {
    pub name: String,
    pub value: ExprWrapper,
    pub span: Span,
}

impl Stmt for ValueDefStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ValueDefStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn to_json(&self) -> Value {
        json!({
            "kind": "ValueDefinition",
            "span": span_json(&self.span),
            "name": self.name,
            "value": self.value.to_json(),
        })
    }
    fn to_source(&self) -> String {
        format!("{} = {}", self.name, self.value.to_source())
    }
}
