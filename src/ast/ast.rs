use std::{any::Any, fmt::Debug, ops::Deref};

use serde_json::Value;

use crate::Span;

/// Statement Types
///
/// Stable discriminant tags for top-level statements.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    ModuleStmt,
    ImportStmt,
    FixityDeclStmt,
    TypeAliasDeclStmt,
    DeclarationStmt,
    ValueDefStmt,
}

/// Statement Trait
///
/// Defines the behavior of all statement types in the tree.
pub trait Stmt: Debug {
    /// Returns the type of the statement.
    fn get_stmt_type(&self) -> StmtType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Clones the statement into a StmtWrapper.
    /// Clone cannot be derived for certain trait objects, so this method is necessary.
    fn clone_wrapper(&self) -> StmtWrapper;
    /// Returns the span of the statement.
    fn get_span(&self) -> &Span;
    /// Tag, span and named children as JSON.
    fn to_json(&self) -> Value;
    /// Canonical source text; reparses to the same tree.
    fn to_source(&self) -> String;
}

/// Statement Wrapper
///
/// A wrapper that allows for any statement kind to be stored with helper methods
#[derive(Debug)]
pub struct StmtWrapper(Box<dyn Stmt>);

impl StmtWrapper {
    pub fn new<T: Stmt + 'static>(stmt: T) -> Self {
        StmtWrapper(Box::new(stmt))
    }
}

impl Deref for StmtWrapper {
    type Target = Box<dyn Stmt>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Stmt for StmtWrapper {
    fn get_stmt_type(&self) -> StmtType {
        self.0.get_stmt_type()
    }
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        self.0.clone_wrapper()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
    fn to_json(&self) -> Value {
        self.0.to_json()
    }
    fn to_source(&self) -> String {
        self.0.to_source()
    }
}

impl Clone for StmtWrapper {
    fn clone(&self) -> Self {
        self.clone_wrapper()
    }
}

/// Expression Types
///
/// Defines the various kinds of term expressions in the tree.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    If,
    Let,
    FunTerm,
    FunType,
    Case,
    LCase,
    InfixChain,
    Prefix,
    Application,
    Integer,
    Boolean,
    Unit,
    Identifier,
    Parens,
    Pair,
    ListLiteral,
    Injection,
    Nil,
    IOPrimitive,
    Char,
    String,
    /// A type in term-application argument position.
    TypeArgument,
}

pub trait Expr: Debug {
    /// Returns the expression type of the expression.
    fn get_expr_type(&self) -> ExprType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Clones the expression into an ExprWrapper.
    /// Clone cannot be derived for certain trait objects, so this method is necessary.
    fn clone_wrapper(&self) -> ExprWrapper;
    /// Returns the span of the expression.
    fn get_span(&self) -> &Span;
    /// Tag, span and named children as JSON.
    fn to_json(&self) -> Value;
    /// Canonical source text; reparses to the same tree.
    fn to_source(&self) -> String;
}

/// Expression Wrapper
///
/// A wrapper that allows for any expression kind to be stored with helper methods
#[derive(Debug)]
pub struct ExprWrapper(Box<dyn Expr>);

impl ExprWrapper {
    pub fn new<T: Expr + 'static>(expression: T) -> Self {
        ExprWrapper(Box::new(expression))
    }

    /// Downcasts to a concrete expression node.
    pub fn downcast<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Expr for ExprWrapper {
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn get_expr_type(&self) -> ExprType {
        self.0.get_expr_type()
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        self.0.clone_wrapper()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
    fn to_json(&self) -> Value {
        self.0.to_json()
    }
    fn to_source(&self) -> String {
        self.0.to_source()
    }
}

impl Clone for ExprWrapper {
    fn clone(&self) -> Self {
        self.clone_wrapper()
    }
}

/// Type Types
///
/// Defines the various kinds of type expressions in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeType {
    Forall,
    Arrow,
    Sum,
    /// Type identifier or the hole `_`.
    Symbol,
    Parens,
    Product,
    List,
    Application,
}

/// Type Trait
///
/// Defines the behavior of all type kinds in the tree.
pub trait Type: Debug {
    /// Clones the type into a TypeWrapper.
    fn clone_wrapper(&self) -> TypeWrapper;
    /// Returns the type type of the type.
    fn get_type_type(&self) -> TypeType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Returns the span of the type.
    fn get_span(&self) -> &Span;
    /// Tag, span and named children as JSON.
    fn to_json(&self) -> Value;
    /// Canonical source text; reparses to the same tree.
    fn to_source(&self) -> String;
}

/// Type Wrapper
///
/// A wrapper that allows for any type kind to be stored with helper methods
#[derive(Debug)]
pub struct TypeWrapper(Box<dyn Type>);

impl TypeWrapper {
    pub fn new<T: Type + 'static>(type_: T) -> Self {
        TypeWrapper(Box::new(type_))
    }

    /// Downcasts to a concrete type node.
    pub fn downcast<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Type for TypeWrapper {
    fn clone_wrapper(&self) -> TypeWrapper {
        self.0.clone_wrapper()
    }
    fn get_type_type(&self) -> TypeType {
        self.0.get_type_type()
    }
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
    fn to_json(&self) -> Value {
        self.0.to_json()
    }
    fn to_source(&self) -> String {
        self.0.to_source()
    }
}

impl Clone for TypeWrapper {
    fn clone(&self) -> Self {
        self.clone_wrapper()
    }
}
