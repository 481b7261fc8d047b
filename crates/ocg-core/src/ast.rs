//! Node model for the declarations a run emits.
//!
//! Generators build expressions the way a fluent code builder would
//! (`Expr::symbol(&oc).method("route", [obj])`) and hand finished
//! [`Declaration`]s to the emitter as [`Emission`]s. Nothing here knows how
//! the nodes are printed.

use indexmap::IndexMap;

use crate::symbols::{OutputFile, Symbol};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Symbol { symbol: Symbol },
    Ident { name: String },
    Literal { literal: Literal },
    /// Arbitrary JSON data printed as a literal.
    Value { value: serde_json::Value },
    Attr { target: Box<Expr>, name: String },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    New { callee: Box<Expr>, args: Vec<Expr> },
    Object { object: ObjectExpr },
}

impl Expr {
    pub fn symbol(symbol: &Symbol) -> Self {
        Expr::Symbol {
            symbol: symbol.clone(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal {
            literal: Literal::String(value.into()),
        }
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal {
            literal: Literal::Int(value),
        }
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal {
            literal: Literal::Bool(value),
        }
    }

    pub fn value(value: serde_json::Value) -> Self {
        Expr::Value { value }
    }

    pub fn attr(self, name: impl Into<String>) -> Self {
        Expr::Attr {
            target: Box::new(self),
            name: name.into(),
        }
    }

    pub fn call(self, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            args: args.into_iter().collect(),
        }
    }

    /// `self.name(args...)`
    pub fn method(self, name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        self.attr(name).call(args)
    }

    pub fn new_instance(callee: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::New {
            callee: Box::new(callee),
            args: args.into_iter().collect(),
        }
    }
}

impl From<ObjectExpr> for Expr {
    fn from(object: ObjectExpr) -> Self {
        Expr::Object { object }
    }
}

/// An object literal. Keys keep insertion order; setting a key that is
/// already present replaces the value in its original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectExpr {
    props: IndexMap<String, Expr>,
    pretty: bool,
}

impl ObjectExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print one property per line.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Expr>) {
        let key = key.into();
        if self.props.insert(key.clone(), value.into()).is_some() {
            log::debug!("object key `{key}` set twice, keeping the last value");
        }
    }

    pub fn get(&self, key: &str) -> Option<&Expr> {
        self.props.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    pub fn props(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A declared type, possibly generic: `ContractRouterClient<...>`.
    Symbol { symbol: Symbol, args: Vec<TypeExpr> },
    /// A type provided by the language: `ConstructorParameters<...>`.
    Global { name: String, args: Vec<TypeExpr> },
    /// `typeof expr`
    TypeOf { expr: Expr },
    /// `T[index]`
    Index { target: Box<TypeExpr>, index: usize },
}

impl TypeExpr {
    pub fn symbol(symbol: &Symbol) -> Self {
        TypeExpr::Symbol {
            symbol: symbol.clone(),
            args: Vec::new(),
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        TypeExpr::Global {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn type_of(expr: Expr) -> Self {
        TypeExpr::TypeOf { expr }
    }

    pub fn generic(self, arg: TypeExpr) -> Self {
        match self {
            TypeExpr::Symbol { symbol, mut args } => {
                args.push(arg);
                TypeExpr::Symbol { symbol, args }
            }
            TypeExpr::Global { name, mut args } => {
                args.push(arg);
                TypeExpr::Global { name, args }
            }
            other => other,
        }
    }

    pub fn index(self, index: usize) -> Self {
        TypeExpr::Index {
            target: Box::new(self),
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Const { name: String, value: Expr },
    Return { value: Expr },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeExpr>,
}

impl Param {
    pub fn typed(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
        }
    }
}

/// An exported, named declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Const {
        symbol: Symbol,
        value: Expr,
    },
    /// An exported const bound to an arrow function.
    Function {
        symbol: Symbol,
        params: Vec<Param>,
        returns: Option<TypeExpr>,
        body: Vec<Stmt>,
    },
    TypeAlias {
        symbol: Symbol,
        ty: TypeExpr,
    },
}

/// How a referenced symbol is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Value,
    Type,
}

impl Declaration {
    pub fn symbol(&self) -> &Symbol {
        match self {
            Declaration::Const { symbol, .. }
            | Declaration::Function { symbol, .. }
            | Declaration::TypeAlias { symbol, .. } => symbol,
        }
    }

    /// Every symbol referenced by the declaration body, in reading order.
    /// The declared symbol itself is not included.
    pub fn references(&self) -> Vec<(&Symbol, Usage)> {
        let mut out = Vec::new();
        match self {
            Declaration::Const { value, .. } => collect_expr(value, Usage::Value, &mut out),
            Declaration::Function {
                params,
                returns,
                body,
                ..
            } => {
                for p in params {
                    if let Some(ty) = &p.ty {
                        collect_type(ty, &mut out);
                    }
                }
                if let Some(ty) = returns {
                    collect_type(ty, &mut out);
                }
                for stmt in body {
                    match stmt {
                        Stmt::Const { value, .. } | Stmt::Return { value } => {
                            collect_expr(value, Usage::Value, &mut out)
                        }
                    }
                }
            }
            Declaration::TypeAlias { ty, .. } => collect_type(ty, &mut out),
        }
        out
    }
}

fn collect_expr<'a>(expr: &'a Expr, usage: Usage, out: &mut Vec<(&'a Symbol, Usage)>) {
    match expr {
        Expr::Symbol { symbol } => out.push((symbol, usage)),
        Expr::Ident { .. } | Expr::Literal { .. } | Expr::Value { .. } => {}
        Expr::Attr { target, .. } => collect_expr(target, usage, out),
        Expr::Call { callee, args } | Expr::New { callee, args } => {
            collect_expr(callee, usage, out);
            for arg in args {
                collect_expr(arg, usage, out);
            }
        }
        Expr::Object { object } => {
            for (_, value) in object.props() {
                collect_expr(value, usage, out);
            }
        }
    }
}

fn collect_type<'a>(ty: &'a TypeExpr, out: &mut Vec<(&'a Symbol, Usage)>) {
    match ty {
        TypeExpr::Symbol { symbol, args } => {
            out.push((symbol, Usage::Type));
            for arg in args {
                collect_type(arg, out);
            }
        }
        TypeExpr::Global { args, .. } => {
            for arg in args {
                collect_type(arg, out);
            }
        }
        TypeExpr::TypeOf { expr } => collect_expr(expr, Usage::Type, out),
        TypeExpr::Index { target, .. } => collect_type(target, out),
    }
}

/// One instruction for the emitter: write `declaration` into `file`.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub file: OutputFile,
    pub declaration: Declaration,
}
