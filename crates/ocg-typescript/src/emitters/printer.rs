//! Prints declaration nodes as TypeScript source.

use ocg_core::ast::{Declaration, Expr, Literal, ObjectExpr, Param, Stmt, TypeExpr};
use serde_json::Value;

const INDENT: &str = "  ";

/// Print one exported declaration, without a trailing newline. Functions
/// print as exported arrow functions.
pub fn print_declaration(declaration: &Declaration) -> String {
    match declaration {
        Declaration::Const { symbol, value } => {
            format!("export const {} = {};", symbol.name, print_top_level(value))
        }
        Declaration::TypeAlias { symbol, ty } => {
            format!("export type {} = {};", symbol.name, print_type(ty))
        }
        Declaration::Function {
            symbol,
            params,
            returns,
            body,
        } => {
            let params: Vec<String> = params.iter().map(print_param).collect();
            let returns = returns
                .as_ref()
                .map(|ty| format!(": {}", print_type(ty)))
                .unwrap_or_default();

            let mut out = format!(
                "export const {} = ({}){} => {{\n",
                symbol.name,
                params.join(", "),
                returns
            );
            for stmt in body {
                out.push_str(INDENT);
                out.push_str(&print_stmt(stmt));
                out.push('\n');
            }
            out.push_str("};");
            out
        }
    }
}

fn print_param(param: &Param) -> String {
    match &param.ty {
        Some(ty) => format!("{}: {}", param.name, print_type(ty)),
        None => param.name.clone(),
    }
}

fn print_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Const { name, value } => format!("const {name} = {};", print_expr(value, 1)),
        Stmt::Return { value } => format!("return {};", print_expr(value, 1)),
    }
}

/// Method chains of two or more calls put each call on its own line:
///
/// ```text
/// oc
///   .route({ ... })
///   .input(schema)
/// ```
fn print_top_level(expr: &Expr) -> String {
    let (base, calls) = method_chain(expr);
    if calls.len() < 2 {
        return print_expr(expr, 0);
    }

    let mut out = print_expr(base, 0);
    for (name, args) in calls {
        out.push('\n');
        out.push_str(INDENT);
        out.push('.');
        out.push_str(name);
        out.push('(');
        out.push_str(&print_args(args, 1));
        out.push(')');
    }
    out
}

/// Split `base.a(..).b(..)` into `base` and `[a, b]`.
fn method_chain(expr: &Expr) -> (&Expr, Vec<(&str, &[Expr])>) {
    if let Expr::Call { callee, args } = expr
        && let Expr::Attr { target, name } = callee.as_ref()
    {
        let (base, mut calls) = method_chain(target);
        calls.push((name.as_str(), args.as_slice()));
        return (base, calls);
    }
    (expr, Vec::new())
}

fn print_args(args: &[Expr], level: usize) -> String {
    args.iter()
        .map(|arg| print_expr(arg, level))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print an expression whose first line starts at nesting `level`.
pub fn print_expr(expr: &Expr, level: usize) -> String {
    match expr {
        Expr::Symbol { symbol } => symbol.name.clone(),
        Expr::Ident { name } => name.clone(),
        Expr::Literal { literal } => match literal {
            Literal::String(s) => quote(s),
            Literal::Int(i) => i.to_string(),
            Literal::Bool(b) => b.to_string(),
        },
        Expr::Value { value } => print_value(value),
        Expr::Attr { target, name } => format!("{}.{name}", print_expr(target, level)),
        Expr::Call { callee, args } => {
            format!("{}({})", print_expr(callee, level), print_args(args, level))
        }
        Expr::New { callee, args } => {
            format!("new {}({})", print_expr(callee, level), print_args(args, level))
        }
        Expr::Object { object } => print_object(object, level),
    }
}

fn print_object(object: &ObjectExpr, level: usize) -> String {
    if object.is_empty() {
        return "{}".to_string();
    }

    if !object.is_pretty() {
        let props: Vec<String> = object
            .props()
            .map(|(key, value)| format!("{}: {}", print_key(key), print_expr(value, level)))
            .collect();
        return format!("{{ {} }}", props.join(", "));
    }

    let inner = INDENT.repeat(level + 1);
    let props: Vec<String> = object
        .props()
        .map(|(key, value)| {
            format!(
                "{inner}{}: {}",
                print_key(key),
                print_expr(value, level + 1)
            )
        })
        .collect();
    format!("{{\n{},\n{}}}", props.join(",\n"), INDENT.repeat(level))
}

pub fn print_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Symbol { symbol, args } => with_type_args(&symbol.name, args),
        TypeExpr::Global { name, args } => with_type_args(name, args),
        TypeExpr::TypeOf { expr } => format!("typeof {}", print_expr(expr, 0)),
        TypeExpr::Index { target, index } => format!("{}[{index}]", print_type(target)),
    }
}

fn with_type_args(name: &str, args: &[TypeExpr]) -> String {
    if args.is_empty() {
        return name.to_string();
    }
    let args: Vec<String> = args.iter().map(print_type).collect();
    format!("{name}<{}>", args.join(", "))
}

/// Literal data, printed inline.
fn print_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(print_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let props: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", print_key(k), print_value(v)))
                .collect();
            format!("{{ {} }}", props.join(", "))
        }
    }
}

/// Property keys print bare when they are identifiers or canonical integers.
pub fn print_key(key: &str) -> String {
    if is_identifier(key) || is_integer(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn is_integer(key: &str) -> bool {
    !key.is_empty()
        && key.chars().all(|c| c.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'))
}

/// Single-quoted string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
