//! Decides how an operation's request data is presented as contract input.
//!
//! In compact mode the parts of the generated request schema (`body`,
//! `path`, `query`) are folded into one flat object when that is possible.
//! Everything that cannot be flattened keeps the full structured schema.

use crate::ast::Expr;
use crate::config::InputMode;
use crate::ir::{IrOperation, IrParameter};
use crate::symbols::Symbol;

use indexmap::IndexMap;

/// A named entry of the structured request schema's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPart {
    Body,
    Path,
    Query,
}

impl InputPart {
    pub fn shape_key(&self) -> &'static str {
        match self {
            InputPart::Body => "body",
            InputPart::Path => "path",
            InputPart::Query => "query",
        }
    }
}

/// One part of the request schema selected for the flat input.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaPart {
    pub schema: Symbol,
    pub part: InputPart,
    /// The whole part is optional: nothing in it is required.
    pub optional: bool,
}

impl SchemaPart {
    /// `schema.shape.<part>`, unwrapped when the part is optional.
    pub fn to_expr(&self) -> Expr {
        let expr = Expr::symbol(&self.schema)
            .attr("shape")
            .attr(self.part.shape_key());
        if self.optional {
            expr.method("unwrap", [])
        } else {
            expr
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputPlan {
    NoInput,
    /// Compact, and a single part already is the whole input.
    SingleSchema(SchemaPart),
    /// Compact, parts merged left to right: body, path, query. Later parts
    /// win on duplicate field names.
    MergedSchema(Vec<SchemaPart>),
    /// The full `{ params, query, headers, body }` schema.
    StructuredSchema(Symbol),
}

impl InputPlan {
    pub fn is_structured(&self) -> bool {
        matches!(self, InputPlan::StructuredSchema(_))
    }

    /// The expression passed to `.input(...)`, if any.
    pub fn to_expr(&self) -> Option<Expr> {
        match self {
            InputPlan::NoInput => None,
            InputPlan::SingleSchema(part) => Some(part.to_expr()),
            InputPlan::MergedSchema(parts) => {
                let (first, rest) = parts.split_first()?;
                Some(rest.iter().fold(first.to_expr(), |acc, part| {
                    acc.method("merge", [part.to_expr()])
                }))
            }
            InputPlan::StructuredSchema(schema) => Some(Expr::symbol(schema)),
        }
    }
}

/// Resolve the input plan of `operation`.
///
/// `input_schema` is the registered request schema for the operation; without
/// one there is nothing to reference and the plan is [`InputPlan::NoInput`].
pub fn resolve_input_plan(
    operation: &IrOperation,
    mode: InputMode,
    input_schema: Option<&Symbol>,
) -> InputPlan {
    if !operation.has_input() {
        return InputPlan::NoInput;
    }
    let Some(schema) = input_schema else {
        log::debug!(
            "no request schema registered for {} {}, contract gets no input",
            operation.method.as_str(),
            operation.path
        );
        return InputPlan::NoInput;
    };

    match mode {
        InputMode::Detailed => InputPlan::StructuredSchema(schema.clone()),
        InputMode::Compact => resolve_compact(operation, schema),
    }
}

fn resolve_compact(operation: &IrOperation, schema: &Symbol) -> InputPlan {
    let get_or_delete = operation.method.is_get_or_delete();
    let body = operation.body.as_ref().filter(|_| !get_or_delete);

    if let Some(body) = body
        && !body.is_json()
    {
        log::debug!(
            "{} {}: `{}` body cannot be flattened, using structured input",
            operation.method.as_str(),
            operation.path,
            body.media_type
        );
        return InputPlan::StructuredSchema(schema.clone());
    }

    let mut parts = Vec::with_capacity(3);

    if let Some(body) = body {
        parts.push(SchemaPart {
            schema: schema.clone(),
            part: InputPart::Body,
            optional: !body.required,
        });
    }

    if let Some(path) = operation.path_params() {
        parts.push(SchemaPart {
            schema: schema.clone(),
            part: InputPart::Path,
            optional: !has_required(path),
        });
    }

    // Query parameters are only part of the input for GET and DELETE.
    if get_or_delete && let Some(query) = operation.query_params() {
        parts.push(SchemaPart {
            schema: schema.clone(),
            part: InputPart::Query,
            optional: !has_required(query),
        });
    }

    match parts.len() {
        0 => {
            log::debug!(
                "{} {}: no mergeable input part, using structured input",
                operation.method.as_str(),
                operation.path
            );
            InputPlan::StructuredSchema(schema.clone())
        }
        1 => InputPlan::SingleSchema(parts.remove(0)),
        _ => InputPlan::MergedSchema(parts),
    }
}

fn has_required(params: &IndexMap<String, IrParameter>) -> bool {
    params.values().any(|p| p.required)
}
