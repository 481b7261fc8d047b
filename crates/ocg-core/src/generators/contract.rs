use crate::ast::{Declaration, Expr, ObjectExpr};
use crate::config::InputMode;
use crate::error::GenerateError;
use crate::grouping::{RouterNode, RouterStructure, group_key};
use crate::ir::IrOperation;
use crate::plugin::GeneratorContext;
use crate::registry::SchemaRole;
use crate::symbols::OutputFile;
use crate::transform::name_normalizer::to_pascal_zod_name;
use crate::transform::{ResponsePlan, classify_responses, resolve_input_plan};

/// Emit one contract per operation and record each under its group key.
///
/// Operations without an id are skipped.
pub fn generate_contracts<'a>(
    ctx: &mut GeneratorContext<'a>,
) -> Result<RouterStructure<'a>, GenerateError> {
    let oc = ctx.symbols.external("@orpc/contract.oc")?;
    let document = ctx.document;
    let mut structure = RouterStructure::new();

    for operation in &document.operations {
        let Some(id) = operation.id.as_deref() else {
            log::debug!(
                "skipping {} {}: operation has no id",
                operation.method.as_str(),
                operation.path
            );
            continue;
        };

        let contract_name = format!("{}Contract", to_pascal_zod_name(id));
        let symbol = ctx.symbols.declare(&contract_name, OutputFile::Contract);

        let responses = classify_responses(operation, document, ctx.registry);

        let input_schema = operation
            .has_input()
            .then(|| ctx.registry.operation_schema(id, SchemaRole::Data))
            .flatten();
        let plan = resolve_input_plan(operation, ctx.config.mode, input_schema.as_ref());
        log::trace!("{id}: input {plan:?}, responses {responses:?}");

        let detailed = operation.has_input()
            && (ctx.config.mode == InputMode::Detailed || plan.is_structured());
        let route = route_metadata(operation, &responses, detailed);

        let mut contract = Expr::symbol(&oc).method("route", [Expr::from(route)]);

        if let Some(input) = plan.to_expr() {
            contract = contract.method("input", [input]);
        }

        if operation.responses.is_some()
            && let Some(output) = ctx.registry.operation_schema(id, SchemaRole::Responses)
        {
            contract = contract.method("output", [Expr::symbol(&output)]);
        }

        if let Some(errors) = &responses.errors {
            let mut error_map = ObjectExpr::new().pretty();
            for (status, schema) in errors {
                error_map.insert(status.clone(), ObjectExpr::new().prop("data", Expr::symbol(schema)));
            }
            contract = contract.method("errors", [Expr::from(error_map)]);
        }

        ctx.emit(
            OutputFile::Contract,
            Declaration::Const {
                symbol: symbol.clone(),
                value: contract,
            },
        );

        let operation_name = operation
            .operation_id
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| id.to_string());
        structure.push(
            group_key(operation, ctx.config.group),
            RouterNode {
                contract_name: symbol.name.clone(),
                contract_symbol: symbol,
                operation,
                operation_name,
            },
        );
    }

    Ok(structure)
}

/// The `oc.route({...})` argument. Optional metadata is left out when absent.
pub fn route_metadata(operation: &IrOperation, responses: &ResponsePlan, detailed: bool) -> ObjectExpr {
    let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

    let mut route = ObjectExpr::new()
        .pretty()
        .prop("method", Expr::string(operation.method.as_str()))
        .prop("path", Expr::string(&operation.path));

    if let Some(operation_id) = non_empty(&operation.operation_id) {
        route.insert("operationId", Expr::string(operation_id));
    }
    if let Some(summary) = non_empty(&operation.summary) {
        route.insert("summary", Expr::string(summary));
    }
    if let Some(description) = non_empty(&operation.description) {
        route.insert("description", Expr::string(description));
    }
    if operation.deprecated {
        route.insert("deprecated", Expr::bool(true));
    }
    if let Some(tags) = &operation.tags {
        let mut unique: Vec<&str> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(&tag.as_str()) {
                unique.push(tag);
            }
        }
        route.insert("tags", Expr::value(serde_json::json!(unique)));
    }
    if let Some(status) = responses.success_status {
        route.insert("successStatus", Expr::int(i64::from(status)));
    }
    if let Some(description) = non_empty(&responses.success_description) {
        route.insert("successDescription", Expr::string(description));
    }
    if detailed {
        route.insert("inputStructure", Expr::string("detailed"));
    }

    route
}
