use indexmap::IndexMap;

use crate::ir::{IrDocument, IrOperation};
use crate::registry::SchemaRegistry;
use crate::symbols::Symbol;

/// Success metadata and error schemas of one operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponsePlan {
    pub success_status: Option<u16>,
    pub success_description: Option<String>,
    /// Status code to error payload schema, in declaration order. `None`
    /// when no error status resolved to a registered schema.
    pub errors: Option<IndexMap<String, Symbol>>,
}

/// The status code of a 2xx response, or `None` for anything else.
/// Range keys such as `2XX` are neither success codes nor errors.
fn success_code(status: &str) -> Option<u16> {
    status
        .parse::<u16>()
        .ok()
        .filter(|code| (200..300).contains(code))
}

fn is_success_range(status: &str) -> bool {
    status.eq_ignore_ascii_case("2xx")
}

/// Classify the declared responses of `operation`.
///
/// When several 2xx codes are declared the one declared last wins, not the
/// lowest.
pub fn classify_responses(
    operation: &IrOperation,
    document: &IrDocument,
    registry: &dyn SchemaRegistry,
) -> ResponsePlan {
    let Some(responses) = &operation.responses else {
        return ResponsePlan::default();
    };

    let mut plan = ResponsePlan::default();
    let mut errors = IndexMap::new();

    for (status, response) in responses {
        let resolved = document.resolve_response(response);

        if let Some(code) = success_code(status) {
            plan.success_status = Some(code);
            plan.success_description = resolved.and_then(|r| r.description.clone());
            continue;
        }
        if is_success_range(status) {
            continue;
        }

        let Some(schema_ref) = resolved.and_then(|r| r.schema.as_deref()) else {
            continue;
        };
        match registry.definition_schema(schema_ref) {
            Some(schema) => {
                errors.insert(status.clone(), schema);
            }
            None => log::debug!(
                "{} {}: no schema registered for `{schema_ref}`, dropping status {status}",
                operation.method.as_str(),
                operation.path
            ),
        }
    }

    if !errors.is_empty() {
        plan.errors = Some(errors);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{HttpMethod, IrResponse, IrResponseOrRef};
    use crate::registry::InMemorySchemaRegistry;

    fn inline(description: Option<&str>, schema: Option<&str>) -> IrResponseOrRef {
        IrResponseOrRef::Response(IrResponse {
            description: description.map(String::from),
            schema: schema.map(String::from),
        })
    }

    fn op_with(responses: Vec<(&str, IrResponseOrRef)>) -> IrOperation {
        let mut op = IrOperation::new("createPet", HttpMethod::Post, "/pets");
        op.responses = Some(
            responses
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        );
        op
    }

    fn registry() -> InMemorySchemaRegistry {
        InMemorySchemaRegistry::default().with_definition("#/components/schemas/Error", "zError")
    }

    #[test]
    fn test_no_responses() {
        let op = IrOperation::new("ping", HttpMethod::Get, "/ping");
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        assert_eq!(plan, ResponsePlan::default());
    }

    #[test]
    fn test_single_success() {
        let op = op_with(vec![("201", inline(Some("Created"), None))]);
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        assert_eq!(plan.success_status, Some(201));
        assert_eq!(plan.success_description.as_deref(), Some("Created"));
        assert!(plan.errors.is_none());
    }

    #[test]
    fn test_last_declared_success_wins() {
        let op = op_with(vec![
            ("201", inline(Some("Created"), None)),
            ("200", inline(Some("Already exists"), None)),
        ]);
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        assert_eq!(plan.success_status, Some(200));
        assert_eq!(plan.success_description.as_deref(), Some("Already exists"));

        let op = op_with(vec![
            ("200", inline(Some("OK"), None)),
            ("201", inline(Some("Created"), None)),
        ]);
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        assert_eq!(plan.success_status, Some(201));
    }

    #[test]
    fn test_success_description_through_ref() {
        let mut doc = IrDocument::default();
        doc.components.responses.insert(
            "PetCreated".to_string(),
            IrResponse {
                description: Some("Pet created".to_string()),
                schema: None,
            },
        );
        let op = op_with(vec![(
            "201",
            IrResponseOrRef::Ref {
                ref_path: "#/components/responses/PetCreated".to_string(),
            },
        )]);
        let plan = classify_responses(&op, &doc, &registry());
        assert_eq!(plan.success_description.as_deref(), Some("Pet created"));
    }

    #[test]
    fn test_error_map_in_declaration_order() {
        let op = op_with(vec![
            ("201", inline(None, None)),
            ("404", inline(Some("Missing"), Some("#/components/schemas/Error"))),
            ("400", inline(Some("Bad"), Some("#/components/schemas/Error"))),
        ]);
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        let errors = plan.errors.unwrap();
        let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["404", "400"]);
        assert_eq!(errors["404"].name, "zError");
    }

    #[test]
    fn test_unregistered_error_schema_dropped() {
        let op = op_with(vec![
            ("200", inline(None, None)),
            ("409", inline(None, Some("#/components/schemas/Conflict"))),
            ("500", inline(None, Some("#/components/schemas/Error"))),
        ]);
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        let errors = plan.errors.unwrap();
        assert!(!errors.contains_key("409"));
        assert!(errors.contains_key("500"));
    }

    #[test]
    fn test_only_unresolvable_error_gives_no_map() {
        let op = op_with(vec![
            ("200", inline(None, None)),
            ("409", inline(None, Some("#/components/schemas/Conflict"))),
            ("422", inline(Some("No schema"), None)),
        ]);
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        assert!(plan.errors.is_none());
    }

    #[test]
    fn test_range_keys() {
        let op = op_with(vec![
            ("2XX", inline(Some("Any success"), Some("#/components/schemas/Error"))),
            ("default", inline(None, Some("#/components/schemas/Error"))),
        ]);
        let plan = classify_responses(&op, &IrDocument::default(), &registry());
        assert_eq!(plan.success_status, None);
        let errors = plan.errors.unwrap();
        let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["default"]);
    }
}
