use ocg_core::ast::{Declaration, Expr, ObjectExpr};
use ocg_core::config::{ClientType, GroupMode, InputMode, OperationNameTransform, Preset, UserConfig};
use ocg_core::ir::{self, HttpMethod, IrDocument, IrOperation};
use ocg_core::registry::{InMemorySchemaRegistry, SchemaRole};
use ocg_core::symbols::OutputFile;
use ocg_core::{Generation, generate};

const AUTH_API: &str = include_str!("fixtures/auth-api.yaml");
const AUTH_API_REGISTRY: &str = include_str!("fixtures/auth-api.registry.yaml");

fn load() -> (IrDocument, InMemorySchemaRegistry) {
    let document = ir::from_yaml(AUTH_API).unwrap();
    let registry = serde_yaml_ng::from_str(AUTH_API_REGISTRY).unwrap();
    (document, registry)
}

fn contract<'g>(generation: &'g Generation<'_>, name: &str) -> &'g Expr {
    match generation.find(name) {
        Some(Declaration::Const { value, .. }) => value,
        other => panic!("expected const {name}, got {other:?}"),
    }
}

/// The fluent calls of a contract, outermost last: `[("route", ..), ("input", ..)]`.
fn chain(expr: &Expr) -> Vec<(&str, &[Expr])> {
    match expr {
        Expr::Call { callee, args } => match callee.as_ref() {
            Expr::Attr { target, name } => {
                let mut calls = chain(target);
                calls.push((name.as_str(), args.as_slice()));
                calls
            }
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn call_names(expr: &Expr) -> Vec<&str> {
    chain(expr).into_iter().map(|(name, _)| name).collect()
}

fn call_arg<'e>(expr: &'e Expr, method: &str) -> &'e Expr {
    chain(expr)
        .into_iter()
        .find(|(name, _)| *name == method)
        .and_then(|(_, args)| args.first())
        .unwrap_or_else(|| panic!("no .{method}(...) call"))
}

fn object(expr: &Expr) -> &ObjectExpr {
    match expr {
        Expr::Object { object } => object,
        other => panic!("expected object, got {other:?}"),
    }
}

fn route(expr: &Expr) -> &ObjectExpr {
    object(call_arg(expr, "route"))
}

fn router_object<'g>(generation: &'g Generation<'_>) -> &'g ObjectExpr {
    object(contract(generation, "router"))
}

fn namespace_keys<'g>(router: &'g ObjectExpr, namespace: &str) -> Vec<&'g str> {
    object(router.get(namespace).unwrap()).keys().collect()
}

fn part(schema: &str, key: &str) -> Expr {
    Expr::symbol(&ocg_core::symbols::Symbol::module(schema, "zod.gen"))
        .attr("shape")
        .attr(key)
}

fn optional_part(schema: &str, key: &str) -> Expr {
    part(schema, key).method("unwrap", [])
}

#[test]
fn generate_auth_api_defaults() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let contracts: Vec<&str> = generation
        .declarations_in(OutputFile::Contract)
        .map(|d| d.symbol().name.as_str())
        .collect();
    assert_eq!(
        contracts,
        vec![
            "AuthControllerSendPhoneOtpContract",
            "AuthControllerVerifyPhoneOtpContract",
            "UsersControllerFindOneContract",
            "UsersControllerUpdateContract",
            "UsersControllerUploadAvatarContract",
            "UsersControllerListContract",
            "HealthControllerCheckContract",
            "SessionsControllerDeleteContract",
        ]
    );

    let names = |file: OutputFile| -> Vec<String> {
        generation
            .declarations_in(file)
            .map(|d| d.symbol().name.clone())
            .collect()
    };
    assert_eq!(names(OutputFile::Router), vec!["router"]);
    assert_eq!(names(OutputFile::Server), vec!["os"]);
    assert_eq!(
        names(OutputFile::Client),
        vec!["RpcLinkClientConfig", "createRpcLinkClient", "Client"]
    );
    assert_eq!(names(OutputFile::Tanstack), vec!["createOrpcUtils"]);
}

#[test]
fn operation_without_id_is_skipped() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    assert_eq!(generation.router.len(), 8);
    assert!(
        generation
            .router
            .groups()
            .flat_map(|(_, nodes)| nodes)
            .all(|node| node.operation.path != "/internal/metrics")
    );
}

#[test]
fn json_body_is_the_whole_input() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let send = contract(&generation, "AuthControllerSendPhoneOtpContract");
    assert_eq!(call_names(send), vec!["route", "input", "output", "errors"]);
    assert_eq!(
        call_arg(send, "input"),
        &part("zAuthControllerSendPhoneOtpData", "body")
    );
    assert_eq!(
        call_arg(send, "output"),
        &Expr::symbol(&ocg_core::symbols::Symbol::module(
            "zAuthControllerSendPhoneOtpResponse",
            "zod.gen"
        ))
    );

    let route = route(send);
    let keys: Vec<&str> = route.keys().collect();
    assert_eq!(
        keys,
        vec![
            "method",
            "path",
            "operationId",
            "summary",
            "tags",
            "successStatus",
            "successDescription"
        ]
    );
    assert_eq!(route.get("method"), Some(&Expr::string("POST")));
    assert_eq!(route.get("path"), Some(&Expr::string("/auth/phone/send-otp")));
    assert_eq!(route.get("successStatus"), Some(&Expr::int(201)));
    assert_eq!(route.get("successDescription"), Some(&Expr::string("OTP sent")));
}

#[test]
fn only_registered_error_schemas_are_kept() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let send = contract(&generation, "AuthControllerSendPhoneOtpContract");
    let errors = object(call_arg(send, "errors"));
    let statuses: Vec<&str> = errors.keys().collect();
    assert_eq!(statuses, vec!["400"]);
    assert!(errors.is_pretty());

    let entry = object(errors.get("400").unwrap());
    assert_eq!(
        entry.get("data"),
        Some(&Expr::symbol(&ocg_core::symbols::Symbol::module(
            "zErrorResponse",
            "zod.gen"
        )))
    );
}

#[test]
fn response_refs_resolve_through_components() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let verify = contract(&generation, "AuthControllerVerifyPhoneOtpContract");
    let route = route(verify);
    assert_eq!(route.get("successStatus"), Some(&Expr::int(200)));
    assert_eq!(
        route.get("successDescription"),
        Some(&Expr::string("Phone number verified"))
    );

    let errors = object(call_arg(verify, "errors"));
    let statuses: Vec<&str> = errors.keys().collect();
    assert_eq!(statuses, vec!["401"]);
}

#[test]
fn get_merges_path_and_query() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let find_one = contract(&generation, "UsersControllerFindOneContract");
    let expected = part("zUsersControllerFindOneData", "path").method(
        "merge",
        [optional_part("zUsersControllerFindOneData", "query")],
    );
    assert_eq!(call_arg(find_one, "input"), &expected);
    assert_eq!(route(find_one).get("inputStructure"), None);
}

#[test]
fn patch_merges_body_and_path_and_drops_query() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let update = contract(&generation, "UsersControllerUpdateContract");
    let expected = optional_part("zUsersControllerUpdateData", "body")
        .method("merge", [part("zUsersControllerUpdateData", "path")]);
    assert_eq!(call_arg(update, "input"), &expected);

    // Declared responses but no registered response schema: no output.
    assert_eq!(call_names(update), vec!["route", "input"]);
    assert_eq!(
        route(update).get("tags"),
        Some(&Expr::value(serde_json::json!(["Users"])))
    );
}

#[test]
fn non_json_body_keeps_structured_input() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let upload = contract(&generation, "UsersControllerUploadAvatarContract");
    assert_eq!(call_names(upload), vec!["route", "input"]);
    assert_eq!(
        call_arg(upload, "input"),
        &Expr::symbol(&ocg_core::symbols::Symbol::module(
            "zUsersControllerUploadAvatarData",
            "zod.gen"
        ))
    );

    let route = route(upload);
    assert_eq!(route.get("inputStructure"), Some(&Expr::string("detailed")));
    assert_eq!(route.get("successStatus"), None);
}

#[test]
fn single_optional_query_is_unwrapped() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let list = contract(&generation, "UsersControllerListContract");
    assert_eq!(
        call_arg(list, "input"),
        &optional_part("zUsersControllerListData", "query")
    );
    let route = route(list);
    assert_eq!(route.get("deprecated"), Some(&Expr::bool(true)));
    assert_eq!(route.get("summary"), Some(&Expr::string("List users")));
}

#[test]
fn last_declared_success_status_wins() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let health = contract(&generation, "HealthControllerCheckContract");
    assert_eq!(call_names(health), vec!["route", "output"]);

    let route = route(health);
    assert_eq!(route.get("successStatus"), Some(&Expr::int(204)));
    assert_eq!(
        route.get("successDescription"),
        Some(&Expr::string("Healthy, nothing to report"))
    );
    assert_eq!(route.get("operationId"), None);
}

#[test]
fn delete_uses_path_only() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let delete = contract(&generation, "SessionsControllerDeleteContract");
    assert_eq!(
        call_arg(delete, "input"),
        &part("zSessionsControllerDeleteData", "path")
    );
}

#[test]
fn detailed_mode_structures_every_input() {
    let (document, registry) = load();
    let config = UserConfig {
        mode: Some(InputMode::Detailed),
        ..UserConfig::default()
    }
    .resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    for name in [
        "AuthControllerSendPhoneOtpContract",
        "UsersControllerFindOneContract",
        "UsersControllerListContract",
        "SessionsControllerDeleteContract",
    ] {
        let contract = contract(&generation, name);
        assert!(
            matches!(call_arg(contract, "input"), Expr::Symbol { .. }),
            "{name} should take the structured schema"
        );
        assert_eq!(
            route(contract).get("inputStructure"),
            Some(&Expr::string("detailed")),
            "{name}"
        );
    }

    let health = contract(&generation, "HealthControllerCheckContract");
    assert_eq!(route(health).get("inputStructure"), None);
}

#[test]
fn router_grouped_by_tag() {
    let (document, registry) = load();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let router = router_object(&generation);
    let namespaces: Vec<&str> = router.keys().collect();
    assert_eq!(namespaces, vec!["authentication", "users", "default"]);
    assert_eq!(
        namespace_keys(router, "authentication"),
        vec![
            "authControllerSendPhoneOtp",
            "authControllerVerifyPhoneOtp",
            "sessionsControllerDelete"
        ]
    );
    assert_eq!(
        namespace_keys(router, "users"),
        vec![
            "usersControllerFindOne",
            "usersControllerUpdate",
            "usersControllerUploadAvatar",
            "usersControllerList"
        ]
    );
    assert_eq!(namespace_keys(router, "default"), vec!["healthControllerCheck"]);
}

#[test]
fn router_grouped_by_path_prefix() {
    let (document, registry) = load();
    let config = UserConfig {
        group: Some(GroupMode::ByPathPrefix),
        ..UserConfig::default()
    }
    .resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let router = router_object(&generation);
    let namespaces: Vec<&str> = router.keys().collect();
    assert_eq!(namespaces, vec!["authPhone", "root", "users", "auth"]);
    assert_eq!(
        namespace_keys(router, "root"),
        vec![
            "usersControllerFindOne",
            "usersControllerUpdate",
            "usersControllerList",
            "healthControllerCheck"
        ]
    );
    assert_eq!(namespace_keys(router, "auth"), vec!["sessionsControllerDelete"]);
}

#[test]
fn flat_router_has_no_namespaces() {
    let (document, registry) = load();
    let config = UserConfig {
        group: Some(GroupMode::Flat),
        ..UserConfig::default()
    }
    .resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let router = router_object(&generation);
    assert_eq!(router.len(), 8);
    assert!(matches!(
        router.get("usersControllerFindOne"),
        Some(Expr::Symbol { .. })
    ));
}

#[test]
fn custom_operation_names_are_used_verbatim() {
    let (document, registry) = load();
    let config = UserConfig {
        group: Some(GroupMode::Flat),
        transform_operation_name: Some(OperationNameTransform::new(|op: &IrOperation| {
            op.id.clone().unwrap_or_default()
        })),
        ..UserConfig::default()
    }
    .resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let router = router_object(&generation);
    let keys: Vec<&str> = router.keys().take(2).collect();
    assert_eq!(
        keys,
        vec!["AuthController_sendPhoneOtp", "AuthController_verifyPhoneOtp"]
    );
}

#[test]
fn server_preset_skips_clients() {
    let (document, registry) = load();
    let config = UserConfig {
        preset: Some(Preset::Server),
        ..UserConfig::default()
    }
    .resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    assert_eq!(generation.declarations_in(OutputFile::Server).count(), 1);
    assert_eq!(generation.declarations_in(OutputFile::Client).count(), 0);
    assert_eq!(generation.declarations_in(OutputFile::Tanstack).count(), 0);
}

#[test]
fn client_preset_skips_server() {
    let (document, registry) = load();
    let config = UserConfig {
        preset: Some(Preset::Client),
        clients: Some(vec![ClientType::OpenApiLink, ClientType::RpcWebSocket]),
        ..UserConfig::default()
    }
    .resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    assert_eq!(generation.declarations_in(OutputFile::Server).count(), 0);
    assert_eq!(generation.declarations_in(OutputFile::Tanstack).count(), 0);
    let clients: Vec<&str> = generation
        .declarations_in(OutputFile::Client)
        .map(|d| d.symbol().name.as_str())
        .collect();
    assert_eq!(
        clients,
        vec![
            "OpenApiLinkClientConfig",
            "createOpenApiClient",
            "RpcWebSocketClientConfig",
            "createRpcWebSocketClient",
            "Client"
        ]
    );
}

#[test]
fn empty_document_emits_nothing() {
    let document = IrDocument::default();
    let registry = InMemorySchemaRegistry::default();
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    assert!(generation.emissions.is_empty());
    assert!(generation.router.is_empty());
}

#[test]
fn colliding_contract_names_get_suffixes() {
    let document = IrDocument::new(vec![
        IrOperation::new("getPet", HttpMethod::Get, "/pets/{id}"),
        IrOperation::new("get_pet", HttpMethod::Get, "/v2/pets/{id}"),
    ]);
    let registry = InMemorySchemaRegistry::new("zod.gen")
        .with_operation("getPet", SchemaRole::Responses, "zGetPetResponse");
    let config = UserConfig {
        group: Some(GroupMode::Flat),
        ..UserConfig::default()
    }
    .resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let contracts: Vec<&str> = generation
        .declarations_in(OutputFile::Contract)
        .map(|d| d.symbol().name.as_str())
        .collect();
    assert_eq!(contracts, vec!["getPetContract", "getPetContract2"]);

    // Both operations normalize to the same router key; the last one wins.
    let router = router_object(&generation);
    assert_eq!(router.len(), 1);
    match router.get("getPet") {
        Some(Expr::Symbol { symbol }) => assert_eq!(symbol.name, "getPetContract2"),
        other => panic!("unexpected router entry {other:?}"),
    }
}

#[test]
fn empty_parameter_block_gets_no_input() {
    let document = ir::from_yaml(
        "operations:\n  - id: ping\n    method: get\n    path: /ping\n    parameters: {}\n",
    )
    .unwrap();
    let registry =
        InMemorySchemaRegistry::new("zod.gen").with_operation("ping", SchemaRole::Data, "zPingData");
    let config = UserConfig::default().resolve();
    let generation = generate(&document, &registry, &config).unwrap();

    let ping = contract(&generation, "pingContract");
    assert_eq!(call_names(ping), vec!["route"]);
    assert_eq!(route(ping).get("inputStructure"), None);
}
