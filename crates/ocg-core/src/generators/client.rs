use crate::ast::{Declaration, Expr, Param, Stmt, TypeExpr};
use crate::config::ClientType;
use crate::error::GenerateError;
use crate::plugin::GeneratorContext;
use crate::symbols::{OutputFile, Symbol};

/// How one client type is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTypeConfig {
    /// Exported config type, e.g. `RpcLinkClientConfig`.
    pub config_type_name: &'static str,
    /// Exported factory, e.g. `createRpcLinkClient`.
    pub function_name: &'static str,
    /// Resource of the link class in the symbol table.
    pub link_resource: &'static str,
    /// The link constructor takes the router before its config.
    pub needs_router: bool,
}

/// Wiring for `client_type`; `None` for TanStack, which has its own generator.
pub fn client_type_config(client_type: ClientType) -> Option<ClientTypeConfig> {
    let config = match client_type {
        ClientType::OpenApiLink => ClientTypeConfig {
            config_type_name: "OpenApiLinkClientConfig",
            function_name: "createOpenApiClient",
            link_resource: "@orpc/openapi-client/fetch.OpenAPILink",
            needs_router: true,
        },
        ClientType::RpcLink => ClientTypeConfig {
            config_type_name: "RpcLinkClientConfig",
            function_name: "createRpcLinkClient",
            link_resource: "@orpc/client/fetch.RPCLink",
            needs_router: false,
        },
        ClientType::RpcMessagePort => ClientTypeConfig {
            config_type_name: "RpcMessagePortClientConfig",
            function_name: "createRpcMessagePortClient",
            link_resource: "@orpc/client/message-port.RPCLink",
            needs_router: false,
        },
        ClientType::RpcWebSocket => ClientTypeConfig {
            config_type_name: "RpcWebSocketClientConfig",
            function_name: "createRpcWebSocketClient",
            link_resource: "@orpc/client/websocket.RPCLink",
            needs_router: false,
        },
        ClientType::Tanstack => return None,
    };
    Some(config)
}

/// Emit a config type and factory per client type, then the shared `Client`
/// type when at least one factory was emitted.
pub fn generate_clients(
    ctx: &mut GeneratorContext<'_>,
    router: &Symbol,
    client_types: &[ClientType],
) -> Result<(), GenerateError> {
    let router_client = ctx.symbols.external("@orpc/contract.ContractRouterClient")?;
    let create_client = ctx.symbols.external("@orpc/client.createORPCClient")?;

    let configs: Vec<ClientTypeConfig> = client_types
        .iter()
        .filter_map(|t| client_type_config(*t))
        .collect();

    for config in &configs {
        generate_client(ctx, router, &router_client, &create_client, config)?;
    }

    if !configs.is_empty() {
        let client = ctx.symbols.declare("Client", OutputFile::Client);
        ctx.emit(
            OutputFile::Client,
            Declaration::TypeAlias {
                symbol: client,
                ty: router_client_type(&router_client, router),
            },
        );
    }
    Ok(())
}

fn generate_client(
    ctx: &mut GeneratorContext<'_>,
    router: &Symbol,
    router_client: &Symbol,
    create_client: &Symbol,
    config: &ClientTypeConfig,
) -> Result<(), GenerateError> {
    let link = ctx.symbols.external(config.link_resource)?;

    // The config is the link constructor's second argument when the router comes first.
    let config_index = usize::from(config.needs_router);
    let config_type = ctx
        .symbols
        .declare(config.config_type_name, OutputFile::Client);
    ctx.emit(
        OutputFile::Client,
        Declaration::TypeAlias {
            symbol: config_type.clone(),
            ty: TypeExpr::global("ConstructorParameters")
                .generic(TypeExpr::type_of(Expr::symbol(&link)))
                .index(config_index),
        },
    );

    let mut link_args = Vec::with_capacity(2);
    if config.needs_router {
        link_args.push(Expr::symbol(router));
    }
    link_args.push(Expr::ident("config"));

    let factory = ctx.symbols.declare(config.function_name, OutputFile::Client);
    ctx.emit(
        OutputFile::Client,
        Declaration::Function {
            symbol: factory,
            params: vec![Param::typed("config", TypeExpr::symbol(&config_type))],
            returns: Some(router_client_type(router_client, router)),
            body: vec![
                Stmt::Const {
                    name: "link".to_string(),
                    value: Expr::new_instance(Expr::symbol(&link), link_args),
                },
                Stmt::Return {
                    value: Expr::symbol(create_client).call([Expr::ident("link")]),
                },
            ],
        },
    );
    Ok(())
}

/// `ContractRouterClient<typeof router>`
fn router_client_type(router_client: &Symbol, router: &Symbol) -> TypeExpr {
    TypeExpr::symbol(router_client).generic(TypeExpr::type_of(Expr::symbol(router)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tanstack_has_no_client_config() {
        assert!(client_type_config(ClientType::Tanstack).is_none());
    }

    #[test]
    fn test_only_openapi_link_needs_router() {
        let needs: Vec<ClientType> = [
            ClientType::RpcLink,
            ClientType::RpcWebSocket,
            ClientType::RpcMessagePort,
            ClientType::OpenApiLink,
        ]
        .into_iter()
        .filter(|t| client_type_config(*t).is_some_and(|c| c.needs_router))
        .collect();
        assert_eq!(needs, vec![ClientType::OpenApiLink]);
    }
}
