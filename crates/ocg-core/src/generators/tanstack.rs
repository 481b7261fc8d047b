use crate::ast::{Declaration, Expr, Param, Stmt, TypeExpr};
use crate::error::GenerateError;
use crate::plugin::GeneratorContext;
use crate::symbols::{OutputFile, Symbol};

/// Emit `createOrpcUtils(client)`, a thin wrapper over the TanStack Query
/// integration typed against the router.
pub fn generate_tanstack(ctx: &mut GeneratorContext<'_>, router: &Symbol) -> Result<(), GenerateError> {
    let client_type = ctx.symbols.external("@orpc/contract.ContractRouterClient")?;
    let create_utils = ctx
        .symbols
        .external("@orpc/tanstack-query.createTanstackQueryUtils")?;
    let symbol = ctx.symbols.declare("createOrpcUtils", OutputFile::Tanstack);

    ctx.emit(
        OutputFile::Tanstack,
        Declaration::Function {
            symbol,
            params: vec![Param::typed(
                "client",
                TypeExpr::symbol(&client_type).generic(TypeExpr::type_of(Expr::symbol(router))),
            )],
            returns: None,
            body: vec![Stmt::Return {
                value: Expr::symbol(&create_utils).call([Expr::ident("client")]),
            }],
        },
    );
    Ok(())
}
