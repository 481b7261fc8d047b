use crate::ast::{Declaration, Expr};
use crate::error::GenerateError;
use crate::plugin::GeneratorContext;
use crate::symbols::{OutputFile, Symbol};

/// Emit the server implementer: `export const os = implement(router)`.
pub fn generate_server(ctx: &mut GeneratorContext<'_>, router: &Symbol) -> Result<(), GenerateError> {
    let implement = ctx.symbols.external("@orpc/server.implement")?;
    let os = ctx.symbols.declare("os", OutputFile::Server);

    ctx.emit(
        OutputFile::Server,
        Declaration::Const {
            symbol: os,
            value: Expr::symbol(&implement).call([Expr::symbol(router)]),
        },
    );
    Ok(())
}
