use crate::ast::{Declaration, Expr};
use crate::grouping::{RouterStructure, build_router_object};
use crate::plugin::GeneratorContext;
use crate::symbols::{OutputFile, Symbol};

/// Emit `export const router = { ... }` and return its symbol.
pub fn generate_router(ctx: &mut GeneratorContext<'_>, structure: &RouterStructure<'_>) -> Symbol {
    let symbol = ctx.symbols.declare("router", OutputFile::Router);
    let router = build_router_object(
        structure,
        ctx.config.group,
        ctx.config.transform_operation_name.as_ref(),
    );

    ctx.emit(
        OutputFile::Router,
        Declaration::Const {
            symbol: symbol.clone(),
            value: Expr::from(router),
        },
    );
    symbol
}
