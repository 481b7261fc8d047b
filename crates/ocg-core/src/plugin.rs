//! One generation run over one document.

use crate::ast::{Declaration, Emission};
use crate::config::OrpcConfig;
use crate::error::GenerateError;
use crate::generators;
use crate::grouping::RouterStructure;
use crate::ir::IrDocument;
use crate::registry::SchemaRegistry;
use crate::symbols::{OutputFile, SymbolTable, register_external_symbols};

/// Shared state threaded through the generators of a run.
pub struct GeneratorContext<'a> {
    pub document: &'a IrDocument,
    pub registry: &'a dyn SchemaRegistry,
    pub config: &'a OrpcConfig,
    pub symbols: SymbolTable,
    emissions: Vec<Emission>,
}

impl<'a> GeneratorContext<'a> {
    pub fn new(
        document: &'a IrDocument,
        registry: &'a dyn SchemaRegistry,
        config: &'a OrpcConfig,
    ) -> Self {
        Self {
            document,
            registry,
            config,
            symbols: SymbolTable::new(),
            emissions: Vec::new(),
        }
    }

    pub fn emit(&mut self, file: OutputFile, declaration: Declaration) {
        log::trace!("emit {} into {}", declaration.symbol().name, file.stem());
        self.emissions.push(Emission { file, declaration });
    }
}

/// Everything a run produced, in emission order.
#[derive(Debug)]
pub struct Generation<'a> {
    pub emissions: Vec<Emission>,
    pub router: RouterStructure<'a>,
}

impl Generation<'_> {
    pub fn declarations_in(&self, file: OutputFile) -> impl Iterator<Item = &Declaration> {
        self.emissions
            .iter()
            .filter(move |e| e.file == file)
            .map(|e| &e.declaration)
    }

    /// Find a declaration by its symbol name.
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.emissions
            .iter()
            .map(|e| &e.declaration)
            .find(|d| d.symbol().name == name)
    }
}

/// Run the whole pipeline: contracts, router, server implementer and the
/// configured client bindings.
pub fn generate<'a>(
    document: &'a IrDocument,
    registry: &'a dyn SchemaRegistry,
    config: &'a OrpcConfig,
) -> Result<Generation<'a>, GenerateError> {
    let mut ctx = GeneratorContext::new(document, registry, config);
    register_external_symbols(&mut ctx.symbols);

    let router = generators::contract::generate_contracts(&mut ctx)?;
    log::debug!(
        "generated {} contracts in {} groups",
        router.len(),
        router.groups().count()
    );

    if !router.is_empty() {
        let router_symbol = generators::router::generate_router(&mut ctx, &router);

        if config.preset.generates_server() {
            generators::server::generate_server(&mut ctx, &router_symbol)?;
        }

        if !config.clients.is_empty() {
            generators::client::generate_clients(&mut ctx, &router_symbol, &config.clients)?;
            if config.clients.contains(&crate::config::ClientType::Tanstack) {
                generators::tanstack::generate_tanstack(&mut ctx, &router_symbol)?;
            }
        }
    }

    Ok(Generation {
        emissions: ctx.emissions,
        router,
    })
}
