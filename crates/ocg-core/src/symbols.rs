//! Symbols referenced by emitted declarations, and the table that hands them out.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::GenerateError;

/// The generated modules a run writes declarations into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputFile {
    Contract,
    Router,
    Server,
    Client,
    Tanstack,
}

impl OutputFile {
    pub const ALL: [OutputFile; 5] = [
        OutputFile::Contract,
        OutputFile::Router,
        OutputFile::Server,
        OutputFile::Client,
        OutputFile::Tanstack,
    ];

    /// File stem relative to the plugin output directory.
    pub fn stem(&self) -> &'static str {
        match self {
            OutputFile::Contract => "contract.gen",
            OutputFile::Router => "router.gen",
            OutputFile::Server => "server.gen",
            OutputFile::Client => "client.gen",
            OutputFile::Tanstack => "tanstack.gen",
        }
    }
}

/// Where a symbol is declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolOrigin {
    /// Declared by this run in one of its output files.
    Generated(OutputFile),
    /// Declared by another generator, by module path relative to the output root
    /// (e.g. `zod.gen`).
    Module(String),
    /// Exported by a package; `export` is the name the package exports it under.
    External { package: String, export: String },
}

/// A named, importable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub origin: SymbolOrigin,
}

impl Symbol {
    pub fn generated(name: impl Into<String>, file: OutputFile) -> Self {
        Self {
            name: name.into(),
            origin: SymbolOrigin::Generated(file),
        }
    }

    pub fn module(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: SymbolOrigin::Module(module.into()),
        }
    }

    pub fn external(name: impl Into<String>, package: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            origin: SymbolOrigin::External {
                package: package.into(),
                export: name.clone(),
            },
            name,
        }
    }

    /// Import `export` from `package` under the local `name`.
    pub fn external_as(
        name: impl Into<String>,
        package: impl Into<String>,
        export: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            origin: SymbolOrigin::External {
                package: package.into(),
                export: export.into(),
            },
        }
    }
}

/// External symbols keyed by resource (`"<package>.<export>"`) and the local
/// names already taken by this run.
#[derive(Debug, Default)]
pub struct SymbolTable {
    externals: IndexMap<String, Symbol>,
    taken: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_external(&mut self, resource: impl Into<String>, symbol: Symbol) {
        self.taken.entry(symbol.name.clone()).or_insert(1);
        self.externals.insert(resource.into(), symbol);
    }

    pub fn external(&self, resource: &str) -> Result<Symbol, GenerateError> {
        self.externals
            .get(resource)
            .cloned()
            .ok_or_else(|| GenerateError::MissingExternal(resource.to_string()))
    }

    /// Declare a local symbol in `file`. A name already used in this run gets
    /// the next free numeric suffix (`Foo`, `Foo2`, `Foo3`, ...).
    pub fn declare(&mut self, name: &str, file: OutputFile) -> Symbol {
        let base = if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("_{name}")
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        while let Some(count) = self.taken.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{base}{count}");
        }
        if candidate != base {
            log::debug!("symbol `{base}` already declared, using `{candidate}`");
        }
        self.taken.insert(candidate.clone(), 1);
        Symbol::generated(candidate, file)
    }
}

/// Register every package export the generators reference.
pub fn register_external_symbols(table: &mut SymbolTable) {
    let externals = [
        ("@orpc/contract.oc", Symbol::external("oc", "@orpc/contract")),
        (
            "@orpc/contract.ContractRouterClient",
            Symbol::external("ContractRouterClient", "@orpc/contract"),
        ),
        (
            "@orpc/client.createORPCClient",
            Symbol::external("createORPCClient", "@orpc/client"),
        ),
        (
            "@orpc/client/fetch.RPCLink",
            Symbol::external("RPCLink", "@orpc/client/fetch"),
        ),
        (
            "@orpc/client/websocket.RPCLink",
            Symbol::external_as("RPCLinkWebSocket", "@orpc/client/websocket", "RPCLink"),
        ),
        (
            "@orpc/client/message-port.RPCLink",
            Symbol::external_as("RPCLinkMessagePort", "@orpc/client/message-port", "RPCLink"),
        ),
        (
            "@orpc/openapi-client/fetch.OpenAPILink",
            Symbol::external("OpenAPILink", "@orpc/openapi-client/fetch"),
        ),
        (
            "@orpc/tanstack-query.createTanstackQueryUtils",
            Symbol::external("createTanstackQueryUtils", "@orpc/tanstack-query"),
        ),
        (
            "@orpc/server.implement",
            Symbol::external("implement", "@orpc/server"),
        ),
    ];

    for (resource, symbol) in externals {
        table.register_external(resource, symbol);
    }
}
