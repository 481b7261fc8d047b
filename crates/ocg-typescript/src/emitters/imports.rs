//! Import statements for one generated module.

use indexmap::IndexMap;
use ocg_core::ast::{Declaration, Usage};
use ocg_core::symbols::{OutputFile, Symbol, SymbolOrigin};

/// Everything imported from one module specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleImport {
    pub specifier: String,
    /// Local name to exported name, in first-reference order.
    pub names: IndexMap<String, String>,
    /// No imported symbol is used as a value.
    pub type_only: bool,
}

impl ModuleImport {
    pub fn render(&self) -> String {
        let names: Vec<String> = self
            .names
            .iter()
            .map(|(local, export)| {
                if local == export {
                    local.clone()
                } else {
                    format!("{export} as {local}")
                }
            })
            .collect();
        let keyword = if self.type_only { "import type" } else { "import" };
        format!(
            "{keyword} {{ {} }} from '{}';",
            names.join(", "),
            self.specifier
        )
    }

    fn is_relative(&self) -> bool {
        self.specifier.starts_with('.')
    }
}

/// Resolves where a symbol is imported from, seen from a file in `output_dir`.
#[derive(Debug, Clone)]
pub struct ImportResolver<'a> {
    /// Prefix from the output directory back to the output root, e.g. `../`.
    /// `.` and `..` segments of the directory are resolved first.
    root_prefix: String,
    extension: Option<&'a str>,
}

impl<'a> ImportResolver<'a> {
    pub fn new(output_dir: &str, extension: Option<&'a str>) -> Self {
        let depth = output_dir
            .split('/')
            .fold(0usize, |depth, segment| match segment {
                "" | "." => depth,
                ".." => depth.saturating_sub(1),
                _ => depth + 1,
            });
        let root_prefix = if depth == 0 {
            "./".to_string()
        } else {
            "../".repeat(depth)
        };
        Self {
            root_prefix,
            extension,
        }
    }

    /// Module specifier and exported name for `symbol`, or `None` when it is
    /// declared in `file` itself.
    pub fn resolve(&self, file: OutputFile, symbol: &Symbol) -> Option<(String, String)> {
        let ext = self.extension.unwrap_or_default();
        match &symbol.origin {
            SymbolOrigin::Generated(origin) if *origin == file => None,
            SymbolOrigin::Generated(origin) => {
                Some((format!("./{}{ext}", origin.stem()), symbol.name.clone()))
            }
            SymbolOrigin::Module(module) => Some((
                format!("{}{module}{ext}", self.root_prefix),
                symbol.name.clone(),
            )),
            SymbolOrigin::External { package, export } => Some((package.clone(), export.clone())),
        }
    }
}

/// Collect the imports of `file`. Package imports come before relative ones;
/// both keep first-reference order.
pub fn collect_imports(
    file: OutputFile,
    declarations: &[&Declaration],
    resolver: &ImportResolver<'_>,
) -> Vec<ModuleImport> {
    let mut modules: IndexMap<String, ModuleImport> = IndexMap::new();

    for declaration in declarations {
        for (symbol, usage) in declaration.references() {
            let Some((specifier, export)) = resolver.resolve(file, symbol) else {
                continue;
            };
            let import = modules
                .entry(specifier.clone())
                .or_insert_with(|| ModuleImport {
                    specifier,
                    names: IndexMap::new(),
                    type_only: true,
                });
            import.names.entry(symbol.name.clone()).or_insert(export);
            if usage == Usage::Value {
                import.type_only = false;
            }
        }
    }

    let (packages, relative): (Vec<_>, Vec<_>) = modules
        .into_values()
        .partition(|import| !import.is_relative());
    log::trace!(
        "{}: {} package imports, {} relative imports",
        file.stem(),
        packages.len(),
        relative.len()
    );
    packages.into_iter().chain(relative).collect()
}
