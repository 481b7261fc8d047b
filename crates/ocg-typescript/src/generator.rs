use minijinja::{Environment, context};
use ocg_core::ast::Declaration;
use ocg_core::config::OrpcConfig;
use ocg_core::error::GenerateError;
use ocg_core::ir::IrDocument;
use ocg_core::registry::SchemaRegistry;
use ocg_core::symbols::OutputFile;
use ocg_core::{CodeGenerator, GeneratedFile, Generation};
use serde::Deserialize;
use thiserror::Error;

use crate::emitters::imports::{ImportResolver, ModuleImport, collect_imports};
use crate::emitters::printer::print_declaration;

#[derive(Debug, Error)]
pub enum TypeScriptError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Configuration for the TypeScript generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeScriptConfig {
    /// Directory of the generated modules, relative to the output root that
    /// also holds the schema modules.
    pub output_dir: String,
    /// Appended to relative import paths, e.g. `.js` for Node ESM.
    pub import_extension: Option<String>,
    /// Start every file with the "do not edit" banner.
    pub header: bool,
}

impl Default for TypeScriptConfig {
    fn default() -> Self {
        Self {
            output_dir: "orpc".to_string(),
            import_extension: None,
            header: true,
        }
    }
}

impl TypeScriptConfig {
    fn file_path(&self, file: OutputFile) -> String {
        let dir = self.output_dir.trim_end_matches('/');
        if dir.is_empty() {
            format!("{}.ts", file.stem())
        } else {
            format!("{dir}/{}.ts", file.stem())
        }
    }
}

/// Writes each output file of a run as a TypeScript module.
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = TypeScriptConfig;
    type Error = TypeScriptError;

    fn generate(
        &self,
        generation: &Generation<'_>,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.add_template("module.ts.j2", include_str!("../templates/module.ts.j2"))
            .expect("template should be valid");
        let tmpl = env.get_template("module.ts.j2")?;

        let resolver = ImportResolver::new(&config.output_dir, config.import_extension.as_deref());
        let mut files = Vec::new();

        for file in OutputFile::ALL {
            let declarations: Vec<&Declaration> = generation.declarations_in(file).collect();
            if declarations.is_empty() {
                continue;
            }

            let imports: Vec<String> = collect_imports(file, &declarations, &resolver)
                .iter()
                .map(ModuleImport::render)
                .collect();
            let body: Vec<String> = declarations.iter().map(|d| print_declaration(d)).collect();

            let content = tmpl.render(context! {
                header => config.header,
                imports => imports,
                declarations => body,
            })?;

            let path = config.file_path(file);
            log::debug!("rendered {path} with {} declarations", declarations.len());
            files.push(GeneratedFile { path, content });
        }

        Ok(files)
    }
}

/// Run the whole pipeline over `document` and render the result.
pub fn generate_files(
    document: &IrDocument,
    registry: &dyn SchemaRegistry,
    config: &OrpcConfig,
    ts_config: &TypeScriptConfig,
) -> Result<Vec<GeneratedFile>, TypeScriptError> {
    let generation = ocg_core::generate(document, registry, config)?;
    TypeScriptGenerator.generate(&generation, ts_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_paths() {
        let config = TypeScriptConfig::default();
        assert_eq!(config.file_path(OutputFile::Contract), "orpc/contract.gen.ts");

        let config = TypeScriptConfig {
            output_dir: "src/api/".to_string(),
            ..TypeScriptConfig::default()
        };
        assert_eq!(config.file_path(OutputFile::Tanstack), "src/api/tanstack.gen.ts");

        let config = TypeScriptConfig {
            output_dir: String::new(),
            ..TypeScriptConfig::default()
        };
        assert_eq!(config.file_path(OutputFile::Router), "router.gen.ts");
    }

    #[test]
    fn test_config_from_yaml() {
        let config: TypeScriptConfig =
            serde_yaml_ng::from_str("outputDir: client/orpc\nimportExtension: .js\n").unwrap();
        assert_eq!(config.output_dir, "client/orpc");
        assert_eq!(config.import_extension.as_deref(), Some(".js"));
        assert!(config.header);
    }

    #[test]
    fn test_empty_generation_renders_nothing() {
        let document = IrDocument::default();
        let registry = ocg_core::registry::InMemorySchemaRegistry::default();
        let files = generate_files(
            &document,
            &registry,
            &OrpcConfig::default(),
            &TypeScriptConfig::default(),
        )
        .unwrap();
        assert!(files.is_empty());
    }
}
