pub mod ast;
pub mod config;
pub mod error;
pub mod generators;
pub mod grouping;
pub mod ir;
pub mod plugin;
pub mod registry;
pub mod symbols;
pub mod transform;

pub use plugin::{Generation, generate};

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for emitters that turn a finished generation run into files.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        generation: &Generation<'_>,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
