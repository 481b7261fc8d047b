pub mod emitters;
pub mod generator;

pub use generator::{TypeScriptConfig, TypeScriptError, TypeScriptGenerator, generate_files};
