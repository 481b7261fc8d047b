//! Lookup of validation schemas produced by the schema generator that runs
//! before this one.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::symbols::Symbol;

/// What an operation-scoped schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaRole {
    /// The full request schema: an object with `body`, `path`, `query` and
    /// `headers` entries in its shape.
    Data,
    /// The success response schema.
    Responses,
}

/// Source of pre-generated validation schemas.
pub trait SchemaRegistry {
    fn operation_schema(&self, operation_id: &str, role: SchemaRole) -> Option<Symbol>;

    /// Schema registered for a component definition such as
    /// `#/components/schemas/Error`.
    fn definition_schema(&self, ref_path: &str) -> Option<Symbol>;
}

/// Schema names for one operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OperationSchemas {
    pub data: Option<String>,
    pub responses: Option<String>,
}

/// A registry held in memory, typically deserialized next to the IR.
///
/// ```yaml
/// file: zod.gen
/// operations:
///   listPets: { data: zListPetsData, responses: zListPetsResponse }
/// definitions:
///   "#/components/schemas/Error": zError
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InMemorySchemaRegistry {
    pub file: String,
    pub operations: IndexMap<String, OperationSchemas>,
    pub definitions: IndexMap<String, String>,
}

impl Default for InMemorySchemaRegistry {
    fn default() -> Self {
        Self {
            file: "zod.gen".to_string(),
            operations: IndexMap::new(),
            definitions: IndexMap::new(),
        }
    }
}

impl InMemorySchemaRegistry {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn with_operation(
        mut self,
        operation_id: impl Into<String>,
        role: SchemaRole,
        schema: impl Into<String>,
    ) -> Self {
        let entry = self.operations.entry(operation_id.into()).or_default();
        match role {
            SchemaRole::Data => entry.data = Some(schema.into()),
            SchemaRole::Responses => entry.responses = Some(schema.into()),
        }
        self
    }

    pub fn with_definition(mut self, ref_path: impl Into<String>, schema: impl Into<String>) -> Self {
        self.definitions.insert(ref_path.into(), schema.into());
        self
    }

    fn symbol(&self, name: &str) -> Symbol {
        Symbol::module(name, self.file.clone())
    }
}

impl SchemaRegistry for InMemorySchemaRegistry {
    fn operation_schema(&self, operation_id: &str, role: SchemaRole) -> Option<Symbol> {
        let schemas = self.operations.get(operation_id)?;
        let name = match role {
            SchemaRole::Data => schemas.data.as_deref(),
            SchemaRole::Responses => schemas.responses.as_deref(),
        }?;
        Some(self.symbol(name))
    }

    fn definition_schema(&self, ref_path: &str) -> Option<Symbol> {
        self.definitions.get(ref_path).map(|name| self.symbol(name))
    }
}
