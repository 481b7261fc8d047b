use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operations::{IrOperation, IrResponse, IrResponseOrRef};

const RESPONSES_PREFIX: &str = "#/components/responses/";

/// One parsed OpenAPI document: its operations in source order plus the
/// reusable components they may point at.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IrDocument {
    pub operations: Vec<IrOperation>,
    pub components: IrComponents,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IrComponents {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, IrResponse>,
}

impl IrDocument {
    pub fn new(operations: Vec<IrOperation>) -> Self {
        Self {
            operations,
            components: IrComponents::default(),
        }
    }

    /// Follow a response reference to its component. Refs that do not point
    /// into `#/components/responses/` resolve to nothing.
    pub fn resolve_response<'a>(&'a self, response: &'a IrResponseOrRef) -> Option<&'a IrResponse> {
        match response {
            IrResponseOrRef::Response(r) => Some(r),
            IrResponseOrRef::Ref { ref_path } => {
                let name = ref_path.strip_prefix(RESPONSES_PREFIX)?;
                self.components.responses.get(name)
            }
        }
    }
}
