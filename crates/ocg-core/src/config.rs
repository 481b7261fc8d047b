use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ir::IrOperation;

/// Client bindings a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientType {
    RpcMessagePort,
    RpcWebSocket,
    OpenApiLink,
    Tanstack,
    RpcLink,
}

/// Named bundles of defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Frontend: clients and TanStack utilities.
    Client,
    /// Backend: router and server implementer, no clients.
    Server,
    /// Monorepo: router, server implementer, clients and TanStack utilities.
    #[default]
    Fullstack,
}

impl Preset {
    /// Clients generated when the user does not list any.
    pub fn default_clients(&self) -> Vec<ClientType> {
        match self {
            Preset::Client | Preset::Fullstack => vec![ClientType::RpcLink, ClientType::Tanstack],
            Preset::Server => Vec::new(),
        }
    }

    pub fn generates_server(&self) -> bool {
        matches!(self, Preset::Server | Preset::Fullstack)
    }
}

/// How router namespaces are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum GroupMode {
    /// One namespace per first tag.
    #[default]
    #[serde(rename = "tags")]
    ByTag,
    /// One namespace per path prefix (all segments but the last).
    #[serde(rename = "paths")]
    ByPathPrefix,
    /// No namespaces.
    #[serde(rename = "flat")]
    Flat,
}

/// How contract inputs are shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Body, path and query folded into one flat schema; headers left out.
    #[default]
    Compact,
    /// `{ params, query, headers, body }` kept as separate parts.
    Detailed,
}

/// Custom router key for an operation. The returned string is used verbatim.
#[derive(Clone)]
pub struct OperationNameTransform(Arc<dyn Fn(&IrOperation) -> String + Send + Sync>);

impl OperationNameTransform {
    pub fn new(f: impl Fn(&IrOperation) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn apply(&self, operation: &IrOperation) -> String {
        (self.0)(operation)
    }
}

impl fmt::Debug for OperationNameTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OperationNameTransform(..)")
    }
}

/// Configuration as written by the user; every field falls back to a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserConfig {
    pub clients: Option<Vec<ClientType>>,
    pub group: Option<GroupMode>,
    pub mode: Option<InputMode>,
    pub preset: Option<Preset>,
    #[serde(skip)]
    pub transform_operation_name: Option<OperationNameTransform>,
}

impl UserConfig {
    /// Fill unset fields from the preset and the global defaults.
    pub fn resolve(self) -> OrpcConfig {
        let preset = self.preset.unwrap_or_default();
        OrpcConfig {
            clients: self.clients.unwrap_or_else(|| preset.default_clients()),
            group: self.group.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            preset,
            transform_operation_name: self.transform_operation_name,
        }
    }
}

/// Resolved configuration for one generation run.
#[derive(Debug, Clone)]
pub struct OrpcConfig {
    pub clients: Vec<ClientType>,
    pub group: GroupMode,
    pub mode: InputMode,
    pub preset: Preset,
    pub transform_operation_name: Option<OperationNameTransform>,
}

impl Default for OrpcConfig {
    fn default() -> Self {
        UserConfig::default().resolve()
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".ocg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<UserConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}
