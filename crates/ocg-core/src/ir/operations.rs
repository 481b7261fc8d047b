use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// GET and DELETE carry their input in path and query only.
    pub fn is_get_or_delete(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

/// One operation as handed over by the OpenAPI parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrOperation {
    /// Canonical identifier. Operations without one are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The raw `operationId` from the source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    pub method: HttpMethod,
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IrParameters>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<IrBody>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<IndexMap<String, IrResponseOrRef>>,
}

impl IrOperation {
    pub fn new(id: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            operation_id: None,
            method,
            path: path.into(),
            summary: None,
            description: None,
            deprecated: false,
            tags: None,
            parameters: None,
            body: None,
            responses: None,
        }
    }

    /// True when the operation declares a body or at least one parameter.
    pub fn has_input(&self) -> bool {
        self.body.is_some() || self.parameters.as_ref().is_some_and(|p| !p.is_empty())
    }

    pub fn path_params(&self) -> Option<&IndexMap<String, IrParameter>> {
        self.parameters
            .as_ref()
            .map(|p| &p.path)
            .filter(|p| !p.is_empty())
    }

    pub fn query_params(&self) -> Option<&IndexMap<String, IrParameter>> {
        self.parameters
            .as_ref()
            .map(|p| &p.query)
            .filter(|p| !p.is_empty())
    }
}

/// Parameters partitioned by location, in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IrParameters {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub path: IndexMap<String, IrParameter>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub query: IndexMap<String, IrParameter>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub header: IndexMap<String, IrParameter>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub cookie: IndexMap<String, IrParameter>,
}

/// A single path/query/header/cookie parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IrParameter {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IrParameters {
    /// No parameter in any location.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty() && self.header.is_empty() && self.cookie.is_empty()
    }
}

impl IrParameter {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            description: None,
        }
    }
}

/// A request body with the media type the parser picked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrBody {
    pub media_type: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl IrBody {
    pub fn is_json(&self) -> bool {
        self.media_type == "application/json"
    }
}

/// A resolved response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IrResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reference to the schema of the response payload, e.g. `#/components/schemas/Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IrResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(IrResponse),
}
