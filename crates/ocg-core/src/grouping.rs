//! Router organization: which namespace each contract lands in, and the
//! nested router object built from those namespaces.

use indexmap::IndexMap;

use crate::ast::{Expr, ObjectExpr};
use crate::config::{GroupMode, OperationNameTransform};
use crate::ir::IrOperation;
use crate::symbols::Symbol;
use crate::transform::name_normalizer::{normalize_operation_name, to_camel_case};

/// Group key used for every operation in flat mode.
pub const FLAT_GROUP: &str = "flat";
/// Group key for operations without a tag.
pub const DEFAULT_TAG_GROUP: &str = "default";
/// Group key for paths with a single non-parameter segment or none.
pub const ROOT_PATH_GROUP: &str = "root";

/// One contract registered in the router.
#[derive(Debug, Clone)]
pub struct RouterNode<'a> {
    pub contract_name: String,
    pub contract_symbol: Symbol,
    pub operation: &'a IrOperation,
    /// `operationId` when present, else the canonical operation id.
    pub operation_name: String,
}

/// Contracts per group key, both in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct RouterStructure<'a> {
    groups: IndexMap<String, Vec<RouterNode<'a>>>,
}

impl<'a> RouterStructure<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` to the end of `group`.
    pub fn push(&mut self, group: impl Into<String>, node: RouterNode<'a>) {
        self.groups.entry(group.into()).or_default().push(node);
    }

    pub fn get(&self, group: &str) -> Option<&[RouterNode<'a>]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[RouterNode<'a>])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of contracts across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// The group an operation belongs to under `mode`.
pub fn group_key(operation: &IrOperation, mode: GroupMode) -> String {
    match mode {
        GroupMode::ByPathPrefix => path_group_key(&operation.path),
        GroupMode::Flat => FLAT_GROUP.to_string(),
        GroupMode::ByTag => operation
            .tags
            .as_ref()
            .and_then(|tags| tags.first())
            .filter(|tag| !tag.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_TAG_GROUP.to_string()),
    }
}

/// Join every non-parameter segment but the last with `.`.
/// e.g. "/auth/phone/send-otp" → "auth.phone", "/pets/{petId}" → "root"
fn path_group_key(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && !s.starts_with('{'))
        .collect();

    match segments.split_last() {
        Some((_, prefix)) if !prefix.is_empty() => prefix.join("."),
        _ => ROOT_PATH_GROUP.to_string(),
    }
}

/// Namespace key for a group. Path groups collapse to one level:
/// "auth.phone" → "authPhone".
pub fn namespace_key(group: &str, mode: GroupMode) -> String {
    match mode {
        GroupMode::ByPathPrefix => to_camel_case(&group.replace('.', "_")),
        GroupMode::ByTag | GroupMode::Flat => to_camel_case(group),
    }
}

fn leaf_key(node: &RouterNode<'_>, transform: Option<&OperationNameTransform>) -> String {
    match transform {
        Some(t) => t.apply(node.operation),
        None => normalize_operation_name(&node.operation_name),
    }
}

/// Fold the structure into the router object literal.
///
/// Groups whose namespace keys coincide share one namespace object.
pub fn build_router_object(
    structure: &RouterStructure<'_>,
    mode: GroupMode,
    transform: Option<&OperationNameTransform>,
) -> ObjectExpr {
    let mut router = ObjectExpr::new().pretty();

    if mode == GroupMode::Flat {
        for node in structure.get(FLAT_GROUP).unwrap_or_default() {
            router.insert(leaf_key(node, transform), Expr::symbol(&node.contract_symbol));
        }
        return router;
    }

    let mut namespaces: IndexMap<String, ObjectExpr> = IndexMap::new();
    for (group, nodes) in structure.groups() {
        let namespace = namespaces
            .entry(namespace_key(group, mode))
            .or_insert_with(|| ObjectExpr::new().pretty());
        for node in nodes {
            namespace.insert(leaf_key(node, transform), Expr::symbol(&node.contract_symbol));
        }
    }

    for (key, namespace) in namespaces {
        router.insert(key, namespace);
    }
    router
}
