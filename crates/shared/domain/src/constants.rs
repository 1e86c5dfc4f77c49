//! Naming conventions shared with the host framework.

/// Prefix of every custom endpoint operation.
pub const ENDPOINT_PREFIX: &str = "endpoint:";

/// Prefix of instance-scoped (non-static) operations.
pub const INSTANCE_PREFIX: &str = "prototype.";

/// Principal type given to ACL entries that do not declare one.
pub const DEFAULT_PRINCIPAL_TYPE: &str = "ROLE";

/// Suffix of the per-model definition file derived from the model name.
pub const DEFINITION_FILE_SUFFIX: &str = ".endpoints.json";

/// Directory searched for definition files when nothing else is configured.
pub const DEFAULT_DEFINITIONS_DIR: &str = "models";

/// Operations the host attaches to every persisted model.
pub const BASE_OPERATIONS: &[&str] = &[
    "create",
    "upsert",
    "replaceOrCreate",
    "patchOrCreate",
    "upsertWithWhere",
    "exists",
    "findById",
    "replaceById",
    "find",
    "findOne",
    "updateAll",
    "deleteById",
    "count",
    "prototype.patchAttributes",
    "createChangeStream",
];

/// Verb tokens of the operations generated for each relation.
pub const RELATION_VERBS: &[&str] = &[
    "findById",
    "destroyById",
    "updateById",
    "exists",
    "link",
    "get",
    "create",
    "update",
    "destroy",
    "unlink",
    "count",
    "delete",
];

/// Verb tokens of the operations generated for each scope.
pub const SCOPE_VERBS: &[&str] = &["get", "create", "delete", "count"];
