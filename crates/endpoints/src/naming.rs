//! Operation naming conventions of the host framework.
//!
//! These must match the host exactly: a name that is off by one character suppresses nothing
//! and the operation stays visible.

use convert_case::{Case, Casing};
use portico_domain::constants::{DEFINITION_FILE_SUFFIX, ENDPOINT_PREFIX, INSTANCE_PREFIX};
use std::borrow::Cow;

/// `login` becomes `endpoint:login`.
#[must_use]
pub fn endpoint_name(name: &str) -> String {
    format!("{ENDPOINT_PREFIX}{name}")
}

/// Prefixes instance-scoped operations with `prototype.`; static names pass through.
#[must_use]
pub fn instance_name(name: &str, is_static: bool) -> Cow<'_, str> {
    if is_static { Cow::Borrowed(name) } else { Cow::Owned(format!("{INSTANCE_PREFIX}{name}")) }
}

/// Final registered name of a custom endpoint.
#[must_use]
pub fn operation_name(name: &str, is_static: bool) -> String {
    instance_name(&endpoint_name(name), is_static).into_owned()
}

/// `prototype.__get__orders` for relation `orders` and verb `get`.
#[must_use]
pub fn relation_operation_name(relation: &str, verb: &str) -> String {
    format!("{INSTANCE_PREFIX}__{verb}__{relation}")
}

/// `__count__active` for scope `active` and verb `count`.
#[must_use]
pub fn scope_operation_name(scope: &str, verb: &str) -> String {
    format!("__{verb}__{scope}")
}

/// Conventional definition file of a model: `UserAccount` becomes `user-account.endpoints.json`.
#[must_use]
pub fn definition_file_name(model: &str) -> String {
    format!("{}{DEFINITION_FILE_SUFFIX}", model.to_case(Case::Kebab))
}
