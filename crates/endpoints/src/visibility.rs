//! Which host-generated operations stay callable.
//!
//! Every persisted model receives the base operations, plus a family of operations per relation
//! and per scope. Everything not whitelisted in its category is suppressed, and the blacklist
//! suppresses names unconditionally.

use crate::host::ModelHost;
use crate::naming::{relation_operation_name, scope_operation_name};
use fxhash::FxHashSet;
use portico_domain::constants::{BASE_OPERATIONS, RELATION_VERBS, SCOPE_VERBS};
use portico_domain::{MixinOptions, Whitelist};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use strum::Display;

/// Why an operation ended up in the suppression set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Blacklist,
    Base,
    Relation,
    Scope,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suppression {
    pub name: String,
    pub origin: Origin,
}

/// Ordered, duplicate-free list of operations to disable.
///
/// Order is blacklist, base, relations, scopes; a name keeps the origin of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuppressionSet {
    entries: Vec<Suppression>,
    #[serde(skip)]
    index: FxHashSet<String>,
}

impl SuppressionSet {
    /// Appends `name` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, name: impl Into<String>, origin: Origin) -> bool {
        let name = name.into();
        if !self.index.insert(name.clone()) {
            return false;
        }
        self.entries.push(Suppression { name, origin });
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name.as_str())
    }

    pub fn by_origin(&self, origin: Origin) -> impl Iterator<Item = &str> {
        self.entries.iter().filter(move |s| s.origin == origin).map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suppression> {
        self.entries.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SuppressionSet {
    type Item = &'a Suppression;
    type IntoIter = std::slice::Iter<'a, Suppression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Snapshot of everything the resolver looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityInput {
    pub base: Vec<String>,
    pub relations: BTreeSet<String>,
    pub scopes: BTreeSet<String>,
    pub whitelist: Whitelist,
    pub blacklist: Vec<String>,
}

impl VisibilityInput {
    /// The standard base operations with the lists from `options`, and no relations or scopes.
    #[must_use]
    pub fn new(options: &MixinOptions) -> Self {
        Self {
            base: BASE_OPERATIONS.iter().map(|&op| op.to_owned()).collect(),
            relations: BTreeSet::new(),
            scopes: BTreeSet::new(),
            whitelist: options.whitelist.clone(),
            blacklist: options.blacklist.clone(),
        }
    }

    /// Captures the host model's relations and scopes as they are right now.
    #[must_use]
    pub fn snapshot<H>(host: &H, options: &MixinOptions) -> Self
    where
        H: ModelHost + ?Sized,
    {
        let settings = host.settings();
        Self::new(options)
            .relations(discover(settings.relations.as_ref(), host.live_relations()))
            .scopes(discover(settings.scopes.as_ref(), host.live_scopes()))
    }

    #[must_use]
    pub fn relations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn scopes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Union of the identifiers declared in settings and those live on the model.
///
/// Either side may be missing; the result is sorted and duplicate-free.
#[must_use]
pub fn discover(declared: Option<&Map<String, Value>>, live: Vec<String>) -> BTreeSet<String> {
    declared.into_iter().flat_map(Map::keys).cloned().chain(live).collect()
}

/// Computes the suppression set.
#[must_use]
pub fn resolve(input: &VisibilityInput) -> SuppressionSet {
    let Whitelist { base, relations, scopes } = &input.whitelist;
    let keep_base: FxHashSet<&str> = base.iter().map(String::as_str).collect();
    let keep_relations: FxHashSet<&str> = relations.iter().map(String::as_str).collect();
    let keep_scopes: FxHashSet<&str> = scopes.iter().map(String::as_str).collect();

    let mut set = SuppressionSet::default();
    for name in &input.blacklist {
        set.push(name.as_str(), Origin::Blacklist);
    }
    for name in input.base.iter().filter(|op| !keep_base.contains(op.as_str())) {
        set.push(name.as_str(), Origin::Base);
    }
    for relation in input.relations.iter().filter(|r| !keep_relations.contains(r.as_str())) {
        for verb in RELATION_VERBS {
            set.push(relation_operation_name(relation, verb), Origin::Relation);
        }
    }
    for scope in input.scopes.iter().filter(|s| !keep_scopes.contains(s.as_str())) {
        for verb in SCOPE_VERBS {
            set.push(scope_operation_name(scope, verb), Origin::Scope);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discover_merges_declared_and_live() {
        let declared = json!({"tags": {}, "orders": {}});
        let found = discover(declared.as_object(), vec!["owner".into(), "tags".into()]);
        assert_eq!(found.into_iter().collect::<Vec<_>>(), ["orders", "owner", "tags"]);
        assert!(discover(None, Vec::new()).is_empty());
    }

    #[test]
    fn whitelisted_relation_is_kept() {
        let input = VisibilityInput::new(&MixinOptions::default().keep_relations(["orders"]))
            .relations(["orders", "tags"]);
        let set = resolve(&input);

        let relation: Vec<_> = set.by_origin(Origin::Relation).collect();
        assert_eq!(relation.len(), RELATION_VERBS.len());
        assert!(relation.iter().all(|name| name.ends_with("__tags")));
        assert!(set.contains("prototype.__get__tags"));
        assert!(set.contains("prototype.__create__tags"));
        assert!(!set.names().any(|name| name.contains("orders")));
    }

    #[test]
    fn whitelisted_scope_is_kept() {
        let input =
            VisibilityInput::new(&MixinOptions::default().keep_scopes(["active"])).scopes(["active", "recent"]);
        let set = resolve(&input);

        let scope: Vec<_> = set.by_origin(Origin::Scope).collect();
        assert_eq!(scope, ["__get__recent", "__create__recent", "__delete__recent", "__count__recent"]);
        assert!(!set.names().any(|name| name.contains("active")));
    }

    #[test]
    fn push_ignores_repeated_names() {
        let mut set = SuppressionSet::default();
        assert!(set.push("find", Origin::Blacklist));
        assert!(!set.push("find", Origin::Base));
        assert_eq!(set.len(), 1);
        assert_eq!(set.by_origin(Origin::Blacklist).collect::<Vec<_>>(), ["find"]);
        assert_eq!(serde_json::to_value(&set).unwrap(), json!([{"name": "find", "origin": "blacklist"}]));
    }

    #[test]
    fn base_whitelist_is_subtracted() {
        let set = resolve(&VisibilityInput::new(&MixinOptions::default().keep_base(["find", "count"])));
        let base: Vec<_> = set.by_origin(Origin::Base).collect();
        let expected: Vec<_> =
            BASE_OPERATIONS.iter().copied().filter(|op| !["find", "count"].contains(op)).collect();
        assert_eq!(base, expected);
    }

    #[test]
    fn blacklist_comes_first_and_keeps_its_origin() {
        let options = MixinOptions::default().suppress(["User.login", "find"]);
        let set = resolve(&VisibilityInput::new(&options));

        assert_eq!(set.iter().next().map(|s| s.name.as_str()), Some("User.login"));
        assert_eq!(set.by_origin(Origin::Blacklist).collect::<Vec<_>>(), ["User.login", "find"]);
        assert_eq!(set.len(), BASE_OPERATIONS.len() + 1);
        assert!(BASE_OPERATIONS.iter().all(|op| set.contains(op)));
    }

    #[test]
    fn scopes_use_static_names() {
        let input = VisibilityInput::new(&MixinOptions::default().keep_base(BASE_OPERATIONS.iter().copied()))
            .scopes(["active", "recent"])
            .scopes(["active"]);
        let set = resolve(&input);
        assert_eq!(set.len(), 2 * SCOPE_VERBS.len());
        assert!(set.contains("__count__active"));
        assert!(set.contains("__get__recent"));
    }

    #[test]
    fn serializes_as_ordered_list() {
        let set = resolve(
            &VisibilityInput::new(&MixinOptions::default().keep_base(BASE_OPERATIONS.iter().copied()).suppress(["x"])),
        );
        assert_eq!(serde_json::to_value(&set).unwrap(), json!([{"name": "x", "origin": "blacklist"}]));
    }
}
