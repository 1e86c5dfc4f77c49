use portico_domain::constants::BASE_OPERATIONS;
use portico_domain::{AclRule, MixinOptions, OneOrMany};
use portico_endpoints::visibility::resolve;
use portico_endpoints::{EndpointDefinition, EndpointError, Handler, Origin, VisibilityInput, normalize};
use proptest::prelude::*;
use proptest::sample::subsequence;

fn endpoint_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,12}"
}

fn verb() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["get", "POST", "Put", "patch", "DELETE", "del", "head", ""]))
        .prop_map(|verb| verb.map(str::to_owned))
}

proptest! {
    #[test]
    fn definitions_without_handler_never_normalize(name in endpoint_name(), verb in verb(), is_static in any::<Option<bool>>()) {
        let definition = EndpointDefinition { verb, is_static, ..EndpointDefinition::builder().name(name).build() };
        prop_assert!(matches!(normalize(definition), Err(EndpointError::MissingHandler { .. })), "expected MissingHandler");
    }

    #[test]
    fn unset_is_static_means_static(name in endpoint_name(), verb in verb()) {
        let mut definition = EndpointDefinition::builder().name(name.clone()).handler(Handler::noop("h")).build();
        definition.verb = verb;

        let descriptor = normalize(definition).unwrap();
        prop_assert!(descriptor.is_static);
        prop_assert_eq!(descriptor.name, format!("endpoint:{name}"));
    }

    #[test]
    fn normalization_is_deterministic(name in endpoint_name(), verb in verb(), is_static in any::<Option<bool>>()) {
        let handler = Handler::noop("h");
        let mut definition = EndpointDefinition::builder().name(name).handler(handler).before(Handler::noop("b")).build();
        definition.verb = verb;
        definition.is_static = is_static;

        prop_assert_eq!(normalize(definition.clone()).unwrap(), normalize(definition).unwrap());
    }

    #[test]
    fn missing_principal_type_defaults_per_entry(types in prop::collection::vec(prop::option::of("[A-Z]{1,8}"), 0..8)) {
        let rules: Vec<AclRule> = types
            .iter()
            .map(|t| t.as_ref().map_or_else(|| AclRule::allow("$everyone"), |t| AclRule::allow("$everyone").principal_type(t.clone())))
            .collect();
        let mut definition = EndpointDefinition::builder().name("guarded").handler(Handler::noop("h")).build();
        definition.acls = Some(OneOrMany::Many(rules));

        let acls = normalize(definition).unwrap().acls;
        prop_assert_eq!(acls.len(), types.len());
        for (entry, declared) in acls.iter().zip(&types) {
            prop_assert_eq!(&entry.principal_type, declared.as_deref().unwrap_or("ROLE"));
            prop_assert_eq!(&entry.property, "endpoint:guarded");
        }
    }

    #[test]
    fn base_whitelist_is_exclusive(kept in subsequence(BASE_OPERATIONS.to_vec(), 0..=BASE_OPERATIONS.len())) {
        let set = resolve(&VisibilityInput::new(&MixinOptions::default().keep_base(kept.iter().copied())));
        let suppressed: Vec<&str> = set.by_origin(Origin::Base).collect();
        let expected: Vec<&str> = BASE_OPERATIONS.iter().copied().filter(|op| !kept.contains(op)).collect();

        prop_assert_eq!(suppressed, expected);
    }

    #[test]
    fn whitelisted_relations_are_never_suppressed(
        relations in prop::collection::btree_set("[a-z]{1,6}", 0..6),
        keep_mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let kept: Vec<&String> = relations.iter().zip(&keep_mask).filter(|(_, keep)| **keep).map(|(r, _)| r).collect();
        let options = MixinOptions::default().keep_relations(kept.iter().map(|r| r.as_str()));
        let set = resolve(&VisibilityInput::new(&options).relations(relations.iter().cloned()));

        for relation in &relations {
            let suffix = format!("__{relation}");
            let suppressed = set.by_origin(Origin::Relation).any(|name| name.ends_with(&suffix));
            prop_assert_eq!(suppressed, !kept.contains(&relation));
        }
    }
}
