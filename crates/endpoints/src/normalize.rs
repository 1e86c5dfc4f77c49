//! Turns loosely authored [`EndpointDefinition`]s into canonical [`EndpointDescriptor`]s.

use crate::definition::EndpointDefinition;
use crate::descriptor::{EndpointDescriptor, HookBinding, HttpSpec, RemoteMethodSpec};
use crate::error::EndpointError;
use crate::naming::operation_name;
use fxhash::FxHashSet;
use portico_domain::{HookKind, OneOrMany, ParamSchema, Verb};
use serde_json::{Map, Value};

/// Normalizes one definition.
///
/// # Errors
/// - [`EndpointError::MissingHandler`] when no handler is bound.
/// - [`EndpointError::InvalidDefinition`] when the name is empty.
/// - [`EndpointError::InvalidVerb`] when the verb is not an HTTP verb the host knows.
pub fn normalize(definition: EndpointDefinition) -> Result<EndpointDescriptor, EndpointError> {
    let Some(handler) = definition.handler.clone() else {
        return Err(EndpointError::MissingHandler {
            message: format!("'{}' declares no handler", definition.name).into(),
            context: None,
        });
    };
    if definition.name.is_empty() {
        return Err(EndpointError::InvalidDefinition {
            message: "endpoint name must not be empty".into(),
            context: None,
        });
    }

    let is_static = definition.is_static.unwrap_or(true);
    let name = operation_name(&definition.name, is_static);
    let hooks = HookKind::ORDER
        .into_iter()
        .filter_map(|kind| definition.hook(kind).map(|h| HookBinding { kind, handler: h.clone() }))
        .collect();

    let EndpointDefinition { verb, path, description, accepts, returns, mut options, acls, .. } =
        definition;

    let verb = parse_verb(verb.as_deref(), &name)?;
    let http = HttpSpec { verb, path, extra: http_extras(options.remove("http")) };
    let description = description.or_else(|| match options.remove("description") {
        Some(Value::String(text)) => Some(text),
        _ => None,
    });
    options.remove("accepts");
    options.remove("returns");

    let remote_method = RemoteMethodSpec {
        http,
        description,
        accepts: accepts.map(OneOrMany::into_vec).unwrap_or_default(),
        returns: returns.unwrap_or_else(|| OneOrMany::Single(ParamSchema::root_object())),
        options,
    };

    let acls = acls
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|rule| rule.resolve(&name))
        .collect();

    Ok(EndpointDescriptor { name, is_static, remote_method, acls, handler, hooks })
}

/// Normalizes a model's definitions in order, stopping at the first failure.
///
/// # Errors
/// Anything [`normalize`] reports, plus [`EndpointError::InvalidDefinition`] when two
/// definitions end up with the same operation name.
pub fn normalize_all<I>(definitions: I) -> Result<Vec<EndpointDescriptor>, EndpointError>
where
    I: IntoIterator<Item = EndpointDefinition>,
{
    let mut seen = FxHashSet::default();
    definitions
        .into_iter()
        .map(|definition| {
            let descriptor = normalize(definition)?;
            if !seen.insert(descriptor.name.clone()) {
                return Err(EndpointError::InvalidDefinition {
                    message: format!("operation '{}' is declared twice", descriptor.name).into(),
                    context: None,
                });
            }
            Ok(descriptor)
        })
        .collect()
}

fn parse_verb(raw: Option<&str>, operation: &str) -> Result<Verb, EndpointError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Verb::default()),
        Some(raw) => raw.parse().map_err(|_| EndpointError::InvalidVerb {
            message: format!("'{raw}'").into(),
            context: Some(format!("operation '{operation}'").into()),
        }),
    }
}

fn http_extras(http: Option<Value>) -> Map<String, Value> {
    let Some(Value::Object(mut http)) = http else {
        return Map::new();
    };
    http.remove("verb");
    http.remove("path");
    http
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use portico_domain::AclRule;
    use serde_json::json;

    fn definition(name: &str) -> EndpointDefinition {
        EndpointDefinition::builder().name(name).handler(Handler::noop(name.to_owned())).build()
    }

    #[test]
    fn login_scenario() {
        let login = EndpointDefinition::builder()
            .name("login")
            .verb("POST")
            .path("/login")
            .handler(Handler::noop("login"))
            .build();

        let descriptor = normalize(login).unwrap();
        assert_eq!(descriptor.name, "endpoint:login");
        assert!(descriptor.is_static);
        assert_eq!(
            serde_json::to_value(&descriptor.remote_method).unwrap(),
            json!({
                "http": {"verb": "post", "path": "/login"},
                "accepts": [],
                "returns": {"root": true, "type": "object"}
            })
        );
        assert!(descriptor.acls.is_empty());
        assert!(descriptor.hooks.is_empty());
    }

    #[test]
    fn instance_endpoints_get_prototype_prefix() {
        let ping = EndpointDefinition::builder()
            .name("ping")
            .is_static(false)
            .handler(Handler::noop("ping"))
            .build();
        let descriptor = normalize(ping).unwrap();
        assert_eq!(descriptor.name, "prototype.endpoint:ping");
        assert!(!descriptor.is_static);
        assert_eq!(descriptor.remote_method.http.verb, Verb::Get);
    }

    #[test]
    fn missing_handler_is_rejected() {
        let definition = EndpointDefinition::builder().name("orphan").build();
        let err = normalize(definition).unwrap_err();
        assert!(matches!(err, EndpointError::MissingHandler { .. }));
        assert!(err.to_string().contains("'orphan'"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = normalize(definition("")).unwrap_err();
        assert!(matches!(err, EndpointError::InvalidDefinition { .. }));
    }

    #[test]
    fn verbs_are_case_insensitive_and_validated() {
        let mut put = definition("save");
        put.verb = Some("PuT".into());
        assert_eq!(normalize(put).unwrap().remote_method.http.verb, Verb::Put);

        let mut blank = definition("blank");
        blank.verb = Some(String::new());
        assert_eq!(normalize(blank).unwrap().remote_method.http.verb, Verb::Get);

        let mut bogus = definition("bogus");
        bogus.verb = Some("FETCH".into());
        let err = normalize(bogus).unwrap_err();
        assert!(matches!(err, EndpointError::InvalidVerb { .. }));
        assert!(err.to_string().contains("'FETCH'"));
    }

    #[test]
    fn single_accepts_becomes_a_sequence_and_returns_keeps_its_shape() {
        let upload = EndpointDefinition::builder()
            .name("upload")
            .accepts(ParamSchema::arg("file", "object").required())
            .returns(ParamSchema::arg("id", "string"))
            .handler(Handler::noop("upload"))
            .build();
        let spec = normalize(upload).unwrap().remote_method;
        assert_eq!(spec.accepts, [ParamSchema::arg("file", "object").required()]);
        assert_eq!(spec.returns, OneOrMany::Single(ParamSchema::arg("id", "string")));

        let listing = EndpointDefinition::builder()
            .name("listing")
            .returns(vec![ParamSchema::arg("items", "array").root()])
            .handler(Handler::noop("listing"))
            .build();
        let returns = serde_json::to_value(normalize(listing).unwrap().remote_method.returns).unwrap();
        assert_eq!(returns, json!([{"arg": "items", "type": "array", "root": true}]));
    }

    #[test]
    fn typed_fields_override_options() {
        let mut options = Map::new();
        options.insert("http".into(), json!({"verb": "put", "path": "/old", "status": 201}));
        options.insert("accepts".into(), json!({"arg": "ignored"}));
        options.insert("description".into(), json!("from options"));
        options.insert("rest".into(), json!({"after": "custom"}));

        let create = EndpointDefinition::builder()
            .name("create")
            .verb("post")
            .path("/create")
            .options(options)
            .handler(Handler::noop("create"))
            .build();
        let spec = normalize(create).unwrap().remote_method;

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "http": {"verb": "post", "path": "/create", "status": 201},
                "description": "from options",
                "accepts": [],
                "returns": {"root": true, "type": "object"},
                "rest": {"after": "custom"}
            })
        );
    }

    #[test]
    fn del_alias_is_emitted_as_delete() {
        let mut purge = definition("purge");
        purge.verb = Some("DEL".into());
        let spec = normalize(purge).unwrap().remote_method;
        assert_eq!(spec.http.verb, Verb::Delete);
        assert_eq!(serde_json::to_value(&spec.http).unwrap()["verb"], "delete");
    }

    #[test]
    fn typed_description_wins() {
        let mut options = Map::new();
        options.insert("description".into(), json!("from options"));
        let mut me = definition("me");
        me.description = Some("Current user".into());
        me.options = options;
        assert_eq!(normalize(me).unwrap().remote_method.description.as_deref(), Some("Current user"));
    }

    #[test]
    fn acl_defaults_are_filled_per_entry() {
        let mut ping = definition("ping");
        ping.is_static = Some(false);
        ping.acls = Some(OneOrMany::Many(vec![
            AclRule::allow("$everyone"),
            AclRule::deny("$unauthenticated").principal_type("CUSTOM").property("other"),
        ]));

        let acls = normalize(ping).unwrap().acls;
        assert_eq!(acls.len(), 2);
        assert_eq!(acls[0].property, "prototype.endpoint:ping");
        assert_eq!(acls[0].principal_type, "ROLE");
        assert_eq!(acls[1].property, "other");
        assert_eq!(acls[1].principal_type, "CUSTOM");
    }

    #[test]
    fn single_acl_becomes_one_entry() {
        let mut me = definition("me");
        me.acls = Some(AclRule::allow("$owner").into());
        let acls = normalize(me).unwrap().acls;
        assert_eq!(acls.len(), 1);
        assert_eq!(acls[0].property, "endpoint:me");
    }

    #[test]
    fn hooks_keep_fixed_order() {
        let report = EndpointDefinition::builder()
            .name("report")
            .handler(Handler::noop("report"))
            .error(Handler::noop("on-error"))
            .before(Handler::noop("on-before"))
            .build();
        let kinds: Vec<_> = normalize(report).unwrap().hooks.iter().map(|h| h.kind).collect();
        assert_eq!(kinds, [HookKind::Before, HookKind::Error]);
    }

    #[test]
    fn normalize_all_rejects_duplicate_names() {
        let err = normalize_all([definition("a"), definition("b"), definition("a")]).unwrap_err();
        assert!(matches!(err, EndpointError::InvalidDefinition { .. }));
        assert!(err.to_string().contains("endpoint:a"));

        let mut instance = definition("a");
        instance.is_static = Some(false);
        assert_eq!(normalize_all([definition("a"), instance]).unwrap().len(), 2);
    }
}
