use crate::error::EndpointError;
use crate::handler::{Handler, HandlerTable};
use portico_domain::{AclRule, HookKind, OneOrMany, ParamSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use typed_builder::TypedBuilder;

/// An endpoint as declared by the developer, before normalization.
///
/// # Example
/// ```rust
/// use portico_endpoints::{EndpointDefinition, Handler};
///
/// let login = EndpointDefinition::builder()
///     .name("login")
///     .verb("POST")
///     .path("/login")
///     .handler(Handler::noop("login"))
///     .build();
/// assert_eq!(login.is_static, None);
/// ```
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct EndpointDefinition {
    #[builder(setter(into))]
    pub name: String,
    /// Case-insensitive HTTP verb; `get` when absent.
    #[builder(default, setter(strip_option, into))]
    pub verb: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub path: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub accepts: Option<OneOrMany<ParamSchema>>,
    #[builder(default, setter(strip_option, into))]
    pub returns: Option<OneOrMany<ParamSchema>>,
    /// Unset means static.
    #[builder(default, setter(strip_option))]
    pub is_static: Option<bool>,
    /// Extra remote-method options handed to the host.
    #[builder(default)]
    pub options: Map<String, Value>,
    #[builder(default, setter(strip_option, into))]
    pub acls: Option<OneOrMany<AclRule>>,
    #[builder(default, setter(strip_option))]
    pub handler: Option<Handler>,
    #[builder(default, setter(strip_option))]
    pub before: Option<Handler>,
    #[builder(default, setter(strip_option))]
    pub after: Option<Handler>,
    #[builder(default, setter(strip_option))]
    pub error: Option<Handler>,
}

impl EndpointDefinition {
    /// The hook registered for `kind`, if any.
    #[must_use]
    pub const fn hook(&self, kind: HookKind) -> Option<&Handler> {
        match kind {
            HookKind::Before => self.before.as_ref(),
            HookKind::After => self.after.as_ref(),
            HookKind::Error => self.error.as_ref(),
        }
    }
}

/// The serialized form of an [`EndpointDefinition`] found in definition files.
///
/// Callables are referenced by name and bound through a [`HandlerTable`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts: Option<OneOrMany<ParamSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<OneOrMany<ParamSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acls: Option<OneOrMany<AclRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EndpointRecord {
    /// Every callable name the record refers to, handler first.
    pub fn handler_names(&self) -> impl Iterator<Item = &str> {
        [&self.handler, &self.before, &self.after, &self.error].into_iter().flatten().map(String::as_str)
    }

    /// Binds the record's callables.
    ///
    /// An unknown `handler` name leaves the handler unset so normalization reports it as missing.
    ///
    /// # Errors
    /// [`EndpointError::InvalidDefinition`] when a hook names a callable the table lacks.
    pub fn resolve(self, table: &HandlerTable) -> Result<EndpointDefinition, EndpointError> {
        let Self {
            name,
            verb,
            path,
            description,
            accepts,
            returns,
            is_static,
            options,
            acls,
            handler,
            before,
            after,
            error,
        } = self;

        let hook = |kind: HookKind, hook: Option<String>| {
            hook.map(|hook| {
                table.get(&hook).cloned().ok_or_else(|| EndpointError::InvalidDefinition {
                    message: format!("{kind} hook '{hook}' is not registered").into(),
                    context: Some(format!("endpoint '{name}'").into()),
                })
            })
            .transpose()
        };

        let before = hook(HookKind::Before, before)?;
        let after = hook(HookKind::After, after)?;
        let error = hook(HookKind::Error, error)?;
        let handler = handler.as_deref().and_then(|h| table.get(h)).cloned();

        Ok(EndpointDefinition {
            name,
            verb,
            path,
            description,
            accepts,
            returns,
            is_static,
            options,
            acls,
            handler,
            before,
            after,
            error,
        })
    }
}
