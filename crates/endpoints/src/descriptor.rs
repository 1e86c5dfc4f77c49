use crate::handler::Handler;
use portico_domain::{AclEntry, HookKind, OneOrMany, ParamSchema, Verb};
use serde::Serialize;
use serde_json::{Map, Value};

/// A canonical, fully populated endpoint ready to be registered on a host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// Final operation name (`endpoint:login`, `prototype.endpoint:ping`).
    pub name: String,
    pub is_static: bool,
    pub remote_method: RemoteMethodSpec,
    pub acls: Vec<AclEntry>,
    pub handler: Handler,
    /// Always in before, after, error order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<HookBinding>,
}

/// Remote-method metadata handed to the host's registration primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteMethodSpec {
    pub http: HttpSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub accepts: Vec<ParamSchema>,
    /// Kept in the shape it was authored in.
    pub returns: OneOrMany<ParamSchema>,
    /// Remaining options, passed through untouched.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpSpec {
    pub verb: Verb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Keys of a user-supplied `http` option other than `verb` and `path`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookBinding {
    pub kind: HookKind,
    pub handler: Handler,
}

impl EndpointDescriptor {
    /// The hook bound for `kind`, if any.
    #[must_use]
    pub fn hook(&self, kind: HookKind) -> Option<&Handler> {
        self.hooks.iter().find(|h| h.kind == kind).map(|h| &h.handler)
    }
}
