use crate::descriptor::RemoteMethodSpec;
use crate::error::EndpointError;
use crate::handler::Handler;
use crate::host::ModelHost;
use crate::naming::{relation_operation_name, scope_operation_name};
use fxhash::FxHashSet;
use portico_domain::constants::{BASE_OPERATIONS, INSTANCE_PREFIX, RELATION_VERBS, SCOPE_VERBS};
use portico_domain::{HookKind, ModelSettings};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// One operation known to a [`MemoryModel`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// `None` for operations the host generated itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<RemoteMethodSpec>,
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<Handler>,
    pub enabled: bool,
}

impl Operation {
    const fn generated(is_static: bool) -> Self {
        Self { spec: None, is_static, handler: None, enabled: true }
    }
}

#[derive(Debug, Clone)]
struct HookEntry {
    kind: HookKind,
    operation: String,
    handler: Handler,
}

/// In-memory [`ModelHost`] that records everything done to it.
///
/// Creation generates the base operations plus the relation and scope operations of every
/// relation and scope the model knows, the way a persisted model would get them.
///
/// # Example
/// ```rust
/// use portico_domain::ModelSettings;
/// use portico_endpoints::host::{MemoryModel, ModelHost};
/// use serde_json::json;
///
/// let mut user = MemoryModel::new("User", ModelSettings::default().relation("orders", json!({})));
/// assert!(user.is_enabled("prototype.__get__orders"));
/// assert!(user.disable_operation("find"));
/// assert!(!user.is_enabled("find"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryModel {
    name: String,
    settings: ModelSettings,
    live_relations: Vec<String>,
    live_scopes: Vec<String>,
    operations: BTreeMap<String, Operation>,
    hooks: Vec<HookEntry>,
    refuse: FxHashSet<String>,
}

impl MemoryModel {
    pub fn new(name: impl Into<String>, settings: ModelSettings) -> Self {
        let relations: Vec<String> = settings.relation_names().map(str::to_owned).collect();
        let scopes: Vec<String> = settings.scope_names().map(str::to_owned).collect();

        let mut model = Self {
            name: name.into(),
            settings,
            live_relations: Vec::new(),
            live_scopes: Vec::new(),
            operations: BTreeMap::new(),
            hooks: Vec::new(),
            refuse: FxHashSet::default(),
        };
        for op in BASE_OPERATIONS {
            let is_static = !op.starts_with(INSTANCE_PREFIX);
            model.operations.insert((*op).to_owned(), Operation::generated(is_static));
        }
        relations.iter().for_each(|r| model.generate_relation(r));
        scopes.iter().for_each(|s| model.generate_scope(s));
        model
    }

    /// Adds a relation that exists at runtime only.
    #[must_use]
    pub fn live_relation(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.generate_relation(&name);
        self.live_relations.push(name);
        self
    }

    /// Adds a scope that exists at runtime only.
    #[must_use]
    pub fn live_scope(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.generate_scope(&name);
        self.live_scopes.push(name);
        self
    }

    /// Makes the host reject registrations of `operation`.
    #[must_use]
    pub fn refuse(mut self, operation: impl Into<String>) -> Self {
        self.refuse.insert(operation.into());
        self
    }

    #[must_use]
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.operations.get(name).is_some_and(|op| op.enabled)
    }

    /// Names of operations still exposed remotely, sorted.
    pub fn enabled_operations(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().filter(|(_, op)| op.enabled).map(|(name, _)| name.as_str())
    }

    /// Hooks registered on `operation` for `kind`, in registration order.
    pub fn hooks_for<'a>(&'a self, kind: HookKind, operation: &'a str) -> impl Iterator<Item = &'a Handler> {
        self.hooks
            .iter()
            .filter(move |h| h.kind == kind && h.operation == operation)
            .map(|h| &h.handler)
    }

    /// Calls an enabled operation the way a remote request would: before hooks, the handler,
    /// then after hooks. Any failure runs the error hooks with `{"error": message}`.
    ///
    /// Generated operations have no handler here and answer `null`.
    ///
    /// # Errors
    /// [`EndpointError::Host`] when the operation is unknown, disabled, or a callable fails.
    pub fn invoke(&self, name: &str, input: &Value) -> Result<Value, EndpointError> {
        let Some(op) = self.operations.get(name).filter(|op| op.enabled) else {
            return Err(EndpointError::Host {
                message: format!("operation '{name}' is not exposed").into(),
                context: Some(self.name.clone().into()),
            });
        };

        let outcome = self.run(HookKind::Before, name, input).and_then(|()| {
            let output = op.handler.as_ref().map_or(Ok(Value::Null), |h| h.call(input))?;
            self.run(HookKind::After, name, &output)?;
            Ok(output)
        });

        outcome.or_else(|message| {
            let failure = json!({ "error": message });
            for hook in self.hooks_for(HookKind::Error, name) {
                if let Err(hook_error) = hook.call(&failure) {
                    warn!(
                        model = %self.name,
                        operation = name,
                        hook = hook.label(),
                        error = %hook_error,
                        "error hook failed"
                    );
                }
            }
            Err(EndpointError::Host { message: message.into(), context: Some(format!("{}.{name}", self.name).into()) })
        })
    }

    fn run(&self, kind: HookKind, operation: &str, input: &Value) -> Result<(), String> {
        self.hooks_for(kind, operation).try_for_each(|hook| hook.call(input).map(drop))
    }

    fn generate_relation(&mut self, relation: &str) {
        for verb in RELATION_VERBS {
            self.operations.entry(relation_operation_name(relation, verb)).or_insert(Operation::generated(false));
        }
    }

    fn generate_scope(&mut self, scope: &str) {
        for verb in SCOPE_VERBS {
            self.operations.entry(scope_operation_name(scope, verb)).or_insert(Operation::generated(true));
        }
    }

    fn refused(&self, operation: &str, what: &str) -> Result<(), EndpointError> {
        if self.refuse.contains(operation) {
            return Err(EndpointError::Host {
                message: format!("{what} of '{operation}' refused").into(),
                context: Some(self.name.clone().into()),
            });
        }
        Ok(())
    }
}

impl ModelHost for MemoryModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ModelSettings {
        &mut self.settings
    }

    fn live_relations(&self) -> Vec<String> {
        self.live_relations.clone()
    }

    fn live_scopes(&self) -> Vec<String> {
        self.live_scopes.clone()
    }

    fn register_operation(
        &mut self,
        name: &str,
        spec: &RemoteMethodSpec,
        is_static: bool,
        handler: Handler,
    ) -> Result<(), EndpointError> {
        self.refused(name, "registration")?;
        trace!(model = %self.name, operation = name, "operation registered");
        self.operations.insert(
            name.to_owned(),
            Operation { spec: Some(spec.clone()), is_static, handler: Some(handler), enabled: true },
        );
        Ok(())
    }

    fn disable_operation(&mut self, name: &str) -> bool {
        let Some(op) = self.operations.get_mut(name) else {
            return false;
        };
        op.enabled = false;
        true
    }

    fn register_hook(&mut self, kind: HookKind, operation: &str, handler: Handler) -> Result<(), EndpointError> {
        self.refused(operation, "hook")?;
        self.hooks.push(HookEntry { kind, operation: operation.to_owned(), handler });
        Ok(())
    }
}
