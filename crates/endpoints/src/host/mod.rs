//! The model the endpoints are attached to.
//!
//! The binding engine never reaches into a framework directly. It reads the model's settings,
//! registers operations and hooks, and disables generated operations through [`ModelHost`].

mod memory;

pub use memory::{MemoryModel, Operation};

use crate::descriptor::RemoteMethodSpec;
use crate::error::EndpointError;
use crate::handler::Handler;
use portico_domain::{AclEntry, HookKind, ModelSettings};

/// Capabilities the attachment routine needs from a model.
pub trait ModelHost {
    /// Model identifier (`User`, `Order`, ...).
    fn name(&self) -> &str;

    fn settings(&self) -> &ModelSettings;

    fn settings_mut(&mut self) -> &mut ModelSettings;

    /// Relations attached to the model at runtime but absent from its settings.
    fn live_relations(&self) -> Vec<String> {
        Vec::new()
    }

    /// Scopes attached to the model at runtime but absent from its settings.
    fn live_scopes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Exposes `handler` as the remote operation `name`.
    ///
    /// # Errors
    /// [`EndpointError::Host`] when the host refuses the registration.
    fn register_operation(
        &mut self,
        name: &str,
        spec: &RemoteMethodSpec,
        is_static: bool,
        handler: Handler,
    ) -> Result<(), EndpointError>;

    /// Hides `name` from remote callers. Returns `false` when the host has no such operation.
    fn disable_operation(&mut self, name: &str) -> bool;

    /// Runs `handler` at the `kind` dispatch point of `operation`.
    ///
    /// # Errors
    /// [`EndpointError::Host`] when the host refuses the hook.
    fn register_hook(&mut self, kind: HookKind, operation: &str, handler: Handler) -> Result<(), EndpointError>;

    fn acls(&self) -> Option<&[AclEntry]> {
        self.settings().acls.as_deref()
    }

    fn set_acls(&mut self, acls: Vec<AclEntry>) {
        self.settings_mut().acls = Some(acls);
    }
}
