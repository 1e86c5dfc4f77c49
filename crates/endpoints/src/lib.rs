//! # Model Endpoints
//!
//! Binds declared endpoints to a model and hides the operations the host generates for it.
//!
//! ## Flow
//!
//! 1. A [`DefinitionSource`] yields the model's [`EndpointDefinition`]s.
//! 2. [`normalize`] turns each one into an [`EndpointDescriptor`] with canonical name, verb,
//!    parameter schemas, ACL entries and hooks.
//! 3. [`visibility::resolve`] computes the [`SuppressionSet`] from a snapshot of the model's
//!    relations and scopes plus the mixin whitelist and blacklist.
//! 4. [`AppliedConfig`] holds both; [`AppliedConfig::apply`] is the only step that mutates the
//!    [`ModelHost`].
//!
//! [`Attachment`] runs all four steps.

mod attach;
mod definition;
mod descriptor;
mod error;
mod handler;
pub mod host;
pub mod naming;
mod normalize;
mod registry;
mod source;
pub mod visibility;

pub use attach::{Attachment, attach};
pub use definition::{EndpointDefinition, EndpointRecord};
pub use descriptor::{EndpointDescriptor, HookBinding, HttpSpec, RemoteMethodSpec};
pub use error::{EndpointError, EndpointErrorExt};
pub use handler::{Handler, HandlerResult, HandlerTable};
pub use host::{MemoryModel, ModelHost};
pub use normalize::{normalize, normalize_all};
pub use registry::{AppliedConfig, ApplyReport, SuppressionPolicy};
pub use source::{DefinitionKey, DefinitionRegistry, DefinitionSource, JsonFileSource};
pub use visibility::{Origin, SuppressionSet, VisibilityInput};
