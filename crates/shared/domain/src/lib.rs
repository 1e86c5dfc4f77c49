//! # Domain Models
//!
//! Pure data types shared by the endpoint binding crates.
//! Keep it lean: no I/O and no host logic, just data and simple helpers.

pub mod acl;
pub mod config;
pub mod constants;
pub mod hook;
pub mod schema;
pub mod settings;
pub mod verb;

pub use acl::{AclEntry, AclRule};
pub use config::{BindingConfig, MetaOptions, MixinOptions, Whitelist};
pub use hook::HookKind;
pub use schema::{OneOrMany, ParamSchema};
pub use settings::ModelSettings;
pub use verb::Verb;
