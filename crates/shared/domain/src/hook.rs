use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle dispatch point a hook is attached to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Before,
    After,
    Error,
}

impl HookKind {
    /// Registration order of hooks declared on one endpoint.
    pub const ORDER: [Self; 3] = [Self::Before, Self::After, Self::Error];
}
