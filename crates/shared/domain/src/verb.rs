use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

/// HTTP verb of a remote operation.
///
/// Parsing is case-insensitive; the canonical form is lowercase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verb {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    #[strum(to_string = "delete", serialize = "del")]
    Delete,
    Head,
    Options,
    /// Matches every verb on the route.
    All,
}

impl Serialize for Verb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Verb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| serde::de::Error::custom(format!("unknown HTTP verb '{raw}'")))
    }
}
