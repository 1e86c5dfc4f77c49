use crate::constants::DEFAULT_DEFINITIONS_DIR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Options recognised when the endpoint mixin is attached to a model.
///
/// Field names follow the host's model JSON (`_meta.fileName`, `whitelist.base`, ...).
/// Snake-case and lowercase aliases are accepted so the same struct loads from layered
/// config sources that normalise key case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixinOptions {
    #[serde(rename = "_meta")]
    pub meta: MetaOptions,
    pub whitelist: Whitelist,
    /// Fully qualified operation names to suppress regardless of category.
    pub blacklist: Vec<String>,
}

/// Where the model's endpoint definitions live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaOptions {
    /// Replaces the conventional file name; resolved inside the definitions directory.
    #[serde(rename = "fileName", alias = "file_name", alias = "filename")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Full path to the definitions; wins over `file_name`.
    #[serde(rename = "filePath", alias = "file_path", alias = "filepath")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

/// Per-category allow-lists of host-generated operations that stay visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Whitelist {
    /// Base operation names (`find`, `count`, ...).
    pub base: Vec<String>,
    /// Relation identifiers whose operations all stay visible.
    pub relations: Vec<String>,
    /// Scope identifiers whose operations all stay visible.
    pub scopes: Vec<String>,
}

impl MixinOptions {
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.meta.file_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.meta.file_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn keep_base<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.base.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn keep_relations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.relations.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn keep_scopes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.scopes.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn suppress<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Application-level binding settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingConfigInner {
    /// Directory holding `<model>.endpoints.json` files.
    pub definitions_dir: PathBuf,
    /// Fail attachment when a suppressed name is unknown to the host instead of warning.
    pub strict_suppression: bool,
    /// Options for models without their own entry.
    pub defaults: MixinOptions,
    /// Per-model options keyed by model name (matched case-insensitively).
    pub models: BTreeMap<String, MixinOptions>,
}

impl Default for BindingConfigInner {
    fn default() -> Self {
        Self {
            definitions_dir: PathBuf::from(DEFAULT_DEFINITIONS_DIR),
            strict_suppression: false,
            defaults: MixinOptions::default(),
            models: BTreeMap::new(),
        }
    }
}

/// Thin Arc-wrapped config for inexpensive cloning into attachment routines.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BindingConfig {
    #[serde(flatten, default)]
    inner: Arc<BindingConfigInner>,
}

impl BindingConfig {
    /// Mixin options for `model`, falling back to [`BindingConfigInner::defaults`].
    #[must_use]
    pub fn options_for(&self, model: &str) -> &MixinOptions {
        self.models
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(model))
            .map_or(&self.defaults, |(_, options)| options)
    }
}

impl Deref for BindingConfig {
    type Target = BindingConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for BindingConfig {
    fn deref_mut(&mut self) -> &mut BindingConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}
