//! Where a model's endpoint definitions come from.
//!
//! Attachment asks a [`DefinitionSource`] for the definitions of one [`DefinitionKey`]. Sources
//! are passed in explicitly, so tests can hand over definitions without touching the disk.

use crate::definition::{EndpointDefinition, EndpointRecord};
use crate::error::EndpointError;
use crate::handler::HandlerTable;
use crate::naming::definition_file_name;
use fxhash::FxHashMap;
use portico_domain::MetaOptions;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Identifies one model's definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefinitionKey {
    pub model: String,
    /// Conventional or configured location of the definition file.
    pub path: PathBuf,
}

impl DefinitionKey {
    /// Resolves the definition path: `filePath`, else `fileName` inside `base_dir`, else the
    /// kebab-case model name with the `.endpoints.json` suffix inside `base_dir`.
    pub fn resolve(model: impl Into<String>, base_dir: impl AsRef<Path>, meta: &MetaOptions) -> Self {
        let model = model.into();
        let path = match (&meta.file_path, &meta.file_name) {
            (Some(path), _) => path.clone(),
            (None, Some(name)) => base_dir.as_ref().join(name),
            (None, None) => base_dir.as_ref().join(definition_file_name(&model)),
        };
        Self { model, path }
    }
}

/// Loads the definitions of one model.
pub trait DefinitionSource {
    /// # Errors
    /// [`EndpointError::DefinitionLoad`] when the definitions cannot be produced.
    fn load(&self, key: &DefinitionKey) -> Result<Vec<EndpointDefinition>, EndpointError>;
}

impl<F> DefinitionSource for F
where
    F: Fn(&DefinitionKey) -> Result<Vec<EndpointDefinition>, EndpointError>,
{
    fn load(&self, key: &DefinitionKey) -> Result<Vec<EndpointDefinition>, EndpointError> {
        self(key)
    }
}

/// In-memory definitions keyed by model identifier.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    models: FxHashMap<String, Vec<EndpointDefinition>>,
}

impl DefinitionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the definitions of `model`, replacing earlier ones.
    #[must_use]
    pub fn with(mut self, model: impl Into<String>, definitions: Vec<EndpointDefinition>) -> Self {
        self.insert(model, definitions);
        self
    }

    pub fn insert(&mut self, model: impl Into<String>, definitions: Vec<EndpointDefinition>) {
        self.models.insert(model.into(), definitions);
    }

    #[must_use]
    pub fn contains(&self, model: &str) -> bool {
        self.models.contains_key(model)
    }
}

impl DefinitionSource for DefinitionRegistry {
    fn load(&self, key: &DefinitionKey) -> Result<Vec<EndpointDefinition>, EndpointError> {
        self.models.get(&key.model).cloned().ok_or_else(|| EndpointError::DefinitionLoad {
            message: "no definitions registered".into(),
            context: Some(key.model.clone().into()),
        })
    }
}

/// Reads a JSON array of [`EndpointRecord`]s from the key's path.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSource {
    handlers: HandlerTable,
}

impl JsonFileSource {
    #[must_use]
    pub const fn new(handlers: HandlerTable) -> Self {
        Self { handlers }
    }

    #[must_use]
    pub const fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    /// Parses the records at `path` without binding any callable.
    ///
    /// # Errors
    /// [`EndpointError::DefinitionLoad`] when the file is unreadable or malformed.
    pub fn read_records(path: &Path) -> Result<Vec<EndpointRecord>, EndpointError> {
        let load_error = |message: String| EndpointError::DefinitionLoad {
            message: message.into(),
            context: Some(path.display().to_string().into()),
        };
        let raw = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| load_error(e.to_string()))
    }
}

impl DefinitionSource for JsonFileSource {
    fn load(&self, key: &DefinitionKey) -> Result<Vec<EndpointDefinition>, EndpointError> {
        let records = Self::read_records(&key.path)?;
        debug!(model = %key.model, path = %key.path.display(), records = records.len(), "definitions read");
        records.into_iter().map(|record| record.resolve(&self.handlers)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;

    #[test]
    fn key_precedence() {
        let mut meta = MetaOptions::default();
        let key = DefinitionKey::resolve("UserAccount", "/srv/models", &meta);
        assert_eq!(key.path, PathBuf::from("/srv/models/user-account.endpoints.json"));

        meta.file_name = Some("accounts.json".into());
        let key = DefinitionKey::resolve("UserAccount", "/srv/models", &meta);
        assert_eq!(key.path, PathBuf::from("/srv/models/accounts.json"));

        meta.file_path = Some(PathBuf::from("/etc/portico/account.json"));
        let key = DefinitionKey::resolve("UserAccount", "/srv/models", &meta);
        assert_eq!(key.path, PathBuf::from("/etc/portico/account.json"));
        assert_eq!(key.model, "UserAccount");
    }

    #[test]
    fn registry_is_keyed_by_model() {
        let registry = DefinitionRegistry::new()
            .with("User", vec![EndpointDefinition::builder().name("login").handler(Handler::noop("login")).build()]);
        let meta = MetaOptions::default();

        assert!(registry.contains("User"));
        assert_eq!(registry.load(&DefinitionKey::resolve("User", ".", &meta)).unwrap().len(), 1);

        let err = registry.load(&DefinitionKey::resolve("Order", ".", &meta)).unwrap_err();
        assert!(matches!(err, EndpointError::DefinitionLoad { .. }));
        assert!(err.to_string().contains("Order"));
    }

    #[test]
    fn closures_are_sources() {
        let source = |key: &DefinitionKey| -> Result<Vec<EndpointDefinition>, EndpointError> {
            Ok(vec![EndpointDefinition::builder().name(key.model.to_lowercase()).build()])
        };
        let key = DefinitionKey::resolve("Ping", ".", &MetaOptions::default());
        assert_eq!(source.load(&key).unwrap()[0].name, "ping");
    }
}
