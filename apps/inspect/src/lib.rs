//! # Inspect
//!
//! Dry-runs model attachment against an in-memory host and reports the outcome.
//!
//! The manifest is the model's JSON definition (`name` plus `relations`, `scopes`, `acls`).
//! Every handler name referenced by the definition file is bound to a no-op, so the report
//! shows exactly what a real application would register and hide.

pub mod args;

use anyhow::{Context, Result};
use portico_domain::{BindingConfig, MixinOptions, ModelSettings};
use portico_endpoints::{
    AppliedConfig, ApplyReport, Attachment, DefinitionRegistry, EndpointDefinition, HandlerTable, JsonFileSource,
    MemoryModel, SuppressionPolicy,
};
use portico_kernel::config::load_binding_config;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub use args::Cli;

/// A model definition file as the host framework reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelManifest {
    pub name: String,
    #[serde(flatten)]
    pub settings: ModelSettings,
}

/// What attachment did to the model.
#[derive(Debug, Serialize)]
pub struct Inspection {
    #[serde(flatten)]
    pub applied: AppliedConfig,
    pub report: ApplyReport,
    /// Operations still exposed after attachment.
    pub exposed: Vec<String>,
}

/// Runs attachment for the model described by `cli`.
///
/// # Errors
/// Unreadable inputs, invalid configuration, or any attachment failure.
pub fn inspect(cli: &Cli) -> Result<Inspection> {
    let manifest: ModelManifest = read_json(&cli.manifest).context("Failed to read model manifest")?;

    let config = match &cli.config {
        Some(path) => load_binding_config(Some(path)).context("Failed to load binding config")?,
        None => BindingConfig::default(),
    };

    let mut attachment = Attachment::from_config(&config, &manifest.name);
    if cli.config.is_none() {
        let dir = cli.manifest.parent().unwrap_or_else(|| Path::new("."));
        attachment = attachment.base_dir(dir);
    }

    let mut options: MixinOptions = match &cli.options {
        Some(path) => read_json(path).context("Failed to read mixin options")?,
        None => config.options_for(&manifest.name).clone(),
    };
    if let Some(path) = &cli.definitions {
        options = options.file_path(path);
    }
    attachment = attachment.options(options);
    if cli.strict {
        attachment = attachment.policy(SuppressionPolicy::Strict);
    }

    let key = attachment.key(&manifest.name);
    let records = JsonFileSource::read_records(&key.path)?;
    let mut handlers = HandlerTable::new();
    handlers.stub(records.iter().flat_map(|record| record.handler_names()));
    let definitions = records
        .into_iter()
        .map(|record| record.resolve(&handlers))
        .collect::<Result<Vec<EndpointDefinition>, _>>()?;
    let source = DefinitionRegistry::new().with(&manifest.name, definitions);

    let mut host = MemoryModel::new(&manifest.name, manifest.settings);
    let (applied, report) = attachment.attach_reported(&mut host, &source)?;
    info!(model = %manifest.name, path = %key.path.display(), "inspection finished");

    let exposed = host.enabled_operations().map(str::to_owned).collect();
    Ok(Inspection { applied, report, exposed })
}

fn read_json<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let raw = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed JSON in {}", path.display()))
}
