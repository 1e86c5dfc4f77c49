use crate::error::EndpointError;
use crate::host::ModelHost;
use crate::normalize::normalize_all;
use crate::registry::{AppliedConfig, ApplyReport, SuppressionPolicy};
use crate::source::{DefinitionKey, DefinitionSource};
use crate::visibility::{VisibilityInput, resolve};
use portico_domain::constants::DEFAULT_DEFINITIONS_DIR;
use portico_domain::{BindingConfig, MixinOptions};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Attaches endpoint definitions to a model.
///
/// # Example
/// ```rust
/// use portico_domain::{MixinOptions, ModelSettings};
/// use portico_endpoints::host::MemoryModel;
/// use portico_endpoints::{Attachment, DefinitionRegistry, EndpointDefinition, Handler};
///
/// let source = DefinitionRegistry::new().with(
///     "User",
///     vec![EndpointDefinition::builder().name("login").verb("post").handler(Handler::noop("login")).build()],
/// );
/// let mut user = MemoryModel::new("User", ModelSettings::default());
///
/// let applied = Attachment::new(MixinOptions::default().keep_base(["find"]))
///     .attach(&mut user, &source)
///     .unwrap();
///
/// assert!(user.is_enabled("endpoint:login"));
/// assert!(user.is_enabled("find"));
/// assert!(!user.is_enabled("create"));
/// assert_eq!(applied.descriptors().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Attachment {
    base_dir: PathBuf,
    options: MixinOptions,
    policy: SuppressionPolicy,
}

impl Default for Attachment {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_DEFINITIONS_DIR),
            options: MixinOptions::default(),
            policy: SuppressionPolicy::default(),
        }
    }
}

impl Attachment {
    #[must_use]
    pub fn new(options: MixinOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Settings for `model` taken from the application's binding config.
    #[must_use]
    pub fn from_config(config: &BindingConfig, model: &str) -> Self {
        Self {
            base_dir: config.definitions_dir.clone(),
            options: config.options_for(model).clone(),
            policy: SuppressionPolicy::strict(config.strict_suppression),
        }
    }

    /// Directory that relative definition file names are resolved against.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    #[must_use]
    pub fn options(mut self, options: MixinOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn policy(mut self, policy: SuppressionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn key(&self, model: &str) -> DefinitionKey {
        DefinitionKey::resolve(model, &self.base_dir, &self.options.meta)
    }

    /// Loads, normalizes and resolves without touching the host.
    ///
    /// # Errors
    /// Whatever the source or the normalizer reports.
    pub fn plan<H, S>(&self, host: &H, source: &S) -> Result<AppliedConfig, EndpointError>
    where
        H: ModelHost + ?Sized,
        S: DefinitionSource + ?Sized,
    {
        let key = self.key(host.name());
        let descriptors = normalize_all(source.load(&key)?)?;
        for descriptor in &descriptors {
            debug!(operation = %descriptor.name, verb = %descriptor.remote_method.http.verb, "endpoint normalized");
        }

        let visibility = VisibilityInput::snapshot(host, &self.options);
        let suppression = resolve(&visibility);
        debug!(
            relations = visibility.relations.len(),
            scopes = visibility.scopes.len(),
            suppressed = suppression.len(),
            "visibility resolved"
        );

        Ok(AppliedConfig::plan(host.name(), descriptors, suppression))
    }

    /// Plans and applies in one step.
    ///
    /// # Errors
    /// See [`Attachment::plan`] and [`AppliedConfig::apply_with`].
    pub fn attach<H, S>(&self, host: &mut H, source: &S) -> Result<AppliedConfig, EndpointError>
    where
        H: ModelHost + ?Sized,
        S: DefinitionSource + ?Sized,
    {
        self.attach_reported(host, source).map(|(applied, _)| applied)
    }

    /// Like [`Attachment::attach`], also returning what the host did with the record.
    ///
    /// # Errors
    /// See [`Attachment::attach`].
    #[instrument(name = "attach", skip_all, fields(model = %host.name()))]
    pub fn attach_reported<H, S>(&self, host: &mut H, source: &S) -> Result<(AppliedConfig, ApplyReport), EndpointError>
    where
        H: ModelHost + ?Sized,
        S: DefinitionSource + ?Sized,
    {
        let applied = self.plan(host, source)?;
        let report = applied.apply_with(host, self.policy)?;
        info!(
            registered = report.registered.len(),
            disabled = report.disabled.len(),
            unknown = report.unknown.len(),
            "endpoints attached"
        );
        Ok((applied, report))
    }
}

/// Attaches with `options` and the default definitions directory.
///
/// # Errors
/// See [`Attachment::attach`].
pub fn attach<H, S>(host: &mut H, source: &S, options: &MixinOptions) -> Result<AppliedConfig, EndpointError>
where
    H: ModelHost + ?Sized,
    S: DefinitionSource + ?Sized,
{
    Attachment::new(options.clone()).attach(host, source)
}
