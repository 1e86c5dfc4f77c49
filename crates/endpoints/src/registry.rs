use crate::descriptor::EndpointDescriptor;
use crate::error::{EndpointError, EndpointErrorExt};
use crate::host::ModelHost;
use crate::visibility::SuppressionSet;
use serde::Serialize;
use tracing::{debug, warn};

/// What to do when a suppressed name is unknown to the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionPolicy {
    /// Log a warning and carry on.
    #[default]
    Warn,
    /// Fail with [`EndpointError::UnknownOperation`] once every name has been tried.
    Strict,
}

impl SuppressionPolicy {
    #[must_use]
    pub const fn strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Warn }
    }
}

/// Everything attachment will do to a model, computed before anything is touched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedConfig {
    model: String,
    descriptors: Vec<EndpointDescriptor>,
    suppression: SuppressionSet,
}

/// Outcome of [`AppliedConfig::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub registered: Vec<String>,
    pub disabled: Vec<String>,
    /// Suppressed names the host did not recognise.
    pub unknown: Vec<String>,
}

impl AppliedConfig {
    pub fn plan(model: impl Into<String>, descriptors: Vec<EndpointDescriptor>, suppression: SuppressionSet) -> Self {
        Self { model: model.into(), descriptors, suppression }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn descriptors(&self) -> &[EndpointDescriptor] {
        &self.descriptors
    }

    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    #[must_use]
    pub const fn suppression(&self) -> &SuppressionSet {
        &self.suppression
    }

    /// Applies the record with [`SuppressionPolicy::Warn`].
    ///
    /// # Errors
    /// See [`AppliedConfig::apply_with`].
    pub fn apply<H>(&self, host: &mut H) -> Result<ApplyReport, EndpointError>
    where
        H: ModelHost + ?Sized,
    {
        self.apply_with(host, SuppressionPolicy::Warn)
    }

    /// Registers every descriptor in order, then disables every suppressed name.
    ///
    /// Not transactional: when the host rejects descriptor N, descriptors before N stay
    /// registered and nothing is disabled. ACL entries are appended to the host's list.
    ///
    /// # Errors
    /// - [`EndpointError::Host`] from the host's registration primitives.
    /// - [`EndpointError::UnknownOperation`] under [`SuppressionPolicy::Strict`].
    pub fn apply_with<H>(&self, host: &mut H, policy: SuppressionPolicy) -> Result<ApplyReport, EndpointError>
    where
        H: ModelHost + ?Sized,
    {
        let mut report = ApplyReport::default();

        for descriptor in &self.descriptors {
            let name = descriptor.name.as_str();
            host.register_operation(name, &descriptor.remote_method, descriptor.is_static, descriptor.handler.clone())
                .context(format!("{}.{name}", self.model))?;

            if !descriptor.acls.is_empty() {
                let mut acls = host.acls().map(<[_]>::to_vec).unwrap_or_default();
                acls.extend(descriptor.acls.iter().cloned());
                host.set_acls(acls);
            }

            for hook in &descriptor.hooks {
                host.register_hook(hook.kind, name, hook.handler.clone())
                    .context(format!("{} hook of {}.{name}", hook.kind, self.model))?;
            }

            debug!(model = %self.model, operation = name, acls = descriptor.acls.len(), hooks = descriptor.hooks.len(), "endpoint registered");
            report.registered.push(name.to_owned());
        }

        for name in self.suppression.names() {
            if host.disable_operation(name) {
                debug!(model = %self.model, operation = name, "operation disabled");
                report.disabled.push(name.to_owned());
            } else {
                warn!(model = %self.model, operation = name, "suppressed operation is unknown to the host");
                report.unknown.push(name.to_owned());
            }
        }

        if policy == SuppressionPolicy::Strict && !report.unknown.is_empty() {
            return Err(EndpointError::UnknownOperation {
                message: report.unknown.join(", ").into(),
                context: Some(self.model.clone().into()),
            });
        }

        Ok(report)
    }
}
