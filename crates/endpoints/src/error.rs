use std::borrow::Cow;

/// A specialized [`EndpointError`] enum of this crate.
#[portico_derive::portico_error]
pub enum EndpointError {
    /// An endpoint definition declares no handler; the model cannot be wired.
    #[error("Endpoint has no handler{}: {message}", format_context(.context))]
    MissingHandler { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The model's endpoint definitions could not be located or parsed.
    #[error("Failed to load endpoint definitions{}: {message}", format_context(.context))]
    DefinitionLoad { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The declared HTTP verb is not one the host understands.
    #[error("Unsupported HTTP verb{}: {message}", format_context(.context))]
    InvalidVerb { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A definition is structurally unusable (empty name, duplicate name, unknown hook).
    #[error("Invalid endpoint definition{}: {message}", format_context(.context))]
    InvalidDefinition { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Strict suppression found names the host does not expose.
    #[error("Unknown operations cannot be suppressed{}: {message}", format_context(.context))]
    UnknownOperation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The host rejected a registration.
    #[error("Host rejected registration{}: {message}", format_context(.context))]
    Host { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal endpoint error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
