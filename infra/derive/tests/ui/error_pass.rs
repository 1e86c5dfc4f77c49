use portico_derive::portico_error;
use std::borrow::Cow;

#[portico_error]
pub enum ManifestError {
    #[error("Manifest I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Missing handler{}: {message}", format_context(.context))]
    MissingHandler { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read(path: &str) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).context("Reading manifest")
}

fn main() {
    let err = read("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("(Reading manifest)"));

    let fallback: ManifestError = "boom".into();
    assert!(matches!(fallback, ManifestError::Internal { .. }));

    let tagged: Result<(), ManifestError> =
        Err(ManifestError::MissingHandler { message: "login".into(), context: None });
    let tagged = tagged.context("user model").unwrap_err();
    assert_eq!(tagged.to_string(), "Missing handler (user model): login");
}
