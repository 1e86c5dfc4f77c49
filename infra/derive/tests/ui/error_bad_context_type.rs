use portico_derive::portico_error;

#[portico_error]
pub enum ManifestError {
    #[error("Manifest error: {message}")]
    Invalid { message: String, context: Option<String> },
}

fn main() {}
