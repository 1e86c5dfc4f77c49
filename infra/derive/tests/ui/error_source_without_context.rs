use portico_derive::portico_error;

#[portico_error]
pub enum ManifestError {
    #[error("Manifest I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
