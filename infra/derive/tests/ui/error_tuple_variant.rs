use portico_derive::portico_error;

#[portico_error]
pub enum ManifestError {
    #[error("Manifest I/O error: {0}")]
    Io(std::io::Error),
}

fn main() {}
