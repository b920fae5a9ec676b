use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ObjectStoreError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    #[error("invalid object store url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("object store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("object store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to encode storage path: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to read object: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// Why a single image could not be inlined
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),

    #[error("failed to parse stored object: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
