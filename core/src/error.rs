use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for every command in the crate.
///
/// Commands return these as values; nothing here is meant to unwind past the
/// command boundary. Underlying library errors (HTTP, JSON, SQLite) are folded
/// into the matching variant rather than leaking their own types.
#[derive(Debug, Error)]
pub enum Error {
    // --- Network ---
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("client error (HTTP {0})")]
    Client(u16),
    #[error("server error (HTTP {0})")]
    Server(u16),
    #[error("unexpected HTTP status {0}")]
    UnknownStatus(u16),

    // --- Decode ---
    #[error("empty result")]
    EmptyResult,
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    // --- Input validation ---
    #[error("record has no id")]
    MissingId,
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("bad input: {0}")]
    BadInput(String),

    // --- Store / authorization ---
    #[error("duplicate record: {0}")]
    Duplicate(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("cannot modify canonical record {0}")]
    Unauthorized(String),
    #[error("{0} is not archived")]
    NotArchived(String),
    #[error("meal {0} sits in the archive")]
    LocatedInArchive(String),

    // --- Flags ---
    #[error("no flag mapping for area '{0}'")]
    UnresolvedCountry(String),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedPayload(e.to_string())
    }
}

/// Classify an HTTP status line into the network error categories.
///
/// 2xx passes, 4xx is the caller's fault, 5xx is the server's, and anything
/// else (redirects the client did not follow, informational codes) is
/// `UnknownStatus`.
pub fn classify_status(code: u16) -> Result<()> {
    match code {
        200..=299 => Ok(()),
        400..=499 => Err(Error::Client(code)),
        500..=599 => Err(Error::Server(code)),
        other => Err(Error::UnknownStatus(other)),
    }
}
