use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Input pattern was an empty string.")]
    EmptyPattern,

    #[error("Pattern must start with the \"spiffe://\" prefix.")]
    InvalidPrefix,

    #[error("Wildcard '*' can only appear between two separators.")]
    InvalidSingleWildcard,

    #[error("Wildcard '**' can only appear at the end of a pattern.")]
    InvalidDoubleWildcard,

    #[error("Invalid SPIFFE segment (empty).")]
    InvalidSegment,

    #[error("An error occurred deserializing ACL definition {0}.")]
    Deserializing(#[from] serde_json::Error),
}
