use crate::Measurement;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GiroError {
    #[error("bad base url, {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] DecodeError),
}

/// Failure to decode a DIDB response body.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The service reported an error in-band (an `ERROR: ` line). The
    /// message is the service's own text, verbatim after trimming. Any
    /// samples decoded before the line are not usable.
    #[error("{0}")]
    Service(String),

    /// A data line's timestamp field did not parse. Samples decoded
    /// before the bad line are carried in `partial` (wire order) for
    /// callers that choose to use them.
    #[error("bad timestamp {field:?}, {source}")]
    Timestamp {
        field: String,
        source: chrono::ParseError,
        partial: Vec<Measurement>,
    },

    /// A data line's value field did not parse. Same partial-data
    /// contract as [`DecodeError::Timestamp`].
    #[error("bad value {field:?}, {source}")]
    Value {
        field: String,
        source: std::num::ParseFloatError,
        partial: Vec<Measurement>,
    },
}

impl DecodeError {
    /// Samples decoded before the failure, in wire (chronological)
    /// order. Empty for service-reported errors, whose series is never
    /// usable.
    pub fn partial(&self) -> &[Measurement] {
        match self {
            Self::Service(_) => &[],
            Self::Timestamp { partial, .. } | Self::Value { partial, .. } => partial,
        }
    }
}
