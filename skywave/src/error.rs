use giro::GiroError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkywaveError {
    #[error("{0}")]
    Giro(#[from] GiroError),

    #[error("no hmF2 data from {station} in the last {hours} h")]
    NoData { station: String, hours: i64 },

    #[error("invalid hmF2 value {value} km from {station}")]
    InvalidValue { station: String, value: f64 },
}
