use chrono::{DateTime, Utc};

/// A single scaled ionospheric characteristic sample.
///
/// Produced only by the response decoder; immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Observation time (UTC, millisecond precision on the wire).
    pub time: DateTime<Utc>,

    /// Name of the characteristic this sample belongs to, e.g. `foF2`
    /// or `hmF2`.
    pub characteristic: String,

    /// Scaled value in the characteristic's native unit (MHz for
    /// critical frequencies, km for heights).
    pub value: f64,
}

/// One request's worth of samples for a single characteristic and
/// station, ordered most-recent-first: index 0 is the latest sample.
///
/// The wire stream arrives in chronological-ascending order; the
/// decoder reverses it before returning. An empty series is valid and
/// means the station reported nothing in the requested window.
pub type MeasurementSeries = Vec<Measurement>;
