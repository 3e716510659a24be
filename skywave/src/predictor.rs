use crate::SkywaveError;
use chrono::{DateTime, Duration, Utc};
use giro::{Client, ClientBuilder, Measurement, MeasurementSeries, DEFAULT_STATION};
use log::debug;

/// Characteristic holding the F2-layer peak height.
const PEAK_HEIGHT_CHAR: &str = "hmF2";

/// Peak heights at or below this are sensor noise, not hop model
/// inputs (km).
const MIN_PEAK_HEIGHT_KM: f64 = 10.0;

/// Trailing window inspected for the latest sounding (hours).
const LOOKBACK_HOURS: i64 = 1;

/// Single-hop propagation predictor backed by live DIDB soundings.
///
/// Holds its own [`giro::Client`] and default station, so every knob
/// is per instance rather than process wide.
pub struct Predictor {
    client: Client,
    station: String,
}

impl Predictor {
    pub fn builder() -> PredictorBuilder {
        PredictorBuilder {
            client: Client::builder(),
            station: DEFAULT_STATION.to_owned(),
        }
    }

    /// The configured default station code.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Predicts the ground distance in km reachable by a single hop
    /// leaving the ground at `toa_deg` degrees above the horizon,
    /// using the latest hmF2 from `station` (or the configured
    /// default).
    pub fn distance_by_toa(
        &self,
        toa_deg: f64,
        station: Option<&str>,
    ) -> Result<f64, SkywaveError> {
        let station = station.unwrap_or(&self.station);
        let peak_height = self.latest_peak_height(station)?;
        Ok(hopgeom::distance(toa_deg, peak_height))
    }

    /// Predicts the take-off angle in degrees above the horizon of a
    /// single hop to a transceiver `distance_km` away, using the
    /// latest hmF2 from `station` (or the configured default).
    pub fn toa_by_distance(
        &self,
        distance_km: f64,
        station: Option<&str>,
    ) -> Result<f64, SkywaveError> {
        let station = station.unwrap_or(&self.station);
        let peak_height = self.latest_peak_height(station)?;
        Ok(hopgeom::take_off_angle(distance_km, peak_height))
    }

    /// Fetches any characteristic's series for the explicit or default
    /// station.
    pub fn series(
        &self,
        characteristic: &str,
        station: Option<&str>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<MeasurementSeries, SkywaveError> {
        let station = station.unwrap_or(&self.station);
        Ok(self.client.series(characteristic, station, from, to)?)
    }

    /// Latest valid hmF2 (km) scaled by `station` over the trailing
    /// hour.
    fn latest_peak_height(&self, station: &str) -> Result<f64, SkywaveError> {
        let to = Utc::now();
        let from = to - Duration::hours(LOOKBACK_HOURS);
        let series = self.client.series(PEAK_HEIGHT_CHAR, station, from, to)?;
        let peak_height = latest_valid(&series, station)?;
        debug!("latest hmF2 from {station}: {peak_height} km");
        Ok(peak_height)
    }
}

pub struct PredictorBuilder {
    client: ClientBuilder,
    station: String,
}

impl PredictorBuilder {
    /// Default station code (defaults to [`giro::DEFAULT_STATION`],
    /// Juliusruh). Passed through opaquely; the service decides
    /// whether it exists.
    #[must_use]
    pub fn station(mut self, code: impl Into<String>) -> Self {
        self.station = code.into();
        self
    }

    /// Service endpoint (defaults to [`giro::DEFAULT_BASE_URL`]).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.base_url(url);
        self
    }

    /// Reference distance in km for MUF(D) requests (defaults to
    /// 3000).
    #[must_use]
    pub fn muf_distance(mut self, km: f64) -> Self {
        self.client = self.client.muf_distance(km);
        self
    }

    /// Disable TLS certificate verification (defaults to off).
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.client = self.client.danger_accept_invalid_certs(accept);
        self
    }

    pub fn build(self) -> Result<Predictor, SkywaveError> {
        Ok(Predictor {
            client: self.client.build()?,
            station: self.station,
        })
    }
}

/// Pulls the newest sample off a most-recent-first series and checks
/// it is physically plausible.
fn latest_valid(series: &[Measurement], station: &str) -> Result<f64, SkywaveError> {
    let latest = series.first().ok_or_else(|| SkywaveError::NoData {
        station: station.to_owned(),
        hours: LOOKBACK_HOURS,
    })?;
    if latest.value <= MIN_PEAK_HEIGHT_KM {
        return Err(SkywaveError::InvalidValue {
            station: station.to_owned(),
            value: latest.value,
        });
    }
    Ok(latest.value)
}

#[cfg(test)]
mod tests {
    use super::{latest_valid, Predictor, LOOKBACK_HOURS};
    use crate::SkywaveError;
    use chrono::{TimeZone, Utc};
    use giro::Measurement;

    fn sample(value: f64) -> Measurement {
        Measurement {
            time: Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(),
            characteristic: "hmF2".to_owned(),
            value,
        }
    }

    #[test]
    fn test_latest_valid() {
        let series = vec![sample(267.4), sample(266.0)];
        assert_eq!(latest_valid(&series, "JR055").unwrap(), 267.4);
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let err = latest_valid(&[], "JR055").unwrap_err();
        assert!(matches!(&err, SkywaveError::NoData { station, .. } if station == "JR055"));
        // Message reports the window actually searched.
        assert_eq!(
            err.to_string(),
            format!("no hmF2 data from JR055 in the last {LOOKBACK_HOURS} h")
        );
    }

    #[test]
    fn test_low_value_is_invalid() {
        let err = latest_valid(&[sample(9.9)], "JR055").unwrap_err();
        assert!(matches!(
            err,
            SkywaveError::InvalidValue { value, .. } if value == 9.9
        ));
    }

    #[test]
    fn test_threshold_itself_is_invalid() {
        let err = latest_valid(&[sample(10.0)], "JR055").unwrap_err();
        assert!(matches!(err, SkywaveError::InvalidValue { .. }));
    }

    #[test]
    fn test_builder_defaults() {
        let predictor = Predictor::builder().build().unwrap();
        assert_eq!(predictor.station(), "JR055");
    }

    #[test]
    fn test_builder_station_override() {
        let predictor = Predictor::builder().station("EB040").build().unwrap();
        assert_eq!(predictor.station(), "EB040");
    }
}
