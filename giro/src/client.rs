use crate::{decode_series, GiroError, MeasurementSeries};
use chrono::{DateTime, Utc};
use log::debug;
use std::time::Duration;
use url::Url;

/// DIDB "get values" endpoint at the Lowell GIRO Data Center.
pub const DEFAULT_BASE_URL: &str = "https://lgdc.uml.edu/common/DIDBGetValues";

/// Juliusruh, the default sounding station.
pub const DEFAULT_STATION: &str = "JR055";

/// Default reference distance for the MUF(D) characteristic (km).
pub const DEFAULT_MUF_DISTANCE_KM: f64 = 3000.0;

const URSI_CODE_KEY: &str = "ursiCode";
const CHAR_NAME_KEY: &str = "charName";
const MUF_DISTANCE_KEY: &str = "DMUF";
const FROM_DATE_KEY: &str = "fromDate";
const TO_DATE_KEY: &str = "toDate";

/// Query timestamp layout, e.g. `2024-05-01 11:15:00` (UTC, no zone
/// suffix).
const QUERY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking DIDB client.
///
/// Configuration is fixed per instance, so concurrent callers sharing
/// a client never observe each other's settings changing mid-call.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: Url,
    muf_distance_km: f64,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder {
            base_url: DEFAULT_BASE_URL.to_owned(),
            muf_distance_km: DEFAULT_MUF_DISTANCE_KM,
            accept_invalid_certs: false,
        }
    }

    /// Retrieves and decodes one characteristic for `station` between
    /// `from` and `to`. The returned series is ordered
    /// most-recent-first; empty means the station reported nothing in
    /// the window.
    ///
    /// Characteristics understood by the service
    /// (<https://giro.uml.edu/didbase/scaled.php>):
    ///
    /// | name | description |
    /// |------|-------------|
    /// | foF2 | F2 layer critical frequency |
    /// | foF1 | F1 layer critical frequency |
    /// | foE | E layer critical frequency |
    /// | foEs | Es layer critical frequency |
    /// | fbEs | Blanketing frequency of Es-layer |
    /// | foEa | Critical frequency of auroral E-layer |
    /// | foP | Critical frequency of F region patch trace |
    /// | fxI | Maximum frequency of F trace |
    /// | MUFD | Maximum usable frequency at the reference distance |
    /// | MD | MUF(3000)/foF2 |
    /// | hF2 | Minimum virtual height of F2 trace |
    /// | hF | Minimum virtual height of F trace |
    /// | hE | Minimum virtual height of E trace |
    /// | hEs | Minimum virtual height of Es trace |
    /// | hEa | Minimum virtual height of auroral E trace |
    /// | hP | Minimum virtual height of F patch trace |
    /// | TypeEs | Type of Es layer(s) |
    /// | hmF2 | Peak height F2-layer |
    /// | hmF1 | Peak height F1-layer |
    /// | hmE | Peak height of E-layer |
    /// | zhalfNm | True height at 1/2 NmF2 |
    /// | yF2 | Half thickness of F2-layer |
    /// | yF1 | Half thickness of F1-layer |
    /// | yE | Half thickness of E-layer |
    /// | scaleF2 | Scale height at the F2-peak |
    /// | B0 | IRI thickness parameter |
    /// | B1 | IRI profile shape parameter |
    /// | D1 | IRI profile shape parameter |
    /// | TEC | Ionogram-derived total electron content |
    /// | FF | Frequency spread between fxF2 and fxI |
    /// | FE | Frequency spread beyond foE |
    /// | QF | Range spread of F-layer |
    /// | QE | Range spread of E-layer |
    /// | fmin | Minimum frequency of echoes |
    /// | fminF | Minimum frequency of F-layer echoes |
    /// | fminE | Minimum frequency of E-layer echoes |
    /// | fminEs | Minimum frequency of Es-layer |
    /// | foF2p | foF2 prediction by IRI no-storm option |
    pub fn series(
        &self,
        characteristic: &str,
        station: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<MeasurementSeries, GiroError> {
        let body = self.fetch(characteristic, station, from, to)?;
        let series = decode_series(&body, characteristic)?;
        debug!(
            "decoded {} samples of {characteristic} from {station}",
            series.len()
        );
        Ok(series)
    }

    /// Issues the GET and returns the raw response body. Transport
    /// failures (connect, timeout, non-2xx status) are returned
    /// without ever invoking the decoder.
    pub fn fetch(
        &self,
        characteristic: &str,
        station: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<String, GiroError> {
        let url = self.request_url(characteristic, station, from, to);
        debug!("GET {url}");
        let body = self.http.get(url).send()?.error_for_status()?.text()?;
        Ok(body)
    }

    fn request_url(
        &self,
        characteristic: &str,
        station: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(URSI_CODE_KEY, station)
            .append_pair(CHAR_NAME_KEY, characteristic)
            .append_pair(
                MUF_DISTANCE_KEY,
                &format!("{:.0}", self.muf_distance_km),
            )
            .append_pair(FROM_DATE_KEY, &from.format(QUERY_TIME_FORMAT).to_string())
            .append_pair(TO_DATE_KEY, &to.format(QUERY_TIME_FORMAT).to_string());
        url
    }
}

pub struct ClientBuilder {
    base_url: String,
    muf_distance_km: f64,
    accept_invalid_certs: bool,
}

impl ClientBuilder {
    /// Service endpoint (defaults to [`DEFAULT_BASE_URL`]).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Reference distance in km for the MUF(D) characteristic
    /// (defaults to 3000). Sent with every request; the service only
    /// interprets it for `MUFD`.
    #[must_use]
    pub fn muf_distance(mut self, km: f64) -> Self {
        self.muf_distance_km = km;
        self
    }

    /// Disable TLS certificate verification (defaults to off, i.e.
    /// certificates are verified).
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<Client, GiroError> {
        let base_url = Url::parse(&self.base_url)?;
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()?;
        Ok(Client {
            http,
            base_url,
            muf_distance_km: self.muf_distance_km,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Client::builder()
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    #[test]
    fn test_request_url() {
        let client = Client::builder().build().unwrap();
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 1, 11, 15, 0).unwrap();
        let url = client.request_url("foF2", "JR055", from, to);
        assert_eq!(url.host_str(), Some("lgdc.uml.edu"));
        assert_eq!(url.path(), "/common/DIDBGetValues");
        let query: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(query["ursiCode"], "JR055");
        assert_eq!(query["charName"], "foF2");
        assert_eq!(query["DMUF"], "3000");
        assert_eq!(query["fromDate"], "2024-05-01 10:15:00");
        assert_eq!(query["toDate"], "2024-05-01 11:15:00");
        assert_eq!(query.len(), 5);
    }

    #[test]
    fn test_muf_distance_sent_as_whole_km() {
        let client = Client::builder().muf_distance(100.4).build().unwrap();
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 1, 11, 15, 0).unwrap();
        let url = client.request_url("MUFD", "JR055", from, to);
        assert!(url.query().unwrap().contains("DMUF=100"));
    }

    #[test]
    fn test_bad_base_url() {
        assert!(Client::builder().base_url("not a url").build().is_err());
    }
}
