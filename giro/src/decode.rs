use crate::{DecodeError, Measurement, MeasurementSeries};
use chrono::NaiveDateTime;

/// Wire timestamp layout, e.g. `2024-05-01T12:15:00.000Z`.
const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Marker the service prepends to an in-band error line.
const ERROR_PREFIX: &str = "ERROR: ";

/// Decodes a DIDB plain-text response body into a [`MeasurementSeries`]
/// for the requested characteristic.
///
/// Comment (`#`) and blank lines are skipped, as are lines with fewer
/// than three whitespace-separated fields. Field 0 is the observation
/// time, field 2 the scaled value; remaining fields (confidence score,
/// qualifiers) are ignored. An `ERROR: ` line stops decoding with a
/// service-reported error. The returned series is reversed from wire
/// order so index 0 holds the most recent sample.
pub fn decode_series(body: &str, characteristic: &str) -> Result<MeasurementSeries, DecodeError> {
    let mut series: MeasurementSeries = Vec::new();
    for line in body.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
            return Err(DecodeError::Service(message.trim().to_owned()));
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        let time = match NaiveDateTime::parse_from_str(fields[0], WIRE_TIME_FORMAT) {
            Ok(naive) => naive.and_utc(),
            Err(source) => {
                return Err(DecodeError::Timestamp {
                    field: fields[0].to_owned(),
                    source,
                    partial: series,
                })
            }
        };
        let value = match fields[2].parse::<f64>() {
            Ok(value) => value,
            Err(source) => {
                return Err(DecodeError::Value {
                    field: fields[2].to_owned(),
                    source,
                    partial: series,
                })
            }
        };
        series.push(Measurement {
            time,
            characteristic: characteristic.to_owned(),
            value,
        });
    }
    series.reverse();
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::decode_series;
    use crate::DecodeError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_single_data_line() {
        let series = decode_series("2024-05-01T12:15:00.000Z 100 7.35 //\n", "foF2").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].time, Utc.with_ymd_and_hms(2024, 5, 1, 12, 15, 0).unwrap());
        assert_eq!(series[0].characteristic, "foF2");
        assert_eq!(series[0].value, 7.35);
    }

    #[test]
    fn test_comments_and_blanks_ignored() {
        let body = "#Global Ionosphere Radio Observatory\n\
                    #Time                     CS   foF2 QD\n\
                    \n\
                    \t \n";
        let series = decode_series(body, "foF2").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_short_lines_skipped() {
        let body = "2024-05-01T12:15:00.000Z 100\n\
                    2024-05-01T12:30:00.000Z 100 7.35\n";
        let series = decode_series(body, "foF2").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 7.35);
    }

    #[test]
    fn test_service_error() {
        let err = decode_series("ERROR: station not found\n", "foF2").unwrap_err();
        match &err {
            DecodeError::Service(message) => assert_eq!(message, "station not found"),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.partial().is_empty());
    }

    #[test]
    fn test_service_error_discards_prior_samples() {
        let body = "2024-05-01T12:15:00.000Z 100 7.35\n\
                    ERROR: something broke\n";
        let err = decode_series(body, "foF2").unwrap_err();
        assert!(matches!(err, DecodeError::Service(_)));
        assert!(err.partial().is_empty());
    }

    #[test]
    fn test_reverses_wire_order() {
        let body = "2024-05-01T10:00:00.000Z 100 7.10\n\
                    2024-05-01T10:30:00.000Z 100 7.20\n\
                    2024-05-01T11:00:00.000Z 100 7.30\n";
        let series = decode_series(body, "foF2").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].time, Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap());
        assert_eq!(series[2].time, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_bad_timestamp_keeps_partial() {
        let body = "2024-05-01T10:00:00.000Z 100 7.10\n\
                    2024-05-01 10:30:00 100 7.20\n";
        let err = decode_series(body, "foF2").unwrap_err();
        match &err {
            DecodeError::Timestamp { field, partial, .. } => {
                assert_eq!(field, "2024-05-01");
                assert_eq!(partial.len(), 1);
                assert_eq!(partial[0].value, 7.10);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_keeps_partial() {
        let body = "2024-05-01T10:00:00.000Z 100 7.10\n\
                    2024-05-01T10:30:00.000Z 100 ---\n";
        let err = decode_series(body, "foF2").unwrap_err();
        match &err {
            DecodeError::Value { field, partial, .. } => {
                assert_eq!(field, "---");
                assert_eq!(err.partial(), &partial[..]);
                assert_eq!(partial.len(), 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let series =
            decode_series("2024-05-01T12:15:00.000Z 100 312.1 // extra fields here\n", "hmF2")
                .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 312.1);
    }
}
