//! Feature vector assembly.
//!
//! The three regressors were trained on rows with this exact column order.
//! Nothing in the model artifacts records it, so the order lives here as a
//! constant and `feature_vector` is the only place a row is ever built.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ApiError;
use crate::types::SensorReading;

pub const FEATURE_DIM: usize = 11;

/// Training column order. Do not reorder.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "co_raw",
    "co_conv_linear_ppm",
    "no2_raw",
    "no2_mv",
    "no2_mv_log",
    "pm25_raw",
    "pm10_raw",
    "temperature",
    "humidity",
    "hour",
    "dayofweek",
];

pub type FeatureVector = [f64; FEATURE_DIM];

/// Accepted timestamp layouts, tried after RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp string into naive clock fields.
///
/// RFC 3339 inputs are accepted with any offset; the offset is discarded and
/// the written clock time is used, since the models were trained on naive
/// local timestamps. A bare date parses as midnight.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ApiError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(ApiError::InvalidTimestamp(raw.to_string()))
}

/// Build the model input row for one reading.
///
/// Rejects `no2_mv <= -1` up front: ln(1 + no2_mv) is undefined there and a
/// NaN feature would silently poison all three predictions.
pub fn feature_vector(reading: &SensorReading) -> Result<FeatureVector, ApiError> {
    if reading.no2_mv <= -1.0 {
        return Err(ApiError::No2MvOutOfRange(reading.no2_mv));
    }
    let ts = parse_timestamp(&reading.timestamp)?;
    let hour = f64::from(ts.hour());
    let dayofweek = f64::from(ts.weekday().num_days_from_monday());
    let no2_mv_log = reading.no2_mv.ln_1p();

    Ok([
        reading.co_raw,
        reading.co_conv_linear_ppm,
        reading.no2_raw,
        reading.no2_mv,
        no2_mv_log,
        reading.pm25_raw,
        reading.pm10_raw,
        reading.temperature,
        reading.humidity,
        hour,
        dayofweek,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(no2_mv: f64, timestamp: &str) -> SensorReading {
        SensorReading {
            co_raw: 1.2,
            co_conv_linear_ppm: 0.0,
            no2_raw: 0.0,
            no2_mv,
            pm25_raw: 10.0,
            pm10_raw: 20.0,
            temperature: 25.0,
            humidity: 50.0,
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn monday_morning_calendar_features() {
        // 2024-01-15 is a Monday
        let ts = parse_timestamp("2024-01-15T08:30:00").unwrap();
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.weekday().num_days_from_monday(), 0);
    }

    #[test]
    fn sunday_maps_to_six() {
        let ts = parse_timestamp("2024-01-14T23:59:59").unwrap();
        assert_eq!(ts.weekday().num_days_from_monday(), 6);
    }

    #[test]
    fn accepts_rfc3339_offset_and_space_separator() {
        let with_offset = parse_timestamp("2024-01-15T08:30:00+05:00").unwrap();
        assert_eq!(with_offset.hour(), 8);
        let spaced = parse_timestamp("2024-01-15 08:30:00").unwrap();
        assert_eq!(spaced, parse_timestamp("2024-01-15T08:30:00").unwrap());
    }

    #[test]
    fn accepts_minute_precision_timestamps() {
        let expected = parse_timestamp("2024-01-15T08:30:00").unwrap();
        assert_eq!(parse_timestamp("2024-01-15T08:30").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15 08:30").unwrap(), expected);
    }

    #[test]
    fn bare_date_is_midnight() {
        let ts = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.minute(), 0);
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(matches!(
            parse_timestamp("next tuesday"),
            Err(ApiError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn vector_matches_training_order_exactly() {
        let v = feature_vector(&reading(0.0, "2024-01-15T08:30:00")).unwrap();
        assert_eq!(v, [1.2, 0.0, 0.0, 0.0, 0.0, 10.0, 20.0, 25.0, 50.0, 8.0, 0.0]);
    }

    #[test]
    fn no2_mv_log_is_zero_at_zero() {
        let v = feature_vector(&reading(0.0, "2024-01-15T08:30:00")).unwrap();
        assert_eq!(v[4], 0.0);
    }

    #[test]
    fn no2_mv_log_uses_ln_1p() {
        let v = feature_vector(&reading(1.0, "2024-01-15T08:30:00")).unwrap();
        assert!((v[4] - 2.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn no2_mv_at_or_below_minus_one_is_rejected() {
        assert!(matches!(
            feature_vector(&reading(-1.0, "2024-01-15T08:30:00")),
            Err(ApiError::No2MvOutOfRange(_))
        ));
        assert!(matches!(
            feature_vector(&reading(-2.5, "2024-01-15T08:30:00")),
            Err(ApiError::No2MvOutOfRange(_))
        ));
    }

    #[test]
    fn names_and_dim_agree() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_DIM);
    }
}
