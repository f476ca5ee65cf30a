use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error as _},
};
use serde_json::Value;

use crate::{
    condition::DayOrNight,
    error::{Result, WeatherError},
};

/// Deserialize one upstream payload, mapping serde failures onto
/// [`WeatherError::MissingField`] / [`WeatherError::Parse`] with the full
/// field path (e.g. `hourly[3].prec`).
pub(crate) fn from_value<T: DeserializeOwned>(payload: &'static str, value: &Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        let message = e.inner().to_string();

        match missing_field_name(&message) {
            Some(name) if path == "." => WeatherError::missing(payload, name),
            Some(name) => WeatherError::missing(payload, format!("{path}.{name}")),
            None if path == "." => WeatherError::parse(payload, message),
            None => WeatherError::parse(path, message),
        }
    })
}

fn missing_field_name(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Option<Vec<RawError>>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    message: String,
}

/// Fails with [`WeatherError::Upstream`] when `value` carries a non-empty
/// `errors` list.
pub(crate) fn check_errors(payload: &'static str, value: &Value) -> Result<()> {
    let envelope: ErrorEnvelope = from_value(payload, value)?;
    let errors = envelope.errors.unwrap_or_default();
    if errors.is_empty() {
        return Ok(());
    }

    let messages = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
    Err(WeatherError::Upstream(format!("{payload}: {messages}")))
}

// Provider numbers arrive either as JSON numbers or numeric strings.

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn not_numeric<E: serde::de::Error>(value: &Value) -> E {
    match value {
        Value::String(s) => E::custom(format!("not numeric: {s}")),
        other => E::custom(format!("not numeric: {other}")),
    }
}

pub(crate) fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    to_f64(&value).ok_or_else(|| not_numeric(&value))
}

pub(crate) fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        Some(value) => to_f64(&value).map(Some).ok_or_else(|| not_numeric(&value)),
        None => Ok(None),
    }
}

pub(crate) fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    to_i64(&value).ok_or_else(|| not_numeric(&value))
}

pub(crate) fn opt_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        Some(value) => to_i64(&value).map(Some).ok_or_else(|| not_numeric(&value)),
        None => Ok(None),
    }
}

pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    to_text(&value).ok_or_else(|| D::Error::custom(format!("expected text, found {value}")))
}

pub(crate) fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        Some(value) => to_text(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected text, found {value}"))),
        None => Ok(None),
    }
}

fn bounded<'de, D: Deserializer<'de>>(d: D, min: i64, max: i64) -> Result<u32, D::Error> {
    let v = integer(d)?;
    if (min..=max).contains(&v) {
        Ok(v as u32)
    } else {
        Err(D::Error::custom(format!("{v} is outside {min}..={max}")))
    }
}

pub(crate) fn hour<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    bounded(d, 0, 23)
}

pub(crate) fn month<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    bounded(d, 1, 12)
}

pub(crate) fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = number(d)?;
    if v < 0.0 {
        return Err(D::Error::custom(format!("negative amount: {v}")));
    }
    Ok(v)
}

pub(crate) fn percent<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let v = number(d)?;
    if !(0.0..=100.0).contains(&v) {
        return Err(D::Error::custom(format!("{v} is outside 0..=100")));
    }
    Ok(v.round() as u8)
}

pub(crate) fn day_or_night<'de, D: Deserializer<'de>>(d: D) -> Result<DayOrNight, D::Error> {
    let flag = text(d)?;
    DayOrNight::from_flag(&flag)
        .ok_or_else(|| D::Error::custom(format!("expected D or N, found {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Reading {
        #[serde(deserialize_with = "number")]
        prec: f64,
        #[serde(default, deserialize_with = "opt_number")]
        uv: Option<f64>,
        #[serde(deserialize_with = "hour")]
        hour: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Forecast {
        hourly: Vec<Reading>,
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let r: Reading = from_value("primary", &json!({ "prec": "0.5", "hour": "13" })).unwrap();
        assert_eq!(r.prec, 0.5);
        assert_eq!(r.hour, 13);

        let r: Reading = from_value("primary", &json!({ "prec": 2, "hour": 0 })).unwrap();
        assert_eq!(r.prec, 2.0);
    }

    #[test]
    fn non_numeric_string_is_parse_error() {
        let err = from_value::<Forecast>(
            "primary",
            &json!({ "hourly": [{ "prec": "0", "hour": 1 }, { "prec": "heavy", "hour": 2 }] }),
        )
        .unwrap_err();

        assert!(
            matches!(err, WeatherError::Parse { ref field, ref reason } if field == "hourly[1].prec" && reason.contains("heavy"))
        );
    }

    #[test]
    fn missing_field_reports_full_path() {
        let err = from_value::<Forecast>("primary", &json!({ "hourly": [{ "hour": 1 }] })).unwrap_err();
        assert_eq!(err.to_string(), "Missing field `hourly[0].prec` in primary payload");
    }

    #[test]
    fn missing_top_level_field() {
        let err = from_value::<Forecast>("primary", &json!({})).unwrap_err();
        assert!(matches!(err, WeatherError::MissingField { ref field, .. } if field == "hourly"));
    }

    #[test]
    fn null_optional_counts_as_absent() {
        let r: Reading = from_value("primary", &json!({ "prec": 0, "hour": 1, "uv": null })).unwrap();
        assert_eq!(r.uv, None);
    }

    #[test]
    fn out_of_range_hour_is_parse_error() {
        let err = from_value::<Reading>("primary", &json!({ "prec": 0, "hour": 24 })).unwrap_err();
        assert!(matches!(err, WeatherError::Parse { ref field, .. } if field == "hour"));
    }

    #[test]
    fn upstream_errors_are_joined() {
        let v = json!({ "errors": [{ "message": "bad loc" }, { "message": "quota" }] });
        let err = check_errors("primary", &v).unwrap_err();
        assert_eq!(err.to_string(), "Upstream reported errors: primary: bad loc; quota");
    }

    #[test]
    fn empty_or_null_error_list_is_ok() {
        assert!(check_errors("primary", &json!({ "errors": [] })).is_ok());
        assert!(check_errors("primary", &json!({ "errors": null })).is_ok());
        assert!(check_errors("primary", &json!({ "lat": 1 })).is_ok());
    }
}
