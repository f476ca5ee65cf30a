use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    condition::DayOrNight,
    error::{Result, WeatherError},
    raw,
};

const PRIMARY: &str = "primary";
const COMMENTARY: &str = "commentary";
const AIR_QUALITY: &str = "air quality";
const PARTICULATE: &str = "particulate";

/// Provider day marker. Only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayToken(String);

impl DayToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DayToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u32> for DayToken {
    fn from(value: u32) -> Self {
        Self::new(value.to_string())
    }
}

/// One forecast hour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyRecord {
    #[serde(deserialize_with = "raw::hour")]
    pub hour: u32,
    #[serde(deserialize_with = "day_token")]
    pub day: DayToken,
    #[serde(deserialize_with = "raw::month")]
    pub month: u32,
    #[serde(rename = "prec", deserialize_with = "raw::amount")]
    pub precipitation_amount: f64,
    #[serde(rename = "pop", deserialize_with = "raw::percent")]
    pub precipitation_probability: u8,
    #[serde(rename = "wx", deserialize_with = "raw::integer")]
    pub icon_code: i64,
    #[serde(rename = "dayOrNight", deserialize_with = "raw::day_or_night")]
    pub day_or_night: DayOrNight,

    #[serde(rename = "temp", default, deserialize_with = "raw::opt_number")]
    pub temperature: Option<f64>,
    #[serde(rename = "feeltemp", default, deserialize_with = "raw::opt_number")]
    pub apparent_temperature: Option<f64>,
    #[serde(rename = "dewpt", default, deserialize_with = "raw::opt_number")]
    pub dew_point: Option<f64>,
    #[serde(rename = "humi", default, deserialize_with = "raw::opt_number")]
    pub humidity: Option<f64>,
    #[serde(rename = "wspd", default, deserialize_with = "raw::opt_number")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "wdir", default, deserialize_with = "raw::opt_text")]
    pub wind_bearing: Option<String>,
    #[serde(rename = "uv", default, deserialize_with = "raw::opt_number")]
    pub uv_index: Option<f64>,
    /// Epoch seconds.
    #[serde(rename = "TimeUtc", default, deserialize_with = "raw::opt_integer")]
    pub time_utc: Option<i64>,
}

impl HourlyRecord {
    pub fn new(
        hour: u32,
        day: impl Into<DayToken>,
        month: u32,
        precipitation_amount: f64,
        precipitation_probability: u8,
        icon_code: i64,
        day_or_night: DayOrNight,
    ) -> Self {
        Self {
            hour,
            day: day.into(),
            month,
            precipitation_amount,
            precipitation_probability,
            icon_code,
            day_or_night,
            temperature: None,
            apparent_temperature: None,
            dew_point: None,
            humidity: None,
            wind_speed: None,
            wind_bearing: None,
            uv_index: None,
            time_utc: None,
        }
    }
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRecord {
    #[serde(deserialize_with = "day_token")]
    pub day: DayToken,
    /// Morning icon; the daily condition is classified from it.
    #[serde(rename = "wx_am", deserialize_with = "raw::integer")]
    pub icon_code: i64,
    #[serde(rename = "tmax", deserialize_with = "raw::number")]
    pub temperature_max: f64,
    #[serde(rename = "tmin", deserialize_with = "raw::number")]
    pub temperature_min: f64,
    #[serde(rename = "pop", deserialize_with = "raw::percent")]
    pub precipitation_probability: u8,

    #[serde(rename = "prec", default, deserialize_with = "raw::opt_number")]
    pub precipitation_amount: Option<f64>,
    #[serde(rename = "rhum", default, deserialize_with = "raw::opt_number")]
    pub humidity: Option<f64>,
    #[serde(rename = "uv", default, deserialize_with = "raw::opt_number")]
    pub uv_index: Option<f64>,
    #[serde(rename = "wdir", default, deserialize_with = "raw::opt_text")]
    pub wind_bearing: Option<String>,
    #[serde(rename = "wspd", default, deserialize_with = "raw::opt_number")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "TimeUtc", default, deserialize_with = "raw::opt_integer")]
    pub time_utc: Option<i64>,
}

/// The provider's `current` object. Serializes under its own field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentRecord {
    #[serde(rename(deserialize = "temp"), deserialize_with = "raw::number")]
    pub temperature: f64,
    #[serde(rename(deserialize = "rhum"), deserialize_with = "raw::number")]
    pub humidity: f64,
    #[serde(rename(deserialize = "wx"), deserialize_with = "raw::integer")]
    pub icon_code: i64,
    #[serde(rename(deserialize = "feeltemp"), default, deserialize_with = "raw::opt_number")]
    pub apparent_temperature: Option<f64>,
    #[serde(rename(deserialize = "dewpt"), default, deserialize_with = "raw::opt_number")]
    pub dew_point: Option<f64>,
    #[serde(rename(deserialize = "press"), default, deserialize_with = "raw::opt_number")]
    pub pressure: Option<f64>,
    #[serde(rename(deserialize = "wspd"), default, deserialize_with = "raw::opt_number")]
    pub wind_speed: Option<f64>,
    #[serde(rename(deserialize = "wdir"), default, deserialize_with = "raw::opt_text")]
    pub wind_bearing: Option<String>,
    #[serde(rename(deserialize = "uv"), default, deserialize_with = "raw::opt_number")]
    pub uv_index: Option<f64>,
    #[serde(rename(deserialize = "visi"), default, deserialize_with = "raw::opt_number")]
    pub visibility: Option<f64>,
    #[serde(rename(deserialize = "TimeLocal"), default, deserialize_with = "raw::opt_text")]
    pub observed_local: Option<String>,
}

/// Primary forecast payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrimaryPayload {
    #[serde(deserialize_with = "raw::number")]
    pub lat: f64,
    #[serde(deserialize_with = "raw::number")]
    pub lon: f64,
    #[serde(deserialize_with = "raw::text")]
    pub sunrise: String,
    #[serde(deserialize_with = "raw::text")]
    pub sunset: String,
    pub current: CurrentRecord,
    pub hourly: Vec<HourlyRecord>,
    pub daily: Vec<DailyRecord>,
}

impl PrimaryPayload {
    pub fn parse(value: &Value) -> Result<Self> {
        raw::check_errors(PRIMARY, value)?;
        raw::from_value(PRIMARY, value)
    }

    /// First forecast hour; required by every cycle.
    pub fn first_hour(&self) -> Result<&HourlyRecord> {
        self.hourly.first().ok_or_else(|| WeatherError::missing(PRIMARY, "hourly[0]"))
    }

    /// Today's forecast; required by every cycle.
    pub fn today(&self) -> Result<&DailyRecord> {
        self.daily.first().ok_or_else(|| WeatherError::missing(PRIMARY, "daily[0]"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirReading {
    #[serde(deserialize_with = "raw::text")]
    pub description: String,
    #[serde(deserialize_with = "raw::number")]
    pub value: f64,
}

#[derive(Debug, Deserialize)]
struct RawCommentary {
    #[serde(deserialize_with = "raw::text")]
    cur_cmt: String,
    daily: Vec<RawCommentaryDay>,
    air: RawAir,
}

#[derive(Debug, Deserialize)]
struct RawCommentaryDay {
    #[serde(deserialize_with = "raw::text")]
    day_cmt: String,
    #[serde(deserialize_with = "raw::text")]
    night_cmt: String,
    #[serde(rename = "dayShortCmt", deserialize_with = "raw::text")]
    day_short: String,
    #[serde(rename = "nextDayShortCmt", deserialize_with = "raw::text")]
    next_day_short: String,
}

#[derive(Debug, Deserialize)]
struct RawAir {
    pm10: AirReading,
    pm25: AirReading,
}

/// Commentary payload (element 0 of the provider's array).
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryPayload {
    pub current: String,
    pub day: String,
    pub night: String,
    pub day_short: String,
    pub next_day_short: String,
    pub pm10: AirReading,
    pub pm25: AirReading,
}

impl CommentaryPayload {
    pub fn parse(value: &Value) -> Result<Self> {
        if let Some(first) = value.get(0) {
            raw::check_errors(COMMENTARY, first)?;
        }

        let entries: Vec<RawCommentary> = raw::from_value(COMMENTARY, value)?;
        let first = entries.into_iter().next().ok_or_else(|| WeatherError::missing(COMMENTARY, "[0]"))?;
        let today = first
            .daily
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::missing(COMMENTARY, "[0].daily[0]"))?;

        Ok(Self {
            current: first.cur_cmt,
            day: today.day_cmt,
            night: today.night_cmt,
            day_short: today.day_short,
            next_day_short: today.next_day_short,
            pm10: first.air.pm10,
            pm25: first.air.pm25,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawAirQuality {
    current: RawTempDiff,
    aq: RawAirIndex,
}

#[derive(Debug, Deserialize)]
struct RawTempDiff {
    #[serde(deserialize_with = "raw::integer")]
    tempdiff: i64,
}

#[derive(Debug, Deserialize)]
struct RawAirIndex {
    #[serde(deserialize_with = "raw::integer")]
    khai: i64,
}

/// Air-quality payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQualityPayload {
    /// Degrees warmer (positive) or cooler than yesterday.
    pub temp_diff: i64,
    pub khai: i64,
}

impl AirQualityPayload {
    pub fn parse(value: &Value) -> Result<Self> {
        raw::check_errors(AIR_QUALITY, value)?;
        let raw: RawAirQuality = raw::from_value(AIR_QUALITY, value)?;
        Ok(Self { temp_diff: raw.current.tempdiff, khai: raw.aq.khai })
    }
}

#[derive(Debug, Deserialize)]
struct RawParticulate {
    pm: RawParticulateForecast,
}

#[derive(Debug, Deserialize)]
struct RawParticulateForecast {
    forcast: ParticulateForecast,
}

/// Optional particulate forecast; entries are passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticulateForecast {
    pub daily: Vec<Value>,
    pub hourly: Vec<Value>,
}

impl ParticulateForecast {
    pub fn parse(value: &Value) -> Result<Self> {
        raw::check_errors(PARTICULATE, value)?;
        let raw: RawParticulate = raw::from_value(PARTICULATE, value)?;
        Ok(raw.pm.forcast)
    }
}

fn day_token<'de, D: Deserializer<'de>>(d: D) -> Result<DayToken, D::Error> {
    raw::text(d).map(DayToken)
}
