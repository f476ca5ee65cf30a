use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    briefing::Briefing,
    condition::{ConditionCategory, DayOrNight, classify_at},
    heat_index::HeatIndex,
    model::{AirReading, CurrentRecord, DailyRecord, HourlyRecord, ParticulateForecast},
    precip::PrecipitationWindow,
};

/// The six look-ahead windows computed every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationWindows {
    /// Remaining hours of today.
    pub today: PrecipitationWindow,
    /// Remaining hours of today plus 24.
    pub through_tomorrow: PrecipitationWindow,
    pub next_3h: PrecipitationWindow,
    pub next_6h: PrecipitationWindow,
    pub next_9h: PrecipitationWindow,
    pub next_12h: PrecipitationWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    pub current: String,
    pub day: String,
    pub night: String,
    pub day_short: String,
    pub next_day_short: String,
}

/// Flat current-conditions record handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    #[serde(flatten)]
    pub observed: CurrentRecord,
    pub condition: ConditionCategory,
    pub day_or_night: DayOrNight,
    pub sunrise: String,
    pub sunset: String,
    /// Today's precipitation probability.
    pub precipitation_probability: u8,
    pub commentary: Commentary,
    pub pm10: AirReading,
    pub pm25: AirReading,
    pub khai: i64,
    pub khai_grade: String,
    pub temp_diff: i64,
    pub temp_diff_comment: String,
    pub heat_index: HeatIndex,
    /// Translated heat-index grade.
    pub heat_index_label: String,
    pub precipitation: PrecipitationWindows,
    pub briefing: Briefing,
    pub particulate_forecast: Option<ParticulateForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: Option<DateTime<Utc>>,
    pub condition: ConditionCategory,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub dew_point: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: f64,
    pub precipitation_probability: u8,
    pub uv_index: Option<f64>,
    pub wind_bearing: Option<String>,
    pub wind_speed: Option<f64>,
}

impl From<&HourlyRecord> for HourlyForecast {
    fn from(h: &HourlyRecord) -> Self {
        Self {
            time: h.time_utc.and_then(unix_to_utc),
            condition: classify_at(h.icon_code, h.day_or_night),
            temperature: h.temperature,
            apparent_temperature: h.apparent_temperature,
            dew_point: h.dew_point,
            humidity: h.humidity,
            precipitation: h.precipitation_amount,
            precipitation_probability: h.precipitation_probability,
            uv_index: h.uv_index,
            wind_bearing: h.wind_bearing.clone(),
            wind_speed: h.wind_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub time: Option<DateTime<Utc>>,
    /// Classified from the morning icon.
    pub condition: ConditionCategory,
    pub temperature: f64,
    pub temperature_low: f64,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: u8,
    pub uv_index: Option<f64>,
    pub wind_bearing: Option<String>,
    pub wind_speed: Option<f64>,
}

impl From<&DailyRecord> for DailyForecast {
    fn from(d: &DailyRecord) -> Self {
        Self {
            time: d.time_utc.and_then(unix_to_utc),
            condition: ConditionCategory::classify(d.icon_code),
            temperature: d.temperature_max,
            temperature_low: d.temperature_min,
            humidity: d.humidity,
            precipitation: d.precipitation_amount,
            precipitation_probability: d.precipitation_probability,
            uv_index: d.uv_index,
            wind_bearing: d.wind_bearing.clone(),
            wind_speed: d.wind_speed,
        }
    }
}

/// One published refresh result. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
    pub hourly: Vec<HourlyForecast>,
    pub updated_at: DateTime<Utc>,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
