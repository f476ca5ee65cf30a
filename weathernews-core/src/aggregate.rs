use chrono::{DateTime, Utc};

use crate::{
    briefing::{BriefingContext, BriefingFacts, compose_briefing},
    condition::{ConditionCategory, classify_at},
    error::Result,
    heat_index::heat_index_from_readings,
    model::{
        AirQualityPayload, CommentaryPayload, DayToken, HourlyRecord, ParticulateForecast,
        PrimaryPayload,
    },
    precip::{format_decimal, scan_window},
    snapshot::{
        Commentary, CurrentConditions, DailyForecast, HourlyForecast, PrecipitationWindows,
        Snapshot,
    },
    source::RawPayloads,
    translate::Translations,
};

const LAST_HOUR_OF_DAY: u32 = 23;
const HOURS_PER_DAY: usize = 24;

/// Typed form of [`RawPayloads`].
#[derive(Debug, Clone, PartialEq)]
pub struct Payloads {
    pub primary: PrimaryPayload,
    pub commentary: CommentaryPayload,
    pub air_quality: AirQualityPayload,
    pub particulate: Option<ParticulateForecast>,
}

impl Payloads {
    pub fn parse(raw: &RawPayloads) -> Result<Self> {
        Ok(Self {
            primary: PrimaryPayload::parse(&raw.primary)?,
            commentary: CommentaryPayload::parse(&raw.commentary)?,
            air_quality: AirQualityPayload::parse(&raw.air_quality)?,
            particulate: raw.particulate.as_ref().map(ParticulateForecast::parse).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    translations: Translations,
}

impl Aggregator {
    pub fn new(translations: Translations) -> Self {
        Self { translations }
    }

    pub fn aggregate(&self, raw: &RawPayloads, now: DateTime<Utc>) -> Result<Snapshot> {
        self.aggregate_payloads(&Payloads::parse(raw)?, now)
    }

    pub fn aggregate_payloads(&self, p: &Payloads, now: DateTime<Utc>) -> Result<Snapshot> {
        let tr = &self.translations;
        let primary = &p.primary;
        let first = primary.first_hour()?;
        let today = primary.today()?;

        let precipitation = precipitation_windows(&primary.hourly, first, &today.day, tr);
        let condition = classify_at(primary.current.icon_code, first.day_or_night);
        let heat_index =
            heat_index_from_readings(primary.current.temperature, primary.current.humidity);
        let temp_diff_comment = temperature_delta_comment(p.air_quality.temp_diff, tr);
        let air_grade = khai_grade(p.air_quality.khai).map(|k| tr.translate(k)).unwrap_or_default();

        let facts = BriefingFacts {
            condition: (condition != ConditionCategory::Unknown)
                .then(|| fill_value(tr, "now {value}", &tr.translate(condition.as_str()))),
            temperature: Some(fill_value(
                tr,
                "{value}°C",
                &format_decimal(primary.current.temperature),
            )),
            temperature_delta: Some(temp_diff_comment.clone()),
            temperature_min: Some(fill_value(
                tr,
                "low {value}°C",
                &format_decimal(today.temperature_min),
            )),
            temperature_max: Some(fill_value(
                tr,
                "high {value}°C",
                &format_decimal(today.temperature_max),
            )),
            humidity: Some(fill_value(
                tr,
                "humidity {value}%",
                &format_decimal(primary.current.humidity),
            )),
            precipitation_probability: Some(fill_value(
                tr,
                "chance of rain {value}%",
                &today.precipitation_probability.to_string(),
            )),
            precipitation: Some(precipitation.today.summary_short.clone()),
            pm10: Some(fill_value(tr, "PM10 {value}", &p.commentary.pm10.description)),
            pm25: Some(fill_value(tr, "PM2.5 {value}", &p.commentary.pm25.description)),
            khai: (!air_grade.is_empty()).then(|| fill_value(tr, "air quality {value}", &air_grade)),
        };
        let briefing = compose_briefing(
            &facts,
            BriefingContext {
                hour: first.hour,
                month: first.month,
                precipitation_present: !precipitation.today.is_dry(),
            },
            tr,
        );

        let current = CurrentConditions {
            observed: primary.current.clone(),
            condition,
            day_or_night: first.day_or_night,
            sunrise: primary.sunrise.clone(),
            sunset: primary.sunset.clone(),
            precipitation_probability: today.precipitation_probability,
            commentary: Commentary {
                current: p.commentary.current.clone(),
                day: p.commentary.day.clone(),
                night: p.commentary.night.clone(),
                day_short: p.commentary.day_short.clone(),
                next_day_short: p.commentary.next_day_short.clone(),
            },
            pm10: p.commentary.pm10.clone(),
            pm25: p.commentary.pm25.clone(),
            khai: p.air_quality.khai,
            khai_grade: air_grade,
            temp_diff: p.air_quality.temp_diff,
            temp_diff_comment,
            heat_index,
            heat_index_label: tr.translate(heat_index.grade.as_str()),
            precipitation,
            briefing,
            particulate_forecast: p.particulate.clone(),
        };

        Ok(Snapshot {
            current,
            daily: primary.daily.iter().map(DailyForecast::from).collect(),
            hourly: primary.hourly.iter().map(HourlyForecast::from).collect(),
            updated_at: now,
        })
    }
}

fn precipitation_windows(
    hours: &[HourlyRecord],
    first: &HourlyRecord,
    today: &DayToken,
    tr: &Translations,
) -> PrecipitationWindows {
    let remaining = LAST_HOUR_OF_DAY.saturating_sub(first.hour) as usize;
    let scan = |limit: usize| scan_window(hours, limit, Some(today), tr);

    PrecipitationWindows {
        today: scan(remaining),
        through_tomorrow: scan(remaining + HOURS_PER_DAY),
        next_3h: scan(3),
        next_6h: scan(6),
        next_9h: scan(9),
        next_12h: scan(12),
    }
}

/// Commentary on today's temperature versus yesterday's.
pub fn temperature_delta_comment(delta: i64, tr: &Translations) -> String {
    let template = match delta {
        0 => return tr.translate("same as yesterday"),
        d if d > 0 => "{value}° warmer than yesterday",
        _ => "{value}° cooler than yesterday",
    };
    fill_value(tr, template, &delta.abs().to_string())
}

/// Translation key for a composite air index, `None` past the scale.
pub fn khai_grade(khai: i64) -> Option<&'static str> {
    match khai {
        k if k < 50 => Some("good"),
        k if k < 100 => Some("moderate"),
        k if k < 250 => Some("bad"),
        k if k < 500 => Some("very bad"),
        _ => None,
    }
}

fn fill_value(tr: &Translations, template: &str, value: &str) -> String {
    tr.fill(template, &[("value", value)])
}
