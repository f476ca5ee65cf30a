use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;
use weathernews_core::{
    Aggregator, ConditionCategory, Coordinator, DirSource, HeatIndexGrade, PayloadSource,
    PrecipitationType, RawPayloads, Translations, WeatherError,
};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn korean() -> Translations {
    Translations::from_json_str(include_str!("../../translations/ko.json")).unwrap()
}

async fn fixture_payloads() -> RawPayloads {
    DirSource::new(fixtures()).load().await.unwrap()
}

/// Hands out one scripted payload set per cycle.
#[derive(Debug, Default)]
struct ScriptedSource {
    cycles: Mutex<VecDeque<RawPayloads>>,
}

impl ScriptedSource {
    fn new(cycles: Vec<RawPayloads>) -> Self {
        Self { cycles: Mutex::new(cycles.into()) }
    }
}

#[async_trait]
impl PayloadSource for ScriptedSource {
    async fn load(&self) -> Result<RawPayloads, WeatherError> {
        Ok(self.cycles.lock().unwrap().pop_front().expect("no scripted cycle left"))
    }
}

/// Blocks inside `load` until released.
#[derive(Debug)]
struct GatedSource {
    payloads: RawPayloads,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl PayloadSource for GatedSource {
    async fn load(&self) -> Result<RawPayloads, WeatherError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.payloads.clone())
    }
}

#[tokio::test]
async fn full_cycle_from_fixture_files() {
    let coordinator = Coordinator::new(DirSource::new(fixtures()), Aggregator::default());
    let snapshot = coordinator.refresh().await.unwrap();
    let current = &snapshot.current;

    assert_eq!(current.condition, ConditionCategory::Sunny);
    assert_eq!(current.heat_index.value, 38);
    assert_eq!(current.heat_index.grade, HeatIndexGrade::ExtremeCaution);
    assert_eq!(current.heat_index_label, "extreme caution");
    assert_eq!(current.khai, 72);
    assert_eq!(current.khai_grade, "moderate");
    assert_eq!(current.temp_diff_comment, "2° warmer than yesterday");
    assert_eq!(current.precipitation_probability, 60);
    assert!(current.particulate_forecast.is_none());

    let today = &current.precipitation.today;
    assert_eq!(today.onset_hour, Some(14));
    assert_eq!(today.run_end_hour, Some(15));
    assert_eq!(today.total_amount, 1.0);
    assert_eq!(today.precipitation_type, PrecipitationType::Rain);
    assert_eq!(today.summary_short, "14h rain");

    let tomorrow = &current.precipitation.through_tomorrow;
    assert_eq!(tomorrow.onset_hour, Some(14));
    assert_eq!(tomorrow.run_amount, 1.0);
    assert_eq!(tomorrow.total_amount, 4.0);
    assert_eq!(tomorrow.peak_probability, 70);
    assert_eq!(tomorrow.summary_long, "15h until 4mm");

    assert_eq!(current.precipitation.next_3h.total_amount, 1.0);
    assert_eq!(current.precipitation.next_12h.peak_probability, 60);

    assert_eq!(
        current.briefing.sentence,
        "now sunny, 31°C, 2° warmer than yesterday, high 33°C, humidity 70%, \
         chance of rain 60%, 14h rain, PM10 좋음, PM2.5 보통, air quality moderate."
    );

    assert_eq!(snapshot.daily.len(), 2);
    assert_eq!(snapshot.hourly.len(), 38);
    assert_eq!(snapshot.hourly[10].condition, ConditionCategory::ClearNight);
    assert_eq!(coordinator.latest().as_deref(), Some(&*snapshot));
}

#[tokio::test]
async fn korean_briefing() {
    let snapshot = Aggregator::new(korean()).aggregate(&fixture_payloads().await, chrono::Utc::now()).unwrap();

    assert_eq!(
        snapshot.current.briefing.sentence,
        "현재 맑음, 기온 31도, 어제보다 2도 높아요, 최고 33도, 습도 70%, 강수확률 60%, \
         14시 비, 미세먼지 좋음, 초미세먼지 보통, 통합대기 보통입니다."
    );
    assert_eq!(snapshot.current.precipitation.through_tomorrow.summary_long, "15시까지 4mm");
    assert_eq!(snapshot.current.heat_index_label, "주의");
}

#[tokio::test]
async fn tomorrow_onset_gets_prefix() {
    let mut raw = fixture_payloads().await;
    for hour in raw.primary["hourly"].as_array_mut().unwrap() {
        if hour["day"] == "14" {
            hour["prec"] = Value::from("0");
        }
    }

    let snapshot = Aggregator::new(korean()).aggregate(&raw, chrono::Utc::now()).unwrap();
    let windows = &snapshot.current.precipitation;

    assert!(windows.today.is_dry());
    assert_eq!(windows.today.summary_short, "비안옴");
    assert_eq!(windows.through_tomorrow.summary_short, "내일 5시 비");
    assert!(!snapshot.current.briefing.sentence.contains("강수확률"));
}

#[tokio::test]
async fn missing_khai_keeps_previous_snapshot() {
    let good = fixture_payloads().await;
    let mut broken = good.clone();
    broken.air_quality["aq"].as_object_mut().unwrap().remove("khai");

    let coordinator = Coordinator::new(ScriptedSource::new(vec![good, broken]), Aggregator::default());

    let first = coordinator.refresh().await.unwrap();
    let err = coordinator.refresh().await.unwrap_err();

    assert!(matches!(err, WeatherError::MissingField { ref field, .. } if field == "aq.khai"));
    let latest = coordinator.latest().unwrap();
    assert!(Arc::ptr_eq(&latest, &first));
}

#[tokio::test]
async fn non_numeric_precipitation_fails_cycle() {
    let mut raw = fixture_payloads().await;
    raw.primary["hourly"][2]["prec"] = Value::from("n/a");

    let coordinator = Coordinator::new(ScriptedSource::new(vec![raw]), Aggregator::default());
    let err = coordinator.refresh().await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse { ref field, .. } if field == "hourly[2].prec"));
    assert!(coordinator.latest().is_none());
}

#[tokio::test]
async fn upstream_error_list_fails_cycle() {
    let mut raw = fixture_payloads().await;
    raw.primary["errors"] = serde_json::json!([{ "message": "invalid location" }]);

    let err = Aggregator::default().aggregate(&raw, chrono::Utc::now()).unwrap_err();
    assert!(matches!(err, WeatherError::Upstream(ref msg) if msg.contains("invalid location")));
}

#[tokio::test]
async fn particulate_forecast_is_passed_through() {
    let mut raw = fixture_payloads().await;
    raw.particulate = Some(serde_json::json!({
        "pm": { "forcast": { "daily": [{ "pm10": 30 }], "hourly": [{ "pm25": 12 }] } }
    }));

    let snapshot = Aggregator::default().aggregate(&raw, chrono::Utc::now()).unwrap();
    let pm = snapshot.current.particulate_forecast.unwrap();
    assert_eq!(pm.hourly.len(), 1);
}

#[tokio::test]
async fn overlapping_refresh_is_rejected() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let source = GatedSource {
        payloads: fixture_payloads().await,
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    };
    let coordinator = Coordinator::new(source, Aggregator::default());

    let (first, second) = tokio::join!(coordinator.refresh(), async {
        entered.notified().await;
        let second = coordinator.refresh().await;
        release.notify_one();
        second
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(WeatherError::RefreshInProgress)));
}
