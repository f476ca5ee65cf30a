use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::translate::Translations;

const SENTENCE_TEMPLATE: &str = "{facts}.";

/// Months where the morning low is worth mentioning.
const COLD_MONTHS: [u32; 4] = [11, 12, 1, 2];
const LAST_MORNING_HOUR: u32 = 10;
const LAST_AFTERNOON_HOUR: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fact {
    Condition,
    Temperature,
    TemperatureDelta,
    TemperatureMin,
    TemperatureMax,
    Humidity,
    PrecipitationProbability,
    Precipitation,
    Pm10,
    Pm25,
    Khai,
}

impl Fact {
    /// Sentence order.
    pub const ORDER: [Fact; 11] = [
        Fact::Condition,
        Fact::Temperature,
        Fact::TemperatureDelta,
        Fact::TemperatureMin,
        Fact::TemperatureMax,
        Fact::Humidity,
        Fact::PrecipitationProbability,
        Fact::Precipitation,
        Fact::Pm10,
        Fact::Pm25,
        Fact::Khai,
    ];
}

/// Rendered text for each fact; `None` when the source value is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BriefingFacts {
    pub condition: Option<String>,
    pub temperature: Option<String>,
    pub temperature_delta: Option<String>,
    pub temperature_min: Option<String>,
    pub temperature_max: Option<String>,
    pub humidity: Option<String>,
    pub precipitation_probability: Option<String>,
    pub precipitation: Option<String>,
    pub pm10: Option<String>,
    pub pm25: Option<String>,
    pub khai: Option<String>,
}

impl BriefingFacts {
    pub fn get(&self, fact: Fact) -> Option<&str> {
        let text = match fact {
            Fact::Condition => &self.condition,
            Fact::Temperature => &self.temperature,
            Fact::TemperatureDelta => &self.temperature_delta,
            Fact::TemperatureMin => &self.temperature_min,
            Fact::TemperatureMax => &self.temperature_max,
            Fact::Humidity => &self.humidity,
            Fact::PrecipitationProbability => &self.precipitation_probability,
            Fact::Precipitation => &self.precipitation,
            Fact::Pm10 => &self.pm10,
            Fact::Pm25 => &self.pm25,
            Fact::Khai => &self.khai,
        };
        text.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BriefingContext {
    pub hour: u32,
    pub month: u32,
    pub precipitation_present: bool,
}

impl BriefingContext {
    fn keeps(&self, fact: Fact) -> bool {
        match fact {
            Fact::TemperatureMin => {
                COLD_MONTHS.contains(&self.month) && self.hour <= LAST_MORNING_HOUR
            }
            Fact::TemperatureMax => self.hour <= LAST_AFTERNOON_HOUR,
            Fact::PrecipitationProbability | Fact::Precipitation => self.precipitation_present,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Briefing {
    /// Every available fact, in sentence order.
    pub facts: IndexMap<Fact, String>,
    /// The facts that survive relevance pruning.
    pub pruned: IndexMap<Fact, String>,
    pub sentence: String,
}

/// Collect facts in [`Fact::ORDER`], prune them for time of day and year,
/// and join the survivors into one sentence.
pub fn compose_briefing(facts: &BriefingFacts, ctx: BriefingContext, tr: &Translations) -> Briefing {
    let all: IndexMap<Fact, String> = Fact::ORDER
        .iter()
        .filter_map(|fact| facts.get(*fact).map(|text| (*fact, text.to_string())))
        .collect();

    let pruned: IndexMap<Fact, String> = all
        .iter()
        .filter(|(fact, _)| ctx.keeps(**fact))
        .map(|(fact, text)| (*fact, text.clone()))
        .collect();

    let parts: Vec<&str> = pruned.values().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
    let sentence = if parts.is_empty() {
        String::new()
    } else {
        tr.fill(SENTENCE_TEMPLATE, &[("facts", parts.join(", ").as_str())])
    };

    Briefing { facts: all, pruned, sentence }
}
