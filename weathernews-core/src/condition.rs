use serde::{Deserialize, Serialize};

/// Icon codes at night are shifted by this offset when they would
/// otherwise read as sunny.
pub const NIGHT_ICON_OFFSET: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOrNight {
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "N")]
    Night,
}

impl DayOrNight {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag.trim() {
            "D" | "d" => Some(Self::Day),
            "N" | "n" => Some(Self::Night),
            _ => None,
        }
    }
}

/// Sky condition categories understood by the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionCategory {
    ClearNight,
    Cloudy,
    #[serde(rename = "partlycloudy")]
    PartlyCloudy,
    Rainy,
    Snowy,
    SnowyRainy,
    Hail,
    Sunny,
    Pouring,
    Lightning,
    LightningRainy,
    Windy,
    WindyVariant,
    Exceptional,
    Fog,
    Unknown,
}

/// Provider icon table. A code appears under at most one category.
static ICON_CONDITIONS: &[(ConditionCategory, &[i64])] = &[
    (ConditionCategory::ClearNight, &[1100, 500, 501]),
    (ConditionCategory::Cloudy, &[200]),
    (ConditionCategory::Exceptional, &[]),
    (ConditionCategory::Fog, &[]),
    (ConditionCategory::Hail, &[308]),
    (ConditionCategory::Lightning, &[]),
    (ConditionCategory::LightningRainy, &[]),
    (ConditionCategory::PartlyCloudy, &[101, 102, 104, 201, 202]),
    (ConditionCategory::Pouring, &[]),
    (ConditionCategory::Rainy, &[300, 301, 302, 502]),
    (ConditionCategory::Snowy, &[204, 400, 401, 402, 504]),
    (ConditionCategory::SnowyRainy, &[303, 403]),
    (ConditionCategory::Sunny, &[100]),
    (ConditionCategory::Windy, &[]),
    (ConditionCategory::WindyVariant, &[]),
];

impl ConditionCategory {
    /// Table lookup; `None` for codes the provider table does not list.
    pub fn lookup(icon_code: i64) -> Option<Self> {
        ICON_CONDITIONS
            .iter()
            .find(|(_, codes)| codes.contains(&icon_code))
            .map(|(category, _)| *category)
    }

    /// Total classification: unmapped codes become `Unknown` and are logged.
    pub fn classify(icon_code: i64) -> Self {
        Self::lookup(icon_code).unwrap_or_else(|| {
            tracing::warn!(icon_code, "Unmapped icon code from provider");
            Self::Unknown
        })
    }

    /// Codes listed for this category.
    pub fn icon_codes(&self) -> &'static [i64] {
        ICON_CONDITIONS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, codes)| *codes)
            .unwrap_or(&[])
    }

    /// Stable key, also used as the translation key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClearNight => "clear-night",
            Self::Cloudy => "cloudy",
            Self::PartlyCloudy => "partlycloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::SnowyRainy => "snowy-rainy",
            Self::Hail => "hail",
            Self::Sunny => "sunny",
            Self::Pouring => "pouring",
            Self::Lightning => "lightning",
            Self::LightningRainy => "lightning-rainy",
            Self::Windy => "windy",
            Self::WindyVariant => "windy-variant",
            Self::Exceptional => "exceptional",
            Self::Fog => "fog",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shift a sunny code into its night variant when the hour is at night.
pub fn adjust_for_night(icon_code: i64, day_or_night: DayOrNight) -> i64 {
    if day_or_night == DayOrNight::Night
        && ConditionCategory::Sunny.icon_codes().contains(&icon_code)
    {
        icon_code + NIGHT_ICON_OFFSET
    } else {
        icon_code
    }
}

/// Classify an icon code observed at a given time of day.
pub fn classify_at(icon_code: i64, day_or_night: DayOrNight) -> ConditionCategory {
    ConditionCategory::classify(adjust_for_night(icon_code, day_or_night))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationType {
    #[default]
    None,
    Pouring,
    Rain,
    Snow,
    #[serde(rename = "snowrainy")]
    SnowRainy,
}

static PRECIPITATION_TYPES: &[(PrecipitationType, &[ConditionCategory])] = &[
    (PrecipitationType::Pouring, &[ConditionCategory::Pouring]),
    (
        PrecipitationType::Rain,
        &[
            ConditionCategory::PartlyCloudy,
            ConditionCategory::Rainy,
            ConditionCategory::Hail,
            ConditionCategory::LightningRainy,
        ],
    ),
    (PrecipitationType::Snow, &[ConditionCategory::Snowy]),
    (PrecipitationType::SnowRainy, &[ConditionCategory::SnowyRainy]),
];

impl PrecipitationType {
    pub fn lookup(category: ConditionCategory) -> Option<Self> {
        PRECIPITATION_TYPES
            .iter()
            .find(|(_, categories)| categories.contains(&category))
            .map(|(kind, _)| *kind)
    }

    pub fn from_condition(category: ConditionCategory) -> Self {
        Self::lookup(category).unwrap_or_else(|| {
            tracing::debug!(%category, "No precipitation type for condition");
            Self::None
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pouring => "pouring",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::SnowRainy => "snowrainy",
        }
    }
}
