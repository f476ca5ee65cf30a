use serde::{Deserialize, Serialize};

/// Rothfusz regression coefficients (°F, % RH).
const C: [f64; 9] = [
    -42.379,
    2.049_015_23,
    10.143_331_27,
    -0.224_755_41,
    -0.006_837_83,
    -0.054_817_17,
    0.001_228_74,
    0.000_852_82,
    -0.000_001_99,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatIndexGrade {
    None,
    Caution,
    ExtremeCaution,
    Danger,
    ExtremeDanger,
}

impl HeatIndexGrade {
    /// Grade for a Celsius heat index.
    pub fn from_celsius(value: i64) -> Self {
        match value {
            v if v > 51 => Self::ExtremeDanger,
            v if v > 39 => Self::Danger,
            v if v > 32 => Self::ExtremeCaution,
            v if v > 27 => Self::Caution,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Caution => "caution",
            Self::ExtremeCaution => "extreme caution",
            Self::Danger => "danger",
            Self::ExtremeDanger => "extreme danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatIndex {
    /// Celsius, rounded half away from zero.
    pub value: i64,
    pub grade: HeatIndexGrade,
}

/// Rothfusz regression in °F, converted back to °C.
///
/// Applied at every temperature with no low-temperature cutoff, so cold
/// readings yield large values (0 °C at 50 % gives 67).
pub fn compute_heat_index(temperature_c: i64, humidity_pct: i64) -> HeatIndex {
    let t = temperature_c as f64 * 9.0 / 5.0 + 32.0;
    let rh = humidity_pct as f64;

    let hi_f = C[0]
        + C[1] * t
        + C[2] * rh
        + C[3] * t * rh
        + C[4] * t * t
        + C[5] * rh * rh
        + C[6] * t * t * rh
        + C[7] * t * rh * rh
        + C[8] * t * t * rh * rh;

    let value = ((hi_f - 32.0) * 5.0 / 9.0).round() as i64;

    HeatIndex { value, grade: HeatIndexGrade::from_celsius(value) }
}

/// Readings are truncated toward zero before the regression is applied.
pub fn heat_index_from_readings(temperature_c: f64, humidity_pct: f64) -> HeatIndex {
    compute_heat_index(temperature_c.trunc() as i64, humidity_pct.trunc() as i64)
}
