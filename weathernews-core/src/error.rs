use std::path::PathBuf;

/// Errors that abort a refresh cycle.
///
/// Unmapped icon codes are not errors; the classifiers log them and fall
/// back to `Unknown` / `None`.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Invalid value at `{field}`: {reason}")]
    Parse { field: String, reason: String },

    #[error("Missing field `{field}` in {payload} payload")]
    MissingField { payload: &'static str, field: String },

    #[error("Upstream reported errors: {0}")]
    Upstream(String),

    #[error("Failed to parse {payload} payload JSON: {source}")]
    Json {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read payload file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A refresh cycle is already in flight")]
    RefreshInProgress,
}

impl WeatherError {
    pub(crate) fn missing(payload: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField { payload, field: field.into() }
    }

    pub(crate) fn parse(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse { field: field.into(), reason: reason.into() }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
