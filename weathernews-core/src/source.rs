use std::{
    fmt::Debug,
    path::PathBuf,
};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, WeatherError};

pub const PRIMARY_FILE: &str = "main.json";
pub const COMMENTARY_FILE: &str = "commentary.json";
pub const AIR_QUALITY_FILE: &str = "air.json";
pub const PARTICULATE_FILE: &str = "pm.json";

/// The upstream payloads of one refresh cycle, still untyped.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayloads {
    pub primary: Value,
    pub commentary: Value,
    pub air_quality: Value,
    pub particulate: Option<Value>,
}

/// Where a coordinator gets its payloads from.
#[async_trait]
pub trait PayloadSource: Send + Sync + Debug {
    async fn load(&self) -> Result<RawPayloads>;
}

/// Reads previously downloaded payload files from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read(&self, payload: &'static str, file: &str) -> Result<Value> {
        let path = self.dir.join(file);
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| WeatherError::Io { path: path.clone(), source })?;

        serde_json::from_str(&body).map_err(|source| WeatherError::Json { payload, source })
    }
}

#[async_trait]
impl PayloadSource for DirSource {
    async fn load(&self) -> Result<RawPayloads> {
        let pm_path = self.dir.join(PARTICULATE_FILE);
        let has_particulate = tokio::fs::try_exists(&pm_path)
            .await
            .map_err(|source| WeatherError::Io { path: pm_path.clone(), source })?;
        let particulate = if has_particulate {
            Some(self.read("particulate", PARTICULATE_FILE).await?)
        } else {
            None
        };

        Ok(RawPayloads {
            primary: self.read("primary", PRIMARY_FILE).await?,
            commentary: self.read("commentary", COMMENTARY_FILE).await?,
            air_quality: self.read("air quality", AIR_QUALITY_FILE).await?,
            particulate,
        })
    }
}
