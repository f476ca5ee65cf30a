use std::{sync::Arc, time::Instant};

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::{
    aggregate::Aggregator,
    error::{Result, WeatherError},
    snapshot::Snapshot,
    source::PayloadSource,
};

/// Runs refresh cycles against a [`PayloadSource`] and holds the most
/// recent successful [`Snapshot`].
///
/// A cycle either replaces the snapshot wholesale or leaves the previous one
/// visible. Only one cycle runs at a time; overlapping calls fail with
/// [`WeatherError::RefreshInProgress`].
#[derive(Debug)]
pub struct Coordinator<S> {
    source: S,
    aggregator: Aggregator,
    latest: RwLock<Option<Arc<Snapshot>>>,
    cycle: Mutex<()>,
}

impl<S: PayloadSource> Coordinator<S> {
    pub fn new(source: S, aggregator: Aggregator) -> Self {
        Self { source, aggregator, latest: RwLock::new(None), cycle: Mutex::new(()) }
    }

    /// The last published snapshot, if any cycle has succeeded.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest.read().clone()
    }

    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        let _cycle = self.cycle.try_lock().map_err(|_| WeatherError::RefreshInProgress)?;
        let started = Instant::now();

        match self.run_cycle().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.latest.write() = Some(Arc::clone(&snapshot));
                tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    briefing = %snapshot.current.briefing.sentence,
                    "Weather snapshot updated"
                );
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!(error = %e, "Weather update failed; keeping previous snapshot");
                Err(e)
            }
        }
    }

    async fn run_cycle(&self) -> Result<Snapshot> {
        let raw = self.source.load().await?;
        self.aggregator.aggregate(&raw, Utc::now())
    }
}
