//! Core library for the `weathernews` briefing.
//!
//! This crate defines:
//! - Typed provider records and the payload boundary that builds them
//! - Icon-code and precipitation-type classification
//! - Heat index, precipitation windows and the one-sentence briefing
//! - The refresh coordinator holding the latest snapshot
//! - Configuration handling
//!
//! It is used by `weathernews-cli`, but performs no network I/O itself.

pub mod aggregate;
pub mod briefing;
pub mod condition;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod heat_index;
pub mod lang;
pub mod model;
pub mod precip;
mod raw;
pub mod snapshot;
pub mod source;
pub mod translate;

pub use aggregate::{Aggregator, Payloads};
pub use briefing::{Briefing, BriefingContext, BriefingFacts, Fact, compose_briefing};
pub use condition::{ConditionCategory, DayOrNight, PrecipitationType};
pub use config::Config;
pub use coordinator::Coordinator;
pub use error::WeatherError;
pub use heat_index::{HeatIndex, HeatIndexGrade, compute_heat_index};
pub use lang::Lang;
pub use model::{DailyRecord, DayToken, HourlyRecord};
pub use precip::{PrecipitationWindow, scan_window};
pub use snapshot::{CurrentConditions, DailyForecast, HourlyForecast, Snapshot};
pub use source::{DirSource, PayloadSource, RawPayloads};
pub use translate::Translations;
