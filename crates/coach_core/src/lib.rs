//! # coach_core - Coaching Roster & Performance Derivation Engine
//!
//! Coaching subsystem for a football management game: loads coach records
//! from an embedded catalog merged with an external feed, samples hiring
//! markets, keeps the staff roster, and derives the figures shown on coach and
//! team panels.
//!
//! ## Features
//! - Catalog loaded once per process (static records + external feed)
//! - Seeded market sampling with placeholder padding
//! - Roster with one coach per position and hire/fire notifications
//! - Before/after team statistics and weekly ROI summary
//! - JSON API for host integration

pub mod api;
pub mod catalog;
pub mod coach;
pub mod config;
pub mod error;
pub mod market;
pub mod roster;
pub mod stats;

pub use api::{market_json, profile_json, report_json, ApiError, ApiResponse};
pub use catalog::{
    get_catalog, init_catalog, load_catalog, CatalogSources, CatalogStore, CoachCatalog,
    InMemoryTeamSource, JsonTeamSource, TeamRecord, TeamSource,
};
pub use coach::{Category, CoachRecord, CoachSummary, SkillAttribute};
pub use config::{CoachingConfig, MarketConfig, ProfileConfig};
pub use error::{CoachingError, Result, Severity};
pub use market::{sample_market, MarketFilter, MarketSampler};
pub use roster::{Position, RosterEvent, RosterObserver, RosterService, SubscriptionId, TeamBonus};
pub use stats::{build_report, CoachProfile, PerformanceReport, TeamSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
