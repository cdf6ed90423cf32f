//! Coach record store and team data sources.

pub mod feed;
pub mod store;
pub mod team;

pub use feed::{parse_feed, FeedCoach};
pub use store::{
    get_catalog, init_catalog, load_catalog, resolve_feed_path, CatalogLoad, CatalogSources,
    CatalogStore, CoachCatalog, COACH_FEED_ENV, COACH_FEED_ENV_ALIAS, DEFAULT_COACH_FEED_REL_PATH,
    STATIC_CATALOG_JSON,
};
pub use team::{
    resolve_team_feed_path, InMemoryTeamSource, JsonTeamSource, TeamRecord, TeamSource,
    DEFAULT_TEAM_FEED_REL_PATH, TEAM_FEED_ENV,
};
