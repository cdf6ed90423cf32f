//! Coach record store.
//!
//! Merges the designer-authored static catalog (embedded at compile time) with
//! the external coach feed into one canonical collection. The merged result is
//! cached for the rest of the process; picking up feed changes needs a restart.

use super::feed::parse_feed;
use crate::coach::{name_key, Category, CoachRecord};
use crate::error::CoachingError;
use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Canonical env var for overriding the coach feed path.
pub const COACH_FEED_ENV: &str = "COACH_FEED_PATH";

/// Legacy alias used by older tooling.
pub const COACH_FEED_ENV_ALIAS: &str = "FMG_COACH_FEED";

/// Default relative path used when no override is set.
pub const DEFAULT_COACH_FEED_REL_PATH: &str = "data/feeds/coach_feed.json";

/// Designer-authored coaches shipped with the binary.
pub const STATIC_CATALOG_JSON: &str = include_str!("../../../../data/static_coaches.json");

/// Resolve the feed path: env override, then `configured`, then the default.
pub fn resolve_feed_path(configured: Option<&Path>) -> PathBuf {
    for name in [COACH_FEED_ENV, COACH_FEED_ENV_ALIAS] {
        if let Ok(path) = env::var(name) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
    }
    configured.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_COACH_FEED_REL_PATH))
}

/// Canonical, immutable coach collection.
#[derive(Debug, Default)]
pub struct CoachCatalog {
    coaches: Vec<Arc<CoachRecord>>,
}

impl CoachCatalog {
    /// Build from already-deduplicated records, keeping their order.
    pub fn from_records(records: Vec<CoachRecord>) -> Self {
        Self { coaches: records.into_iter().map(Arc::new).collect() }
    }

    pub fn len(&self) -> usize {
        self.coaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coaches.is_empty()
    }

    pub fn records(&self) -> &[Arc<CoachRecord>] {
        &self.coaches
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CoachRecord>> {
        self.coaches.iter()
    }

    /// Case-insensitive lookup by name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<CoachRecord>> {
        let key = name_key(name);
        self.coaches.iter().find(|c| name_key(c.name()) == key)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Arc<CoachRecord>> {
        self.coaches.iter().filter(move |c| c.category() == category)
    }
}

/// Where the catalog comes from.
#[derive(Debug, Clone)]
pub struct CatalogSources {
    pub static_json: Cow<'static, str>,
    /// `None` disables the external feed.
    pub feed_path: Option<PathBuf>,
}

impl Default for CatalogSources {
    fn default() -> Self {
        Self { static_json: Cow::Borrowed(STATIC_CATALOG_JSON), feed_path: Some(resolve_feed_path(None)) }
    }
}

impl CatalogSources {
    pub fn static_only() -> Self {
        Self { static_json: Cow::Borrowed(STATIC_CATALOG_JSON), feed_path: None }
    }

    pub fn with_feed(path: impl Into<PathBuf>) -> Self {
        Self { feed_path: Some(path.into()), ..Self::static_only() }
    }
}

/// Outcome of a catalog load: always a usable catalog, plus whatever went wrong
/// on the way (each entry already handled by falling back).
#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: Arc<CoachCatalog>,
    pub errors: Vec<CoachingError>,
}

impl CatalogLoad {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

fn read_feed(path: &Path) -> Result<Option<Vec<CoachRecord>>, CoachingError> {
    if !path.exists() {
        log::info!("No coach feed at {}, using static catalog only", path.display());
        return Ok(None);
    }
    let json = std::fs::read_to_string(path)?;
    parse_feed(&json, &path.display().to_string()).map(Some)
}

/// Append `records` to `merged`; later duplicates inside one source are dropped.
/// With `override_existing`, a name already present from an earlier source is
/// replaced in place.
fn merge_source(
    merged: &mut Vec<CoachRecord>,
    index: &mut HashMap<String, usize>,
    records: Vec<CoachRecord>,
    source: &str,
    override_existing: bool,
) {
    let mut seen = HashSet::new();
    for record in records {
        let key = name_key(record.name());
        if !seen.insert(key.clone()) {
            log::warn!("Duplicate coach '{}' in {}, keeping the first entry", record.name(), source);
            continue;
        }
        match index.get(&key) {
            Some(&idx) if override_existing => {
                log::debug!("{} overrides static record for '{}'", source, record.name());
                merged[idx] = record;
            }
            Some(_) => {}
            None => {
                index.insert(key, merged.len());
                merged.push(record);
            }
        }
    }
}

/// Load and merge both sources. Never fails: a malformed or unreadable source
/// is logged, reported in [`CatalogLoad::errors`] and skipped.
pub fn load_catalog(sources: &CatalogSources) -> CatalogLoad {
    let mut errors = Vec::new();

    let static_records = match parse_feed(&sources.static_json, "static catalog") {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Static coach catalog unusable: {}", e);
            errors.push(e);
            Vec::new()
        }
    };
    let static_count = static_records.len();

    let feed_records = match sources.feed_path.as_deref().map(read_feed) {
        Some(Ok(Some(records))) => records,
        Some(Ok(None)) | None => Vec::new(),
        Some(Err(e)) => {
            log::warn!("Coach feed rejected, falling back to static catalog: {}", e);
            errors.push(e);
            Vec::new()
        }
    };
    let feed_count = feed_records.len();

    let mut merged = Vec::with_capacity(static_count + feed_count);
    let mut index = HashMap::new();
    merge_source(&mut merged, &mut index, static_records, "static catalog", false);
    merge_source(&mut merged, &mut index, feed_records, "coach feed", true);

    log::info!(
        "Loaded {} coaches ({} static, {} from feed)",
        merged.len(),
        static_count,
        feed_count
    );

    CatalogLoad { catalog: Arc::new(CoachCatalog::from_records(merged)), errors }
}

/// Loads its sources once and hands out the same catalog afterwards.
#[derive(Debug)]
pub struct CatalogStore {
    sources: CatalogSources,
    loaded: OnceCell<CatalogLoad>,
}

impl CatalogStore {
    pub fn new(sources: CatalogSources) -> Self {
        Self { sources, loaded: OnceCell::new() }
    }

    /// Cached catalog; the first call performs the load.
    pub fn get_or_load(&self) -> Arc<CoachCatalog> {
        Arc::clone(&self.loaded.get_or_init(|| load_catalog(&self.sources)).catalog)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// Errors recovered during the initial load, if it has happened.
    pub fn load_errors(&self) -> &[CoachingError] {
        self.loaded.get().map(|l| l.errors.as_slice()).unwrap_or(&[])
    }
}

static GLOBAL_CATALOG: OnceCell<CatalogStore> = OnceCell::new();

/// Initialize the process-wide catalog from `sources`. If it is already
/// initialized the existing catalog is returned and `sources` is ignored.
pub fn init_catalog(sources: CatalogSources) -> Arc<CoachCatalog> {
    let mut sources = Some(sources);
    let store = GLOBAL_CATALOG.get_or_init(|| CatalogStore::new(sources.take().unwrap_or_default()));
    if sources.is_some() {
        log::debug!("Coach catalog already initialized, ignoring new sources");
    }
    store.get_or_load()
}

/// Process-wide catalog, loaded from default sources on first use.
pub fn get_catalog() -> Arc<CoachCatalog> {
    GLOBAL_CATALOG.get_or_init(|| CatalogStore::new(CatalogSources::default())).get_or_load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sources(static_json: &'static str, feed_path: Option<PathBuf>) -> CatalogSources {
        CatalogSources { static_json: Cow::Borrowed(static_json), feed_path }
    }

    const STATIC: &str = r#"[
        { "name": "Ava Stone", "category": "O", "salary": 3.0, "overall_rating": 3.5 },
        { "name": "Ben Cole", "category": "D", "salary": 2.0, "overall_rating": 3.0 },
        { "name": "ben cole", "category": "D", "salary": 9.0 }
    ]"#;

    fn feed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn embedded_static_catalog_parses() {
        let load = load_catalog(&CatalogSources::static_only());
        assert!(load.is_clean(), "{:?}", load.errors);
        assert!(!load.catalog.is_empty());
        for category in Category::ALL {
            assert!(load.catalog.by_category(category).next().is_some());
        }
    }

    #[test]
    fn static_duplicates_keep_first() {
        let load = load_catalog(&sources(STATIC, None));
        assert_eq!(load.catalog.len(), 2);
        assert_eq!(load.catalog.by_name("BEN COLE").unwrap().salary(), 2.0);
    }

    #[test]
    fn feed_overrides_and_appends() {
        let feed = feed_file(
            r#"[
                { "name": "Ben Cole", "category": "D", "salary": 4.0 },
                { "name": "Cal Reyes", "category": "S", "salary": 1.0 }
            ]"#,
        );
        let load = load_catalog(&sources(STATIC, Some(feed.path().to_path_buf())));

        assert!(load.is_clean());
        let names: Vec<_> = load.catalog.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["Ava Stone", "Ben Cole", "Cal Reyes"]);
        assert_eq!(load.catalog.by_name("ben cole").unwrap().salary(), 4.0);
    }

    #[test]
    fn malformed_feed_falls_back_to_static() {
        let feed = feed_file("{ this is not json");
        let load = load_catalog(&sources(STATIC, Some(feed.path().to_path_buf())));

        assert_eq!(load.catalog.len(), 2);
        assert_eq!(load.errors.len(), 1);
        assert!(matches!(load.errors[0], CoachingError::DataFormat { .. }));
        assert!(load.errors[0].is_recoverable());
    }

    #[test]
    fn malformed_static_catalog_keeps_feed_records() {
        let feed = feed_file(r#"[ { "name": "Cal Reyes", "category": "S", "salary": 1.0 } ]"#);
        let load = load_catalog(&sources("[ { \"name\": ", Some(feed.path().to_path_buf())));

        assert_eq!(load.catalog.len(), 1);
        assert_eq!(load.catalog.by_name("Cal Reyes").unwrap().category(), Category::SpecialTeams);
        assert_eq!(load.errors.len(), 1);
        match &load.errors[0] {
            CoachingError::DataFormat { source_name, .. } => assert_eq!(source_name, "static catalog"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_feed_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let load = load_catalog(&sources(STATIC, Some(dir.path().join("absent.json"))));
        assert!(load.is_clean());
        assert_eq!(load.catalog.len(), 2);
    }

    #[test]
    fn store_returns_the_same_catalog() {
        let store = CatalogStore::new(sources(STATIC, None));
        assert!(!store.is_loaded());

        let first = store.get_or_load();
        let second = store.get_or_load();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
        assert!(store.load_errors().is_empty());
    }

    #[test]
    fn store_ignores_feed_changes_after_load() {
        let feed = feed_file(r#"[ { "name": "Dee Park", "category": "O" } ]"#);
        let store = CatalogStore::new(sources(STATIC, Some(feed.path().to_path_buf())));
        assert_eq!(store.get_or_load().len(), 3);

        std::fs::write(feed.path(), r#"[ { "name": "Eli Moss", "category": "O" } ]"#).unwrap();
        let again = store.get_or_load();
        assert_eq!(again.len(), 3);
        assert!(again.by_name("Eli Moss").is_none());
    }

    #[test]
    fn configured_path_used_without_env() {
        if env::var(COACH_FEED_ENV).is_ok() || env::var(COACH_FEED_ENV_ALIAS).is_ok() {
            return;
        }
        assert_eq!(
            resolve_feed_path(Some(Path::new("custom/feed.json"))),
            PathBuf::from("custom/feed.json")
        );
        assert_eq!(resolve_feed_path(None), PathBuf::from(DEFAULT_COACH_FEED_REL_PATH));
    }
}
