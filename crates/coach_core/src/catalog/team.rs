//! Team records and the fetch-by-key collaborator that supplies them.

use crate::coach::Category;
use crate::error::{CoachingError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canonical env var for overriding the team feed path.
pub const TEAM_FEED_ENV: &str = "COACH_TEAM_FEED_PATH";

pub const DEFAULT_TEAM_FEED_REL_PATH: &str = "data/feeds/teams.json";

/// Resolve the team feed path: env override, then `configured`, then the default.
pub fn resolve_team_feed_path(configured: Option<&Path>) -> PathBuf {
    if let Ok(path) = std::env::var(TEAM_FEED_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    configured.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_TEAM_FEED_REL_PATH))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamRecord {
    #[serde(alias = "teamId", alias = "id")]
    pub team_id: String,
    #[serde(alias = "name")]
    pub team_name: String,
    pub league: String,
    /// Millions.
    pub budget: f64,
    pub overall_rating: f64,
    #[serde(alias = "offence_rating")]
    pub offense_rating: f64,
    #[serde(alias = "defence_rating")]
    pub defense_rating: f64,
    pub special_teams_rating: f64,
    pub description: String,
}

impl TeamRecord {
    /// Team rating for one coaching category; non-finite values read as 0.
    pub fn category_rating(&self, category: Category) -> f64 {
        let rating = match category {
            Category::Offense => self.offense_rating,
            Category::Defense => self.defense_rating,
            Category::SpecialTeams => self.special_teams_rating,
        };
        if rating.is_finite() {
            rating
        } else {
            0.0
        }
    }
}

/// Fetch a team by key.
pub trait TeamSource {
    fn team_by_id(&self, team_id: &str) -> Result<TeamRecord>;
}

fn find_team(teams: &[TeamRecord], team_id: &str) -> Result<TeamRecord> {
    let wanted = team_id.trim();
    teams
        .iter()
        .find(|t| t.team_id.trim() == wanted)
        .cloned()
        .ok_or_else(|| CoachingError::TeamNotFound { team_id: wanted.to_string() })
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamSource {
    teams: Vec<TeamRecord>,
}

impl InMemoryTeamSource {
    pub fn new(teams: Vec<TeamRecord>) -> Self {
        Self { teams }
    }

    pub fn insert(&mut self, team: TeamRecord) {
        self.teams.retain(|t| t.team_id.trim() != team.team_id.trim());
        self.teams.push(team);
    }
}

impl TeamSource for InMemoryTeamSource {
    fn team_by_id(&self, team_id: &str) -> Result<TeamRecord> {
        find_team(&self.teams, team_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TeamDocument {
    Many(Vec<TeamRecord>),
    One(TeamRecord),
}

/// Team feed file holding one team object or an array of them.
#[derive(Debug, Clone)]
pub struct JsonTeamSource {
    path: PathBuf,
    teams: Vec<TeamRecord>,
}

impl JsonTeamSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let teams = Self::parse(&json, &path.display().to_string())?;
        log::info!("Loaded {} team(s) from {}", teams.len(), path.display());
        Ok(Self { path: path.to_path_buf(), teams })
    }

    pub fn parse(json: &str, source_name: &str) -> Result<Vec<TeamRecord>> {
        let document: TeamDocument = serde_json::from_str(json)
            .map_err(|e| CoachingError::data_format(source_name, e.to_string()))?;
        Ok(match document {
            TeamDocument::Many(teams) => teams,
            TeamDocument::One(team) => vec![team],
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }
}

impl TeamSource for JsonTeamSource {
    fn team_by_id(&self, team_id: &str) -> Result<TeamRecord> {
        find_team(&self.teams, team_id)
    }
}
