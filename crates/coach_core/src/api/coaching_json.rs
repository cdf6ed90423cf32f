// Coaching JSON API: market, profile and team report endpoints

use super::{ApiError, ApiResponse};
use crate::catalog::{CoachCatalog, TeamSource};
use crate::coach::{CoachRecord, CoachSummary};
use crate::config::{MarketConfig, ProfileConfig};
use crate::market::{MarketFilter, MarketSampler};
use crate::stats::{build_report, CoachProfile, PerformanceReport};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on a single market request.
pub const MAX_MARKET_COUNT: usize = 32;

// ========== Request/Response Structures ==========

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketRequest {
    pub schema_version: Option<String>,
    #[serde(default)]
    pub category: MarketFilter,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    /// Skip coaches that are already employed.
    #[serde(default)]
    pub available_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketResponse {
    pub coaches: Vec<CoachSummary>,
    pub placeholders: usize,
    pub generated_with_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub schema_version: Option<String>,
    pub name: String,
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub summary: CoachSummary,
    pub profile: CoachProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub schema_version: Option<String>,
    pub team_id: String,
    #[serde(default)]
    pub coaches: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: PerformanceReport,
    pub verdict: String,
}

// ========== Helpers ==========

fn parse_request<T: DeserializeOwned>(request_json: &str, kind: &str) -> Result<T, ApiError> {
    serde_json::from_str(request_json).map_err(|e| {
        warn!("Failed to parse {}: {}", kind, e);
        ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e))
    })
}

fn find_coach<'a>(catalog: &'a CoachCatalog, name: &str) -> Result<&'a Arc<CoachRecord>, ApiError> {
    catalog.by_name(name).ok_or_else(|| {
        let details = HashMap::from([("name".to_string(), serde_json::Value::from(name))]);
        ApiError::with_details("COACH_NOT_FOUND", &format!("No coach named '{}'", name), details)
    })
}

// ========== Public API Functions ==========

/// Sample a hiring market.
///
/// # Returns
/// JSON string containing ApiResponse<MarketResponse>
pub fn market_json(request_json: &str, catalog: &CoachCatalog) -> String {
    ApiResponse::from(handle_market(request_json, catalog)).to_json()
}

fn handle_market(request_json: &str, catalog: &CoachCatalog) -> Result<MarketResponse, ApiError> {
    let request: MarketRequest = parse_request(request_json, "MarketRequest")?;
    let count = request.count.unwrap_or_else(|| MarketConfig::default().slots);
    if count > MAX_MARKET_COUNT {
        return Err(ApiError::new(
            "INVALID_COUNT",
            &format!("count must be at most {}, got {}", MAX_MARKET_COUNT, count),
        ));
    }

    let seed = request.seed.unwrap_or_else(rand::random);
    let mut sampler = MarketSampler::with_seed(seed);
    let batch = if request.available_only {
        sampler.sample_available(catalog, request.category, count)
    } else {
        sampler.sample(catalog, request.category, count)
    };

    let placeholders = batch.iter().filter(|c| c.is_placeholder()).count();
    debug!("Market [{}] -> {} coaches, {} placeholder(s)", request.category, batch.len(), placeholders);
    Ok(MarketResponse {
        coaches: batch.iter().map(|c| c.summary()).collect(),
        placeholders,
        generated_with_seed: seed,
    })
}

/// Profile view of one coach.
///
/// # Returns
/// JSON string containing ApiResponse<ProfileResponse>
pub fn profile_json(request_json: &str, catalog: &CoachCatalog) -> String {
    ApiResponse::from(handle_profile(request_json, catalog)).to_json()
}

fn handle_profile(request_json: &str, catalog: &CoachCatalog) -> Result<ProfileResponse, ApiError> {
    let request: ProfileRequest = parse_request(request_json, "ProfileRequest")?;
    let coach = find_coach(catalog, &request.name)?;
    let top = request.top.unwrap_or_else(|| ProfileConfig::default().top_specialties);
    debug!("Profile for {} (top {})", coach.name(), top);
    Ok(ProfileResponse { summary: coach.summary(), profile: CoachProfile::from_record(coach, top) })
}

/// Before/after team statistics for a prospective coaching staff.
///
/// # Returns
/// JSON string containing ApiResponse<ReportResponse>
pub fn report_json(request_json: &str, catalog: &CoachCatalog, teams: &dyn TeamSource) -> String {
    ApiResponse::from(handle_report(request_json, catalog, teams)).to_json()
}

fn handle_report(
    request_json: &str,
    catalog: &CoachCatalog,
    teams: &dyn TeamSource,
) -> Result<ReportResponse, ApiError> {
    let request: ReportRequest = parse_request(request_json, "ReportRequest")?;
    let team = teams.team_by_id(&request.team_id).map_err(|e| {
        warn!("Report request for unknown team: {}", e);
        ApiError::from(e)
    })?;
    let coaches = request
        .coaches
        .iter()
        .map(|name| find_coach(catalog, name).map(Arc::clone))
        .collect::<Result<Vec<_>, _>>()?;

    let report = build_report(&team, &coaches);
    debug!("Report for {} with {} coach(es)", report.team_name, coaches.len());
    Ok(ReportResponse { verdict: report.summary.verdict().to_string(), report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryTeamSource, TeamRecord};
    use crate::coach::Category;
    use serde_json::Value;

    fn catalog() -> CoachCatalog {
        CoachCatalog::from_records(vec![
            CoachRecord::builder("Ava Stone", Category::Offense)
                .overall_rating(3.0)
                .salary(5.2)
                .build(),
            CoachRecord::builder("Ben Cole", Category::Defense)
                .overall_rating(4.0)
                .salary(2.6)
                .build(),
        ])
    }

    fn teams() -> InMemoryTeamSource {
        InMemoryTeamSource::new(vec![TeamRecord {
            team_id: "gulls".into(),
            team_name: "Harbor City Gulls".into(),
            budget: 40.0,
            overall_rating: 2.0,
            offense_rating: 2.5,
            defense_rating: 1.5,
            special_teams_rating: 1.0,
            ..TeamRecord::default()
        }])
    }

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn market_pads_and_reports_seed() {
        let response = parse(&market_json(r#"{"category": "D", "count": 3, "seed": 5}"#, &catalog()));
        assert_eq!(response["success"], true);
        let data = &response["data"];
        assert_eq!(data["coaches"].as_array().unwrap().len(), 3);
        assert_eq!(data["coaches"][0]["name"], "Ben Cole");
        assert_eq!(data["placeholders"], 2);
        assert_eq!(data["generated_with_seed"], 5);
    }

    #[test]
    fn market_defaults_to_two_slots() {
        let response = parse(&market_json("{}", &catalog()));
        assert_eq!(response["data"]["coaches"].as_array().unwrap().len(), 2);
        assert_eq!(response["data"]["placeholders"], 0);
    }

    #[test]
    fn market_rejects_bad_input() {
        let response = parse(&market_json("{not json", &catalog()));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "INVALID_JSON");

        let response = parse(&market_json(r#"{"count": 1000}"#, &catalog()));
        assert_eq!(response["error"]["code"], "INVALID_COUNT");

        let response = parse(&market_json(r#"{"category": "K"}"#, &catalog()));
        assert_eq!(response["error"]["code"], "INVALID_JSON");
    }

    #[test]
    fn profile_defaults_to_free_agent() {
        let response = parse(&profile_json(r#"{"name": "ava stone"}"#, &catalog()));
        let profile = &response["data"]["profile"];
        assert_eq!(profile["name"], "Ava Stone");
        assert_eq!(profile["previous_team"], "Free Agent");
        assert_eq!(response["data"]["summary"]["weekly_salary"], 100_000);
    }

    #[test]
    fn profile_unknown_coach() {
        let response = parse(&profile_json(r#"{"name": "Nobody"}"#, &catalog()));
        assert_eq!(response["error"]["code"], "COACH_NOT_FOUND");
        assert_eq!(response["error"]["details"]["name"], "Nobody");
    }

    #[test]
    fn report_for_known_team() {
        let request = r#"{"team_id": "gulls", "coaches": ["Ava Stone", "Ben Cole"]}"#;
        let response = parse(&report_json(request, &catalog(), &teams()));
        assert_eq!(response["success"], true);
        let data = &response["data"];
        assert_eq!(data["verdict"], "COACHING IS PROFITABLE");
        assert_eq!(data["report"]["team_name"], "Harbor City Gulls");
        assert_eq!(data["report"]["summary"]["weekly_investment"], 150_000);
        assert_eq!(data["report"]["stats"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn report_errors() {
        let response = parse(&report_json(r#"{"team_id": "hawks"}"#, &catalog(), &teams()));
        assert_eq!(response["error"]["code"], "TEAM_NOT_FOUND");

        let request = r#"{"team_id": "gulls", "coaches": ["Ghost"]}"#;
        let response = parse(&report_json(request, &catalog(), &teams()));
        assert_eq!(response["error"]["code"], "COACH_NOT_FOUND");
    }
}
