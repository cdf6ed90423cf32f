//! External coach feed parsing.
//!
//! The static catalog and the external feed share one JSON shape: either a bare
//! array of coach objects or `{ "coaches": [...] }`. Skill fields sit next to
//! the other fields and use the snake_case keys from the skill table.

use crate::coach::{Category, CoachRecord};
use crate::error::{CoachingError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

fn default_overall_rating() -> f32 {
    3.0
}

/// One coach object as written in a feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedCoach {
    pub name: String,
    #[serde(alias = "type", alias = "position")]
    pub category: Category,
    #[serde(default)]
    pub experience: u32,
    /// Millions per year.
    #[serde(default)]
    pub salary: f64,
    #[serde(default = "default_overall_rating", alias = "rating")]
    pub overall_rating: f32,
    #[serde(default)]
    pub contract_length: u32,
    #[serde(default, alias = "championship_wins")]
    pub championships: u32,
    #[serde(default)]
    pub previous_team: Option<String>,
    #[serde(default)]
    pub bonus: u8,
    #[serde(default)]
    pub description: String,
    /// Everything else, including the raw skill fields.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    List(Vec<FeedCoach>),
    Wrapped { coaches: Vec<FeedCoach> },
}

impl FeedCoach {
    pub fn into_record(self) -> CoachRecord {
        let mut builder = CoachRecord::builder(self.name, self.category)
            .overall_rating(self.overall_rating)
            .salary(self.salary)
            .experience(self.experience)
            .contract_length(self.contract_length)
            .championships(self.championships)
            .previous_team(self.previous_team)
            .bonus(self.bonus)
            .description(self.description);

        for attr in self.category.skill_attributes() {
            if let Some(value) = self.extra.get(attr.key()).and_then(Value::as_f64) {
                builder = builder.skill(*attr, value as f32);
            }
        }
        builder.build()
    }
}

/// Parse a feed document into records. Any structural problem fails the whole
/// document with [`CoachingError::DataFormat`].
pub fn parse_feed(json: &str, source_name: &str) -> Result<Vec<CoachRecord>> {
    let document: FeedDocument = serde_json::from_str(json)
        .map_err(|e| CoachingError::data_format(source_name, e.to_string()))?;

    let coaches = match document {
        FeedDocument::List(coaches) => coaches,
        FeedDocument::Wrapped { coaches } => coaches,
    };

    if let Some(idx) = coaches.iter().position(|c| c.name.trim().is_empty()) {
        return Err(CoachingError::data_format(
            source_name,
            format!("coach #{} has an empty name", idx + 1),
        ));
    }

    Ok(coaches.into_iter().map(FeedCoach::into_record).collect())
}
