//! Coaching categories and the raw skill attributes each one carries.
//!
//! Every specialty or rating computation looks attributes up through
//! [`Category::skill_attributes`], so the per-category ordering lives in exactly
//! one table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coaching specialty. Fixed for a coach once the record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    Offense,
    Defense,
    SpecialTeams,
}

/// Named raw skill attribute. Each belongs to exactly one [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillAttribute {
    // Offense
    PassingEfficiency,
    RunGameDesign,
    RedZoneExecution,
    TempoControl,
    // Defense
    RunDefense,
    PressureControl,
    CoverageDiscipline,
    TurnoverGeneration,
    // Special teams
    KickingAccuracy,
    ReturnCoverage,
    PuntStrategy,
    FieldPosition,
}

/// Category -> its four attributes in declared priority order.
/// Ties in specialty rankings are broken by this order.
static SKILL_TABLE: [(Category, [SkillAttribute; 4]); 3] = [
    (
        Category::Offense,
        [
            SkillAttribute::PassingEfficiency,
            SkillAttribute::RunGameDesign,
            SkillAttribute::RedZoneExecution,
            SkillAttribute::TempoControl,
        ],
    ),
    (
        Category::Defense,
        [
            SkillAttribute::RunDefense,
            SkillAttribute::PressureControl,
            SkillAttribute::CoverageDiscipline,
            SkillAttribute::TurnoverGeneration,
        ],
    ),
    (
        Category::SpecialTeams,
        [
            SkillAttribute::KickingAccuracy,
            SkillAttribute::ReturnCoverage,
            SkillAttribute::PuntStrategy,
            SkillAttribute::FieldPosition,
        ],
    ),
];

impl Category {
    pub const ALL: [Category; 3] = [Category::Offense, Category::Defense, Category::SpecialTeams];

    fn table_index(self) -> usize {
        match self {
            Category::Offense => 0,
            Category::Defense => 1,
            Category::SpecialTeams => 2,
        }
    }

    /// The four raw attributes relevant to this category, in priority order.
    pub fn skill_attributes(self) -> &'static [SkillAttribute; 4] {
        &SKILL_TABLE[self.table_index()].1
    }

    /// Single-letter code used by the external feed.
    pub fn code(self) -> &'static str {
        match self {
            Category::Offense => "O",
            Category::Defense => "D",
            Category::SpecialTeams => "S",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Offense => write!(f, "Offense"),
            Category::Defense => write!(f, "Defense"),
            Category::SpecialTeams => write!(f, "Special Teams"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts feed codes (`O`/`D`/`S`) and full names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            s.trim().chars().filter(|c| !c.is_whitespace() && *c != '_').collect();
        match normalized.to_ascii_lowercase().as_str() {
            "o" | "offense" | "offence" => Ok(Category::Offense),
            "d" | "defense" | "defence" => Ok(Category::Defense),
            "s" | "specialteams" | "st" => Ok(Category::SpecialTeams),
            _ => Err(format!("unknown coach category '{}'", s.trim())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl SkillAttribute {
    /// Category this attribute belongs to, derived from the skill table.
    pub fn category(self) -> Category {
        SKILL_TABLE
            .iter()
            .find(|(_, attrs)| attrs.contains(&self))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Offense)
    }

    /// Field name in the external feed.
    pub fn key(self) -> &'static str {
        match self {
            SkillAttribute::PassingEfficiency => "passing_efficiency",
            SkillAttribute::RunGameDesign => "run_game_design",
            SkillAttribute::RedZoneExecution => "red_zone_execution",
            SkillAttribute::TempoControl => "tempo_control",
            SkillAttribute::RunDefense => "run_defense",
            SkillAttribute::PressureControl => "pressure_control",
            SkillAttribute::CoverageDiscipline => "coverage_discipline",
            SkillAttribute::TurnoverGeneration => "turnover_generation",
            SkillAttribute::KickingAccuracy => "kicking_accuracy",
            SkillAttribute::ReturnCoverage => "return_coverage",
            SkillAttribute::PuntStrategy => "punt_strategy",
            SkillAttribute::FieldPosition => "field_position",
        }
    }

    /// Human-readable label shown next to specialty percentages.
    pub fn label(self) -> &'static str {
        match self {
            SkillAttribute::PassingEfficiency => "Passing Efficiency",
            SkillAttribute::RunGameDesign => "Run Game Design",
            SkillAttribute::RedZoneExecution => "Red Zone Execution",
            SkillAttribute::TempoControl => "Tempo Control",
            SkillAttribute::RunDefense => "Run Defense",
            SkillAttribute::PressureControl => "Pressure Control",
            SkillAttribute::CoverageDiscipline => "Coverage Discipline",
            SkillAttribute::TurnoverGeneration => "Turnover Generation",
            SkillAttribute::KickingAccuracy => "Kicking Accuracy",
            SkillAttribute::ReturnCoverage => "Return Coverage",
            SkillAttribute::PuntStrategy => "Punt Strategy",
            SkillAttribute::FieldPosition => "Field Position",
        }
    }
}
