use crate::coach::Category;
use crate::error::CoachingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Managed staff position. Special Teams has no slot under the current policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Offense,
    Defense,
}

impl Position {
    pub const ALL: [Position; 2] = [Position::Offense, Position::Defense];

    pub fn category(self) -> Category {
        match self {
            Position::Offense => Category::Offense,
            Position::Defense => Category::Defense,
        }
    }
}

impl TryFrom<Category> for Position {
    type Error = CoachingError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        match category {
            Category::Offense => Ok(Position::Offense),
            Category::Defense => Ok(Position::Defense),
            Category::SpecialTeams => Err(CoachingError::UnsupportedPosition { category }),
        }
    }
}

impl FromStr for Position {
    type Err = CoachingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category: Category =
            s.parse().map_err(|e: String| CoachingError::data_format("position", e))?;
        Position::try_from(category)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.category())
    }
}
