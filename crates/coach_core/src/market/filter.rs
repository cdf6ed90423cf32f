use crate::coach::{Category, CoachRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category filter for the hiring market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MarketFilter {
    All,
    Only(Category),
}

impl MarketFilter {
    pub fn matches(&self, record: &CoachRecord) -> bool {
        match self {
            MarketFilter::All => true,
            MarketFilter::Only(category) => record.category() == *category,
        }
    }
}

impl Default for MarketFilter {
    fn default() -> Self {
        MarketFilter::All
    }
}

impl From<Category> for MarketFilter {
    fn from(category: Category) -> Self {
        MarketFilter::Only(category)
    }
}

impl FromStr for MarketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "*" => Ok(MarketFilter::All),
            _ => s.parse::<Category>().map(MarketFilter::Only),
        }
    }
}

impl TryFrom<String> for MarketFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MarketFilter> for String {
    fn from(filter: MarketFilter) -> Self {
        match filter {
            MarketFilter::All => "All".to_string(),
            MarketFilter::Only(category) => category.code().to_string(),
        }
    }
}

impl fmt::Display for MarketFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MarketFilter::All => write!(f, "All"),
            MarketFilter::Only(category) => write!(f, "{}", category),
        }
    }
}
