//! Profile view of a single coach: metadata, ranked specialties, contract terms.

use super::specialty::{top_specialties, SpecialtyEntry};
use crate::coach::CoachRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerm {
    pub key: String,
    pub value: String,
}

impl ContractTerm {
    fn new(key: &str, value: String) -> Self {
        Self { key: key.to_string(), value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachProfile {
    pub name: String,
    pub experience: u32,
    pub previous_team: String,
    pub championships: u32,
    pub specialties: Vec<SpecialtyEntry>,
    pub contract_terms: Vec<ContractTerm>,
}

impl CoachProfile {
    pub fn from_record(record: &CoachRecord, top_n: usize) -> Self {
        Self {
            name: record.name().to_string(),
            experience: record.experience(),
            previous_team: record.previous_team().unwrap_or("Free Agent").to_string(),
            championships: record.championships(),
            specialties: top_specialties(record, top_n),
            contract_terms: contract_terms(record),
        }
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn contract_terms(record: &CoachRecord) -> Vec<ContractTerm> {
    vec![
        ContractTerm::new("Annual Salary", format!("${:.1}M", record.salary())),
        ContractTerm::new("Weekly Salary", format!("${}/wk", format_thousands(record.weekly_salary()))),
        ContractTerm::new("Contract Length", format!("{} games", record.contract_length())),
        ContractTerm::new("Star Rating", format!("{} Stars", record.star_rating())),
    ]
}
