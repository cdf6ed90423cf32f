use super::formulas::skill_to_specialty_percent;
use crate::coach::{CoachRecord, SkillAttribute};
use serde::{Deserialize, Serialize};

/// One ranked specialty: label plus a 0–50 percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyEntry {
    pub attribute: SkillAttribute,
    pub label: String,
    pub percent: i32,
}

impl SpecialtyEntry {
    pub fn new(attribute: SkillAttribute, percent: i32) -> Self {
        Self { attribute, label: attribute.label().to_string(), percent }
    }
}

/// Top `n` positive specialties of `record`, highest first.
///
/// Candidates are the four attributes of the record's category; ties keep the
/// category's declared attribute order (stable sort).
pub fn top_specialties(record: &CoachRecord, n: usize) -> Vec<SpecialtyEntry> {
    let mut entries: Vec<SpecialtyEntry> = record
        .skills()
        .map(|(attr, raw)| SpecialtyEntry::new(attr, skill_to_specialty_percent(raw)))
        .filter(|entry| entry.percent > 0)
        .collect();

    entries.sort_by(|a, b| b.percent.cmp(&a.percent));
    entries.truncate(n);
    entries
}
