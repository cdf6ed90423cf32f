//! Canonical coach record.
//!
//! Records are built once at catalog load time and shared as `Arc<CoachRecord>`.
//! Static attributes are private and immutable; the only mutable state is the
//! runtime section (employment flag, current form, games coached), kept in
//! atomics so catalog reads never need a lock.

use super::category::{Category, SkillAttribute};
use crate::stats;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Overall quality rating domain.
pub const OVERALL_RATING_MIN: f32 = 1.0;
pub const OVERALL_RATING_MAX: f32 = 5.0;

/// Raw skill magnitude domain.
pub const SKILL_MIN: f32 = 0.0;
pub const SKILL_MAX: f32 = 10.0;

/// Designer bonus cap.
pub const MAX_BONUS: u8 = 50;

pub const PLACEHOLDER_NAME: &str = "Open Position";

/// Clamp into `[min, max]`; non-finite input falls to `min`.
pub(crate) fn clamp_domain(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

/// Normalized lookup key for deduplication and name queries.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Raw skill values aligned with [`Category::skill_attributes`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkillSet([f32; 4]);

impl SkillSet {
    pub fn values(&self) -> &[f32; 4] {
        &self.0
    }
}

#[derive(Debug)]
pub struct CoachRecord {
    name: String,
    category: Category,
    overall_rating: f32,
    skills: SkillSet,
    /// Millions per year.
    salary: f64,
    experience: u32,
    /// In games.
    contract_length: u32,
    previous_team: Option<String>,
    championships: u32,
    bonus: u8,
    description: String,
    placeholder: bool,

    // Runtime only
    employed: AtomicBool,
    performance_bits: AtomicU32,
    games_coached: AtomicU32,
}

impl CoachRecord {
    pub fn builder(name: impl Into<String>, category: Category) -> CoachRecordBuilder {
        CoachRecordBuilder::new(name, category)
    }

    /// Sentinel used to pad market samples.
    pub fn placeholder() -> Self {
        let mut record = CoachRecordBuilder::new(PLACEHOLDER_NAME, Category::Defense)
            .overall_rating(OVERALL_RATING_MIN)
            .description("No coach available for this slot.")
            .build();
        record.placeholder = true;
        record
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn overall_rating(&self) -> f32 {
        self.overall_rating
    }

    /// Raw value of `attr`; zero for attributes outside this coach's category.
    pub fn skill(&self, attr: SkillAttribute) -> f32 {
        self.category
            .skill_attributes()
            .iter()
            .position(|a| *a == attr)
            .map(|idx| self.skills.0[idx])
            .unwrap_or(0.0)
    }

    /// Relevant attributes with their raw values, in priority order.
    pub fn skills(&self) -> impl Iterator<Item = (SkillAttribute, f32)> + '_ {
        self.category.skill_attributes().iter().copied().zip(self.skills.0.iter().copied())
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn contract_length(&self) -> u32 {
        self.contract_length
    }

    pub fn previous_team(&self) -> Option<&str> {
        self.previous_team.as_deref()
    }

    pub fn championships(&self) -> u32 {
        self.championships
    }

    pub fn bonus(&self) -> u8 {
        self.bonus
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn is_employed(&self) -> bool {
        self.employed.load(Ordering::Acquire)
    }

    /// Only the roster flips this. Returns the previous value.
    pub(crate) fn set_employed(&self, employed: bool) -> bool {
        self.employed.swap(employed, Ordering::AcqRel)
    }

    /// Current form multiplier (1.0 = nominal).
    pub fn performance(&self) -> f32 {
        f32::from_bits(self.performance_bits.load(Ordering::Acquire))
    }

    /// Update current form. Non-finite input is ignored, negatives clamp to 0.
    pub fn set_performance(&self, multiplier: f32) {
        if !multiplier.is_finite() {
            log::warn!("Ignoring non-finite performance multiplier for {}", self.name);
            return;
        }
        self.performance_bits.store(multiplier.max(0.0).to_bits(), Ordering::Release);
    }

    pub fn games_coached(&self) -> u32 {
        self.games_coached.load(Ordering::Acquire)
    }

    pub fn record_game(&self) {
        self.games_coached.fetch_add(1, Ordering::AcqRel);
    }

    pub fn star_rating(&self) -> u8 {
        stats::star_rating(self.overall_rating)
    }

    pub fn weekly_salary(&self) -> i64 {
        stats::weekly_salary(self.salary)
    }

    /// Category bonus scaled by current form.
    pub fn effective_bonus(&self) -> i32 {
        stats::effective_bonus(i32::from(self.bonus), self.performance())
    }

    pub fn summary(&self) -> CoachSummary {
        CoachSummary {
            name: self.name.clone(),
            category: self.category,
            star_rating: self.star_rating(),
            overall_rating: self.overall_rating,
            weekly_salary: self.weekly_salary(),
            employed: self.is_employed(),
            placeholder: self.placeholder,
        }
    }
}

/// Row-level view of a coach for market and roster listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSummary {
    pub name: String,
    pub category: Category,
    pub star_rating: u8,
    pub overall_rating: f32,
    pub weekly_salary: i64,
    pub employed: bool,
    pub placeholder: bool,
}

/// Builds a [`CoachRecord`], applying every domain clamp in one place.
#[derive(Debug, Clone)]
pub struct CoachRecordBuilder {
    name: String,
    category: Category,
    overall_rating: f32,
    skills: [f32; 4],
    salary: f64,
    experience: u32,
    contract_length: u32,
    previous_team: Option<String>,
    championships: u32,
    bonus: u8,
    description: String,
}

impl CoachRecordBuilder {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into().trim().to_string(),
            category,
            overall_rating: 3.0,
            skills: [0.0; 4],
            salary: 0.0,
            experience: 0,
            contract_length: 0,
            previous_team: None,
            championships: 0,
            bonus: 0,
            description: String::new(),
        }
    }

    pub fn overall_rating(mut self, rating: f32) -> Self {
        self.overall_rating = rating;
        self
    }

    /// Attributes outside the builder's category are dropped.
    pub fn skill(mut self, attr: SkillAttribute, value: f32) -> Self {
        match self.category.skill_attributes().iter().position(|a| *a == attr) {
            Some(idx) => self.skills[idx] = value,
            None => log::debug!(
                "Dropping {} for {} coach {}",
                attr.key(),
                self.category,
                self.name
            ),
        }
        self
    }

    pub fn salary(mut self, millions_per_year: f64) -> Self {
        self.salary = millions_per_year;
        self
    }

    pub fn experience(mut self, years: u32) -> Self {
        self.experience = years;
        self
    }

    pub fn contract_length(mut self, games: u32) -> Self {
        self.contract_length = games;
        self
    }

    pub fn previous_team(mut self, team: Option<String>) -> Self {
        self.previous_team = team.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        self
    }

    pub fn championships(mut self, count: u32) -> Self {
        self.championships = count;
        self
    }

    pub fn bonus(mut self, bonus: u8) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> CoachRecord {
        let salary = if self.salary.is_finite() { self.salary.max(0.0) } else { 0.0 };
        let mut skills = SkillSet::default();
        for (slot, raw) in skills.0.iter_mut().zip(self.skills) {
            *slot = clamp_domain(raw, SKILL_MIN, SKILL_MAX);
        }

        CoachRecord {
            name: self.name,
            category: self.category,
            overall_rating: clamp_domain(
                self.overall_rating,
                OVERALL_RATING_MIN,
                OVERALL_RATING_MAX,
            ),
            skills,
            salary,
            experience: self.experience,
            contract_length: self.contract_length,
            previous_team: self.previous_team,
            championships: self.championships,
            bonus: self.bonus.min(MAX_BONUS),
            description: self.description,
            placeholder: false,
            employed: AtomicBool::new(false),
            performance_bits: AtomicU32::new(1.0f32.to_bits()),
            games_coached: AtomicU32::new(0),
        }
    }
}
