//! Scalar derivation formulas.
//!
//! All rounding is half-away-from-zero (`f64::round`). Inputs are widened to
//! `f64` before arithmetic so that user-visible integers do not depend on
//! `f32` representation error.

use crate::catalog::TeamRecord;
use crate::coach::{Category, CoachRecord};
use std::sync::Arc;

/// Raw skill -> specialty percentage factor and cap.
pub const SPECIALTY_SCALE: f64 = 5.0;
pub const SPECIALTY_MAX: i32 = 50;

pub const STAR_MIN: u8 = 1;
pub const STAR_MAX: u8 = 5;

pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const DOLLARS_PER_MILLION: f64 = 1_000_000.0;

/// Overall rating that yields zero performance gain.
pub const GAIN_PIVOT_RATING: f64 = 2.5;
pub const GAIN_PER_RATING_POINT: f64 = 12.0;

/// Budget (millions) -> playoff pool scale.
pub const PLAYOFF_BUDGET_SCALE: f64 = 1000.0;

/// Category statistic (offense/defense/special teams) weights and cap.
pub const CATEGORY_STAT_BASELINE: i32 = 40;
pub const CATEGORY_TEAM_WEIGHT: f64 = 12.0;
pub const CATEGORY_COACH_WEIGHT: f64 = 8.0;
pub const CATEGORY_STAT_MAX: i32 = 90;

/// Win rate weights and cap. Deliberately not unified with the category cap.
pub const WIN_RATE_BASELINE: i32 = 42;
pub const WIN_RATE_TEAM_WEIGHT: f64 = 10.0;
pub const WIN_RATE_COACH_WEIGHT: f64 = 6.0;
pub const WIN_RATE_MAX: i32 = 95;

/// Round half away from zero into `i64`. NaN maps to 0; infinities saturate.
pub(crate) fn round_i64(value: f64) -> i64 {
    value.round() as i64
}

fn clamp_round(value: f64, max: i32) -> i32 {
    round_i64(value).clamp(0, i64::from(max)) as i32
}

/// `round(base * multiplier)`. Not clamped: form above 1.0 may exceed the base.
pub fn effective_bonus(base: i32, performance_multiplier: f32) -> i32 {
    round_i64(f64::from(base) * f64::from(performance_multiplier))
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `clamp(round(raw * 5), 0, 50)`. The only raw-skill -> percentage rule.
pub fn skill_to_specialty_percent(raw_value: f32) -> i32 {
    clamp_round(f64::from(raw_value) * SPECIALTY_SCALE, SPECIALTY_MAX)
}

/// `clamp(round(overall), 1, 5)`.
pub fn star_rating(overall_rating: f32) -> u8 {
    round_i64(f64::from(overall_rating)).clamp(i64::from(STAR_MIN), i64::from(STAR_MAX)) as u8
}

fn weekly_dollars(salary_million: f64) -> f64 {
    salary_million * DOLLARS_PER_MILLION / WEEKS_PER_YEAR
}

/// Annual salary in millions -> whole dollars per week.
pub fn weekly_salary(salary_million: f64) -> i64 {
    round_i64(weekly_dollars(salary_million))
}

/// Sum of weekly salaries, rounded once at the end.
pub fn weekly_investment(coaches: &[Arc<CoachRecord>]) -> i64 {
    round_i64(coaches.iter().map(|c| weekly_dollars(c.salary())).sum())
}

/// `max(0, mean(overall - 2.5) * 12)`; 0 for no coaches.
pub fn performance_gain(coaches: &[Arc<CoachRecord>]) -> f64 {
    if coaches.is_empty() {
        return 0.0;
    }
    let total: f64 =
        coaches.iter().map(|c| f64::from(c.overall_rating()) - GAIN_PIVOT_RATING).sum();
    let mean = total / coaches.len() as f64;
    (mean * GAIN_PER_RATING_POINT).max(0.0)
}

/// `max(0, gain / 100 * budget * 1000)`, rounded.
pub fn playoff_bonus(team: &TeamRecord, coaches: &[Arc<CoachRecord>]) -> i64 {
    let bonus = performance_gain(coaches) / 100.0 * team.budget * PLAYOFF_BUDGET_SCALE;
    if bonus.is_finite() {
        round_i64(bonus.max(0.0))
    } else {
        0
    }
}

fn coach_rating_sum<'a>(coaches: impl Iterator<Item = &'a Arc<CoachRecord>>) -> f64 {
    coaches.map(|c| f64::from(c.overall_rating())).sum()
}

/// `clamp(round(baseline + team rating * 12 + Σ overall * 8), 0, 90)` over the
/// coaches of `category`, using the team's rating for that category.
pub fn team_performance_delta(
    baseline: i32,
    team: &TeamRecord,
    coaches: &[Arc<CoachRecord>],
    category: Category,
) -> i32 {
    let coach_sum = coach_rating_sum(coaches.iter().filter(|c| c.category() == category));
    let raw = f64::from(baseline)
        + team.category_rating(category) * CATEGORY_TEAM_WEIGHT
        + coach_sum * CATEGORY_COACH_WEIGHT;
    clamp_round(raw, CATEGORY_STAT_MAX)
}

/// `clamp(round(baseline + team overall * 10 + Σ overall * 6), 0, 95)` over all coaches.
pub fn win_rate(baseline: i32, team: &TeamRecord, coaches: &[Arc<CoachRecord>]) -> i32 {
    let coach_sum = coach_rating_sum(coaches.iter());
    let raw = f64::from(baseline)
        + team.overall_rating * WIN_RATE_TEAM_WEIGHT
        + coach_sum * WIN_RATE_COACH_WEIGHT;
    clamp_round(raw, WIN_RATE_MAX)
}
