//! Before/after team statistics and the weekly ROI summary.

use super::formulas::{
    performance_gain, playoff_bonus, team_performance_delta, weekly_investment, win_rate,
    CATEGORY_STAT_BASELINE, WIN_RATE_BASELINE,
};
use crate::catalog::TeamRecord;
use crate::coach::{Category, CoachRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    WinRate,
    Offense,
    Defense,
    SpecialTeams,
}

impl StatKind {
    pub const ALL: [StatKind; 4] =
        [StatKind::WinRate, StatKind::Offense, StatKind::Defense, StatKind::SpecialTeams];

    pub fn label(self) -> &'static str {
        match self {
            StatKind::WinRate => "Win Rate",
            StatKind::Offense => "Offense Rating",
            StatKind::Defense => "Defense Rating",
            StatKind::SpecialTeams => "Special Teams Rating",
        }
    }

    /// Coaching category feeding this statistic; `None` means every coach.
    pub fn category(self) -> Option<Category> {
        match self {
            StatKind::WinRate => None,
            StatKind::Offense => Some(Category::Offense),
            StatKind::Defense => Some(Category::Defense),
            StatKind::SpecialTeams => Some(Category::SpecialTeams),
        }
    }

    pub fn evaluate(self, team: &TeamRecord, coaches: &[Arc<CoachRecord>]) -> i32 {
        match self.category() {
            None => win_rate(WIN_RATE_BASELINE, team, coaches),
            Some(category) => team_performance_delta(CATEGORY_STAT_BASELINE, team, coaches, category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Unchanged,
}

/// A statistic without coaching (`before`) and with the given staff (`after`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStat {
    pub kind: StatKind,
    pub label: String,
    pub before: i32,
    pub after: i32,
}

impl DerivedStat {
    pub fn compute(kind: StatKind, team: &TeamRecord, coaches: &[Arc<CoachRecord>]) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            before: kind.evaluate(team, &[]),
            after: kind.evaluate(team, coaches),
        }
    }

    pub fn delta(&self) -> i32 {
        self.after - self.before
    }

    pub fn trend(&self) -> Trend {
        match self.after.cmp(&self.before) {
            std::cmp::Ordering::Greater => Trend::Up,
            std::cmp::Ordering::Less => Trend::Down,
            std::cmp::Ordering::Equal => Trend::Unchanged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    /// Whole dollars per week.
    pub weekly_investment: i64,
    pub performance_gain_percent: f64,
    /// Whole dollars.
    pub playoff_bonus: i64,
}

impl TeamSummary {
    pub fn compute(team: &TeamRecord, coaches: &[Arc<CoachRecord>]) -> Self {
        Self {
            weekly_investment: weekly_investment(coaches),
            performance_gain_percent: performance_gain(coaches),
            playoff_bonus: playoff_bonus(team, coaches),
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.performance_gain_percent > 0.0 && self.playoff_bonus > 0
    }

    pub fn verdict(&self) -> &'static str {
        if self.is_profitable() {
            "COACHING IS PROFITABLE"
        } else {
            "COACHING IS NOT PROFITABLE"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub team_name: String,
    pub stats: Vec<DerivedStat>,
    pub summary: TeamSummary,
}

/// Every derived statistic for `team` under the given coaching staff.
pub fn build_report(team: &TeamRecord, coaches: &[Arc<CoachRecord>]) -> PerformanceReport {
    PerformanceReport {
        team_name: team.team_name.clone(),
        stats: StatKind::ALL.iter().map(|kind| DerivedStat::compute(*kind, team, coaches)).collect(),
        summary: TeamSummary::compute(team, coaches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coach(category: Category, overall: f32, salary: f64) -> Arc<CoachRecord> {
        Arc::new(
            CoachRecord::builder(format!("{category}"), category)
                .overall_rating(overall)
                .salary(salary)
                .build(),
        )
    }

    fn team() -> TeamRecord {
        TeamRecord {
            team_name: "Harbor City Gulls".to_string(),
            budget: 40.0,
            overall_rating: 2.0,
            offense_rating: 2.5,
            defense_rating: 1.5,
            special_teams_rating: 1.0,
            ..TeamRecord::default()
        }
    }

    #[test]
    fn report_covers_every_stat_kind() {
        let coaches = vec![coach(Category::Offense, 3.0, 5.2), coach(Category::Defense, 4.0, 2.6)];
        let report = build_report(&team(), &coaches);

        assert_eq!(report.team_name, "Harbor City Gulls");
        assert_eq!(report.stats.len(), 4);

        let offense = &report.stats[1];
        assert_eq!(offense.kind, StatKind::Offense);
        assert_eq!(offense.before, 70);
        assert_eq!(offense.after, 90);
        assert_eq!(offense.trend(), Trend::Up);

        let defense = &report.stats[2];
        // 40 + 18 = 58 -> 58 + 32 = 90
        assert_eq!((defense.before, defense.after), (58, 90));

        let special = &report.stats[3];
        assert_eq!(special.trend(), Trend::Unchanged);
        assert_eq!(special.delta(), 0);

        let win = &report.stats[0];
        // 42 + 20 = 62 -> 62 + 42 = 104 -> 95
        assert_eq!((win.before, win.after), (62, 95));
    }

    #[test]
    fn summary_profitability() {
        let coaches = vec![coach(Category::Offense, 3.0, 5.2), coach(Category::Defense, 4.0, 2.6)];
        let summary = TeamSummary::compute(&team(), &coaches);

        assert_eq!(summary.weekly_investment, 150_000);
        assert!((summary.performance_gain_percent - 12.0).abs() < 1e-9);
        assert_eq!(summary.playoff_bonus, 4_800);
        assert!(summary.is_profitable());
        assert_eq!(summary.verdict(), "COACHING IS PROFITABLE");
    }

    #[test]
    fn empty_staff_is_not_profitable() {
        let summary = TeamSummary::compute(&team(), &[]);
        assert_eq!(summary.weekly_investment, 0);
        assert_eq!(summary.playoff_bonus, 0);
        assert!(!summary.is_profitable());
    }
}
