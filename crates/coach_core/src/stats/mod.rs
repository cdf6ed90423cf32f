//! Performance derivation pipeline.
//!
//! Pure functions from coach/team records to presentation-ready figures:
//! effective bonuses, specialty rankings, contract terms, before/after team
//! statistics and the weekly ROI summary.

pub mod formulas;
pub mod profile;
pub mod report;
pub mod specialty;

pub use formulas::*;
pub use profile::{contract_terms, format_thousands, CoachProfile, ContractTerm};
pub use report::{build_report, DerivedStat, PerformanceReport, StatKind, TeamSummary, Trend};
pub use specialty::{top_specialties, SpecialtyEntry};
