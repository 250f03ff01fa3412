// Engine module - pure analytics over denormalized session rows
// Every function reads its input and allocates fresh output; nothing is cached.

pub mod age;
pub mod analytics;
pub mod calendar;
pub mod crosstab;
pub mod export;
pub mod filter;
pub mod stats;

pub use age::{AgeClass, AgeClassCount};
pub use analytics::{AnalyticsResult, GenderCounts, KeyCount, MethodCount, run_analytics};
pub use crosstab::{
    AgeBreakdown, GenderBreakdown, MethodAverage, ProblemCount, ProblemMethodAverage,
    age_by_method, age_by_problem, avg_sessions_per_case_by_problem_and_method,
    avg_sessions_per_closed_case_by_method, gender_by_method, gender_by_problem, is_closed,
    problem_distribution,
};
pub use export::{ExportCase, ExportOptions, ExportRecord, ExportSession, export_records};
pub use filter::{Query, filter_rows};
pub use stats::{Stat, number_stats};
