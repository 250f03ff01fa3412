//! Grouped summaries consumed by individual report views.
//!
//! Each function stands alone and works on any row slice, filtered or not.
//! Groups keyed by problem category or method are sorted by their
//! snake_case name; count and average rankings break ties by declaration
//! order of the enumerations involved.

use notizia_types::{Gender, Method, ProblemCategory, Row};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::age::{AgeClass, UNKNOWN_AGE_LABEL};

pub use notizia_types::is_closed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemCount {
    pub problem: ProblemCategory,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub group: String,
    pub w: usize,
    pub m: usize,
    pub d: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub label: String,
    pub count: usize,
}

/// Five age classes followed by the unknown-age bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    pub group: String,
    pub buckets: Vec<AgeBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemMethodAverage {
    pub problem: ProblemCategory,
    pub method: Method,
    /// Mean sessions per case within the group.
    pub avg: f64,
    pub cases: usize,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodAverage {
    pub method: Method,
    pub avg: f64,
    pub cases: usize,
    pub sessions: usize,
}

pub fn problem_distribution(rows: &[Row]) -> Vec<ProblemCount> {
    let mut counts: BTreeMap<ProblemCategory, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.case.problem_category).or_insert(0) += 1;
    }

    let mut out: Vec<ProblemCount> = counts
        .into_iter()
        .map(|(problem, count)| ProblemCount { problem, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

pub fn gender_by_problem(rows: &[Row]) -> Vec<GenderBreakdown> {
    gender_breakdown(rows, |row| row.case.problem_category.as_str())
}

pub fn gender_by_method(rows: &[Row]) -> Vec<GenderBreakdown> {
    gender_breakdown(rows, |row| row.session.method.as_str())
}

pub fn age_by_problem(rows: &[Row]) -> Vec<AgeBreakdown> {
    age_breakdown(rows, |row| row.case.problem_category.as_str())
}

pub fn age_by_method(rows: &[Row]) -> Vec<AgeBreakdown> {
    age_breakdown(rows, |row| row.session.method.as_str())
}

fn gender_breakdown(rows: &[Row], key: impl Fn(&Row) -> &'static str) -> Vec<GenderBreakdown> {
    let mut groups: BTreeMap<&'static str, GenderBreakdown> = BTreeMap::new();
    for row in rows {
        let group = key(row);
        let entry = groups.entry(group).or_insert_with(|| GenderBreakdown {
            group: group.to_string(),
            ..Default::default()
        });
        match row.client.gender {
            Some(Gender::W) => entry.w += 1,
            Some(Gender::M) => entry.m += 1,
            Some(Gender::D) => entry.d += 1,
            None => entry.unknown += 1,
        }
    }
    groups.into_values().collect()
}

fn age_breakdown(rows: &[Row], key: impl Fn(&Row) -> &'static str) -> Vec<AgeBreakdown> {
    // slots 0..5 are the age classes, slot 5 is unknown
    let mut groups: BTreeMap<&'static str, [usize; 6]> = BTreeMap::new();
    for row in rows {
        let slots = groups.entry(key(row)).or_insert([0; 6]);
        let slot = row.client.age.map(|age| AgeClass::of(age).index()).unwrap_or(5);
        slots[slot] += 1;
    }

    groups
        .into_iter()
        .map(|(group, slots)| {
            let mut buckets: Vec<AgeBucket> = AgeClass::ALL
                .iter()
                .map(|class| AgeBucket {
                    label: class.label().to_string(),
                    count: slots[class.index()],
                })
                .collect();
            buckets.push(AgeBucket {
                label: UNKNOWN_AGE_LABEL.to_string(),
                count: slots[5],
            });
            AgeBreakdown {
                group: group.to_string(),
                buckets,
            }
        })
        .collect()
}

/// Sessions per distinct case, averaged over the cases of each group.
struct CaseTally {
    per_case: HashMap<i64, usize>,
}

impl CaseTally {
    fn new() -> Self {
        Self {
            per_case: HashMap::new(),
        }
    }

    fn add(&mut self, case_id: i64) {
        *self.per_case.entry(case_id).or_insert(0) += 1;
    }

    /// (avg, cases, sessions)
    fn summarize(&self) -> (f64, usize, usize) {
        let cases = self.per_case.len();
        let sessions: usize = self.per_case.values().sum();
        let avg = if cases == 0 {
            0.0
        } else {
            sessions as f64 / cases as f64
        };
        (avg, cases, sessions)
    }
}

/// The method comes from the session, so a case treated with several
/// methods contributes to several groups.
pub fn avg_sessions_per_case_by_problem_and_method(rows: &[Row]) -> Vec<ProblemMethodAverage> {
    let mut groups: BTreeMap<(ProblemCategory, Method), CaseTally> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.case.problem_category, row.session.method))
            .or_insert_with(CaseTally::new)
            .add(row.case.id);
    }

    let mut out: Vec<ProblemMethodAverage> = groups
        .into_iter()
        .map(|((problem, method), tally)| {
            let (avg, cases, sessions) = tally.summarize();
            ProblemMethodAverage {
                problem,
                method,
                avg,
                cases,
                sessions,
            }
        })
        .collect();
    out.sort_by(|a, b| b.avg.total_cmp(&a.avg));
    out
}

pub fn avg_sessions_per_closed_case_by_method(rows: &[Row]) -> Vec<MethodAverage> {
    let mut groups: BTreeMap<Method, CaseTally> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.case.is_closed()) {
        groups
            .entry(row.session.method)
            .or_insert_with(CaseTally::new)
            .add(row.case.id);
    }

    let mut out: Vec<MethodAverage> = groups
        .into_iter()
        .map(|(method, tally)| {
            let (avg, cases, sessions) = tally.summarize();
            MethodAverage {
                method,
                avg,
                cases,
                sessions,
            }
        })
        .collect();
    out.sort_by(|a, b| b.avg.total_cmp(&a.avg));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use notizia_testing::fixtures::RowBuilder;
    use notizia_types::CaseStatus;

    #[test]
    fn test_problem_distribution_ranks_by_count() {
        let rows = vec![
            RowBuilder::new(1).problem(ProblemCategory::Sleep).build(),
            RowBuilder::new(2).problem(ProblemCategory::Panic).build(),
            RowBuilder::new(3).problem(ProblemCategory::Sleep).build(),
            RowBuilder::new(4).problem(ProblemCategory::Overweight).build(),
        ];
        let dist = problem_distribution(&rows);
        let order: Vec<ProblemCategory> = dist.iter().map(|p| p.problem).collect();
        assert_eq!(
            order,
            vec![
                ProblemCategory::Sleep,
                ProblemCategory::Overweight,
                ProblemCategory::Panic,
            ]
        );
        assert_eq!(dist[0].count, 2);
    }

    #[test]
    fn test_gender_by_method_counts_unknown() {
        let rows = vec![
            RowBuilder::new(1).method(Method::Other).gender(Gender::W).build(),
            RowBuilder::new(2).method(Method::Coaching).build(),
            RowBuilder::new(3).method(Method::Coaching).gender(Gender::M).build(),
        ];
        let table = gender_by_method(&rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].group, "coaching");
        assert_eq!((table[0].m, table[0].unknown), (1, 1));
        assert_eq!(table[1].group, "other");
        assert_eq!(table[1].w, 1);
    }

    #[test]
    fn test_gender_by_problem_sorts_lexically() {
        let rows = vec![
            RowBuilder::new(1).problem(ProblemCategory::SocialAnxiety).build(),
            RowBuilder::new(2).problem(ProblemCategory::Depression).build(),
            RowBuilder::new(3).problem(ProblemCategory::Pain).build(),
        ];
        let groups: Vec<String> = gender_by_problem(&rows).into_iter().map(|g| g.group).collect();
        assert_eq!(groups, vec!["depression", "pain", "social_anxiety"]);
    }

    #[test]
    fn test_age_by_problem_has_unknown_bucket() {
        let rows = vec![
            RowBuilder::new(1).problem(ProblemCategory::Panic).age(25).build(),
            RowBuilder::new(2).problem(ProblemCategory::Panic).build(),
            RowBuilder::new(3).problem(ProblemCategory::Panic).age(61).build(),
        ];
        let table = age_by_problem(&rows);
        assert_eq!(table.len(), 1);
        let labels: Vec<&str> = table[0].buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["0–17", "18–29", "30–44", "45–59", "60+", "Unbekannt"]);
        let counts: Vec<usize> = table[0].buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn test_age_by_method_groups() {
        let rows = vec![
            RowBuilder::new(1).method(Method::Coaching).age(10).build(),
            RowBuilder::new(2).method(Method::KlassischeHypnose).age(50).build(),
        ];
        let groups: Vec<String> = age_by_method(&rows).into_iter().map(|g| g.group).collect();
        assert_eq!(groups, vec!["coaching", "klassische_hypnose"]);
    }

    #[test]
    fn test_one_case_splits_across_method_groups() {
        let rows = vec![
            RowBuilder::new(1).case(5).problem(ProblemCategory::Panic).method(Method::Coaching).build(),
            RowBuilder::new(2).case(5).problem(ProblemCategory::Panic).method(Method::Coaching).build(),
            RowBuilder::new(3).case(5).problem(ProblemCategory::Panic).method(Method::Other).build(),
        ];
        let table = avg_sessions_per_case_by_problem_and_method(&rows);
        assert_eq!(table.len(), 2);

        assert_eq!(table[0].method, Method::Coaching);
        assert_eq!(table[0].avg, 2.0);
        assert_eq!((table[0].cases, table[0].sessions), (1, 2));

        assert_eq!(table[1].method, Method::Other);
        assert_eq!(table[1].avg, 1.0);
    }

    #[test]
    fn test_average_over_several_cases() {
        let rows = vec![
            RowBuilder::new(1).case(1).method(Method::Coaching).build(),
            RowBuilder::new(2).case(1).method(Method::Coaching).build(),
            RowBuilder::new(3).case(1).method(Method::Coaching).build(),
            RowBuilder::new(4).case(2).method(Method::Coaching).build(),
        ];
        let table = avg_sessions_per_case_by_problem_and_method(&rows);
        assert_eq!(table[0].avg, 2.0);
        assert_eq!((table[0].cases, table[0].sessions), (2, 4));
    }

    #[test]
    fn test_closed_case_average_ignores_open_cases() {
        let rows = vec![
            RowBuilder::new(1).case(1).status(CaseStatus::Resolved).method(Method::Coaching).build(),
            RowBuilder::new(2).case(1).status(CaseStatus::Resolved).method(Method::Coaching).build(),
            RowBuilder::new(3).case(2).status(CaseStatus::Open).method(Method::Coaching).build(),
            RowBuilder::new(4).case(3).status(CaseStatus::Dropped).method(Method::Other).build(),
        ];
        let table = avg_sessions_per_closed_case_by_method(&rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].method, Method::Coaching);
        assert_eq!((table[0].avg, table[0].cases, table[0].sessions), (2.0, 1, 2));
        assert_eq!(table[1].method, Method::Other);
        assert_eq!(table[1].avg, 1.0);
    }

    #[test]
    fn test_equal_averages_keep_enum_order() {
        let rows = vec![
            RowBuilder::new(1).problem(ProblemCategory::Sleep).method(Method::Other).build(),
            RowBuilder::new(2).problem(ProblemCategory::Panic).method(Method::Coaching).build(),
            RowBuilder::new(3).problem(ProblemCategory::Overweight).method(Method::Other).build(),
            RowBuilder::new(4)
                .problem(ProblemCategory::Overweight)
                .method(Method::AufloesendeHypnose)
                .build(),
        ];
        let order: Vec<(ProblemCategory, Method)> = avg_sessions_per_case_by_problem_and_method(&rows)
            .into_iter()
            .map(|row| (row.problem, row.method))
            .collect();
        assert_eq!(
            order,
            vec![
                (ProblemCategory::Overweight, Method::AufloesendeHypnose),
                (ProblemCategory::Overweight, Method::Other),
                (ProblemCategory::Panic, Method::Coaching),
                (ProblemCategory::Sleep, Method::Other),
            ]
        );

        let closed: Vec<Row> = rows
            .into_iter()
            .map(|mut row| {
                row.case.status = CaseStatus::Resolved;
                row
            })
            .collect();
        let methods: Vec<Method> = avg_sessions_per_closed_case_by_method(&closed)
            .into_iter()
            .map(|row| row.method)
            .collect();
        assert_eq!(
            methods,
            vec![Method::AufloesendeHypnose, Method::Coaching, Method::Other]
        );
    }
}
