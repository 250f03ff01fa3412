use notizia_types::{Gender, Method, Row};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::age::{self, AgeClass, AgeClassCount};
use crate::calendar::{iso_week_key, month_key, parse_started_at};
use crate::stats::{Stat, number_stats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCount {
    pub method: Method,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// Sessions per client gender; sessions without a gender are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub w: usize,
    pub m: usize,
    pub d: usize,
}

impl GenderCounts {
    fn add(&mut self, gender: Gender) {
        match gender {
            Gender::W => self.w += 1,
            Gender::M => self.m += 1,
            Gender::D => self.d += 1,
        }
    }
}

/// Primary report over a (usually filtered) set of session rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub total_sessions: usize,
    /// Descending by count; equal counts keep method declaration order.
    pub sessions_by_method: Vec<MethodCount>,
    /// Session duration in minutes.
    pub dur: Stat,
    /// `sud_before - sud_after` for sessions rated on both ends.
    pub sud_delta: Stat,
    /// Distinct closed cases among the rows.
    pub closed_cases: usize,
    /// `YYYY-MM`, ascending.
    pub trend_month: Vec<KeyCount>,
    /// `YYYY-Www`, ascending.
    pub trend_week: Vec<KeyCount>,
    pub by_age_class: Vec<AgeClassCount>,
    pub by_gender: GenderCounts,
    /// Rows left out of both trends because `started_at` did not parse.
    pub undated_sessions: usize,
}

pub fn run_analytics(rows: &[Row]) -> AnalyticsResult {
    let mut by_method: BTreeMap<Method, usize> = BTreeMap::new();
    let mut durations = Vec::new();
    let mut sud_deltas = Vec::new();
    let mut closed: HashSet<i64> = HashSet::new();
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_week: BTreeMap<String, usize> = BTreeMap::new();
    let mut undated_sessions = 0;
    let mut age_counts = [0usize; 5];
    let mut by_gender = GenderCounts::default();

    for row in rows {
        *by_method.entry(row.session.method).or_insert(0) += 1;

        if let Some(duration) = row.session.duration_min {
            durations.push(duration as f64);
        }
        if let Some(delta) = row.session.sud_delta() {
            sud_deltas.push(delta as f64);
        }

        if row.case.is_closed() {
            closed.insert(row.case.id);
        }

        match parse_started_at(&row.session.started_at) {
            Some(date) => {
                *by_month.entry(month_key(date)).or_insert(0) += 1;
                *by_week.entry(iso_week_key(date)).or_insert(0) += 1;
            }
            None => undated_sessions += 1,
        }

        if let Some(age) = row.client.age {
            age_counts[AgeClass::of(age).index()] += 1;
        }
        if let Some(gender) = row.client.gender {
            by_gender.add(gender);
        }
    }

    AnalyticsResult {
        total_sessions: rows.len(),
        sessions_by_method: sort_method_counts(by_method),
        dur: number_stats(&durations),
        sud_delta: number_stats(&sud_deltas),
        closed_cases: closed.len(),
        trend_month: key_counts(by_month),
        trend_week: key_counts(by_week),
        by_age_class: age::labeled(&age_counts),
        by_gender,
        undated_sessions,
    }
}

/// BTreeMap iteration yields declaration order; the stable sort keeps it for ties.
fn sort_method_counts(counts: BTreeMap<Method, usize>) -> Vec<MethodCount> {
    let mut out: Vec<MethodCount> = counts
        .into_iter()
        .map(|(method, count)| MethodCount { method, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

fn key_counts(counts: BTreeMap<String, usize>) -> Vec<KeyCount> {
    counts
        .into_iter()
        .map(|(key, count)| KeyCount { key, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notizia_testing::fixtures::RowBuilder;
    use notizia_types::CaseStatus;

    #[test]
    fn test_empty_rows() {
        let result = run_analytics(&[]);
        assert_eq!(result.total_sessions, 0);
        assert!(result.sessions_by_method.is_empty());
        assert_eq!(result.dur, Stat::empty());
        assert_eq!(result.closed_cases, 0);
        assert_eq!(result.by_age_class.len(), 5);
        assert!(result.by_age_class.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_method_ties_follow_declaration_order() {
        let rows = vec![
            RowBuilder::new(1).method(Method::Other).build(),
            RowBuilder::new(2).method(Method::Coaching).build(),
            RowBuilder::new(3).method(Method::Coaching).build(),
            RowBuilder::new(4).method(Method::AufloesendeHypnose).build(),
        ];
        let result = run_analytics(&rows);
        let order: Vec<(Method, usize)> = result
            .sessions_by_method
            .iter()
            .map(|m| (m.method, m.count))
            .collect();
        assert_eq!(
            order,
            vec![
                (Method::Coaching, 2),
                (Method::AufloesendeHypnose, 1),
                (Method::Other, 1),
            ]
        );
    }

    #[test]
    fn test_absent_values_are_excluded_not_zeroed() {
        let rows = vec![
            RowBuilder::new(1).duration(60).sud(8, 3).build(),
            RowBuilder::new(2).build(),
            RowBuilder::new(3).duration(30).sud_before(7).build(),
        ];
        let result = run_analytics(&rows);
        assert_eq!(result.dur.count, 2);
        assert_eq!(result.dur.mean, Some(45.0));
        assert_eq!(result.sud_delta.count, 1);
        assert_eq!(result.sud_delta.median, Some(5.0));
    }

    #[test]
    fn test_closed_cases_are_counted_once() {
        let rows = vec![
            RowBuilder::new(1).case(10).status(CaseStatus::Resolved).build(),
            RowBuilder::new(2).case(10).status(CaseStatus::Resolved).build(),
            RowBuilder::new(3).case(11).status(CaseStatus::Open).build(),
            RowBuilder::new(4).case(12).status(CaseStatus::Dropped).build(),
        ];
        assert_eq!(run_analytics(&rows).closed_cases, 2);
    }

    #[test]
    fn test_undated_rows_skip_trends_only() {
        let rows = vec![
            RowBuilder::new(1).started_at("2025-02-03T10:00:00Z").build(),
            RowBuilder::new(2).started_at("garbage").build(),
        ];
        let result = run_analytics(&rows);
        assert_eq!(result.total_sessions, 2);
        assert_eq!(result.undated_sessions, 1);
        assert_eq!(result.trend_month, vec![KeyCount { key: "2025-02".into(), count: 1 }]);
        assert_eq!(result.trend_week, vec![KeyCount { key: "2025-W06".into(), count: 1 }]);
    }

    #[test]
    fn test_age_classes_and_gender_count_independently() {
        let mut rows: Vec<Row> = [0, 17, 18, 44, 59, 60, 120]
            .into_iter()
            .enumerate()
            .map(|(i, age)| RowBuilder::new(i as i64 + 1).age(age).build())
            .collect();
        rows.push(RowBuilder::new(8).gender(Gender::D).build());

        let result = run_analytics(&rows);
        let counts: Vec<usize> = result.by_age_class.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 1, 2]);
        assert_eq!(result.by_gender, GenderCounts { w: 0, m: 0, d: 1 });
    }
}
