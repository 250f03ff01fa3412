use notizia_types::{Gender, Method, ProblemCategory, Row};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Selection criteria for a report. `None` leaves a dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<ProblemCategory>,
    /// Inclusive lower age bound; excludes clients of unknown age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u32>,
    /// Inclusive upper age bound; excludes clients of unknown age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u32>,
    /// Counted over the rows left after every other criterion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sessions_per_client: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn problem(mut self, problem: ProblemCategory) -> Self {
        self.problem = Some(problem);
        self
    }

    pub fn age_min(mut self, age: u32) -> Self {
        self.age_min = Some(age);
        self
    }

    pub fn age_max(mut self, age: u32) -> Self {
        self.age_max = Some(age);
        self
    }

    pub fn min_sessions_per_client(mut self, count: usize) -> Self {
        self.min_sessions_per_client = Some(count);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Row-local criteria, i.e. everything except the per-client threshold.
    pub fn matches(&self, row: &Row) -> bool {
        if self.gender.is_some_and(|g| row.client.gender != Some(g)) {
            return false;
        }
        if self.method.is_some_and(|m| row.session.method != m) {
            return false;
        }
        if self.problem.is_some_and(|p| row.case.problem_category != p) {
            return false;
        }
        if let Some(min) = self.age_min
            && !row.client.age.is_some_and(|age| age >= min)
        {
            return false;
        }
        if let Some(max) = self.age_max
            && !row.client.age.is_some_and(|age| age <= max)
        {
            return false;
        }
        true
    }
}

/// Order-preserving selection of the rows matching `query`.
pub fn filter_rows(rows: &[Row], query: &Query) -> Vec<Row> {
    let matched: Vec<&Row> = rows.iter().filter(|row| query.matches(row)).collect();

    let Some(threshold) = query.min_sessions_per_client else {
        return matched.into_iter().cloned().collect();
    };

    let mut per_client: HashMap<i64, usize> = HashMap::new();
    for row in &matched {
        *per_client.entry(row.client.id).or_insert(0) += 1;
    }
    let qualifying: HashSet<i64> = per_client
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(id, _)| id)
        .collect();

    matched
        .into_iter()
        .filter(|row| qualifying.contains(&row.client.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notizia_testing::fixtures::RowBuilder;

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r.session.id).collect()
    }

    fn sample() -> Vec<Row> {
        vec![
            RowBuilder::new(1).client(1).gender(Gender::W).age(34).method(Method::Coaching).build(),
            RowBuilder::new(2).client(2).gender(Gender::M).age(17).method(Method::Other).build(),
            RowBuilder::new(3).client(3).method(Method::Coaching).build(),
            RowBuilder::new(4)
                .client(1)
                .gender(Gender::W)
                .age(34)
                .method(Method::KlassischeHypnose)
                .problem(ProblemCategory::Panic)
                .build(),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let rows = sample();
        assert!(Query::new().is_empty());
        assert_eq!(ids(&filter_rows(&rows, &Query::new())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_exact_matches() {
        let rows = sample();
        assert_eq!(ids(&filter_rows(&rows, &Query::new().method(Method::Coaching))), vec![1, 3]);
        assert_eq!(ids(&filter_rows(&rows, &Query::new().gender(Gender::W))), vec![1, 4]);
        assert_eq!(
            ids(&filter_rows(&rows, &Query::new().problem(ProblemCategory::Panic))),
            vec![4]
        );
    }

    #[test]
    fn test_age_bounds_exclude_unknown_age() {
        let rows = sample();
        assert_eq!(ids(&filter_rows(&rows, &Query::new().age_min(0))), vec![1, 2, 4]);
        assert_eq!(ids(&filter_rows(&rows, &Query::new().age_max(17))), vec![2]);
        assert_eq!(
            ids(&filter_rows(&rows, &Query::new().age_min(18).age_max(40))),
            vec![1, 4]
        );
    }

    #[test]
    fn test_single_field_queries_intersect_to_combined_query() {
        let rows = sample();
        let by_gender = ids(&filter_rows(&rows, &Query::new().gender(Gender::W)));
        let by_method = ids(&filter_rows(&rows, &Query::new().method(Method::Coaching)));
        let intersection: Vec<i64> = by_gender.into_iter().filter(|id| by_method.contains(id)).collect();

        let combined = ids(&filter_rows(
            &rows,
            &Query::new().gender(Gender::W).method(Method::Coaching),
        ));
        assert_eq!(combined, intersection);
    }

    #[test]
    fn test_min_sessions_counts_after_other_filters() {
        let rows = vec![
            RowBuilder::new(1).client(1).method(Method::Coaching).build(),
            RowBuilder::new(2).client(1).method(Method::Other).build(),
            RowBuilder::new(3).client(1).method(Method::Coaching).build(),
            RowBuilder::new(4).client(2).method(Method::Coaching).build(),
        ];

        let query = Query::new().method(Method::Coaching).min_sessions_per_client(2);
        assert_eq!(ids(&filter_rows(&rows, &query)), vec![1, 3]);

        // Client 1 has three sessions overall but only two coaching ones.
        let query = Query::new().method(Method::Coaching).min_sessions_per_client(3);
        assert!(filter_rows(&rows, &query).is_empty());
    }

    #[test]
    fn test_query_serializes_only_present_fields() {
        let query = Query::new().gender(Gender::D).age_min(30);
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"gender":"d","age_min":30}"#);
    }
}
