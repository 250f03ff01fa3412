use notizia_engine::{
    AgeBreakdown, AnalyticsResult, ExportOptions, GenderBreakdown, MethodAverage, ProblemCount,
    ProblemMethodAverage, Query, age_by_method, age_by_problem,
    avg_sessions_per_case_by_problem_and_method, avg_sessions_per_closed_case_by_method,
    export_records, filter_rows, gender_by_method, gender_by_problem, problem_distribution,
    run_analytics,
};
use notizia_store::{Database, Storage};
use notizia_types::Row;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE, Config};
use crate::export::{ExportFormat, write_records};
use crate::queries::{QUERIES_FILE, SavedQueries};
use crate::{Error, Result};

/// Report over the rows a query selects.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub query: Query,
    #[serde(skip)]
    pub rows: Vec<Row>,
    pub result: AnalyticsResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosstabKind {
    Problems,
    GenderByProblem,
    GenderByMethod,
    AgeByProblem,
    AgeByMethod,
    AvgByProblemMethod,
    AvgClosedByMethod,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Crosstab {
    Problems(Vec<ProblemCount>),
    Gender(Vec<GenderBreakdown>),
    Age(Vec<AgeBreakdown>),
    ProblemMethodAverages(Vec<ProblemMethodAverage>),
    MethodAverages(Vec<MethodAverage>),
}

impl Crosstab {
    pub fn compute(kind: CrosstabKind, rows: &[Row]) -> Self {
        match kind {
            CrosstabKind::Problems => Crosstab::Problems(problem_distribution(rows)),
            CrosstabKind::GenderByProblem => Crosstab::Gender(gender_by_problem(rows)),
            CrosstabKind::GenderByMethod => Crosstab::Gender(gender_by_method(rows)),
            CrosstabKind::AgeByProblem => Crosstab::Age(age_by_problem(rows)),
            CrosstabKind::AgeByMethod => Crosstab::Age(age_by_method(rows)),
            CrosstabKind::AvgByProblemMethod => {
                Crosstab::ProblemMethodAverages(avg_sessions_per_case_by_problem_and_method(rows))
            }
            CrosstabKind::AvgClosedByMethod => {
                Crosstab::MethodAverages(avg_sessions_per_closed_case_by_method(rows))
            }
        }
    }
}

/// One practice: its records plus the workspace files around them.
pub struct Practice {
    store: Box<dyn Storage>,
    config: Config,
    data_dir: Option<PathBuf>,
}

impl Practice {
    /// Open the workspace at `data_dir`, creating it on first use.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        let config = Config::load_from(&data_dir.join(CONFIG_FILE))?;
        let db_path = config.database_path(data_dir);
        let db = Database::open(&db_path)?;

        tracing::info!(data_dir = %data_dir.display(), db = %db_path.display(), "practice opened");

        Ok(Self {
            store: Box::new(db),
            config,
            data_dir: Some(data_dir.to_path_buf()),
        })
    }

    /// A practice without workspace files; saved queries are unavailable.
    pub fn in_memory(store: impl Storage + 'static) -> Self {
        Self {
            store: Box::new(store),
            config: Config::default(),
            data_dir: None,
        }
    }

    pub fn store(&self) -> &dyn Storage {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn Storage {
        self.store.as_mut()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn rows(&self, query: &Query) -> Result<Vec<Row>> {
        let all = self.store.list_all_sessions_expanded()?;
        let rows = filter_rows(&all, query);
        tracing::debug!(total = all.len(), selected = rows.len(), "rows filtered");
        Ok(rows)
    }

    pub fn report(&self, query: &Query) -> Result<Report> {
        let rows = self.rows(query)?;
        let result = run_analytics(&rows);

        if result.undated_sessions > 0 {
            tracing::warn!(
                count = result.undated_sessions,
                "sessions with unparseable start dates left out of trends"
            );
        }
        tracing::info!(sessions = result.total_sessions, "report computed");

        Ok(Report {
            query: query.clone(),
            rows,
            result,
        })
    }

    pub fn crosstab(&self, kind: CrosstabKind, query: &Query) -> Result<Crosstab> {
        let rows = self.rows(query)?;
        Ok(Crosstab::compute(kind, &rows))
    }

    /// Write the selected rows to `writer`; returns the number of records.
    pub fn export<W: Write>(
        &self,
        format: ExportFormat,
        options: &ExportOptions,
        query: &Query,
        writer: W,
    ) -> Result<usize> {
        let rows = self.rows(query)?;
        let records = export_records(&rows, options);
        write_records(format, &records, writer)?;

        tracing::info!(
            records = records.len(),
            format = ?format,
            anonymize = options.anonymize,
            "export written"
        );
        Ok(records.len())
    }

    fn queries_path(&self) -> Result<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(QUERIES_FILE))
            .ok_or_else(|| {
                Error::InvalidOperation("saved queries need a data directory".to_string())
            })
    }

    pub fn saved_queries(&self) -> Result<SavedQueries> {
        SavedQueries::load_from(&self.queries_path()?)
    }

    pub fn store_saved_queries(&self, queries: &SavedQueries) -> Result<()> {
        queries.save_to(&self.queries_path()?)
    }

    /// Resolve a saved query by name.
    pub fn saved_query(&self, name: &str) -> Result<Query> {
        self.saved_queries()?
            .get(name)
            .map(|saved| saved.query.clone())
            .ok_or_else(|| Error::InvalidOperation(format!("no saved query named '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::seed_demo;
    use notizia_store::MemoryStore;
    use notizia_types::Gender;

    fn demo_practice() -> Practice {
        let mut store = MemoryStore::new();
        seed_demo(&mut store).unwrap();
        Practice::in_memory(store)
    }

    #[test]
    fn test_report_matches_filtered_rows() {
        let practice = demo_practice();
        let query = Query::new().gender(Gender::W);

        let report = practice.report(&query).unwrap();
        assert_eq!(report.result.total_sessions, report.rows.len());
        assert!(report.rows.iter().all(|r| r.client.gender == Some(Gender::W)));
        assert_eq!(report.result.by_gender.m, 0);
    }

    #[test]
    fn test_crosstab_serializes_as_plain_array() {
        let practice = demo_practice();
        let table = practice
            .crosstab(CrosstabKind::Problems, &Query::new())
            .unwrap();

        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert!(json[0]["problem"].is_string());
    }

    #[test]
    fn test_saved_queries_need_a_data_dir() {
        let practice = demo_practice();
        let err = practice.saved_queries().unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
    }
}
