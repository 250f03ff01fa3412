use notizia_types::{Gender, Method, ProblemCategory, Row};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LINE_BREAKS_AND_SEMICOLONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n;]+").expect("valid regex"));

/// Column order of the CSV export.
pub const CSV_HEADER: [&str; 12] = [
    "date",
    "client",
    "gender",
    "age",
    "problem_category",
    "problem_text",
    "case_status",
    "method",
    "duration_min",
    "sud_before",
    "sud_after",
    "sud_delta",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Replace client names with `Client <id>`.
    pub anonymize: bool,
    /// Keep only rows whose case is closed.
    pub closed_only: bool,
    /// Attach the session block to JSON records.
    pub include_sessions: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            anonymize: false,
            closed_only: false,
            include_sessions: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCase {
    pub id: i64,
    pub problem_category: ProblemCategory,
    pub problem_text: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSession {
    pub id: i64,
    pub method: Method,
    pub duration_min: Option<u32>,
    pub sud_before: Option<u8>,
    pub sud_after: Option<u8>,
}

/// One exported session, flattened for sharing outside the practice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub date: String,
    pub client: String,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub case: ExportCase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<ExportSession>,
    /// Always populated so CSV output keeps its columns.
    #[serde(skip)]
    pub method: Method,
    #[serde(skip)]
    pub duration_min: Option<u32>,
    #[serde(skip)]
    pub sud_before: Option<u8>,
    #[serde(skip)]
    pub sud_after: Option<u8>,
    #[serde(skip)]
    pub sud_delta: Option<i32>,
}

impl ExportRecord {
    /// Field values in [`CSV_HEADER`] order; absent values are empty.
    pub fn csv_fields(&self) -> Vec<String> {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }

        vec![
            self.date.clone(),
            self.client.clone(),
            opt(self.gender),
            opt(self.age),
            self.case.problem_category.to_string(),
            self.case.problem_text.clone(),
            self.case.status.clone(),
            self.method.to_string(),
            opt(self.duration_min),
            opt(self.sud_before),
            opt(self.sud_after),
            opt(self.sud_delta),
        ]
    }
}

pub fn export_records(rows: &[Row], options: &ExportOptions) -> Vec<ExportRecord> {
    rows.iter()
        .filter(|row| !options.closed_only || row.case.is_closed())
        .map(|row| {
            let client = if options.anonymize {
                format!("Client {}", row.client.id)
            } else {
                row.client.name.clone()
            };
            let session = &row.session;

            ExportRecord {
                date: session.started_at.clone(),
                client,
                gender: row.client.gender,
                age: row.client.age,
                case: ExportCase {
                    id: row.case.id,
                    problem_category: row.case.problem_category,
                    problem_text: sanitize_text(&row.case.problem_text),
                    status: row.case.status.to_string(),
                },
                session: options.include_sessions.then(|| ExportSession {
                    id: session.id,
                    method: session.method,
                    duration_min: session.duration_min,
                    sud_before: session.sud_before,
                    sud_after: session.sud_after,
                }),
                method: session.method,
                duration_min: session.duration_min,
                sud_before: session.sud_before,
                sud_after: session.sud_after,
                sud_delta: session.sud_delta(),
            }
        })
        .collect()
}

/// Collapse line breaks and semicolons so a value fits one CSV cell.
pub fn sanitize_text(text: &str) -> String {
    LINE_BREAKS_AND_SEMICOLONS
        .replace_all(text, " ")
        .trim()
        .to_string()
}
