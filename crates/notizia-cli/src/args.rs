use crate::types::{
    CrosstabArg, ExportFormatArg, GenderArg, LogLevel, MethodArg, OutputFormat, ProblemArg,
    StatusArg,
};
use clap::{Args, Parser, Subcommand};
use notizia_engine::Query;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notizia")]
#[command(about = "Practice journal for clients, cases and sessions, with reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $NOTIZIA_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },

    Case {
        #[command(subcommand)]
        command: CaseCommand,
    },

    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// All sessions with their case and client, newest first
    Sessions,

    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },

    Query {
        #[command(subcommand)]
        command: QueryCommand,
    },

    /// Run the report over a seeded in-memory practice
    Demo,
}

#[derive(Subcommand)]
pub enum ClientCommand {
    Add {
        name: String,

        #[arg(long)]
        gender: Option<GenderArg>,

        #[arg(long)]
        age: Option<u32>,

        /// JSON file with the intake anamnesis
        #[arg(long)]
        anamnesis: Option<PathBuf>,
    },

    List {
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
    },

    /// Change name, gender or age; omitted fields keep their value
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        gender: Option<GenderArg>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        anamnesis: Option<PathBuf>,
    },

    /// Delete a client with all cases and sessions
    Delete { id: i64 },

    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum CaseCommand {
    Add {
        client_id: i64,

        #[arg(long, default_value = "other")]
        problem: ProblemArg,

        #[arg(long, default_value = "")]
        text: String,

        /// ISO 8601 date (default: today)
        #[arg(long)]
        started_at: Option<String>,

        #[arg(long)]
        status: Option<StatusArg>,

        #[arg(long)]
        severity: Option<u8>,
    },

    List { client_id: i64 },

    Status { id: i64, status: StatusArg },

    /// Delete a case with all its sessions
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    Add {
        case_id: i64,

        #[arg(long)]
        method: MethodArg,

        /// ISO 8601 timestamp (default: now)
        #[arg(long)]
        started_at: Option<String>,

        #[arg(long)]
        duration: Option<u32>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        sud_before: Option<u8>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        sud_after: Option<u8>,

        #[arg(long)]
        insights: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    List { case_id: i64 },

    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    Run {
        /// Start from a saved query; explicit filters override its fields
        #[arg(long)]
        saved: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    Crosstab {
        kind: CrosstabArg,

        #[command(flatten)]
        filters: FilterArgs,
    },

    Export {
        #[arg(long = "as", value_name = "FORMAT")]
        as_format: ExportFormatArg,

        #[arg(long)]
        anonymize: bool,

        #[arg(long)]
        closed_only: bool,

        #[arg(long)]
        no_sessions: bool,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Subcommand)]
pub enum QueryCommand {
    Save {
        name: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    List,

    Delete { name: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub gender: Option<GenderArg>,

    #[arg(long)]
    pub method: Option<MethodArg>,

    #[arg(long)]
    pub problem: Option<ProblemArg>,

    #[arg(long)]
    pub age_min: Option<u32>,

    #[arg(long)]
    pub age_max: Option<u32>,

    /// Keep clients with at least this many matching sessions
    #[arg(long = "min-sessions")]
    pub min_sessions: Option<usize>,
}

impl FilterArgs {
    pub fn to_query(&self) -> Query {
        self.apply_to(Query::new())
    }

    /// Overlay the given flags onto `base`.
    pub fn apply_to(&self, mut base: Query) -> Query {
        if let Some(gender) = self.gender {
            base.gender = Some(gender.into());
        }
        if let Some(method) = self.method {
            base.method = Some(method.into());
        }
        if let Some(problem) = self.problem {
            base.problem = Some(problem.into());
        }
        if self.age_min.is_some() {
            base.age_min = self.age_min;
        }
        if self.age_max.is_some() {
            base.age_max = self.age_max;
        }
        if self.min_sessions.is_some() {
            base.min_sessions_per_client = self.min_sessions;
        }
        base
    }
}
