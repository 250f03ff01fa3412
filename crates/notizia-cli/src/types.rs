use clap::ValueEnum;
use notizia_runtime::{CrosstabKind, ExportFormat};
use notizia_types::{CaseStatus, Gender, Method, ProblemCategory};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum GenderArg {
    W,
    M,
    D,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::W => Gender::W,
            GenderArg::M => Gender::M,
            GenderArg::D => Gender::D,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum MethodArg {
    AufloesendeHypnose,
    KlassischeHypnose,
    Coaching,
    Other,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::AufloesendeHypnose => Method::AufloesendeHypnose,
            MethodArg::KlassischeHypnose => Method::KlassischeHypnose,
            MethodArg::Coaching => Method::Coaching,
            MethodArg::Other => Method::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ProblemArg {
    Overweight,
    SocialAnxiety,
    Panic,
    Depression,
    Sleep,
    Pain,
    SelfWorth,
    Relationship,
    Other,
}

impl From<ProblemArg> for ProblemCategory {
    fn from(arg: ProblemArg) -> Self {
        match arg {
            ProblemArg::Overweight => ProblemCategory::Overweight,
            ProblemArg::SocialAnxiety => ProblemCategory::SocialAnxiety,
            ProblemArg::Panic => ProblemCategory::Panic,
            ProblemArg::Depression => ProblemCategory::Depression,
            ProblemArg::Sleep => ProblemCategory::Sleep,
            ProblemArg::Pain => ProblemCategory::Pain,
            ProblemArg::SelfWorth => ProblemCategory::SelfWorth,
            ProblemArg::Relationship => ProblemCategory::Relationship,
            ProblemArg::Other => ProblemCategory::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StatusArg {
    Open,
    Resolved,
    Dropped,
}

impl From<StatusArg> for CaseStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => CaseStatus::Open,
            StatusArg::Resolved => CaseStatus::Resolved,
            StatusArg::Dropped => CaseStatus::Dropped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CrosstabArg {
    Problems,
    GenderByProblem,
    GenderByMethod,
    AgeByProblem,
    AgeByMethod,
    AvgByProblemMethod,
    AvgClosedByMethod,
}

impl From<CrosstabArg> for CrosstabKind {
    fn from(arg: CrosstabArg) -> Self {
        match arg {
            CrosstabArg::Problems => CrosstabKind::Problems,
            CrosstabArg::GenderByProblem => CrosstabKind::GenderByProblem,
            CrosstabArg::GenderByMethod => CrosstabKind::GenderByMethod,
            CrosstabArg::AgeByProblem => CrosstabKind::AgeByProblem,
            CrosstabArg::AgeByMethod => CrosstabKind::AgeByMethod,
            CrosstabArg::AvgByProblemMethod => CrosstabKind::AvgByProblemMethod,
            CrosstabArg::AvgClosedByMethod => CrosstabKind::AvgClosedByMethod,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ExportFormatArg {
    Csv,
    Json,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}
