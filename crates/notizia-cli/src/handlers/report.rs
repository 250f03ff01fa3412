use anyhow::{Context, Result};
use notizia_engine::{AnalyticsResult, Query};
use notizia_runtime::{Crosstab, Practice, Report};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::args::FilterArgs;
use crate::output::{Printer, stat_line};
use crate::types::{CrosstabArg, ExportFormatArg};

pub fn run(
    practice: &Practice,
    saved: Option<String>,
    filters: &FilterArgs,
    printer: &Printer,
) -> Result<()> {
    let base = match saved.as_deref() {
        Some(name) => practice.saved_query(name)?,
        None => Query::new(),
    };
    let query = filters.apply_to(base);
    let report = practice.report(&query)?;

    if printer.is_json() {
        return printer.json(&report);
    }
    print_report(&report, printer);
    Ok(())
}

fn describe_query(query: &Query) -> String {
    if query.is_empty() {
        return "all sessions".to_string();
    }

    let mut parts = Vec::new();
    if let Some(gender) = query.gender {
        parts.push(format!("gender={}", gender));
    }
    if let Some(method) = query.method {
        parts.push(format!("method={}", method));
    }
    if let Some(problem) = query.problem {
        parts.push(format!("problem={}", problem));
    }
    if let Some(age_min) = query.age_min {
        parts.push(format!("age>={}", age_min));
    }
    if let Some(age_max) = query.age_max {
        parts.push(format!("age<={}", age_max));
    }
    if let Some(min) = query.min_sessions_per_client {
        parts.push(format!("sessions/client>={}", min));
    }
    parts.join(", ")
}

pub fn print_report(report: &Report, printer: &Printer) {
    let result: &AnalyticsResult = &report.result;

    println!(
        "{} {}",
        printer.heading("Report"),
        printer.dim(&format!("({})", describe_query(&report.query)))
    );
    println!("  Sessions:      {}", result.total_sessions);
    println!("  Closed cases:  {}", result.closed_cases);
    println!("  Duration min:  {}", stat_line(&result.dur));
    println!("  SUD delta:     {}", stat_line(&result.sud_delta));

    if result.total_sessions == 0 {
        return;
    }

    println!();
    println!("{}", printer.heading("Sessions by method"));
    for entry in &result.sessions_by_method {
        println!("  {:<20} {:>5}", entry.method.label(), entry.count);
    }

    println!();
    println!("{}", printer.heading("Gender"));
    println!(
        "  w {:>5}   m {:>5}   d {:>5}",
        result.by_gender.w, result.by_gender.m, result.by_gender.d
    );

    println!();
    println!("{}", printer.heading("Age classes"));
    for class in &result.by_age_class {
        println!("  {:<8} {:>5}", class.label, class.count);
    }

    println!();
    println!("{}", printer.heading("Monthly trend"));
    for entry in &result.trend_month {
        println!("  {:<9} {:>5}", entry.key, entry.count);
    }

    println!();
    println!("{}", printer.heading("Weekly trend"));
    for entry in &result.trend_week {
        println!("  {:<9} {:>5}", entry.key, entry.count);
    }

    if result.undated_sessions > 0 {
        println!();
        println!(
            "{}",
            printer.dim(&format!(
                "{} session(s) without a readable date are left out of the trends",
                result.undated_sessions
            ))
        );
    }
}

pub fn crosstab(
    practice: &Practice,
    kind: CrosstabArg,
    filters: &FilterArgs,
    printer: &Printer,
) -> Result<()> {
    let table = practice.crosstab(kind.into(), &filters.to_query())?;

    if printer.is_json() {
        return printer.json(&table);
    }
    print_crosstab(&table, printer);
    Ok(())
}

fn print_crosstab(table: &Crosstab, printer: &Printer) {
    match table {
        Crosstab::Problems(counts) => {
            println!("{}", printer.heading(&format!("{:<22} {:>6}", "PROBLEM", "COUNT")));
            for entry in counts {
                println!("{:<22} {:>6}", entry.problem.label(), entry.count);
            }
        }
        Crosstab::Gender(groups) => {
            println!(
                "{}",
                printer.heading(&format!(
                    "{:<22} {:>5} {:>5} {:>5} {:>5}",
                    "GROUP", "W", "M", "D", "?"
                ))
            );
            for group in groups {
                println!(
                    "{:<22} {:>5} {:>5} {:>5} {:>5}",
                    group.group, group.w, group.m, group.d, group.unknown
                );
            }
        }
        Crosstab::Age(groups) => {
            for group in groups {
                println!("{}", printer.heading(&group.group));
                for bucket in &group.buckets {
                    println!("  {:<10} {:>5}", bucket.label, bucket.count);
                }
            }
        }
        Crosstab::ProblemMethodAverages(rows) => {
            println!(
                "{}",
                printer.heading(&format!(
                    "{:<22} {:<20} {:>6} {:>6} {:>8}",
                    "PROBLEM", "METHOD", "AVG", "CASES", "SESSIONS"
                ))
            );
            for row in rows {
                println!(
                    "{:<22} {:<20} {:>6.2} {:>6} {:>8}",
                    row.problem.label(),
                    row.method.label(),
                    row.avg,
                    row.cases,
                    row.sessions
                );
            }
        }
        Crosstab::MethodAverages(rows) => {
            println!(
                "{}",
                printer.heading(&format!(
                    "{:<20} {:>6} {:>6} {:>8}",
                    "METHOD", "AVG", "CASES", "SESSIONS"
                ))
            );
            for row in rows {
                println!(
                    "{:<20} {:>6.2} {:>6} {:>8}",
                    row.method.label(),
                    row.avg,
                    row.cases,
                    row.sessions
                );
            }
        }
    }
}

pub struct ExportArgs {
    pub format: ExportFormatArg,
    pub anonymize: bool,
    pub closed_only: bool,
    pub no_sessions: bool,
    pub output: Option<PathBuf>,
}

pub fn export(
    practice: &Practice,
    args: ExportArgs,
    filters: &FilterArgs,
    printer: &Printer,
) -> Result<()> {
    let defaults = practice.config().export_options();
    let mut options = defaults;
    options.anonymize = defaults.anonymize || args.anonymize;
    options.closed_only = args.closed_only;
    options.include_sessions = defaults.include_sessions && !args.no_sessions;

    let query = filters.to_query();

    let Some(path) = args.output else {
        let stdout = std::io::stdout();
        practice.export(args.format.into(), &options, &query, stdout.lock())?;
        return Ok(());
    };

    let file = File::create(&path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let records = practice.export(args.format.into(), &options, &query, &mut writer)?;
    writer.flush()?;

    if printer.is_json() {
        return printer.json(&serde_json::json!({
            "records": records,
            "path": path.display().to_string(),
        }));
    }
    println!(
        "{} {} record(s) to {}",
        printer.success("Exported"),
        records,
        path.display()
    );
    Ok(())
}
