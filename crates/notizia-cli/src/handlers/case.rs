use anyhow::Result;
use notizia_runtime::Practice;
use notizia_types::{CasePatch, NewCase, truncate};

use super::checked_started_at;
use crate::output::{Printer, opt};
use crate::types::{ProblemArg, StatusArg};

pub struct AddCase {
    pub client_id: i64,
    pub problem: ProblemArg,
    pub text: String,
    pub started_at: Option<String>,
    pub status: Option<StatusArg>,
    pub severity: Option<u8>,
}

pub fn add(practice: &mut Practice, args: AddCase, printer: &Printer) -> Result<()> {
    let started_at = match args.started_at {
        Some(raw) => checked_started_at(raw)?,
        None => chrono::Local::now().date_naive().to_string(),
    };

    let case = practice.store_mut().add_case(NewCase {
        client_id: args.client_id,
        problem_category: args.problem.into(),
        problem_text: args.text.trim().to_string(),
        started_at,
        status: args.status.map(Into::into),
        severity: args.severity,
    })?;

    if printer.is_json() {
        return printer.json(&case);
    }
    println!(
        "{} #{} ({}) for client #{}",
        printer.success("Added case"),
        case.id,
        case.problem_category.label(),
        case.client_id
    );
    Ok(())
}

pub fn list(practice: &Practice, client_id: i64, printer: &Printer) -> Result<()> {
    let cases = practice.store().list_cases(client_id)?;

    if printer.is_json() {
        return printer.json(&cases);
    }
    if cases.is_empty() {
        println!("No cases for client #{}.", client_id);
        return Ok(());
    }

    println!(
        "{}",
        printer.heading(&format!(
            "{:>5}  {:<10} {:<22} {:<9} {:>8}  {}",
            "ID", "STARTED", "PROBLEM", "STATUS", "SEVERITY", "TEXT"
        ))
    );
    for case in &cases {
        println!(
            "{:>5}  {:<10} {:<22} {:<9} {:>8}  {}",
            case.id,
            case.started_at.get(..10).unwrap_or(case.started_at.as_str()),
            case.problem_category.label(),
            case.status.as_str(),
            opt(case.severity),
            truncate(&case.problem_text, 40)
        );
    }
    Ok(())
}

pub fn set_status(
    practice: &mut Practice,
    id: i64,
    status: StatusArg,
    printer: &Printer,
) -> Result<()> {
    let case = practice
        .store_mut()
        .update_case(CasePatch::status(id, status.into()))?;

    if printer.is_json() {
        return printer.json(&case);
    }
    println!("{} #{} is now {}", printer.success("Case"), case.id, case.status);
    Ok(())
}

pub fn delete(practice: &mut Practice, id: i64, printer: &Printer) -> Result<()> {
    let sessions = practice.store().list_sessions(id)?.len();
    practice.store_mut().delete_case(id)?;

    if printer.is_json() {
        return printer.json(&serde_json::json!({ "deleted": id, "sessions": sessions }));
    }
    println!(
        "{} case #{} with {} session(s)",
        printer.success("Deleted"),
        id,
        sessions
    );
    Ok(())
}
