use anyhow::Result;
use chrono::SecondsFormat;
use notizia_runtime::Practice;
use notizia_types::{NewSession, Session, truncate};

use super::checked_started_at;
use crate::output::{Printer, opt};
use crate::types::MethodArg;

pub struct AddSession {
    pub case_id: i64,
    pub method: MethodArg,
    pub started_at: Option<String>,
    pub duration: Option<u32>,
    pub sud_before: Option<u8>,
    pub sud_after: Option<u8>,
    pub insights: Option<String>,
    pub notes: Option<String>,
}

pub fn add(practice: &mut Practice, args: AddSession, printer: &Printer) -> Result<()> {
    let started_at = match args.started_at {
        Some(raw) => checked_started_at(raw)?,
        None => chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
    };

    let mut new_session = NewSession::new(args.case_id, started_at, args.method.into());
    new_session.duration_min = args.duration;
    new_session.sud_before = args.sud_before;
    new_session.sud_after = args.sud_after;
    new_session.insights = args.insights;
    new_session.notes = args.notes;

    let session = practice.store_mut().add_session(new_session)?;

    if printer.is_json() {
        return printer.json(&session);
    }
    println!(
        "{} #{} ({}) to case #{}",
        printer.success("Added session"),
        session.id,
        session.method.label(),
        session.case_id
    );
    Ok(())
}

fn sud(session: &Session) -> String {
    match (session.sud_before, session.sud_after) {
        (None, None) => "-".to_string(),
        (before, after) => format!("{} → {}", opt(before), opt(after)),
    }
}

pub fn list(practice: &Practice, case_id: i64, printer: &Printer) -> Result<()> {
    let sessions = practice.store().list_sessions(case_id)?;

    if printer.is_json() {
        return printer.json(&sessions);
    }
    if sessions.is_empty() {
        println!("No sessions for case #{}.", case_id);
        return Ok(());
    }

    println!(
        "{}",
        printer.heading(&format!(
            "{:>5}  {:<25} {:<20} {:>5}  {:<9} {}",
            "ID", "STARTED", "METHOD", "MIN", "SUD", "NOTES"
        ))
    );
    for session in &sessions {
        println!(
            "{:>5}  {:<25} {:<20} {:>5}  {:<9} {}",
            session.id,
            session.started_at,
            session.method.label(),
            opt(session.duration_min),
            sud(session),
            truncate(session.notes.as_deref().unwrap_or_default(), 40)
        );
    }
    Ok(())
}

pub fn delete(practice: &mut Practice, id: i64, printer: &Printer) -> Result<()> {
    practice.store_mut().delete_session(id)?;

    if printer.is_json() {
        return printer.json(&serde_json::json!({ "deleted": id }));
    }
    println!("{} session #{}", printer.success("Deleted"), id);
    Ok(())
}

/// Every session across all clients, newest first.
pub fn list_all(practice: &Practice, printer: &Printer) -> Result<()> {
    let rows = practice.store().list_all_sessions_expanded()?;

    if printer.is_json() {
        return printer.json(&rows);
    }
    if rows.is_empty() {
        println!("No sessions recorded.");
        return Ok(());
    }

    println!(
        "{}",
        printer.heading(&format!(
            "{:<25} {:<20} {:<22} {:<20} {:>5}  {}",
            "STARTED", "CLIENT", "PROBLEM", "METHOD", "MIN", "SUD"
        ))
    );
    for row in &rows {
        println!(
            "{:<25} {:<20} {:<22} {:<20} {:>5}  {}",
            row.session.started_at,
            truncate(&row.client.name, 20),
            row.case.problem_category.label(),
            row.session.method.label(),
            opt(row.session.duration_min),
            sud(&row.session)
        );
    }
    Ok(())
}
