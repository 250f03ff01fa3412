use anyhow::Result;
use notizia_runtime::Practice;

use crate::args::FilterArgs;
use crate::output::{Printer, opt};

pub fn save(practice: &Practice, name: &str, filters: &FilterArgs, printer: &Printer) -> Result<()> {
    let mut queries = practice.saved_queries()?;
    let saved = queries.save(name, filters.to_query())?.clone();
    practice.store_saved_queries(&queries)?;

    if printer.is_json() {
        return printer.json(&saved);
    }
    println!("{} '{}'", printer.success("Saved query"), saved.name);
    Ok(())
}

pub fn list(practice: &Practice, printer: &Printer) -> Result<()> {
    let queries = practice.saved_queries()?;

    if printer.is_json() {
        return printer.json(queries.list());
    }
    if queries.list().is_empty() {
        println!("No saved queries.");
        return Ok(());
    }

    println!(
        "{}",
        printer.heading(&format!(
            "{:<20} {:<6} {:<20} {:<14} {:>4} {:>4} {:>4}",
            "NAME", "GENDER", "METHOD", "PROBLEM", "AGE≥", "AGE≤", "MIN"
        ))
    );
    for saved in queries.list() {
        let query = &saved.query;
        println!(
            "{:<20} {:<6} {:<20} {:<14} {:>4} {:>4} {:>4}",
            saved.name,
            opt(query.gender),
            opt(query.method),
            opt(query.problem),
            opt(query.age_min),
            opt(query.age_max),
            opt(query.min_sessions_per_client)
        );
    }
    Ok(())
}

pub fn delete(practice: &Practice, name: &str, printer: &Printer) -> Result<()> {
    let mut queries = practice.saved_queries()?;
    if !queries.remove(name) {
        anyhow::bail!("no saved query named '{}'", name);
    }
    practice.store_saved_queries(&queries)?;

    if printer.is_json() {
        return printer.json(&serde_json::json!({ "deleted": name }));
    }
    println!("{} '{}'", printer.success("Deleted query"), name);
    Ok(())
}
