use anyhow::{Context, Result};
use notizia_runtime::Practice;
use notizia_types::{
    Anamnesis, Case, Client, NewClient, client_label, filter_and_sort_clients, truncate,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::output::{Printer, opt};
use crate::types::GenderArg;

#[derive(Serialize)]
struct CaseSummary {
    #[serde(flatten)]
    case: Case,
    sessions: usize,
}

#[derive(Serialize)]
struct ClientDetail {
    #[serde(flatten)]
    client: Client,
    cases: Vec<CaseSummary>,
}

fn read_anamnesis(path: &Path) -> Result<Anamnesis> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read anamnesis file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid anamnesis JSON in {}", path.display()))
}

pub fn add(
    practice: &mut Practice,
    name: String,
    gender: Option<GenderArg>,
    age: Option<u32>,
    anamnesis: Option<PathBuf>,
    printer: &Printer,
) -> Result<()> {
    let new_client = NewClient {
        name,
        gender: gender.map(Into::into),
        age,
        anamnesis: anamnesis.as_deref().map(read_anamnesis).transpose()?,
    };
    let client = practice.store_mut().add_client(new_client)?;

    if printer.is_json() {
        return printer.json(&client);
    }
    println!("{} {} (#{})", printer.success("Added client"), client.name, client.id);
    Ok(())
}

pub fn list(practice: &Practice, search: Option<String>, printer: &Printer) -> Result<()> {
    let clients = practice.store().list_clients()?;
    let clients = filter_and_sort_clients(&clients, search.as_deref().unwrap_or_default());

    if printer.is_json() {
        return printer.json(&clients);
    }
    if clients.is_empty() {
        println!("No clients found.");
        return Ok(());
    }

    println!(
        "{}",
        printer.heading(&format!(
            "{:>5}  {:<28} {:<6} {:>4}",
            "ID", "NAME", "GENDER", "AGE"
        ))
    );
    for client in &clients {
        println!(
            "{:>5}  {:<28} {:<6} {:>4}",
            client.id,
            truncate(&client.name, 28),
            opt(client.gender),
            opt(client.age)
        );
    }
    Ok(())
}

pub fn update(
    practice: &mut Practice,
    id: i64,
    name: Option<String>,
    gender: Option<GenderArg>,
    age: Option<u32>,
    anamnesis: Option<PathBuf>,
    printer: &Printer,
) -> Result<()> {
    let existing = practice
        .store()
        .get_client(id)?
        .ok_or_else(|| anyhow::anyhow!("client #{} not found", id))?;

    let new_client = NewClient {
        name: name.unwrap_or(existing.name),
        gender: gender.map(Into::into).or(existing.gender),
        age: age.or(existing.age),
        anamnesis: match anamnesis {
            Some(path) => Some(read_anamnesis(&path)?),
            None => existing.anamnesis,
        },
    };
    let client = practice.store_mut().update_client(id, new_client)?;

    if printer.is_json() {
        return printer.json(&client);
    }
    println!("{} {} (#{})", printer.success("Updated client"), client.name, client.id);
    Ok(())
}

pub fn delete(practice: &mut Practice, id: i64, printer: &Printer) -> Result<()> {
    let clients = practice.store().list_clients()?;
    let label = client_label(&clients, id);
    let cases = practice.store().list_cases(id)?.len();

    practice.store_mut().delete_client(id)?;

    if printer.is_json() {
        return printer.json(&serde_json::json!({ "deleted": id, "cases": cases }));
    }
    println!("{} {} with {} case(s)", printer.success("Deleted"), label, cases);
    Ok(())
}

pub fn show(practice: &Practice, id: i64, printer: &Printer) -> Result<()> {
    let client = practice
        .store()
        .get_client(id)?
        .ok_or_else(|| anyhow::anyhow!("client #{} not found", id))?;

    let mut cases = Vec::new();
    for case in practice.store().list_cases(id)? {
        let sessions = practice.store().list_sessions(case.id)?.len();
        cases.push(CaseSummary { case, sessions });
    }
    let detail = ClientDetail { client, cases };

    if printer.is_json() {
        return printer.json(&detail);
    }

    let client = &detail.client;
    println!("{}", printer.heading(&format!("{} (#{})", client.name, client.id)));
    println!("  Gender: {}", opt(client.gender));
    println!("  Age:    {}", opt(client.age));

    if let Some(anamnesis) = &client.anamnesis {
        if !anamnesis.previous_therapies.is_empty() {
            let therapies: Vec<&str> = anamnesis
                .previous_therapies
                .iter()
                .map(|t| t.kind.as_str())
                .collect();
            println!("  Previous therapies: {}", therapies.join(", "));
        }
        if !anamnesis.medications.is_empty() {
            let medications: Vec<&str> =
                anamnesis.medications.iter().map(|m| m.name.as_str()).collect();
            println!("  Medications: {}", medications.join(", "));
        }
        if let Some(method) = anamnesis.planned_method {
            println!("  Planned method: {}", method.label());
        }
    }

    println!();
    if detail.cases.is_empty() {
        println!("{}", printer.dim("No cases yet."));
        return Ok(());
    }
    println!("{}", printer.heading("Cases"));
    for summary in &detail.cases {
        let case = &summary.case;
        println!(
            "  #{:<4} {:<10} {:<22} {:<9} {} session(s)  {}",
            case.id,
            case.started_at.get(..10).unwrap_or(case.started_at.as_str()),
            case.problem_category.label(),
            case.status.as_str(),
            summary.sessions,
            printer.dim(&truncate(&case.problem_text, 40))
        );
    }
    Ok(())
}
