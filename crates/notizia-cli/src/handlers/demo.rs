use anyhow::Result;
use notizia_engine::Query;
use notizia_runtime::Practice;

use super::report::print_report;
use crate::output::Printer;

pub fn handle(printer: &Printer) -> Result<()> {
    let practice = Practice::demo()?;
    let report = practice.report(&Query::new())?;

    if printer.is_json() {
        return printer.json(&report);
    }
    println!("{}", printer.dim("Demo practice (in memory, nothing is saved)"));
    println!();
    print_report(&report, printer);
    Ok(())
}
