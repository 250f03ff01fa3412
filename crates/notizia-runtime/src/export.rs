use notizia_engine::ExportRecord;
use notizia_engine::export::CSV_HEADER;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File name offered when the caller does not pick one.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "notizia_export.csv",
            ExportFormat::Json => "notizia_export.json",
        }
    }
}

/// Semicolon-separated, one header line, one line per record.
pub fn write_csv<W: Write>(records: &[ExportRecord], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for record in records {
        csv.write_record(record.csv_fields())?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed JSON array.
pub fn write_json<W: Write>(records: &[ExportRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub fn write_records<W: Write>(format: ExportFormat, records: &[ExportRecord], writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(records, writer),
        ExportFormat::Json => write_json(records, writer),
    }
}
