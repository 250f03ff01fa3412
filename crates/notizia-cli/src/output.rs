use anyhow::Result;
use is_terminal::IsTerminal;
use notizia_engine::Stat;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::types::OutputFormat;

/// Renders command results either as pretty JSON or as plain text.
///
/// Plain output is colored only when stdout is a terminal.
pub struct Printer {
    format: OutputFormat,
    color: bool,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: format == OutputFormat::Plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v),
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

pub fn stat_line(stat: &Stat) -> String {
    if stat.count == 0 {
        return "n=0".to_string();
    }
    format!(
        "n={}  mean {}  median {}  min {}  max {}",
        stat.count,
        number(stat.mean),
        number(stat.median),
        number(stat.min),
        number(stat.max)
    )
}
