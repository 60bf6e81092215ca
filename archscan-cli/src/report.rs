use crate::filter::BinaryTypeFilter;
use archscan_core::{BinaryType, Classification};
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::io::{self, Write};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One sentence per file
    Text,
    /// Aligned table
    Table,
    /// JSON array
    Json,
}

#[derive(Serialize, Tabled)]
struct Row {
    #[tabled(rename = "Path")]
    path: String,
    #[serde(rename = "type")]
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Classification> for Row {
    fn from(c: &Classification) -> Self {
        Row {
            path: c.path.display().to_string(),
            kind: c.binary_type.name(),
            description: c.binary_type.to_string(),
        }
    }
}

pub struct Report {
    pub format: Format,
    pub verbose: bool,
    pub filter: BinaryTypeFilter,
}

impl Report {
    pub fn write<W: Write>(&self, out: &mut W, results: &[Classification]) -> io::Result<()> {
        let shown = results.iter().filter(|c| self.filter.matches(c.binary_type));

        match self.format {
            Format::Text => {
                writeln!(out, "Found {} executables in total. Checking...", results.len())?;
                for c in shown {
                    writeln!(out, "{}", self.line(c))?;
                }
                writeln!(out, "Done!")?;
            }
            Format::Table => {
                let rows: Vec<Row> = shown.map(Row::from).collect();
                if rows.is_empty() {
                    writeln!(out, "No matching executables found.")?;
                } else {
                    writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
                }
            }
            Format::Json => {
                let rows: Vec<Row> = shown.map(Row::from).collect();
                serde_json::to_writer_pretty(&mut *out, &rows)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn line(&self, c: &Classification) -> String {
        let verb = match c.binary_type {
            BinaryType::Unknown => "",
            _ => "is a ",
        };
        let mut line = format!("Assembly {} {verb}{}", c.path.display(), paint(c.binary_type));
        if self.verbose {
            line.push_str(&format!(" ({})", c.binary_type.name()));
        }
        line
    }
}

fn paint(binary_type: BinaryType) -> ColoredString {
    let text = binary_type.to_string();
    if binary_type.is_managed() {
        text.green()
    } else if binary_type == BinaryType::Unknown {
        text.red()
    } else {
        text.yellow()
    }
}
