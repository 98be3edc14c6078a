//! Schema command - print expected input formats

use super::batch::ScenarioRow;
use crate::core::{AttorneyFirm, Jurisdiction, LoanProgram, LoanRequest};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a loan request
    JsonSchema,
    /// CSV header row for batch input
    CsvHeader,
    /// Batch CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(LoanRequest);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", ScenarioRow::csv_header());
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Batch CSV Input Format");
        println!("======================");
        println!();
        for column in ScenarioRow::csv_columns() {
            let req = if column.required { "required" } else { "optional" };
            println!("{:20} ({:8})  {}", column.name, req, column.description);
        }
        println!();
        println!("Accepted values:");
        println!("  program       {}", join_names(LoanProgram::ALL.map(kebab)));
        println!("  jurisdiction  {}", join_names(Jurisdiction::ALL.map(kebab)));
        println!("  attorney      {}", join_names(AttorneyFirm::ALL.map(kebab)));
        Ok(())
    }
}

/// Serialized (kebab-case) name of an enum value
fn kebab<T: serde::Serialize>(value: T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn join_names<const N: usize>(names: [String; N]) -> String {
    names.join(", ")
}
