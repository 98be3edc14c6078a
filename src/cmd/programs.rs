//! Programs command - loan programs and their limits

use crate::core::{format_percent, format_usd, EngineConfig, LoanProgram};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ProgramsCommand {
    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ProgramRow {
    #[tabled(rename = "Program")]
    #[serde(skip)]
    name: String,
    #[tabled(skip)]
    program: LoanProgram,
    #[tabled(rename = "Min Down")]
    min_down_pct: String,
    #[tabled(rename = "Presets")]
    presets: String,
    #[tabled(rename = "Base Loan Ceiling")]
    ceiling: String,
    #[tabled(rename = "Financed Fee")]
    financed_fee: String,
}

fn program_rows(config: &EngineConfig) -> Vec<ProgramRow> {
    LoanProgram::ALL
        .iter()
        .map(|&program| ProgramRow {
            name: program.display().to_string(),
            program,
            min_down_pct: format_percent(config.min_down_percent(program)),
            presets: program
                .preset_down_percents()
                .iter()
                .map(|&p| format_percent(p))
                .collect::<Vec<_>>()
                .join(" / "),
            ceiling: format_usd(config.loan_limits.ceiling(program)),
            financed_fee: financed_fee_summary(program),
        })
        .collect()
}

/// Financed fee at the lowest offered down payment
fn financed_fee_summary(program: LoanProgram) -> String {
    let lowest = program
        .preset_down_percents()
        .first()
        .copied()
        .unwrap_or(Decimal::ZERO);
    match program.financed_fee_rate(lowest) {
        Some((kind, rate)) => format!(
            "{} {}",
            kind.display(),
            format_percent(rate * Decimal::ONE_HUNDRED)
        ),
        None => "-".to_string(),
    }
}

impl ProgramsCommand {
    pub fn exec(&self, config: &EngineConfig) -> anyhow::Result<()> {
        let rows = program_rows(config);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
                .to_string();
            println!("{}", table);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lists_every_program() {
        let rows = program_rows(&EngineConfig::default());
        assert_eq!(rows.len(), LoanProgram::ALL.len());
        assert_eq!(rows[0].min_down_pct, "3%");
        assert_eq!(rows[1].min_down_pct, "3.5%");
        assert_eq!(rows[1].presets, "3.5% / 5%");
        assert_eq!(rows[1].ceiling, "$524,225.00");
        assert_eq!(rows[1].financed_fee, "FHA Upfront MIP 1.75%");
        assert_eq!(rows[2].financed_fee, "VA Funding Fee 2.15%");
        assert_eq!(rows[3].financed_fee, "VA Funding Fee 3.3%");
        assert_eq!(rows[4].financed_fee, "-");
    }

    #[test]
    fn reflects_configured_minimum() {
        let config = EngineConfig {
            conventional_min_down_percent: dec!(5),
            ..EngineConfig::default()
        };
        assert_eq!(program_rows(&config)[0].min_down_pct, "5%");
    }
}
