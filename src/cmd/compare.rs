//! Compare command - one scenario side by side across loan programs

use super::estimate::EstimateView;
use super::ScenarioArgs;
use crate::core::{
    format_percent, format_usd, EngineConfig, EstimateResult, LoanProgram, ProgramEstimate,
    DEFAULT_COMPARISON,
};
use clap::Args;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Programs to compare (repeatable). Defaults to Conventional, FHA and VA First.
    #[arg(short = 'g', long = "program")]
    programs: Vec<LoanProgram>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ComparisonEntry {
    program: LoanProgram,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimate: Option<EstimateView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CompareCommand {
    pub fn exec(&self, config: &EngineConfig) -> anyhow::Result<()> {
        let programs: &[LoanProgram] = if self.programs.is_empty() {
            &DEFAULT_COMPARISON
        } else {
            &self.programs
        };
        // any program will do; compare swaps it per column
        let request = self.scenario.request(programs[0]);
        log::info!("Comparing {} programs in {}", programs.len(), request.jurisdiction);

        let results = super::estimator(config).compare(&request, programs);

        if self.json {
            let entries: Vec<_> = results
                .iter()
                .map(|entry| match &entry.result {
                    Ok(result) => ComparisonEntry {
                        program: entry.program,
                        estimate: Some(EstimateView::from(result)),
                        error: None,
                    },
                    Err(err) => ComparisonEntry {
                        program: entry.program,
                        estimate: None,
                        error: Some(err.to_string()),
                    },
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            print_comparison(&results);
        }
        Ok(())
    }
}

fn print_comparison(results: &[ProgramEstimate]) {
    let priced: Vec<(LoanProgram, &EstimateResult)> = results
        .iter()
        .filter_map(|entry| entry.result.as_ref().ok().map(|r| (entry.program, r)))
        .collect();

    println!();
    println!("PROGRAM COMPARISON");
    println!();

    if !priced.is_empty() {
        println!("{}", comparison_table(&priced));
        println!();
    }

    for entry in results {
        if let Err(err) = &entry.result {
            println!("  {}: {}", entry.program, err);
        }
    }
}

fn comparison_table(priced: &[(LoanProgram, &EstimateResult)]) -> String {
    type Field = fn(&EstimateResult) -> String;
    let fields: [(&str, Field); 10] = [
        ("Down Payment", |r| {
            format!(
                "{} ({})",
                format_usd(r.down_payment),
                format_percent(r.down_payment_percent)
            )
        }),
        ("Base Loan", |r| format_usd(r.loan_base)),
        ("Financed Fee", |r| {
            r.financed_fee
                .map_or("-".to_string(), |fee| format_usd(fee.amount))
        }),
        ("Loan Amount", |r| format_usd(r.loan_amount)),
        ("Principal & Interest", |r| {
            format_usd(r.monthly.principal_interest)
        }),
        ("Mortgage Insurance", |r| {
            format_usd(r.monthly.mortgage_insurance)
        }),
        ("PITI", |r| format_usd(r.piti())),
        ("Closing Costs", |r| format_usd(r.total_closing_costs)),
        ("Prepaids & Escrow", |r| format_usd(r.total_prepaids)),
        ("Cash to Close", |r| format_usd(r.cash_to_close)),
    ];

    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(String::new()).chain(priced.iter().map(|(p, _)| p.to_string())),
    );
    for (label, field) in fields {
        builder.push_record(
            std::iter::once(label.to_string()).chain(priced.iter().map(|(_, r)| field(r))),
        );
    }

    builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DownPayment, Estimator, Jurisdiction, LoanRequest};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn request(price: Decimal) -> LoanRequest {
        LoanRequest {
            sales_price: price,
            program: LoanProgram::Conventional,
            interest_rate_percent: dec!(6.5),
            down_payment: DownPayment::percent(dec!(5)),
            jurisdiction: Jurisdiction::HarrisCountyGa,
            homestead_exemption: true,
            inside_city_limits: true,
            closing_date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            attorney: None,
        }
    }

    #[test]
    fn table_has_a_column_per_priced_program() {
        let results = Estimator::default().compare(&request(dec!(250000)), &DEFAULT_COMPARISON);
        let priced: Vec<_> = results
            .iter()
            .map(|e| (e.program, e.result.as_ref().unwrap()))
            .collect();
        let table = comparison_table(&priced);
        assert!(table.contains("Conventional"));
        assert!(table.contains("FHA"));
        assert!(table.contains("VA First"));
        assert!(table.contains("Cash to Close"));
    }
}
