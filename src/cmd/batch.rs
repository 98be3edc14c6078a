//! Batch command - estimate every scenario in a CSV file

use super::estimate::cents;
use crate::core::{
    AttorneyFirm, DownPayment, EngineConfig, EstimateResult, Estimator, Jurisdiction, LoanProgram,
    LoanRequest,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use loanest_derive::CsvColumns;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Scenario CSV file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Metadata for one input column, generated by `#[derive(CsvColumns)]`
#[derive(Debug, Clone, Copy)]
pub struct CsvColumn {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One scenario row of the batch input
#[derive(Debug, Deserialize, CsvColumns)]
pub struct ScenarioRow {
    /// Identifier echoed on the output row
    pub id: Option<String>,
    /// Sales price in dollars
    pub sales_price: Decimal,
    /// conventional, fha, va-first, va-second or va-exempt
    pub program: String,
    /// Annual interest rate in percent (e.g. 6.5)
    pub interest_rate: Decimal,
    /// Down payment percent of price; blank means the program minimum
    pub down_percent: Option<Decimal>,
    /// Down payment in dollars; wins over down_percent when positive
    pub down_amount: Option<Decimal>,
    /// columbus-ga, harris-county-ga, lee-county-al or russell-county-al
    pub jurisdiction: String,
    /// true or false (default true)
    pub homestead: Option<bool>,
    /// true or false (default true); only Alabama millage depends on it
    pub inside_city_limits: Option<bool>,
    /// Closing date (YYYY-MM-DD)
    pub closing_date: NaiveDate,
    /// Closing attorney firm; blank for the standard settlement schedule
    pub attorney: Option<String>,
}

impl ScenarioRow {
    pub fn to_request(&self) -> Result<LoanRequest, crate::core::EstimateError> {
        let attorney = match self.attorney.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(firm) => Some(firm.parse::<AttorneyFirm>()?),
        };
        Ok(LoanRequest {
            sales_price: self.sales_price,
            program: self.program.parse::<LoanProgram>()?,
            interest_rate_percent: self.interest_rate,
            down_payment: DownPayment {
                percent: self.down_percent.unwrap_or(Decimal::ZERO),
                amount: self.down_amount,
            },
            jurisdiction: self.jurisdiction.parse::<Jurisdiction>()?,
            homestead_exemption: self.homestead.unwrap_or(true),
            inside_city_limits: self.inside_city_limits.unwrap_or(true),
            closing_date: self.closing_date,
            attorney,
        })
    }
}

/// Per-scenario summary written to the output CSV
#[derive(Debug, Default, Serialize, PartialEq)]
struct SummaryRow {
    id: String,
    program: String,
    jurisdiction: String,
    sales_price: String,
    down_payment: String,
    loan_amount: String,
    financed_fee: String,
    principal_interest: String,
    mortgage_insurance: String,
    piti: String,
    closing_costs: String,
    prepaids: String,
    cash_to_close: String,
    error: String,
}

impl SummaryRow {
    fn priced(id: String, result: &EstimateResult) -> Self {
        SummaryRow {
            id,
            program: result.program.display().to_string(),
            jurisdiction: result.jurisdiction.display().to_string(),
            sales_price: cents(result.sales_price),
            down_payment: cents(result.down_payment),
            loan_amount: cents(result.loan_amount),
            financed_fee: result
                .financed_fee
                .map_or(String::new(), |fee| cents(fee.amount)),
            principal_interest: cents(result.monthly.principal_interest),
            mortgage_insurance: cents(result.monthly.mortgage_insurance),
            piti: cents(result.piti()),
            closing_costs: cents(result.total_closing_costs),
            prepaids: cents(result.total_prepaids),
            cash_to_close: cents(result.cash_to_close),
            error: String::new(),
        }
    }

    fn failed(id: String, error: String) -> Self {
        SummaryRow {
            id,
            error,
            ..SummaryRow::default()
        }
    }
}

impl BatchCommand {
    pub fn exec(&self, config: &EngineConfig) -> anyhow::Result<()> {
        let estimator = super::estimator(config);
        let input: Box<dyn Read> = if self.file.as_os_str() == "-" {
            Box::new(io::stdin().lock())
        } else {
            Box::new(
                File::open(&self.file)
                    .with_context(|| format!("Failed to open {}", self.file.display()))?,
            )
        };
        let output: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            ),
            None => Box::new(io::stdout().lock()),
        };

        let (priced, failed) = run_batch(&estimator, BufReader::new(input), output)?;
        log::info!("Batch complete: {} priced, {} failed", priced, failed);
        Ok(())
    }
}

/// Price every row, writing one summary per input row. Row-level failures go
/// to the `error` column; only I/O and header problems abort the batch.
fn run_batch<R: Read, W: Write>(
    estimator: &Estimator,
    reader: R,
    writer: W,
) -> anyhow::Result<(usize, usize)> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    for column in ScenarioRow::csv_columns().iter().filter(|c| c.required) {
        if !headers.iter().any(|h| h == column.name) {
            anyhow::bail!("Missing required column '{}'", column.name);
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);
    let (mut priced, mut failed) = (0, 0);
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let line = index + 1;
        let row = record.deserialize::<ScenarioRow>(Some(&headers));
        let id = row
            .as_ref()
            .ok()
            .and_then(|row| row.id.clone())
            .unwrap_or_else(|| line.to_string());

        let summary = match row {
            Ok(row) => match row.to_request().and_then(|req| estimator.estimate(&req)) {
                Ok(result) => SummaryRow::priced(id, &result),
                Err(err) => SummaryRow::failed(id, err.to_string()),
            },
            Err(err) => SummaryRow::failed(id, format!("unreadable row: {}", err)),
        };
        if summary.error.is_empty() {
            priced += 1;
        } else {
            log::warn!("Scenario {}: {}", summary.id, summary.error);
            failed += 1;
        }
        wtr.serialize(&summary)?;
    }
    wtr.flush()?;
    Ok((priced, failed))
}
