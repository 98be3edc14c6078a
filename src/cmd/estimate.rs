//! Estimate command - itemized estimate for a single scenario

use super::ScenarioArgs;
use crate::core::{
    format_percent, format_usd, round_cents, EngineConfig, EstimateResult, LineItem, LoanProgram,
};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct EstimateCommand {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// conventional, fha, va-first, va-second or va-exempt
    #[arg(short = 'g', long, default_value = "conventional")]
    program: LoanProgram,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

impl EstimateCommand {
    pub fn exec(&self, config: &EngineConfig) -> anyhow::Result<()> {
        let request = self.scenario.request(self.program);
        log::info!("Estimating {} loan in {}", request.program, request.jurisdiction);
        let result = super::estimator(config).estimate(&request)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&EstimateView::from(&result))?);
        } else {
            print_estimate(&result);
        }
        Ok(())
    }
}

fn print_estimate(result: &EstimateResult) {
    println!();
    println!("LOAN ESTIMATE ({}, {})", result.program, result.jurisdiction);
    println!();
    println!(
        "  Sales Price: {} | Down Payment: {} ({})",
        format_usd(result.sales_price),
        format_usd(result.down_payment),
        format_percent(result.down_payment_percent)
    );
    if result.down_payment_raised {
        println!("  Down payment raised to the program minimum");
    }
    println!(
        "  Base Loan: {} | Loan Amount: {}",
        format_usd(result.loan_base),
        format_usd(result.loan_amount)
    );
    if let Some(fee) = result.financed_fee {
        println!(
            "  {} @ {}: {} (financed, included in loan amount)",
            fee.kind.display(),
            format_percent(fee.rate * Decimal::ONE_HUNDRED),
            format_usd(fee.amount)
        );
    }
    println!();

    let monthly = &result.monthly;
    println!("MONTHLY PAYMENT");
    print_lines(&[
        row("Principal & Interest", monthly.principal_interest),
        row("Homeowners Insurance", monthly.homeowners_insurance),
        row("Mortgage Insurance", monthly.mortgage_insurance),
        row("Property Tax (homestead)", monthly.property_tax_homestead),
        row("Property Tax (non-homestead)", monthly.property_tax_non_homestead),
        row("PITI (homestead)", monthly.piti_homestead()),
        row("PITI (non-homestead)", monthly.piti_non_homestead()),
    ]);

    println!("CLOSING COSTS");
    print_lines(&item_rows(&result.closing_costs, result.total_closing_costs));

    println!("PREPAIDS & ESCROW");
    print_lines(&item_rows(&result.prepaids, result.total_prepaids));

    println!("CASH TO CLOSE: {}", format_usd(result.cash_to_close));
    println!();
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn row(item: &str, amount: Decimal) -> LineRow {
    LineRow {
        item: item.to_string(),
        amount: format_usd(amount),
    }
}

fn item_rows(items: &[LineItem], total: Decimal) -> Vec<LineRow> {
    items
        .iter()
        .map(|item| row(&item.label, item.amount))
        .chain(std::iter::once(row("Total", total)))
        .collect()
}

fn print_lines(rows: &[LineRow]) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

/// Estimate data for JSON output; dollar amounts rounded to cents
#[derive(Debug, Serialize)]
pub(crate) struct EstimateView {
    program: LoanProgram,
    jurisdiction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attorney: Option<String>,
    homestead_exemption: bool,
    sales_price: String,
    down_payment: String,
    down_payment_pct: String,
    down_payment_raised: bool,
    loan_base: String,
    loan_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    financed_fee: Option<FinancedFeeView>,
    monthly: MonthlyView,
    closing_costs: Vec<LineItemView>,
    total_closing_costs: String,
    prepaid_interest_days: u32,
    prepaids: Vec<LineItemView>,
    total_prepaids: String,
    cash_to_close: String,
}

#[derive(Debug, Serialize)]
struct FinancedFeeView {
    kind: String,
    rate_pct: String,
    amount: String,
}

#[derive(Debug, Serialize)]
struct MonthlyView {
    principal_interest: String,
    homeowners_insurance: String,
    mortgage_insurance: String,
    property_tax_homestead: String,
    property_tax_non_homestead: String,
    piti_homestead: String,
    piti_non_homestead: String,
}

#[derive(Debug, Serialize)]
struct LineItemView {
    label: String,
    amount: String,
}

pub(crate) fn cents(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}

fn line_views(items: &[LineItem]) -> Vec<LineItemView> {
    items
        .iter()
        .map(|item| LineItemView {
            label: item.label.clone(),
            amount: cents(item.amount),
        })
        .collect()
}

impl From<&EstimateResult> for EstimateView {
    fn from(result: &EstimateResult) -> Self {
        let monthly = &result.monthly;
        EstimateView {
            program: result.program,
            jurisdiction: result.jurisdiction.display().to_string(),
            attorney: result.attorney.map(|firm| firm.display().to_string()),
            homestead_exemption: result.homestead_exemption,
            sales_price: cents(result.sales_price),
            down_payment: cents(result.down_payment),
            down_payment_pct: result.down_payment_percent.normalize().to_string(),
            down_payment_raised: result.down_payment_raised,
            loan_base: cents(result.loan_base),
            loan_amount: cents(result.loan_amount),
            financed_fee: result.financed_fee.map(|fee| FinancedFeeView {
                kind: fee.kind.display().to_string(),
                rate_pct: (fee.rate * Decimal::ONE_HUNDRED).normalize().to_string(),
                amount: cents(fee.amount),
            }),
            monthly: MonthlyView {
                principal_interest: cents(monthly.principal_interest),
                homeowners_insurance: cents(monthly.homeowners_insurance),
                mortgage_insurance: cents(monthly.mortgage_insurance),
                property_tax_homestead: cents(monthly.property_tax_homestead),
                property_tax_non_homestead: cents(monthly.property_tax_non_homestead),
                piti_homestead: cents(monthly.piti_homestead()),
                piti_non_homestead: cents(monthly.piti_non_homestead()),
            },
            closing_costs: line_views(&result.closing_costs),
            total_closing_costs: cents(result.total_closing_costs),
            prepaid_interest_days: result.prepaid_interest_days,
            prepaids: line_views(&result.prepaids),
            total_prepaids: cents(result.total_prepaids),
            cash_to_close: cents(result.cash_to_close),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DownPayment, Estimator, Jurisdiction, LoanRequest};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn va_estimate() -> EstimateResult {
        let request = LoanRequest {
            sales_price: dec!(300000),
            program: LoanProgram::VaFirst,
            interest_rate_percent: dec!(6.5),
            down_payment: DownPayment::percent(Decimal::ZERO),
            jurisdiction: Jurisdiction::ColumbusGa,
            homestead_exemption: true,
            inside_city_limits: true,
            closing_date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
            attorney: None,
        };
        Estimator::default().estimate(&request).unwrap()
    }

    #[test]
    fn json_view_rounds_to_cents() {
        let view = EstimateView::from(&va_estimate());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["program"], "va-first");
        assert_eq!(json["loan_amount"], "306450.00");
        assert_eq!(json["financed_fee"]["kind"], "VA Funding Fee");
        assert_eq!(json["financed_fee"]["rate_pct"], "2.15");
        assert_eq!(json["monthly"]["property_tax_homestead"], "370.05");
        assert!(json.get("attorney").is_none());
    }

    #[test]
    fn total_row_closes_each_table() {
        let result = va_estimate();
        let rows = item_rows(&result.closing_costs, result.total_closing_costs);
        assert_eq!(rows.len(), result.closing_costs.len() + 1);
        let last = rows.last().unwrap();
        assert_eq!(last.item, "Total");
        assert_eq!(last.amount, format_usd(result.total_closing_costs));
    }

    #[test]
    fn cents_rounds_half_away_from_zero() {
        assert_eq!(cents(dec!(81.375)), "81.38");
        assert_eq!(cents(dec!(1480.2)), "1480.20");
    }
}
