use super::amortization;
use super::config::{EngineConfig, RateBook};
use super::error::EstimateError;
use super::prepaids;
use super::program::{self, FinancedFee};
use super::request::{AttorneyFirm, Jurisdiction, LoanProgram, LoanRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// A labelled dollar amount on the disclosure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
}

impl LineItem {
    fn new(label: impl Into<String>, amount: Decimal) -> Self {
        LineItem {
            label: label.into(),
            amount,
        }
    }
}

fn sum(items: &[LineItem]) -> Decimal {
    items.iter().map(|item| item.amount).sum()
}

/// Monthly housing payment components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyPayment {
    pub principal_interest: Decimal,
    pub homeowners_insurance: Decimal,
    pub mortgage_insurance: Decimal,
    pub property_tax_homestead: Decimal,
    pub property_tax_non_homestead: Decimal,
}

impl MonthlyPayment {
    pub fn piti_homestead(&self) -> Decimal {
        self.principal_interest
            + self.homeowners_insurance
            + self.mortgage_insurance
            + self.property_tax_homestead
    }

    pub fn piti_non_homestead(&self) -> Decimal {
        self.principal_interest
            + self.homeowners_insurance
            + self.mortgage_insurance
            + self.property_tax_non_homestead
    }
}

/// Complete itemized estimate for one request. All amounts are kept at full
/// precision; round only when presenting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateResult {
    pub program: LoanProgram,
    pub jurisdiction: Jurisdiction,
    pub attorney: Option<AttorneyFirm>,
    pub homestead_exemption: bool,
    pub sales_price: Decimal,
    pub down_payment: Decimal,
    pub down_payment_percent: Decimal,
    pub down_payment_raised: bool,
    pub loan_base: Decimal,
    pub loan_amount: Decimal,
    /// Informational only; already included in `loan_amount`
    pub financed_fee: Option<FinancedFee>,
    pub monthly: MonthlyPayment,
    pub closing_costs: Vec<LineItem>,
    pub total_closing_costs: Decimal,
    pub prepaid_interest_days: u32,
    pub prepaids: Vec<LineItem>,
    pub total_prepaids: Decimal,
    pub cash_to_close: Decimal,
}

impl EstimateResult {
    /// PITI under the exemption status the request claimed
    pub fn piti(&self) -> Decimal {
        if self.homestead_exemption {
            self.monthly.piti_homestead()
        } else {
            self.monthly.piti_non_homestead()
        }
    }
}

/// Outcome of pricing one program in a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEstimate {
    pub program: LoanProgram,
    pub result: Result<EstimateResult, EstimateError>,
}

/// Programs quoted side by side when none are specified
pub const DEFAULT_COMPARISON: [LoanProgram; 3] = [
    LoanProgram::Conventional,
    LoanProgram::Fha,
    LoanProgram::VaFirst,
];

/// Turns loan requests into itemized estimates. Holds only immutable
/// configuration, so one instance can serve any number of callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimator {
    config: EngineConfig,
    rates: RateBook,
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::new(EngineConfig::default(), RateBook::standard())
    }
}

impl Estimator {
    pub fn new(config: EngineConfig, rates: RateBook) -> Self {
        Estimator { config, rates }
    }

    pub fn estimate(&self, request: &LoanRequest) -> Result<EstimateResult, EstimateError> {
        validate(request)?;

        let program = request.program;
        let price = request.sales_price;
        let rate = request.interest_rate_percent;

        let down = program::resolve_down_payment(
            price,
            &request.down_payment,
            self.config.min_down_percent(program),
        )?;
        let base = program::loan_base(price, down.amount)?;

        let ceiling = self.config.loan_limits.ceiling(program);
        if base > ceiling {
            return Err(EstimateError::LoanLimitExceeded {
                program,
                base,
                ceiling,
            });
        }

        let financing = program.finance(base, down.percent);
        let loan_amount = financing.loan_amount;
        log::debug!(
            "{} loan: price {}, down {} ({}%), base {}, funded {}",
            program,
            price,
            down.amount,
            down.percent,
            base,
            loan_amount
        );

        let principal_interest =
            amortization::monthly_payment(loan_amount, rate, self.config.term_months)?;
        let mortgage_insurance = program.monthly_mortgage_insurance(loan_amount, down.percent);

        let jurisdiction = self.rates.jurisdictions.rule(request.jurisdiction);
        let state = self
            .rates
            .jurisdictions
            .state(request.jurisdiction.state());
        let tax = jurisdiction
            .property_tax
            .yearly(price, request.inside_city_limits);

        let monthly = MonthlyPayment {
            principal_interest,
            homeowners_insurance: self.config.annual_hazard_insurance / MONTHS_PER_YEAR,
            mortgage_insurance,
            property_tax_homestead: tax.monthly_homestead(),
            property_tax_non_homestead: tax.monthly_non_homestead(),
        };

        let mut closing_costs = vec![LineItem::new(
            "Underwriting Fee",
            self.config.lender_fees.underwriting,
        )];
        let attorney = self.rates.attorneys.schedule(request.attorney);
        log::debug!("Attorney schedule total {}", attorney.total());
        closing_costs.extend(
            attorney
                .lines
                .iter()
                .map(|line| LineItem::new(line.label, line.amount)),
        );
        closing_costs.extend([
            LineItem::new("Credit Report Fee", self.config.lender_fees.credit_report),
            LineItem::new("Appraisal Fee", state.appraisal_fee(program)),
            LineItem::new(
                "Owner's Title Insurance",
                jurisdiction.title.owners_premium(price, down.percent),
            ),
            LineItem::new(
                "Lender's Title Insurance",
                jurisdiction.title.lenders_premium(loan_amount),
            ),
            LineItem::new("Mortgage Tax", state.mortgage_tax(loan_amount)),
            LineItem::new("Transfer Tax", state.transfer_tax.amount(price, loan_amount)),
        ]);
        let total_closing_costs = sum(&closing_costs);

        let prepaid = prepaids::calculate(
            &self.config,
            loan_amount,
            rate,
            request.closing_date,
            tax.monthly_homestead(),
        );
        let prepaid_items = vec![
            LineItem::new("Prepaid Interest", prepaid.prepaid_interest),
            LineItem::new("Insurance (1yr prepaid)", prepaid.annual_insurance),
            LineItem::new(
                format!(
                    "Insurance Cushion ({} mo)",
                    self.config.insurance_cushion_months
                ),
                prepaid.insurance_cushion,
            ),
            LineItem::new(
                format!("Property Tax Escrow ({} mo)", self.config.tax_escrow_months),
                prepaid.tax_escrow,
            ),
        ];
        let total_prepaids = prepaid.total();

        let cash_to_close = down.amount + total_closing_costs + total_prepaids;
        log::debug!(
            "{} totals: closing {}, prepaids {}, cash to close {}",
            program,
            total_closing_costs,
            total_prepaids,
            cash_to_close
        );

        Ok(EstimateResult {
            program,
            jurisdiction: request.jurisdiction,
            attorney: request.attorney,
            homestead_exemption: request.homestead_exemption,
            sales_price: price,
            down_payment: down.amount,
            down_payment_percent: down.percent,
            down_payment_raised: down.raised_to_minimum,
            loan_base: base,
            loan_amount,
            financed_fee: financing.financed_fee,
            monthly,
            closing_costs,
            total_closing_costs,
            prepaid_interest_days: prepaid.interest_days,
            prepaids: prepaid_items,
            total_prepaids,
            cash_to_close,
        })
    }

    /// Price the same scenario under each program. A program that fails
    /// validation reports its error without affecting the others.
    pub fn compare(&self, request: &LoanRequest, programs: &[LoanProgram]) -> Vec<ProgramEstimate> {
        programs
            .iter()
            .map(|&program| ProgramEstimate {
                program,
                result: self.estimate(&request.with_program(program)),
            })
            .collect()
    }
}

fn validate(request: &LoanRequest) -> Result<(), EstimateError> {
    if request.sales_price < Decimal::ZERO {
        return Err(EstimateError::InvalidInput(format!(
            "sales price cannot be negative: {}",
            request.sales_price
        )));
    }
    if request.interest_rate_percent < Decimal::ZERO {
        return Err(EstimateError::InvalidInput(format!(
            "interest rate cannot be negative: {}",
            request.interest_rate_percent
        )));
    }
    if request.down_payment.percent < Decimal::ZERO {
        return Err(EstimateError::InvalidInput(format!(
            "down payment percent cannot be negative: {}",
            request.down_payment.percent
        )));
    }
    if let Some(amount) = request.down_payment.amount {
        if amount < Decimal::ZERO {
            return Err(EstimateError::InvalidInput(format!(
                "down payment amount cannot be negative: {}",
                amount
            )));
        }
    }
    Ok(())
}
