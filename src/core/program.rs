//! Loan program rules: down payment minimums, financed fees and mortgage
//! insurance.
//!
//! Only VA levies a funding fee, only FHA levies upfront MIP, and only
//! Conventional and FHA carry periodic MI. Both one-time fees are financed
//! into the loan amount.

use super::error::EstimateError;
use super::request::{DownPayment, LoanProgram};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const FHA_UPFRONT_MIP: Decimal = dec!(0.0175);

/// Down payment after applying the custom amount and program minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDownPayment {
    pub amount: Decimal,
    pub percent: Decimal,
    /// Requested amount was below the program minimum and was raised to it
    pub raised_to_minimum: bool,
}

/// Resolve the requested down payment against the sales price and raise it to
/// `min_percent` when it falls short.
///
/// A positive custom amount wins over the percent. A zero sales price has no
/// meaningful percentage and is rejected, as is a down payment above the price.
pub fn resolve_down_payment(
    sales_price: Decimal,
    requested: &DownPayment,
    min_percent: Decimal,
) -> Result<ResolvedDownPayment, EstimateError> {
    if sales_price <= Decimal::ZERO {
        return Err(EstimateError::InvalidDownPayment(
            "sales price must be positive to size a down payment".to_string(),
        ));
    }

    let amount = match requested.custom_amount() {
        Some(amount) => amount,
        None => percent_of(sales_price, requested.percent)?,
    };

    if amount > sales_price {
        return Err(EstimateError::InvalidDownPayment(format!(
            "down payment {:.2} exceeds sales price {:.2}",
            amount, sales_price
        )));
    }

    let percent = amount / sales_price * HUNDRED;
    if percent < min_percent {
        log::debug!(
            "Down payment {}% below minimum {}%, raising to minimum",
            percent,
            min_percent
        );
        return Ok(ResolvedDownPayment {
            amount: percent_of(sales_price, min_percent)?,
            percent: min_percent,
            raised_to_minimum: true,
        });
    }

    Ok(ResolvedDownPayment {
        amount,
        percent,
        raised_to_minimum: false,
    })
}

fn percent_of(sales_price: Decimal, percent: Decimal) -> Result<Decimal, EstimateError> {
    sales_price
        .checked_mul(percent)
        .map(|scaled| scaled / HUNDRED)
        .ok_or_else(|| {
            EstimateError::InvalidInput(format!(
                "{}% of sales price {} is out of range",
                percent, sales_price
            ))
        })
}

/// Price not covered by the down payment
pub fn loan_base(sales_price: Decimal, down_payment: Decimal) -> Result<Decimal, EstimateError> {
    let base = sales_price - down_payment;
    if base < Decimal::ZERO {
        return Err(EstimateError::InvalidDownPayment(format!(
            "down payment {:.2} exceeds sales price {:.2}",
            down_payment, sales_price
        )));
    }
    Ok(base)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancedFeeKind {
    VaFundingFee,
    FhaUpfrontMip,
}

impl FinancedFeeKind {
    pub fn display(&self) -> &'static str {
        match self {
            FinancedFeeKind::VaFundingFee => "VA Funding Fee",
            FinancedFeeKind::FhaUpfrontMip => "FHA Upfront MIP",
        }
    }
}

/// One-time fee rolled into the loan. Disclosed for information only; it is
/// already part of the loan amount and never counted in closing costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancedFee {
    pub kind: FinancedFeeKind,
    pub rate: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Financing {
    pub loan_amount: Decimal,
    pub financed_fee: Option<FinancedFee>,
}

impl LoanProgram {
    /// VA funding fee as a fraction of the base loan
    pub fn funding_fee_rate(&self, down_percent: Decimal) -> Option<Decimal> {
        let first_use_low_down = match self {
            LoanProgram::VaFirst => dec!(0.0215),
            LoanProgram::VaSecond => dec!(0.033),
            LoanProgram::Conventional | LoanProgram::Fha | LoanProgram::VaExempt => return None,
        };
        let rate = match down_percent {
            p if p >= dec!(10) => dec!(0.0125),
            p if p >= dec!(5) => dec!(0.015),
            _ => first_use_low_down,
        };
        Some(rate)
    }

    /// Fee financed on top of the base loan, if the program levies one
    pub fn financed_fee_rate(&self, down_percent: Decimal) -> Option<(FinancedFeeKind, Decimal)> {
        match self {
            LoanProgram::Fha => Some((FinancedFeeKind::FhaUpfrontMip, FHA_UPFRONT_MIP)),
            LoanProgram::VaFirst | LoanProgram::VaSecond => self
                .funding_fee_rate(down_percent)
                .map(|rate| (FinancedFeeKind::VaFundingFee, rate)),
            LoanProgram::Conventional | LoanProgram::VaExempt => None,
        }
    }

    /// Funded loan amount for a base loan
    pub fn finance(&self, base: Decimal, down_percent: Decimal) -> Financing {
        match self.financed_fee_rate(down_percent) {
            Some((kind, rate)) => Financing {
                loan_amount: base * (Decimal::ONE + rate),
                financed_fee: Some(FinancedFee {
                    kind,
                    rate,
                    amount: base * rate,
                }),
            },
            None => Financing {
                loan_amount: base,
                financed_fee: None,
            },
        }
    }

    /// Annual mortgage insurance rate as a fraction of the loan amount
    pub fn annual_mi_rate(&self, down_percent: Decimal) -> Decimal {
        match self {
            LoanProgram::Conventional => conventional_mi_rate(down_percent),
            LoanProgram::Fha => {
                if down_percent >= dec!(5) {
                    dec!(0.005)
                } else {
                    dec!(0.0055)
                }
            }
            LoanProgram::VaFirst | LoanProgram::VaSecond | LoanProgram::VaExempt => Decimal::ZERO,
        }
    }

    pub fn monthly_mortgage_insurance(&self, loan_amount: Decimal, down_percent: Decimal) -> Decimal {
        loan_amount * self.annual_mi_rate(down_percent) / MONTHS_PER_YEAR
    }
}

/// Conventional MI tiers: [0,3) and exactly 3 → 0.40%, (3,10) → 0.35%,
/// [10,15) → 0.25%, [15,20) → 0.15%, 20 and above → none.
fn conventional_mi_rate(down_percent: Decimal) -> Decimal {
    match down_percent {
        p if p >= dec!(20) => Decimal::ZERO,
        p if p >= dec!(15) => dec!(0.0015),
        p if p >= dec!(10) => dec!(0.0025),
        p if p > dec!(3) => dec!(0.0035),
        _ => dec!(0.004),
    }
}
