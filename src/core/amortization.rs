use super::error::EstimateError;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// Level monthly principal and interest for a fully amortizing loan.
///
/// At a zero rate the payment is straight-line `principal / term`; the annuity
/// formula is undefined there.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Decimal, EstimateError> {
    if principal < Decimal::ZERO {
        return Err(EstimateError::InvalidInput(format!(
            "principal cannot be negative: {}",
            principal
        )));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(EstimateError::InvalidInput(format!(
            "interest rate cannot be negative: {}",
            annual_rate_percent
        )));
    }
    if term_months == 0 {
        return Err(EstimateError::InvalidInput(
            "term must be at least one month".to_string(),
        ));
    }

    let n = Decimal::from(term_months);
    let monthly_rate = annual_rate_percent / dec!(100) / dec!(12);
    if monthly_rate.is_zero() {
        return Ok(principal / n);
    }

    let interest_only = monthly_rate
        .checked_mul(principal)
        .ok_or_else(|| overflow(principal, annual_rate_percent))?;

    // r·P / (1 − (1+r)^−n) = r·P · g / (g − 1) with g = (1+r)^n. Once g
    // outgrows Decimal the factor is 1 to full precision.
    let growth = match (Decimal::ONE + monthly_rate).checked_powi(i64::from(term_months)) {
        Some(growth) => growth,
        None => return Ok(interest_only),
    };
    let factor = growth
        .checked_div(growth - Decimal::ONE)
        .ok_or_else(|| overflow(principal, annual_rate_percent))?;
    interest_only
        .checked_mul(factor)
        .ok_or_else(|| overflow(principal, annual_rate_percent))
}

fn overflow(principal: Decimal, annual_rate_percent: Decimal) -> EstimateError {
    EstimateError::InvalidInput(format!(
        "payment on {} at {}% is out of range",
        principal, annual_rate_percent
    ))
}
