use super::config::{EngineConfig, PrepaidInterestDays};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const DAYS_PER_YEAR: Decimal = dec!(365);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Prepaid and escrow charges collected at closing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prepaids {
    pub interest_days: u32,
    pub prepaid_interest: Decimal,
    pub annual_insurance: Decimal,
    pub insurance_cushion: Decimal,
    pub tax_escrow: Decimal,
}

impl Prepaids {
    pub fn total(&self) -> Decimal {
        self.prepaid_interest + self.annual_insurance + self.insurance_cushion + self.tax_escrow
    }
}

/// Days in the calendar month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Days of interest owed at closing. With `DaysToMonthEnd` the closing day
/// itself is excluded, so closing on the last day of the month owes none.
pub fn interest_days(closing_date: NaiveDate, convention: PrepaidInterestDays) -> u32 {
    match convention {
        PrepaidInterestDays::DaysToMonthEnd => days_in_month(closing_date) - closing_date.day(),
        PrepaidInterestDays::FlatDays { days } => days,
    }
}

/// Per-diem interest from closing through month end, a year of hazard
/// insurance plus its cushion, and a property-tax escrow cushion.
pub fn calculate(
    config: &EngineConfig,
    loan_amount: Decimal,
    annual_rate_percent: Decimal,
    closing_date: NaiveDate,
    monthly_property_tax: Decimal,
) -> Prepaids {
    let days = interest_days(closing_date, config.prepaid_interest);
    let annual_rate = annual_rate_percent / dec!(100);
    let prepaid_interest = loan_amount * annual_rate / DAYS_PER_YEAR * Decimal::from(days);

    let annual_insurance = config.annual_hazard_insurance;
    let insurance_cushion = annual_insurance / MONTHS_PER_YEAR
        * Decimal::from(config.insurance_cushion_months);
    let tax_escrow = monthly_property_tax * Decimal::from(config.tax_escrow_months);

    log::debug!(
        "Prepaids: {} days interest {}, insurance {} + cushion {}, tax escrow {}",
        days,
        prepaid_interest,
        annual_insurance,
        insurance_cushion,
        tax_escrow
    );

    Prepaids {
        interest_days: days,
        prepaid_interest,
        annual_insurance,
        insurance_cushion,
        tax_escrow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::money::round_cents;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(date(2026, 1, 10)), 31);
        assert_eq!(days_in_month(date(2026, 2, 1)), 28);
        assert_eq!(days_in_month(date(2028, 2, 29)), 29);
        assert_eq!(days_in_month(date(2026, 4, 30)), 30);
        assert_eq!(days_in_month(date(2026, 12, 31)), 31);
    }

    #[test]
    fn days_to_month_end_excludes_closing_day() {
        let c = PrepaidInterestDays::DaysToMonthEnd;
        assert_eq!(interest_days(date(2026, 10, 15), c), 16);
        assert_eq!(interest_days(date(2026, 10, 1), c), 30);
        assert_eq!(interest_days(date(2026, 10, 31), c), 0);
        assert_eq!(interest_days(date(2026, 2, 27), c), 1);
    }

    #[test]
    fn flat_days_ignores_closing_date() {
        let c = PrepaidInterestDays::FlatDays { days: 15 };
        assert_eq!(interest_days(date(2026, 10, 31), c), 15);
        assert_eq!(interest_days(date(2026, 2, 1), c), 15);
    }

    #[test]
    fn prepaid_items_with_defaults() {
        let config = EngineConfig::default();
        let p = calculate(&config, dec!(292000), dec!(6.5), date(2026, 6, 20), dec!(370.05));
        assert_eq!(p.interest_days, 10);
        assert_eq!(round_cents(p.prepaid_interest), dec!(520.00));
        assert_eq!(p.annual_insurance, dec!(1500));
        assert_eq!(p.insurance_cushion, dec!(375));
        assert_eq!(p.tax_escrow, dec!(1480.2));
        assert_eq!(round_cents(p.total()), dec!(3875.20));
    }

    #[test]
    fn escrow_cushion_is_configurable() {
        let config = EngineConfig {
            tax_escrow_months: 3,
            insurance_cushion_months: 2,
            ..EngineConfig::default()
        };
        let p = calculate(&config, dec!(100000), dec!(5), date(2026, 6, 30), dec!(200));
        assert_eq!(p.prepaid_interest, Decimal::ZERO);
        assert_eq!(p.tax_escrow, dec!(600));
        assert_eq!(p.insurance_cushion, dec!(250));
    }
}
