use super::attorney::AttorneyTable;
use super::jurisdiction::JurisdictionTable;
use super::request::LoanProgram;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// How many days of interest are collected at closing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "convention", rename_all = "kebab-case")]
pub enum PrepaidInterestDays {
    /// Days left in the closing month after the closing day
    DaysToMonthEnd,
    /// Fixed placeholder count regardless of closing date
    FlatDays { days: u32 },
}

/// Published base-loan ceilings per program family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanLimits {
    pub conventional: Decimal,
    pub fha: Decimal,
    pub va: Decimal,
}

impl Default for LoanLimits {
    fn default() -> Self {
        LoanLimits {
            conventional: dec!(806500),
            fha: dec!(524225),
            va: dec!(1209750),
        }
    }
}

impl LoanLimits {
    pub fn ceiling(&self, program: LoanProgram) -> Decimal {
        match program {
            LoanProgram::Conventional => self.conventional,
            LoanProgram::Fha => self.fha,
            LoanProgram::VaFirst | LoanProgram::VaSecond | LoanProgram::VaExempt => self.va,
        }
    }
}

/// Fixed lender charges on every closing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LenderFees {
    pub underwriting: Decimal,
    pub credit_report: Decimal,
}

impl Default for LenderFees {
    fn default() -> Self {
        LenderFees {
            underwriting: dec!(1320),
            credit_report: dec!(140),
        }
    }
}

/// Tunable engine parameters. Every field has a default, so a config file
/// only needs the values it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub term_months: u32,
    pub conventional_min_down_percent: Decimal,
    pub fha_min_down_percent: Decimal,
    pub loan_limits: LoanLimits,
    pub annual_hazard_insurance: Decimal,
    pub insurance_cushion_months: u32,
    pub tax_escrow_months: u32,
    pub prepaid_interest: PrepaidInterestDays,
    pub lender_fees: LenderFees,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            term_months: 360,
            conventional_min_down_percent: dec!(3),
            fha_min_down_percent: dec!(3.5),
            loan_limits: LoanLimits::default(),
            annual_hazard_insurance: dec!(1500),
            insurance_cushion_months: 3,
            tax_escrow_months: 4,
            prepaid_interest: PrepaidInterestDays::DaysToMonthEnd,
            lender_fees: LenderFees::default(),
        }
    }
}

impl EngineConfig {
    /// Read overrides from JSON, filling anything absent with defaults
    pub fn from_json<R: Read>(reader: R) -> anyhow::Result<Self> {
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.term_months == 0 {
            anyhow::bail!("term_months must be positive");
        }
        for (name, percent) in [
            ("conventional_min_down_percent", self.conventional_min_down_percent),
            ("fha_min_down_percent", self.fha_min_down_percent),
        ] {
            if percent < Decimal::ZERO || percent >= dec!(100) {
                anyhow::bail!("{} must be in [0, 100), got {}", name, percent);
            }
        }
        for (name, amount) in [
            ("annual_hazard_insurance", self.annual_hazard_insurance),
            ("loan_limits.conventional", self.loan_limits.conventional),
            ("loan_limits.fha", self.loan_limits.fha),
            ("loan_limits.va", self.loan_limits.va),
            ("lender_fees.underwriting", self.lender_fees.underwriting),
            ("lender_fees.credit_report", self.lender_fees.credit_report),
        ] {
            if amount < Decimal::ZERO {
                anyhow::bail!("{} cannot be negative, got {}", name, amount);
            }
        }
        Ok(())
    }

    /// Minimum down payment percent the program accepts
    pub fn min_down_percent(&self, program: LoanProgram) -> Decimal {
        match program {
            LoanProgram::Conventional => self.conventional_min_down_percent,
            LoanProgram::Fha => self.fha_min_down_percent,
            LoanProgram::VaFirst | LoanProgram::VaSecond | LoanProgram::VaExempt => Decimal::ZERO,
        }
    }
}

/// The static rate tables the estimator reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateBook {
    pub jurisdictions: JurisdictionTable,
    pub attorneys: AttorneyTable,
}

impl RateBook {
    pub fn standard() -> Self {
        RateBook {
            jurisdictions: JurisdictionTable::standard(),
            attorneys: AttorneyTable::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_all_defaults() {
        let config = EngineConfig::from_json("{}".as_bytes()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{
            "conventional_min_down_percent": "5",
            "tax_escrow_months": 3,
            "prepaid_interest": { "convention": "flat-days", "days": 15 },
            "loan_limits": { "fha": "600000" }
        }"#;
        let config = EngineConfig::from_json(json.as_bytes()).unwrap();
        assert_eq!(config.conventional_min_down_percent, dec!(5));
        assert_eq!(config.tax_escrow_months, 3);
        assert_eq!(config.prepaid_interest, PrepaidInterestDays::FlatDays { days: 15 });
        assert_eq!(config.loan_limits.fha, dec!(600000));
        assert_eq!(config.loan_limits.conventional, dec!(806500));
        assert_eq!(config.fha_min_down_percent, dec!(3.5));
        assert_eq!(config.term_months, 360);
    }

    #[test]
    fn rejects_zero_term() {
        let err = EngineConfig::from_json(r#"{ "term_months": 0 }"#.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("term_months"));
    }

    #[test]
    fn rejects_out_of_range_minimum() {
        assert!(EngineConfig::from_json(r#"{ "fha_min_down_percent": "-1" }"#.as_bytes()).is_err());
        assert!(
            EngineConfig::from_json(r#"{ "conventional_min_down_percent": "100" }"#.as_bytes())
                .is_err()
        );
    }

    #[test]
    fn rejects_negative_limits_and_fees() {
        let err = EngineConfig::from_json(r#"{ "loan_limits": { "fha": "-1" } }"#.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("loan_limits.fha"));

        let err =
            EngineConfig::from_json(r#"{ "lender_fees": { "underwriting": "-5" } }"#.as_bytes())
                .unwrap_err();
        assert!(err.to_string().contains("lender_fees.underwriting"));

        assert!(EngineConfig::from_json(r#"{ "annual_hazard_insurance": "-0.01" }"#.as_bytes()).is_err());
        assert!(EngineConfig::from_json(r#"{ "lender_fees": { "credit_report": "0" } }"#.as_bytes()).is_ok());
    }

    #[test]
    fn program_minimums() {
        let config = EngineConfig::default();
        assert_eq!(config.min_down_percent(LoanProgram::Conventional), dec!(3));
        assert_eq!(config.min_down_percent(LoanProgram::Fha), dec!(3.5));
        assert_eq!(config.min_down_percent(LoanProgram::VaFirst), Decimal::ZERO);
    }

    #[test]
    fn ceilings_differ_by_program_family() {
        let limits = LoanLimits::default();
        assert_ne!(limits.ceiling(LoanProgram::Conventional), limits.ceiling(LoanProgram::Fha));
        assert_ne!(limits.ceiling(LoanProgram::Fha), limits.ceiling(LoanProgram::VaFirst));
        assert_eq!(limits.ceiling(LoanProgram::VaExempt), limits.ceiling(LoanProgram::VaSecond));
    }
}
