use super::error::{EstimateError, LookupKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Loan program the borrower is applying under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LoanProgram {
    Conventional,
    Fha,
    /// VA loan, first use of entitlement
    VaFirst,
    /// VA loan, subsequent use of entitlement
    VaSecond,
    /// VA loan for a borrower exempt from the funding fee
    VaExempt,
}

impl LoanProgram {
    pub const ALL: [LoanProgram; 5] = [
        LoanProgram::Conventional,
        LoanProgram::Fha,
        LoanProgram::VaFirst,
        LoanProgram::VaSecond,
        LoanProgram::VaExempt,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            LoanProgram::Conventional => "Conventional",
            LoanProgram::Fha => "FHA",
            LoanProgram::VaFirst => "VA First",
            LoanProgram::VaSecond => "VA Second",
            LoanProgram::VaExempt => "VA Exempt",
        }
    }

    /// Down payment percentages offered as presets when quoting this program
    pub fn preset_down_percents(&self) -> &'static [Decimal] {
        const CONVENTIONAL: &[Decimal] = &[dec!(3), dec!(5), dec!(10), dec!(15), dec!(20)];
        const FHA: &[Decimal] = &[dec!(3.5), dec!(5)];
        const VA: &[Decimal] = &[dec!(0), dec!(5), dec!(10), dec!(15), dec!(20)];
        match self {
            LoanProgram::Conventional => CONVENTIONAL,
            LoanProgram::Fha => FHA,
            LoanProgram::VaFirst | LoanProgram::VaSecond | LoanProgram::VaExempt => VA,
        }
    }
}

impl std::fmt::Display for LoanProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for LoanProgram {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "conventional" | "conv" => Ok(LoanProgram::Conventional),
            "fha" => Ok(LoanProgram::Fha),
            "va" | "va-first" => Ok(LoanProgram::VaFirst),
            "va-second" | "va-subsequent" => Ok(LoanProgram::VaSecond),
            "va-exempt" => Ok(LoanProgram::VaExempt),
            _ => Err(EstimateError::unsupported(LookupKind::Program, s)),
        }
    }
}

/// State a jurisdiction belongs to; several fee rules only vary by state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum State {
    Georgia,
    Alabama,
}

/// County or city whose tax tables apply to the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Jurisdiction {
    ColumbusGa,
    HarrisCountyGa,
    LeeCountyAl,
    RussellCountyAl,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 4] = [
        Jurisdiction::ColumbusGa,
        Jurisdiction::HarrisCountyGa,
        Jurisdiction::LeeCountyAl,
        Jurisdiction::RussellCountyAl,
    ];

    pub fn state(&self) -> State {
        match self {
            Jurisdiction::ColumbusGa | Jurisdiction::HarrisCountyGa => State::Georgia,
            Jurisdiction::LeeCountyAl | Jurisdiction::RussellCountyAl => State::Alabama,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Jurisdiction::ColumbusGa => "Columbus, GA",
            Jurisdiction::HarrisCountyGa => "Harris County, GA",
            Jurisdiction::LeeCountyAl => "Lee County, AL",
            Jurisdiction::RussellCountyAl => "Russell County, AL",
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for Jurisdiction {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "columbus-ga" | "columbus" => Ok(Jurisdiction::ColumbusGa),
            "harris-county-ga" | "harris" => Ok(Jurisdiction::HarrisCountyGa),
            "lee-county-al" | "lee" => Ok(Jurisdiction::LeeCountyAl),
            "russell-county-al" | "russell" => Ok(Jurisdiction::RussellCountyAl),
            _ => Err(EstimateError::unsupported(LookupKind::Jurisdiction, s)),
        }
    }
}

/// Closing attorney firm handling settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AttorneyFirm {
    ChattahoocheeClosing,
    RiverCityLaw,
    LeeRussellTitle,
}

impl AttorneyFirm {
    pub const ALL: [AttorneyFirm; 3] = [
        AttorneyFirm::ChattahoocheeClosing,
        AttorneyFirm::RiverCityLaw,
        AttorneyFirm::LeeRussellTitle,
    ];

    pub fn display(&self) -> &'static str {
        match self {
            AttorneyFirm::ChattahoocheeClosing => "Chattahoochee Closing Group",
            AttorneyFirm::RiverCityLaw => "River City Law",
            AttorneyFirm::LeeRussellTitle => "Lee-Russell Title",
        }
    }
}

impl std::fmt::Display for AttorneyFirm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for AttorneyFirm {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "chattahoochee-closing" | "chattahoochee-closing-group" | "chattahoochee" => {
                Ok(AttorneyFirm::ChattahoocheeClosing)
            }
            "river-city-law" | "river-city" => Ok(AttorneyFirm::RiverCityLaw),
            "lee-russell-title" | "lee-russell" => Ok(AttorneyFirm::LeeRussellTitle),
            _ => Err(EstimateError::unsupported(LookupKind::Attorney, s)),
        }
    }
}

/// Requested down payment: a percent of the sales price, optionally
/// overridden by a custom dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DownPayment {
    /// Percent of the sales price (e.g. 3.5 for 3.5%)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub percent: Decimal,
    /// Custom amount in dollars; wins over `percent` when positive
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub amount: Option<Decimal>,
}

impl DownPayment {
    pub fn percent(percent: Decimal) -> Self {
        DownPayment {
            percent,
            amount: None,
        }
    }

    pub fn amount(amount: Decimal) -> Self {
        DownPayment {
            percent: Decimal::ZERO,
            amount: Some(amount),
        }
    }

    /// Custom amount when one was given and is positive
    pub fn custom_amount(&self) -> Option<Decimal> {
        self.amount.filter(|a| *a > Decimal::ZERO)
    }
}

/// Everything needed to price one loan scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoanRequest {
    #[schemars(with = "f64")]
    pub sales_price: Decimal,
    pub program: LoanProgram,
    /// Annual note rate in percent (e.g. 6.5)
    #[schemars(with = "f64")]
    pub interest_rate_percent: Decimal,
    #[serde(default)]
    pub down_payment: DownPayment,
    pub jurisdiction: Jurisdiction,
    #[serde(default = "default_true")]
    pub homestead_exemption: bool,
    /// Only consulted for jurisdictions with separate city and county millage
    #[serde(default = "default_true")]
    pub inside_city_limits: bool,
    pub closing_date: NaiveDate,
    #[serde(default)]
    pub attorney: Option<AttorneyFirm>,
}

impl LoanRequest {
    /// Same scenario priced under another program
    pub fn with_program(&self, program: LoanProgram) -> Self {
        LoanRequest {
            program,
            ..self.clone()
        }
    }
}

fn default_true() -> bool {
    true
}

fn normalize(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .replace([',', '.'], "")
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_programs_loosely() {
        assert_eq!("Conventional".parse(), Ok(LoanProgram::Conventional));
        assert_eq!("FHA".parse(), Ok(LoanProgram::Fha));
        assert_eq!("VA First".parse(), Ok(LoanProgram::VaFirst));
        assert_eq!("va_second".parse(), Ok(LoanProgram::VaSecond));
        assert_eq!("va-exempt".parse(), Ok(LoanProgram::VaExempt));
    }

    #[test]
    fn unknown_program_is_unsupported_lookup() {
        let err = "usda".parse::<LoanProgram>().unwrap_err();
        assert_eq!(
            err,
            EstimateError::UnsupportedLookup {
                kind: LookupKind::Program,
                value: "usda".to_string(),
            }
        );
    }

    #[test]
    fn parses_jurisdictions_from_display_names() {
        for j in Jurisdiction::ALL {
            assert_eq!(j.display().parse::<Jurisdiction>(), Ok(j));
        }
        assert!(matches!(
            "Muscogee".parse::<Jurisdiction>(),
            Err(EstimateError::UnsupportedLookup {
                kind: LookupKind::Jurisdiction,
                ..
            })
        ));
    }

    #[test]
    fn parses_attorney_firms_from_display_names() {
        for firm in AttorneyFirm::ALL {
            assert_eq!(firm.display().parse::<AttorneyFirm>(), Ok(firm));
        }
        assert!("Smith & Jones".parse::<AttorneyFirm>().is_err());
    }

    #[test]
    fn jurisdictions_map_to_states() {
        assert_eq!(Jurisdiction::ColumbusGa.state(), State::Georgia);
        assert_eq!(Jurisdiction::HarrisCountyGa.state(), State::Georgia);
        assert_eq!(Jurisdiction::LeeCountyAl.state(), State::Alabama);
        assert_eq!(Jurisdiction::RussellCountyAl.state(), State::Alabama);
    }

    #[test]
    fn custom_amount_ignores_zero() {
        assert_eq!(DownPayment::amount(dec!(0)).custom_amount(), None);
        assert_eq!(
            DownPayment::amount(dec!(21000)).custom_amount(),
            Some(dec!(21000))
        );
        assert_eq!(DownPayment::percent(dec!(5)).custom_amount(), None);
    }

    #[test]
    fn request_json_defaults_flags() {
        let json = r#"{
            "sales_price": "300000",
            "program": "fha",
            "interest_rate_percent": "6.5",
            "down_payment": { "percent": "3.5" },
            "jurisdiction": "columbus-ga",
            "closing_date": "2026-10-15"
        }"#;
        let request: LoanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.program, LoanProgram::Fha);
        assert!(request.homestead_exemption);
        assert!(request.inside_city_limits);
        assert_eq!(request.attorney, None);
        assert_eq!(request.down_payment.percent, dec!(3.5));
    }
}
