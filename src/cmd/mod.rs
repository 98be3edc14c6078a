pub mod batch;
pub mod compare;
pub mod estimate;
pub mod programs;
pub mod schema;

use crate::core::{
    AttorneyFirm, DownPayment, EngineConfig, Estimator, Jurisdiction, LoanProgram, LoanRequest,
    RateBook,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load the engine configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file {}", path.display()))?;
            let config = EngineConfig::from_json(BufReader::new(file))
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            log::info!("Loaded engine config from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

pub fn estimator(config: &EngineConfig) -> Estimator {
    Estimator::new(*config, RateBook::standard())
}

/// Scenario flags shared by `estimate` and `compare`
#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// Sales price in dollars
    #[arg(short = 'p', long)]
    price: Decimal,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(short, long)]
    rate: Decimal,

    /// Down payment as a percent of price. Defaults to the program minimum.
    #[arg(short, long)]
    down_percent: Option<Decimal>,

    /// Down payment in dollars; wins over --down-percent when positive
    #[arg(long)]
    down_amount: Option<Decimal>,

    /// columbus-ga, harris-county-ga, lee-county-al or russell-county-al
    #[arg(short, long)]
    jurisdiction: Jurisdiction,

    /// Price property tax without the homestead exemption
    #[arg(long)]
    non_homestead: bool,

    /// Property sits outside city limits (Alabama millage)
    #[arg(long)]
    outside_city: bool,

    /// Closing date (YYYY-MM-DD)
    #[arg(short, long)]
    closing_date: NaiveDate,

    /// Closing attorney firm; omit for the standard settlement schedule
    #[arg(short, long)]
    attorney: Option<AttorneyFirm>,
}

impl ScenarioArgs {
    pub fn request(&self, program: LoanProgram) -> LoanRequest {
        LoanRequest {
            sales_price: self.price,
            program,
            interest_rate_percent: self.rate,
            down_payment: DownPayment {
                percent: self.down_percent.unwrap_or(Decimal::ZERO),
                amount: self.down_amount,
            },
            jurisdiction: self.jurisdiction,
            homestead_exemption: !self.non_homestead,
            inside_city_limits: !self.outside_city,
            closing_date: self.closing_date,
            attorney: self.attorney,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn no_config_file_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("tests/data/does-not-exist.json"))).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }

    #[test]
    fn config_file_overrides() {
        let path = std::env::temp_dir().join("loanest-config-override.json");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{ "tax_escrow_months": 2 }}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.tax_escrow_months, 2);
        assert_eq!(config.fha_min_down_percent, dec!(3.5));
    }
}
