//! Jurisdiction tables: property tax, title insurance, mortgage and transfer
//! tax, and appraisal fees.
//!
//! Property tax is `price × assessment ratio × millage + adjustment`. The
//! adjustment is a signed fixed dollar amount and is never clamped, so very low
//! sales prices may produce a small negative yearly figure.

use super::request::{Jurisdiction, LoanProgram, State};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Millage applied to assessed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Millage {
    /// One rate for the whole jurisdiction
    Uniform(Decimal),
    /// Separate rates inside and outside city limits
    CityCounty { inside: Decimal, outside: Decimal },
}

impl Millage {
    fn rate(&self, inside_city_limits: bool) -> Decimal {
        match *self {
            Millage::Uniform(rate) => rate,
            Millage::CityCounty { inside, outside } => {
                if inside_city_limits {
                    inside
                } else {
                    outside
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTaxRule {
    pub homestead_assessment: Decimal,
    pub non_homestead_assessment: Decimal,
    pub millage: Millage,
    pub homestead_adjustment: Decimal,
    pub non_homestead_adjustment: Decimal,
}

/// Yearly property tax for both exemption cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTax {
    pub yearly_homestead: Decimal,
    pub yearly_non_homestead: Decimal,
}

impl PropertyTax {
    pub fn monthly_homestead(&self) -> Decimal {
        self.yearly_homestead / MONTHS_PER_YEAR
    }

    pub fn monthly_non_homestead(&self) -> Decimal {
        self.yearly_non_homestead / MONTHS_PER_YEAR
    }
}

impl PropertyTaxRule {
    pub fn yearly(&self, sales_price: Decimal, inside_city_limits: bool) -> PropertyTax {
        let millage = self.millage.rate(inside_city_limits);
        PropertyTax {
            yearly_homestead: sales_price * self.homestead_assessment * millage
                + self.homestead_adjustment,
            yearly_non_homestead: sales_price * self.non_homestead_assessment * millage
                + self.non_homestead_adjustment,
        }
    }
}

/// Owner's title bracket: applies when the down payment percent is at most
/// `max_down_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleTier {
    pub max_down_percent: Decimal,
    pub owners_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleRule {
    /// Ascending by `max_down_percent`
    pub owners_tiers: &'static [TitleTier],
    pub lenders_rate: Decimal,
}

impl TitleRule {
    /// First bracket whose bound covers the down payment percent. Past the last
    /// bound the top bracket applies.
    pub fn owners_rate(&self, down_percent: Decimal) -> Decimal {
        self.owners_tiers
            .iter()
            .find(|tier| tier.max_down_percent >= down_percent)
            .or(self.owners_tiers.last())
            .map_or(Decimal::ZERO, |tier| tier.owners_rate)
    }

    pub fn owners_premium(&self, sales_price: Decimal, down_percent: Decimal) -> Decimal {
        sales_price * self.owners_rate(down_percent)
    }

    pub fn lenders_premium(&self, loan_amount: Decimal) -> Decimal {
        loan_amount * self.lenders_rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JurisdictionRule {
    pub property_tax: PropertyTaxRule,
    pub title: TitleRule,
}

/// How a state levies deed transfer tax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferTax {
    /// Per $1,000 of sales price
    SalesPrice { per_thousand: Decimal },
    /// Per $1,000 of the price not covered by the loan; floored at zero
    CashPortion { per_thousand: Decimal },
}

impl TransferTax {
    pub fn amount(&self, sales_price: Decimal, loan_amount: Decimal) -> Decimal {
        match *self {
            TransferTax::SalesPrice { per_thousand } => sales_price / dec!(1000) * per_thousand,
            TransferTax::CashPortion { per_thousand } => {
                ((sales_price - loan_amount) / dec!(1000) * per_thousand).max(Decimal::ZERO)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppraisalFees {
    pub conventional: Decimal,
    pub fha: Decimal,
    pub va: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRule {
    /// Intangible/mortgage tax per $100 of loan amount
    pub mortgage_tax_per_hundred: Decimal,
    pub transfer_tax: TransferTax,
    pub appraisal: AppraisalFees,
}

impl StateRule {
    pub fn mortgage_tax(&self, loan_amount: Decimal) -> Decimal {
        loan_amount / dec!(100) * self.mortgage_tax_per_hundred
    }

    pub fn appraisal_fee(&self, program: LoanProgram) -> Decimal {
        match program {
            LoanProgram::Conventional => self.appraisal.conventional,
            LoanProgram::Fha => self.appraisal.fha,
            LoanProgram::VaFirst | LoanProgram::VaSecond | LoanProgram::VaExempt => {
                self.appraisal.va
            }
        }
    }
}

// Owner's rates are flat across brackets in every modeled jurisdiction.
const COLUMBUS_TITLE: &[TitleTier] = &[
    TitleTier { max_down_percent: dec!(5), owners_rate: dec!(0.0022) },
    TitleTier { max_down_percent: dec!(10), owners_rate: dec!(0.0022) },
    TitleTier { max_down_percent: dec!(15), owners_rate: dec!(0.0022) },
    TitleTier { max_down_percent: dec!(20), owners_rate: dec!(0.0022) },
    TitleTier { max_down_percent: dec!(100), owners_rate: dec!(0.0022) },
];

const HARRIS_TITLE: &[TitleTier] = &[
    TitleTier { max_down_percent: dec!(5), owners_rate: dec!(0.0024) },
    TitleTier { max_down_percent: dec!(10), owners_rate: dec!(0.0024) },
    TitleTier { max_down_percent: dec!(15), owners_rate: dec!(0.0024) },
    TitleTier { max_down_percent: dec!(20), owners_rate: dec!(0.0024) },
    TitleTier { max_down_percent: dec!(100), owners_rate: dec!(0.0024) },
];

const ALABAMA_TITLE: &[TitleTier] = &[
    TitleTier { max_down_percent: dec!(5), owners_rate: dec!(0.0011) },
    TitleTier { max_down_percent: dec!(10), owners_rate: dec!(0.0011) },
    TitleTier { max_down_percent: dec!(15), owners_rate: dec!(0.0011) },
    TitleTier { max_down_percent: dec!(20), owners_rate: dec!(0.0011) },
    TitleTier { max_down_percent: dec!(100), owners_rate: dec!(0.0011) },
];

/// Every supported jurisdiction and state, one field each so lookups stay
/// exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionTable {
    pub columbus_ga: JurisdictionRule,
    pub harris_county_ga: JurisdictionRule,
    pub lee_county_al: JurisdictionRule,
    pub russell_county_al: JurisdictionRule,
    pub georgia: StateRule,
    pub alabama: StateRule,
}

impl JurisdictionTable {
    pub fn standard() -> Self {
        JurisdictionTable {
            columbus_ga: JurisdictionRule {
                property_tax: PropertyTaxRule {
                    homestead_assessment: dec!(0.4),
                    non_homestead_assessment: dec!(0.4),
                    millage: Millage::Uniform(dec!(0.04153)),
                    homestead_adjustment: dec!(-543),
                    non_homestead_adjustment: Decimal::ZERO,
                },
                title: TitleRule {
                    owners_tiers: COLUMBUS_TITLE,
                    lenders_rate: dec!(0.00352),
                },
            },
            harris_county_ga: JurisdictionRule {
                property_tax: PropertyTaxRule {
                    homestead_assessment: dec!(0.4),
                    non_homestead_assessment: dec!(0.4),
                    millage: Millage::Uniform(dec!(0.02764)),
                    homestead_adjustment: Decimal::ZERO,
                    non_homestead_adjustment: dec!(-50),
                },
                title: TitleRule {
                    owners_tiers: HARRIS_TITLE,
                    lenders_rate: dec!(0.0036),
                },
            },
            lee_county_al: JurisdictionRule {
                property_tax: PropertyTaxRule {
                    homestead_assessment: dec!(0.1),
                    non_homestead_assessment: dec!(0.2),
                    millage: Millage::CityCounty {
                        inside: dec!(0.054),
                        outside: dec!(0.041),
                    },
                    homestead_adjustment: dec!(169),
                    non_homestead_adjustment: dec!(169),
                },
                title: TitleRule {
                    owners_tiers: ALABAMA_TITLE,
                    lenders_rate: dec!(0.00216),
                },
            },
            russell_county_al: JurisdictionRule {
                property_tax: PropertyTaxRule {
                    homestead_assessment: dec!(0.1),
                    non_homestead_assessment: dec!(0.2),
                    millage: Millage::CityCounty {
                        inside: dec!(0.059),
                        outside: dec!(0.036),
                    },
                    homestead_adjustment: dec!(-74),
                    non_homestead_adjustment: dec!(-74),
                },
                title: TitleRule {
                    owners_tiers: ALABAMA_TITLE,
                    lenders_rate: dec!(0.00216),
                },
            },
            georgia: StateRule {
                mortgage_tax_per_hundred: dec!(0.30),
                transfer_tax: TransferTax::SalesPrice {
                    per_thousand: dec!(1),
                },
                appraisal: AppraisalFees {
                    conventional: dec!(525),
                    fha: dec!(600),
                    va: dec!(650),
                },
            },
            alabama: StateRule {
                mortgage_tax_per_hundred: dec!(0.15),
                transfer_tax: TransferTax::CashPortion {
                    per_thousand: dec!(1),
                },
                appraisal: AppraisalFees {
                    conventional: dec!(525),
                    fha: dec!(600),
                    va: dec!(600),
                },
            },
        }
    }

    pub fn rule(&self, jurisdiction: Jurisdiction) -> &JurisdictionRule {
        match jurisdiction {
            Jurisdiction::ColumbusGa => &self.columbus_ga,
            Jurisdiction::HarrisCountyGa => &self.harris_county_ga,
            Jurisdiction::LeeCountyAl => &self.lee_county_al,
            Jurisdiction::RussellCountyAl => &self.russell_county_al,
        }
    }

    pub fn state(&self, state: State) -> &StateRule {
        match state {
            State::Georgia => &self.georgia,
            State::Alabama => &self.alabama,
        }
    }
}
