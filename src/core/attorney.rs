use super::request::AttorneyFirm;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One named charge on a firm's settlement schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeLine {
    pub label: &'static str,
    pub amount: Decimal,
}

/// Ordered fee lines billed by a closing attorney
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttorneySchedule {
    pub lines: &'static [FeeLine],
}

impl AttorneySchedule {
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|line| line.amount).sum()
    }
}

const STANDARD_SETTLEMENT: &[FeeLine] = &[
    FeeLine { label: "Attorney Fee", amount: dec!(1075) },
    FeeLine { label: "Title Search Fee", amount: dec!(250) },
    FeeLine { label: "Recording Fee", amount: dec!(70) },
];

const CHATTAHOOCHEE_CLOSING: &[FeeLine] = &[
    FeeLine { label: "Settlement Fee", amount: dec!(950) },
    FeeLine { label: "Title Examination", amount: dec!(300) },
    FeeLine { label: "Title Commitment Fee", amount: dec!(125) },
    FeeLine { label: "Courier Fee", amount: dec!(50) },
    FeeLine { label: "Recording Service Fee", amount: dec!(95) },
];

const RIVER_CITY_LAW: &[FeeLine] = &[
    FeeLine { label: "Attorney Fee", amount: dec!(1150) },
    FeeLine { label: "Title Search Fee", amount: dec!(275) },
    FeeLine { label: "E-Recording Fee", amount: dec!(35) },
    FeeLine { label: "Wire Fee", amount: dec!(25) },
];

const LEE_RUSSELL_TITLE: &[FeeLine] = &[
    FeeLine { label: "Closing Fee", amount: dec!(800) },
    FeeLine { label: "Abstract Fee", amount: dec!(200) },
    FeeLine { label: "Document Preparation", amount: dec!(250) },
    FeeLine { label: "Closing Protection Letter", amount: dec!(25) },
    FeeLine { label: "Recording Fee", amount: dec!(60) },
];

/// Settlement schedules for the lender's standard closing and each firm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttorneyTable {
    pub standard: AttorneySchedule,
    pub chattahoochee_closing: AttorneySchedule,
    pub river_city_law: AttorneySchedule,
    pub lee_russell_title: AttorneySchedule,
}

impl AttorneyTable {
    pub fn standard() -> Self {
        AttorneyTable {
            standard: AttorneySchedule { lines: STANDARD_SETTLEMENT },
            chattahoochee_closing: AttorneySchedule { lines: CHATTAHOOCHEE_CLOSING },
            river_city_law: AttorneySchedule { lines: RIVER_CITY_LAW },
            lee_russell_title: AttorneySchedule { lines: LEE_RUSSELL_TITLE },
        }
    }

    /// Schedule for the chosen firm, or the lender's standard settlement
    /// schedule when no firm was chosen.
    pub fn schedule(&self, firm: Option<AttorneyFirm>) -> &AttorneySchedule {
        match firm {
            None => &self.standard,
            Some(AttorneyFirm::ChattahoocheeClosing) => &self.chattahoochee_closing,
            Some(AttorneyFirm::RiverCityLaw) => &self.river_city_law,
            Some(AttorneyFirm::LeeRussellTitle) => &self.lee_russell_title,
        }
    }
}
