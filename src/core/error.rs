use super::request::LoanProgram;
use rust_decimal::Decimal;

/// Which static table a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Jurisdiction,
    Program,
    Attorney,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LookupKind::Jurisdiction => "jurisdiction",
            LookupKind::Program => "loan program",
            LookupKind::Attorney => "closing attorney",
        };
        write!(f, "{}", name)
    }
}

/// Every way an estimate can be refused. There is no partial result.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid down payment: {0}")]
    InvalidDownPayment(String),
    #[error("{program} base loan {base:.2} exceeds the program ceiling of {ceiling:.2}")]
    LoanLimitExceeded {
        program: LoanProgram,
        base: Decimal,
        ceiling: Decimal,
    },
    #[error("unsupported {kind}: '{value}'")]
    UnsupportedLookup { kind: LookupKind, value: String },
}

impl EstimateError {
    pub(crate) fn unsupported(kind: LookupKind, value: &str) -> Self {
        EstimateError::UnsupportedLookup {
            kind,
            value: value.to_string(),
        }
    }
}
