pub mod amortization;
pub mod attorney;
pub mod config;
pub mod error;
pub mod estimate;
pub mod jurisdiction;
pub mod money;
pub mod prepaids;
pub mod program;
pub mod request;

// Flat public surface for domain types and functions.
pub use config::{EngineConfig, RateBook};
pub use error::EstimateError;
pub use estimate::{Estimator, EstimateResult, LineItem, ProgramEstimate, DEFAULT_COMPARISON};
pub use money::{format_percent, format_usd, round_cents};
pub use request::{AttorneyFirm, DownPayment, Jurisdiction, LoanProgram, LoanRequest};
