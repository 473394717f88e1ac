//! The validation contract of the book service as data.
//!
//! A [`Scenario`] is one row of the table: an operation with its inputs and
//! the status the service must answer with.
mod rules;
mod scenario;
mod table;

pub use rules::derive_expected;
pub use scenario::{ExpectedStatus, FilterInput, Fixtures, IdInput, Operation, RawId, Scenario};
pub use table::{NONEXISTENT_BOOK_ID, default_scenarios, not_found_probes, scenarios};
