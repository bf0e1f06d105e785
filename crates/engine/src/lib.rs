//! Ledger consistency engine.
//!
//! Keeps every account's stored balance equal to the sum of the effects of
//! the transactions that reference it, across create, update, delete,
//! transfers and recurring materialization. All mutations run inside one
//! database transaction per operation.

pub use accounts::Account;
pub use commands::{AccountCmd, Page, RecurringRuleCmd, SummaryQuery, TransactionCmd, TransferCmd};
pub use effects::{Effect, effects_of, reversal};
pub use error::EngineError;
pub use ops::{CategorySummary, Engine, EngineBuilder, Summary, TransactionPage};
pub use recurring::{Frequency, RecurringRule};
pub use transactions::{Transaction, TransactionKind};

mod accounts;
mod commands;
mod effects;
mod error;
mod ops;
mod recurring;
mod transactions;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
