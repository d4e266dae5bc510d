//! Ledger client interface and in-process simulated ledger.
//!
//! This crate provides the seam between orchestration code and a ledger:
//! - [`Ledger`] - contract deployment, transaction submission, and
//!   read-only queries
//! - [`Call`], [`Receipt`], [`EventLog`] - the call and confirmation shapes
//! - [`SimLedger`] - an in-process ledger for demos and tests, modeling the
//!   minimal ownership bookkeeping of the demo contracts
//!
//! Orchestration code depends only on the trait; nothing outside this crate
//! touches the simulator's contract models directly.

mod client;
mod contracts;
mod error;
mod sim;
mod types;

pub use client::{Call, ContractHandle, EventLog, Ledger, Receipt};
pub use error::{LedgerError, LedgerResult};
pub use sim::{SimLedger, FUEL_MINT_AMOUNT};
pub use types::{Address, TokenId, TxHash, Value};
