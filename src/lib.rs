//! Driver for assembling and disassembling composable token graphs.
//!
//! This crate provides the orchestration layer of the demo harness:
//! - [`ContractRegistry`] - deployed contract handles keyed by logical name
//! - [`deploy_contracts`] - sequential deployment of the five demo contracts
//! - `composable` operations - mint, attach, detach, and resell, each
//!   submitting a contract call and awaiting its receipt
//!
//! No ledger state is mirrored locally: every operation resolves contracts
//! through the registry, submits through the [`Ledger`] trait, and reads
//! results back from the confirmation receipt's event log.

mod composable;
mod deploy;
mod error;
mod registry;

pub use composable::{
    attach_via_claim, attach_via_transfer, detach_to_account, detach_to_parent, fill_fuel_tank,
    fuel_level, mint_car, mint_car_parts, mint_engine, mint_fuel, mint_fuel_tank, mint_wheel,
    owner_of, resell_car, root_owner_of, total_children, CarAssembly, TxOutcome,
};
pub use deploy::deploy_contracts;
pub use error::{DriverError, DriverResult};
pub use registry::{ContractKind, ContractRegistry};

// Re-export commonly used types from the ledger crate
pub use ledger_sim::{Address, Call, ContractHandle, Ledger, Receipt, TokenId, TxHash, Value};
