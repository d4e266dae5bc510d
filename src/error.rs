//! Error types for composable-token orchestration.

use thiserror::Error;

use crate::registry::ContractKind;
use ledger_sim::LedgerError;

/// Result type for driver operations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Errors that can occur while driving the composable-token sequence.
///
/// Both kinds propagate unchanged to the top-level driver; there is no
/// local recovery or compensation anywhere in the sequence.
#[derive(Error, Debug)]
pub enum DriverError {
    /// A contract was resolved before the deploy phase registered it.
    /// Raised before any transaction is submitted.
    #[error("Contract not deployed: {0}")]
    NotDeployed(ContractKind),

    /// The ledger rejected or reverted a submitted operation, or an
    /// expected confirmation event was absent from the receipt.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<LedgerError> for DriverError {
    fn from(err: LedgerError) -> Self {
        DriverError::TransactionFailed(err.to_string())
    }
}
