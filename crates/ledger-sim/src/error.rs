//! Error types for ledger operations.

use thiserror::Error;

use crate::types::Address;

/// Result type for ledger operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// No contract artifact with this name is known to the ledger
    #[error("Unknown contract artifact: {0}")]
    UnknownArtifact(String),

    /// No contract is deployed at this address
    #[error("No contract at address: {0}")]
    UnknownContract(Address),

    /// The contract does not expose this method
    #[error("Contract {contract} has no method {method}")]
    UnknownMethod { contract: Address, method: String },

    /// The call was included but reverted
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// A call argument had the wrong shape
    #[error("Bad call argument: {0}")]
    BadArgument(String),
}
