//! Result types for composable-token operations.

use ledger_sim::{Receipt, TokenId, TxHash};

/// Outcome of one confirmed transaction, kept for the transcript.
#[derive(Debug, Clone, Copy)]
pub struct TxOutcome {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Gas consumed
    pub gas_used: u64,
}

impl TxOutcome {
    pub fn from_receipt(receipt: &Receipt) -> Self {
        Self {
            tx_hash: receipt.tx_hash,
            gas_used: receipt.gas_used,
        }
    }
}

/// Transient record of the identifiers minted for one car build.
///
/// Maps each logical slot to its token identifier. Used only to drive the
/// demo narrative; never persisted and never consulted as a source of
/// ownership truth.
#[derive(Debug, Clone, Copy)]
pub struct CarAssembly {
    /// The parent car token
    pub car: TokenId,
    /// The engine token
    pub engine: TokenId,
    /// The four wheel tokens
    pub wheels: [TokenId; 4],
    /// The fuel tank token
    pub fuel_tank: TokenId,
    /// Fuel balance minted to the owner (18-decimal units)
    pub fuel: u128,
}
