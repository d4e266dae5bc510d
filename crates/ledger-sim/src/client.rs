//! The ledger client seam.
//!
//! Orchestration code talks to the ledger exclusively through the [`Ledger`]
//! trait: deploy a named contract, submit a method call and await its
//! receipt, or run a read-only query. The trait is deliberately narrow;
//! method names and argument encodings are contract-defined and flow through
//! untouched.

use crate::error::LedgerResult;
use crate::types::{Address, TxHash, Value};

/// A deployed contract: its artifact name and resolved address.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    /// The artifact name the contract was deployed from
    pub artifact: String,
    /// The address the contract landed at
    pub address: Address,
}

/// A contract method call from a caller account.
#[derive(Debug, Clone)]
pub struct Call {
    /// The contract being called
    pub contract: Address,
    /// The account the call is made from
    pub caller: Address,
    /// Contract-defined method name
    pub method: String,
    /// Positional arguments
    pub args: Vec<Value>,
}

impl Call {
    /// Start a call to `method` on `contract` from `caller`.
    pub fn new(contract: Address, caller: Address, method: &str) -> Self {
        Self {
            contract,
            caller,
            method: method.to_string(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// One event emitted during a transaction.
#[derive(Debug, Clone)]
pub struct EventLog {
    /// The contract that emitted the event
    pub contract: Address,
    /// Contract-defined event name
    pub event: String,
    /// Positional event arguments
    pub args: Vec<Value>,
}

/// The receipt of a confirmed transaction.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Gas consumed by the transaction
    pub gas_used: u64,
    /// Events emitted, in emission order
    pub logs: Vec<EventLog>,
}

/// A remote ledger's contract-call and event-log interface.
///
/// All methods are awaited to completion before the next call is issued;
/// the harness never has two operations in flight concurrently.
#[allow(async_fn_in_trait)]
pub trait Ledger: Send + Sync {
    /// Deploy the named contract artifact and return its handle.
    async fn deploy(&self, artifact: &str) -> LedgerResult<ContractHandle>;

    /// Submit a state-changing call and wait for its inclusion.
    ///
    /// Returns the receipt once confirmed. A reverted call yields
    /// [`LedgerError::Reverted`](crate::LedgerError::Reverted); on-ledger
    /// effects of previously confirmed calls are unaffected.
    async fn submit(&self, call: Call) -> LedgerResult<Receipt>;

    /// Run a read-only call and return its result.
    async fn query(&self, call: Call) -> LedgerResult<Value>;

    /// Create a funded test account.
    async fn create_account(&self) -> LedgerResult<Address>;
}
