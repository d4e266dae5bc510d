//! Sequential deployment of the demo contracts.

use crate::error::DriverResult;
use crate::registry::{ContractKind, ContractRegistry};
use ledger_sim::Ledger;

/// Deploy the five demo contracts in a fixed order and return the populated
/// registry.
///
/// Each deployment is awaited before the next begins; on the first failure
/// the partially populated registry is dropped and the error propagates.
pub async fn deploy_contracts<L: Ledger>(ledger: &L) -> DriverResult<ContractRegistry> {
    let mut registry = ContractRegistry::new();
    for kind in ContractKind::ALL {
        let handle = ledger.deploy(kind.artifact()).await?;
        tracing::info!(contract = %kind, address = %handle.address, "deployed contract");
        registry.register(kind, handle);
    }
    Ok(registry)
}
