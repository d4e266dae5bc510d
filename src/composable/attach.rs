//! Attach operations: transfer a child token into a parent token's
//! bookkeeping.
//!
//! Two child-NFT mechanisms are provided, selected per asset type by the
//! demo rather than dispatched dynamically:
//!
//! - [`attach_via_transfer`] - a single `safeTransferFrom` carrying the
//!   destination parent token id as encoded transfer data; the receiving
//!   contract interprets the data and records the ownership edge.
//! - [`attach_via_claim`] - grant transfer approval to the parent contract,
//!   then invoke the parent-side `getChild` to pull the approved token in.
//!
//! Plus [`fill_fuel_tank`] for the fungible asset. All are fire-and-wait:
//! submit, await confirmation, report the transaction hash and gas cost.
//! There is no rollback; a failure halts the sequence.

use crate::composable::types::TxOutcome;
use crate::error::{DriverError, DriverResult};
use crate::registry::{ContractKind, ContractRegistry};
use ledger_sim::{Address, Call, Ledger, Receipt, TokenId};

/// Check that the receipt carries the parent contract's confirmation event.
fn confirm_event(receipt: &Receipt, contract: Address, event: &str) -> DriverResult<()> {
    let confirmed = receipt
        .logs
        .iter()
        .any(|log| log.contract == contract && log.event == event);
    if confirmed {
        Ok(())
    } else {
        Err(DriverError::TransactionFailed(format!(
            "confirmation event {} is absent from the receipt",
            event
        )))
    }
}

/// Attach a child token to a parent via transfer-with-data.
///
/// Submits `safeTransferFrom(owner, parentContract, childToken, data)` on
/// the child contract, where `data` encodes the destination parent token id.
pub async fn attach_via_transfer<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    owner: Address,
    child_kind: ContractKind,
    child_token: TokenId,
    parent_kind: ContractKind,
    parent_token: TokenId,
) -> DriverResult<TxOutcome> {
    let child_contract = registry.address_of(child_kind)?;
    let parent_contract = registry.address_of(parent_kind)?;

    tracing::debug!(
        child = %child_kind, %child_token, parent = %parent_kind, %parent_token,
        "attaching via transfer-with-data"
    );
    let receipt = ledger
        .submit(
            Call::new(child_contract, owner, "safeTransferFrom")
                .arg(owner)
                .arg(parent_contract)
                .arg(child_token)
                .arg(parent_token.to_transfer_data()),
        )
        .await?;
    confirm_event(&receipt, parent_contract, "ReceivedChild")?;

    Ok(TxOutcome::from_receipt(&receipt))
}

/// Attach a child token to a parent via approve-then-claim.
///
/// First grants the parent contract transfer approval on the child token,
/// then invokes `getChild` on the parent contract to pull it in. Returns
/// the outcome of the claim transaction.
pub async fn attach_via_claim<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    owner: Address,
    child_kind: ContractKind,
    child_token: TokenId,
    parent_kind: ContractKind,
    parent_token: TokenId,
) -> DriverResult<TxOutcome> {
    let child_contract = registry.address_of(child_kind)?;
    let parent_contract = registry.address_of(parent_kind)?;

    tracing::debug!(
        child = %child_kind, %child_token, parent = %parent_kind, %parent_token,
        "attaching via approve-then-claim"
    );
    ledger
        .submit(
            Call::new(child_contract, owner, "approve")
                .arg(parent_contract)
                .arg(child_token),
        )
        .await?;

    let receipt = ledger
        .submit(
            Call::new(parent_contract, owner, "getChild")
                .arg(owner)
                .arg(parent_token)
                .arg(child_contract)
                .arg(child_token),
        )
        .await?;
    confirm_event(&receipt, parent_contract, "ReceivedChild")?;

    Ok(TxOutcome::from_receipt(&receipt))
}

/// Attach a fungible fuel balance to a fuel tank token.
///
/// Grants the tank contract an allowance on the fuel contract, then invokes
/// `getERC20` on the tank contract to pull the balance in.
pub async fn fill_fuel_tank<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    owner: Address,
    tank_token: TokenId,
    amount: u128,
) -> DriverResult<TxOutcome> {
    let fuel_contract = registry.address_of(ContractKind::Fuel)?;
    let tank_contract = registry.address_of(ContractKind::FuelTank)?;

    tracing::debug!(%tank_token, amount, "filling fuel tank");
    ledger
        .submit(
            Call::new(fuel_contract, owner, "approve")
                .arg(tank_contract)
                .arg(amount),
        )
        .await?;

    let receipt = ledger
        .submit(
            Call::new(tank_contract, owner, "getERC20")
                .arg(owner)
                .arg(tank_token)
                .arg(fuel_contract)
                .arg(amount),
        )
        .await?;
    confirm_event(&receipt, tank_contract, "ReceivedERC20")?;

    Ok(TxOutcome::from_receipt(&receipt))
}
