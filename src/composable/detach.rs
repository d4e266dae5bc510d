//! Detach operations: remove a child token from a parent's bookkeeping.
//!
//! Two mechanisms, mirroring the attach side:
//!
//! - [`detach_to_account`] - `transferChild` lands the child at a plain
//!   account.
//! - [`detach_to_parent`] - `transferChildToParent` moves the child
//!   directly between two parent tokens without passing through an
//!   external account.
//!
//! Same fire-and-wait contract as attach: no rollback, first failure halts
//! the sequence.

use crate::composable::types::TxOutcome;
use crate::error::DriverResult;
use crate::registry::{ContractKind, ContractRegistry};
use ledger_sim::{Address, Call, Ledger, TokenId};

/// Detach a child token from a parent, landing it at `to`.
pub async fn detach_to_account<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    owner: Address,
    parent_kind: ContractKind,
    parent_token: TokenId,
    child_kind: ContractKind,
    child_token: TokenId,
    to: Address,
) -> DriverResult<TxOutcome> {
    let parent_contract = registry.address_of(parent_kind)?;
    let child_contract = registry.address_of(child_kind)?;

    tracing::debug!(
        parent = %parent_kind, %parent_token, child = %child_kind, %child_token, %to,
        "detaching to external account"
    );
    let receipt = ledger
        .submit(
            Call::new(parent_contract, owner, "transferChild")
                .arg(parent_token)
                .arg(to)
                .arg(child_contract)
                .arg(child_token),
        )
        .await?;

    Ok(TxOutcome::from_receipt(&receipt))
}

/// Move a child token directly from one parent token to another.
///
/// The destination parent may live on a different composable contract; the
/// child never passes through an external account.
pub async fn detach_to_parent<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    owner: Address,
    from_parent_kind: ContractKind,
    from_parent_token: TokenId,
    to_parent_kind: ContractKind,
    to_parent_token: TokenId,
    child_kind: ContractKind,
    child_token: TokenId,
) -> DriverResult<TxOutcome> {
    let from_contract = registry.address_of(from_parent_kind)?;
    let to_contract = registry.address_of(to_parent_kind)?;
    let child_contract = registry.address_of(child_kind)?;

    tracing::debug!(
        from = %from_parent_kind, %from_parent_token,
        to = %to_parent_kind, %to_parent_token,
        child = %child_kind, %child_token,
        "detaching to another parent"
    );
    let receipt = ledger
        .submit(
            Call::new(from_contract, owner, "transferChildToParent")
                .arg(from_parent_token)
                .arg(to_contract)
                .arg(to_parent_token)
                .arg(child_contract)
                .arg(child_token),
        )
        .await?;

    Ok(TxOutcome::from_receipt(&receipt))
}
