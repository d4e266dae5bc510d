//! Read-only ownership queries, used by the demo transcript and tests.

use crate::error::{DriverError, DriverResult};
use crate::registry::{ContractKind, ContractRegistry};
use ledger_sim::{Address, Call, Ledger, TokenId, Value};

fn expect_address(value: Value, method: &str) -> DriverResult<Address> {
    value.as_address().ok_or_else(|| {
        DriverError::TransactionFailed(format!("{} returned a non-address value", method))
    })
}

fn expect_uint(value: Value, method: &str) -> DriverResult<u128> {
    value.as_uint().ok_or_else(|| {
        DriverError::TransactionFailed(format!("{} returned a non-numeric value", method))
    })
}

/// Direct owner of a token; a contract address when the token is attached.
pub async fn owner_of<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    kind: ContractKind,
    token: TokenId,
) -> DriverResult<Address> {
    let contract = registry.address_of(kind)?;
    let value = ledger
        .query(Call::new(contract, Address::ZERO, "ownerOf").arg(token))
        .await?;
    expect_address(value, "ownerOf")
}

/// The externally owned account at the top of a token's ownership chain.
pub async fn root_owner_of<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    kind: ContractKind,
    token: TokenId,
) -> DriverResult<Address> {
    let contract = registry.address_of(kind)?;
    let value = ledger
        .query(Call::new(contract, Address::ZERO, "rootOwnerOf").arg(token))
        .await?;
    expect_address(value, "rootOwnerOf")
}

/// Number of child tokens currently attached to a parent token.
pub async fn total_children<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    kind: ContractKind,
    parent_token: TokenId,
) -> DriverResult<u128> {
    let contract = registry.address_of(kind)?;
    let value = ledger
        .query(Call::new(contract, Address::ZERO, "totalChildTokens").arg(parent_token))
        .await?;
    expect_uint(value, "totalChildTokens")
}

/// Fuel balance held by a fuel tank token.
pub async fn fuel_level<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    tank_token: TokenId,
) -> DriverResult<u128> {
    let tank_contract = registry.address_of(ContractKind::FuelTank)?;
    let fuel_contract = registry.address_of(ContractKind::Fuel)?;
    let value = ledger
        .query(
            Call::new(tank_contract, Address::ZERO, "balanceOfERC20")
                .arg(tank_token)
                .arg(fuel_contract),
        )
        .await?;
    expect_uint(value, "balanceOfERC20")
}
