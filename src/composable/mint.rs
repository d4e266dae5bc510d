//! Mint operations.
//!
//! Each operation submits a mint call to the corresponding contract, waits
//! for inclusion, and reads the newly minted identifier (or amount) from the
//! first emitted Transfer event's third argument.

use crate::composable::types::CarAssembly;
use crate::error::{DriverError, DriverResult};
use crate::registry::{ContractKind, ContractRegistry};
use ledger_sim::{Address, Call, Ledger, Receipt, TokenId, Value};

/// Read the minted identifier or amount from a mint receipt.
///
/// Transfer event: [from, to, tokenId] for NFTs, [from, to, value] for the
/// fungible token.
fn minted_value(receipt: &Receipt) -> DriverResult<u128> {
    let log = receipt.logs.first().ok_or_else(|| {
        DriverError::TransactionFailed("mint confirmed without a Transfer event".to_string())
    })?;
    if log.event != "Transfer" {
        return Err(DriverError::TransactionFailed(format!(
            "mint emitted {} instead of Transfer",
            log.event
        )));
    }
    log.args.get(2).and_then(Value::as_uint).ok_or_else(|| {
        DriverError::TransactionFailed("Transfer event has no value argument".to_string())
    })
}

async fn mint_token<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    kind: ContractKind,
    to: Address,
) -> DriverResult<TokenId> {
    let contract = registry.address_of(kind)?;
    let receipt = ledger.submit(Call::new(contract, to, "mint").arg(to)).await?;
    minted_value(&receipt).map(TokenId)
}

/// Mint a car token to `to` and return its identifier.
pub async fn mint_car<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    to: Address,
) -> DriverResult<TokenId> {
    mint_token(ledger, registry, ContractKind::Car, to).await
}

/// Mint an engine token to `to` and return its identifier.
pub async fn mint_engine<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    to: Address,
) -> DriverResult<TokenId> {
    mint_token(ledger, registry, ContractKind::Engine, to).await
}

/// Mint a wheel token to `to` and return its identifier.
pub async fn mint_wheel<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    to: Address,
) -> DriverResult<TokenId> {
    mint_token(ledger, registry, ContractKind::Wheel, to).await
}

/// Mint a fuel tank token to `to` and return its identifier.
pub async fn mint_fuel_tank<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    to: Address,
) -> DriverResult<TokenId> {
    mint_token(ledger, registry, ContractKind::FuelTank, to).await
}

/// Mint a fuel balance to `to` and return the minted amount.
pub async fn mint_fuel<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    to: Address,
) -> DriverResult<u128> {
    let contract = registry.address_of(ContractKind::Fuel)?;
    let receipt = ledger
        .submit(Call::new(contract, to, "mintTo").arg(to))
        .await?;
    minted_value(&receipt)
}

/// Mint one car, one engine, four wheels, one fuel tank, and a fuel balance
/// to the same address.
pub async fn mint_car_parts<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    to: Address,
) -> DriverResult<CarAssembly> {
    let car = mint_car(ledger, registry, to).await?;
    let engine = mint_engine(ledger, registry, to).await?;
    let wheels = [
        mint_wheel(ledger, registry, to).await?,
        mint_wheel(ledger, registry, to).await?,
        mint_wheel(ledger, registry, to).await?,
        mint_wheel(ledger, registry, to).await?,
    ];
    let fuel_tank = mint_fuel_tank(ledger, registry, to).await?;
    let fuel = mint_fuel(ledger, registry, to).await?;

    Ok(CarAssembly {
        car,
        engine,
        wheels,
        fuel_tank,
        fuel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composable::queries::owner_of;
    use crate::deploy::deploy_contracts;
    use ledger_sim::{Ledger, SimLedger};

    #[tokio::test]
    async fn test_minted_tokens_resolve_to_recipient() {
        let ledger = SimLedger::new();
        let registry = deploy_contracts(&ledger).await.unwrap();
        let alice = ledger.create_account().await.unwrap();

        for kind in [
            ContractKind::Car,
            ContractKind::Engine,
            ContractKind::Wheel,
            ContractKind::FuelTank,
        ] {
            let token = mint_token(&ledger, &registry, kind, alice).await.unwrap();
            assert_eq!(owner_of(&ledger, &registry, kind, token).await.unwrap(), alice);
        }
    }

    #[tokio::test]
    async fn test_mint_fuel_credits_recipient() {
        let ledger = SimLedger::new();
        let registry = deploy_contracts(&ledger).await.unwrap();
        let alice = ledger.create_account().await.unwrap();

        let amount = mint_fuel(&ledger, &registry, alice).await.unwrap();
        assert_eq!(amount, ledger_sim::FUEL_MINT_AMOUNT);

        let fuel = registry.address_of(ContractKind::Fuel).unwrap();
        let balance = ledger
            .query(ledger_sim::Call::new(fuel, alice, "balanceOf").arg(alice))
            .await
            .unwrap();
        assert_eq!(balance.as_uint(), Some(amount));
    }

    #[tokio::test]
    async fn test_mint_car_parts_mints_distinct_wheels() {
        let ledger = SimLedger::new();
        let registry = deploy_contracts(&ledger).await.unwrap();
        let alice = ledger.create_account().await.unwrap();

        let parts = mint_car_parts(&ledger, &registry, alice).await.unwrap();
        let mut wheels = parts.wheels.to_vec();
        wheels.sort();
        wheels.dedup();
        assert_eq!(wheels.len(), 4);
    }

    #[tokio::test]
    async fn test_mint_before_deploy_fails_without_submission() {
        let ledger = SimLedger::new();
        let registry = ContractRegistry::new();
        let alice = ledger.create_account().await.unwrap();

        let err = mint_car(&ledger, &registry, alice).await.unwrap_err();
        assert!(matches!(err, DriverError::NotDeployed(ContractKind::Car)));
        assert_eq!(ledger.transaction_count(), 0);
    }
}
