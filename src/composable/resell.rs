//! Resale of an assembled parent token.

use crate::composable::types::TxOutcome;
use crate::error::DriverResult;
use crate::registry::{ContractKind, ContractRegistry};
use ledger_sim::{Address, Call, Ledger, TokenId};

/// Transfer an assembled car from `seller` to `buyer`.
///
/// A plain `transferFrom` on the car contract: attached children ride along
/// because their ownership edges point at the car token, not at the seller.
pub async fn resell_car<L: Ledger>(
    ledger: &L,
    registry: &ContractRegistry,
    seller: Address,
    buyer: Address,
    car_token: TokenId,
) -> DriverResult<TxOutcome> {
    let car_contract = registry.address_of(ContractKind::Car)?;

    tracing::debug!(%car_token, %seller, %buyer, "reselling car");
    let receipt = ledger
        .submit(
            Call::new(car_contract, seller, "transferFrom")
                .arg(seller)
                .arg(buyer)
                .arg(car_token),
        )
        .await?;

    Ok(TxOutcome::from_receipt(&receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composable::attach::attach_via_transfer;
    use crate::composable::mint::{mint_car, mint_engine};
    use crate::composable::queries::root_owner_of;
    use crate::deploy::deploy_contracts;
    use ledger_sim::{Ledger, SimLedger};

    #[tokio::test]
    async fn test_resale_moves_root_ownership_of_children() {
        let ledger = SimLedger::new();
        let registry = deploy_contracts(&ledger).await.unwrap();
        let alice = ledger.create_account().await.unwrap();
        let bob = ledger.create_account().await.unwrap();

        let car = mint_car(&ledger, &registry, alice).await.unwrap();
        let engine = mint_engine(&ledger, &registry, alice).await.unwrap();
        attach_via_transfer(
            &ledger,
            &registry,
            alice,
            ContractKind::Engine,
            engine,
            ContractKind::Car,
            car,
        )
        .await
        .unwrap();

        resell_car(&ledger, &registry, alice, bob, car).await.unwrap();

        let car_root = root_owner_of(&ledger, &registry, ContractKind::Car, car)
            .await
            .unwrap();
        let engine_root = root_owner_of(&ledger, &registry, ContractKind::Engine, engine)
            .await
            .unwrap();
        assert_eq!(car_root, bob);
        assert_eq!(engine_root, bob);
    }
}
