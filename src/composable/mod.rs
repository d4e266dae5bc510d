//! Composable-token operations.
//!
//! This module provides the ordered operations for assembling and
//! disassembling a composable token graph on an external ledger:
//!
//! - mint operations - create parts and read their identifiers from the
//!   confirmation event log
//! - attach operations - [`attach_via_transfer`], [`attach_via_claim`],
//!   [`fill_fuel_tank`]
//! - detach operations - [`detach_to_account`], [`detach_to_parent`]
//! - [`resell_car`] - transfer an assembled parent with its children
//! - read-only queries - [`owner_of`], [`root_owner_of`],
//!   [`total_children`], [`fuel_level`]
//!
//! Every operation is fire-and-wait and strictly sequential; the ledger is
//! the only source of ownership truth.

mod attach;
mod detach;
mod mint;
mod queries;
mod resell;
mod types;

pub use attach::{attach_via_claim, attach_via_transfer, fill_fuel_tank};
pub use detach::{detach_to_account, detach_to_parent};
pub use mint::{mint_car, mint_car_parts, mint_engine, mint_fuel, mint_fuel_tank, mint_wheel};
pub use queries::{fuel_level, owner_of, root_owner_of, total_children};
pub use resell::resell_car;
pub use types::{CarAssembly, TxOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::deploy_contracts;
    use crate::registry::{ContractKind, ContractRegistry};
    use ledger_sim::{Address, Ledger, SimLedger};

    async fn assemble(
        ledger: &SimLedger,
        registry: &ContractRegistry,
        owner: Address,
        parts: &CarAssembly,
    ) {
        attach_via_transfer(
            ledger,
            registry,
            owner,
            ContractKind::Engine,
            parts.engine,
            ContractKind::Car,
            parts.car,
        )
        .await
        .unwrap();
        for wheel in parts.wheels {
            attach_via_claim(
                ledger,
                registry,
                owner,
                ContractKind::Wheel,
                wheel,
                ContractKind::Car,
                parts.car,
            )
            .await
            .unwrap();
        }
        attach_via_transfer(
            ledger,
            registry,
            owner,
            ContractKind::FuelTank,
            parts.fuel_tank,
            ContractKind::Car,
            parts.car,
        )
        .await
        .unwrap();
    }

    async fn disassemble(
        ledger: &SimLedger,
        registry: &ContractRegistry,
        owner: Address,
        parts: &CarAssembly,
    ) {
        for (kind, token) in [
            (ContractKind::FuelTank, parts.fuel_tank),
            (ContractKind::Engine, parts.engine),
        ]
        .into_iter()
        .chain(parts.wheels.into_iter().map(|w| (ContractKind::Wheel, w)))
        {
            detach_to_account(
                ledger,
                registry,
                owner,
                ContractKind::Car,
                parts.car,
                kind,
                token,
                owner,
            )
            .await
            .unwrap();
        }
    }

    async fn ownership_snapshot(
        ledger: &SimLedger,
        registry: &ContractRegistry,
        parts: &CarAssembly,
    ) -> Vec<Address> {
        let mut owners = vec![
            owner_of(ledger, registry, ContractKind::Engine, parts.engine)
                .await
                .unwrap(),
            owner_of(ledger, registry, ContractKind::FuelTank, parts.fuel_tank)
                .await
                .unwrap(),
        ];
        for wheel in parts.wheels {
            owners.push(
                owner_of(ledger, registry, ContractKind::Wheel, wheel)
                    .await
                    .unwrap(),
            );
        }
        owners
    }

    #[tokio::test]
    async fn test_reassembly_reaches_equivalent_ownership_state() {
        let ledger = SimLedger::new();
        let registry = deploy_contracts(&ledger).await.unwrap();
        let alice = ledger.create_account().await.unwrap();
        let parts = mint_car_parts(&ledger, &registry, alice).await.unwrap();

        assemble(&ledger, &registry, alice, &parts).await;
        let first = ownership_snapshot(&ledger, &registry, &parts).await;
        let first_children = total_children(&ledger, &registry, ContractKind::Car, parts.car)
            .await
            .unwrap();

        disassemble(&ledger, &registry, alice, &parts).await;
        for owner in ownership_snapshot(&ledger, &registry, &parts).await {
            assert_eq!(owner, alice);
        }

        assemble(&ledger, &registry, alice, &parts).await;
        let second = ownership_snapshot(&ledger, &registry, &parts).await;
        let second_children = total_children(&ledger, &registry, ContractKind::Car, parts.car)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first_children, second_children);
    }
}
