//! Contract registry: logical contract names mapped to deployed handles.

use std::collections::HashMap;
use std::fmt;

use crate::error::{DriverError, DriverResult};
use ledger_sim::{Address, ContractHandle};

/// The five logical contracts of the demo system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Car,
    Engine,
    Wheel,
    FuelTank,
    Fuel,
}

impl ContractKind {
    /// All contract kinds, in deploy order.
    pub const ALL: [ContractKind; 5] = [
        ContractKind::Car,
        ContractKind::Engine,
        ContractKind::Wheel,
        ContractKind::FuelTank,
        ContractKind::Fuel,
    ];

    /// The artifact name the ledger deploys this contract from.
    pub fn artifact(&self) -> &'static str {
        match self {
            ContractKind::Car => "Car",
            ContractKind::Engine => "Engine",
            ContractKind::Wheel => "Wheel",
            ContractKind::FuelTank => "FuelTank",
            ContractKind::Fuel => "Fuel",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.artifact())
    }
}

/// Deployed contract handles keyed by logical name.
///
/// Populated once during the deploy phase and read-only afterwards; every
/// operation resolves its contracts here instead of reaching into shared
/// process state.
#[derive(Debug, Default)]
pub struct ContractRegistry {
    handles: HashMap<ContractKind, ContractHandle>,
}

impl ContractRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the deployed handle for a contract kind.
    pub fn register(&mut self, kind: ContractKind, handle: ContractHandle) {
        self.handles.insert(kind, handle);
    }

    /// Resolve the handle for a kind, failing if it was never registered.
    pub fn handle(&self, kind: ContractKind) -> DriverResult<&ContractHandle> {
        self.handles.get(&kind).ok_or(DriverError::NotDeployed(kind))
    }

    /// Resolve the deployed address for a kind.
    pub fn address_of(&self, kind: ContractKind) -> DriverResult<Address> {
        self.handle(kind).map(|handle| handle.address)
    }

    /// Whether a kind has been registered.
    pub fn is_registered(&self, kind: ContractKind) -> bool {
        self.handles.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_before_registration_fails() {
        let registry = ContractRegistry::new();
        let err = registry.address_of(ContractKind::Engine).unwrap_err();
        assert!(matches!(err, DriverError::NotDeployed(ContractKind::Engine)));
    }

    #[test]
    fn test_register_then_resolve() {
        let mut registry = ContractRegistry::new();
        let address = Address::new([7u8; 20]);
        registry.register(
            ContractKind::Car,
            ContractHandle {
                artifact: "Car".to_string(),
                address,
            },
        );
        assert!(registry.is_registered(ContractKind::Car));
        assert_eq!(registry.address_of(ContractKind::Car).unwrap(), address);
    }
}
