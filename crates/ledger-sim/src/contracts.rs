//! Token contract state models backing the simulated ledger.
//!
//! Three shapes cover the demo contracts:
//! - [`NftState`] - plain non-fungible token (Engine, Wheel)
//! - [`ComposableState`] - non-fungible token whose tokens can hold child
//!   tokens and fungible balances (Car, FuelTank)
//! - [`FungibleState`] - fungible token with a fixed-amount mint (Fuel)
//!
//! Each model enforces only the ownership transitions the harness drives;
//! anything else reverts.

use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::types::{Address, TokenId};

/// Reference to a child token held by a composable parent: the child's
/// contract address plus its identifier within that contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildRef {
    pub contract: Address,
    pub token: TokenId,
}

// ============================================================================
// Plain non-fungible token
// ============================================================================

/// Ownership bookkeeping for a plain non-fungible token.
#[derive(Debug, Default)]
pub struct NftState {
    next_id: u128,
    owners: HashMap<TokenId, Address>,
    approvals: HashMap<TokenId, Address>,
}

impl NftState {
    /// Mint a new token to `to` and return its identifier.
    ///
    /// Identifiers start at 1 and are never reused.
    pub fn mint(&mut self, to: Address) -> TokenId {
        self.next_id += 1;
        let token = TokenId(self.next_id);
        self.owners.insert(token, to);
        token
    }

    /// Direct owner of a token (may be a contract address).
    pub fn owner_of(&self, token: TokenId) -> LedgerResult<Address> {
        self.owners
            .get(&token)
            .copied()
            .ok_or_else(|| LedgerError::Reverted(format!("unknown token {}", token)))
    }

    /// The account currently approved to transfer a token, if any.
    pub fn approved_for(&self, token: TokenId) -> Option<Address> {
        self.approvals.get(&token).copied()
    }

    /// Grant `operator` transfer approval on `token`. Caller must own it.
    pub fn approve(
        &mut self,
        caller: Address,
        operator: Address,
        token: TokenId,
    ) -> LedgerResult<()> {
        let owner = self.owner_of(token)?;
        if owner != caller {
            return Err(LedgerError::Reverted(format!(
                "approve: caller {} does not own token {}",
                caller, token
            )));
        }
        self.approvals.insert(token, operator);
        Ok(())
    }

    /// Check that `spender` may move `token` (owner or approved).
    pub fn authorize(&self, spender: Address, token: TokenId) -> LedgerResult<()> {
        let owner = self.owner_of(token)?;
        if owner == spender || self.approved_for(token) == Some(spender) {
            return Ok(());
        }
        Err(LedgerError::Reverted(format!(
            "{} is neither owner nor approved for token {}",
            spender, token
        )))
    }

    /// Transfer `token` from `from` to `to`, clearing any approval.
    pub fn transfer(&mut self, from: Address, to: Address, token: TokenId) -> LedgerResult<()> {
        let owner = self.owner_of(token)?;
        if owner != from {
            return Err(LedgerError::Reverted(format!(
                "transfer: token {} is owned by {}, not {}",
                token, owner, from
            )));
        }
        self.owners.insert(token, to);
        self.approvals.remove(&token);
        Ok(())
    }
}

// ============================================================================
// Composable non-fungible token
// ============================================================================

/// Ownership bookkeeping for a composable token: a plain NFT plus, per
/// token, the child tokens and fungible balances it holds.
#[derive(Debug, Default)]
pub struct ComposableState {
    pub nft: NftState,
    children: HashMap<TokenId, Vec<ChildRef>>,
    parent_of: HashMap<ChildRef, TokenId>,
    erc20_held: HashMap<TokenId, HashMap<Address, u128>>,
}

impl ComposableState {
    /// Check that `parent` has been minted on this contract.
    pub fn require_token(&self, parent: TokenId) -> LedgerResult<()> {
        self.nft.owner_of(parent).map(|_| ())
    }

    /// Record `child` under `parent`.
    pub fn receive_child(&mut self, parent: TokenId, child: ChildRef) -> LedgerResult<()> {
        self.require_token(parent)?;
        if let Some(existing) = self.parent_of.get(&child) {
            return Err(LedgerError::Reverted(format!(
                "child token {} already attached to parent {}",
                child.token, existing
            )));
        }
        self.children.entry(parent).or_default().push(child);
        self.parent_of.insert(child, parent);
        Ok(())
    }

    /// Remove `child` from `parent`. Reverts if the edge does not exist.
    pub fn release_child(&mut self, parent: TokenId, child: ChildRef) -> LedgerResult<()> {
        match self.parent_of.get(&child) {
            Some(recorded) if *recorded == parent => {}
            Some(recorded) => {
                return Err(LedgerError::Reverted(format!(
                    "child token {} is attached to parent {}, not {}",
                    child.token, recorded, parent
                )));
            }
            None => {
                return Err(LedgerError::Reverted(format!(
                    "child token {} is not attached to any parent",
                    child.token
                )));
            }
        }
        if let Some(list) = self.children.get_mut(&parent) {
            list.retain(|c| c != &child);
        }
        self.parent_of.remove(&child);
        Ok(())
    }

    /// The parent token currently holding `child`, if any.
    pub fn parent_of(&self, child: ChildRef) -> Option<TokenId> {
        self.parent_of.get(&child).copied()
    }

    /// Number of child tokens held by `parent`.
    pub fn child_count(&self, parent: TokenId) -> usize {
        self.children.get(&parent).map(Vec::len).unwrap_or(0)
    }

    /// Credit a fungible balance to `parent`.
    pub fn credit_erc20(
        &mut self,
        parent: TokenId,
        erc20: Address,
        amount: u128,
    ) -> LedgerResult<()> {
        self.require_token(parent)?;
        *self
            .erc20_held
            .entry(parent)
            .or_default()
            .entry(erc20)
            .or_insert(0) += amount;
        Ok(())
    }

    /// Fungible balance of `erc20` held by `parent`.
    pub fn erc20_balance(&self, parent: TokenId, erc20: Address) -> u128 {
        self.erc20_held
            .get(&parent)
            .and_then(|held| held.get(&erc20))
            .copied()
            .unwrap_or(0)
    }
}

// ============================================================================
// Fungible token
// ============================================================================

/// Balance bookkeeping for a fungible token.
#[derive(Debug, Default)]
pub struct FungibleState {
    balances: HashMap<Address, u128>,
    allowances: HashMap<(Address, Address), u128>,
}

impl FungibleState {
    /// Credit `amount` to `to`.
    pub fn mint_to(&mut self, to: Address, amount: u128) {
        *self.balances.entry(to).or_insert(0) += amount;
    }

    /// Current balance of `account`.
    pub fn balance_of(&self, account: Address) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Set the allowance `owner` grants to `spender`.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Move `amount` from `from` to `to` on `spender`'s authority.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> LedgerResult<()> {
        if spender != from {
            let allowance = self.allowances.get(&(from, spender)).copied().unwrap_or(0);
            if allowance < amount {
                return Err(LedgerError::Reverted(format!(
                    "allowance of {} for {} is below {}",
                    from, spender, amount
                )));
            }
            self.allowances.insert((from, spender), allowance - amount);
        }
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::Reverted(format!(
                "balance of {} is below {}",
                from, amount
            )));
        }
        self.balances.insert(from, balance - amount);
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }
}

// ============================================================================
// Deployed contract
// ============================================================================

/// The state of one deployed contract.
#[derive(Debug)]
pub enum ContractState {
    Nft(NftState),
    Composable(ComposableState),
    Fungible(FungibleState),
}

/// A deployed contract: artifact name plus state.
#[derive(Debug)]
pub struct Contract {
    pub artifact: String,
    pub state: ContractState,
}

impl Contract {
    pub fn new(artifact: &str, state: ContractState) -> Self {
        Self {
            artifact: artifact.to_string(),
            state,
        }
    }

    /// NFT ownership view, shared by plain and composable tokens.
    pub fn nft(&self) -> LedgerResult<&NftState> {
        match &self.state {
            ContractState::Nft(nft) => Ok(nft),
            ContractState::Composable(composable) => Ok(&composable.nft),
            ContractState::Fungible(_) => Err(LedgerError::Reverted(format!(
                "{} is not a non-fungible contract",
                self.artifact
            ))),
        }
    }

    /// Mutable NFT ownership view.
    pub fn nft_mut(&mut self) -> LedgerResult<&mut NftState> {
        match &mut self.state {
            ContractState::Nft(nft) => Ok(nft),
            ContractState::Composable(composable) => Ok(&mut composable.nft),
            ContractState::Fungible(_) => Err(LedgerError::Reverted(format!(
                "{} is not a non-fungible contract",
                self.artifact
            ))),
        }
    }

    /// Composable view, if this contract supports child tokens.
    pub fn composable(&self) -> LedgerResult<&ComposableState> {
        match &self.state {
            ContractState::Composable(composable) => Ok(composable),
            _ => Err(LedgerError::Reverted(format!(
                "{} is not a composable contract",
                self.artifact
            ))),
        }
    }

    /// Mutable composable view.
    pub fn composable_mut(&mut self) -> LedgerResult<&mut ComposableState> {
        match &mut self.state {
            ContractState::Composable(composable) => Ok(composable),
            _ => Err(LedgerError::Reverted(format!(
                "{} is not a composable contract",
                self.artifact
            ))),
        }
    }

    /// Fungible view, if this contract is a fungible token.
    pub fn fungible(&self) -> LedgerResult<&FungibleState> {
        match &self.state {
            ContractState::Fungible(fungible) => Ok(fungible),
            _ => Err(LedgerError::Reverted(format!(
                "{} is not a fungible contract",
                self.artifact
            ))),
        }
    }

    /// Mutable fungible view.
    pub fn fungible_mut(&mut self) -> LedgerResult<&mut FungibleState> {
        match &mut self.state {
            ContractState::Fungible(fungible) => Ok(fungible),
            _ => Err(LedgerError::Reverted(format!(
                "{} is not a fungible contract",
                self.artifact
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    #[test]
    fn test_mint_assigns_sequential_ids() {
        let mut nft = NftState::default();
        assert_eq!(nft.mint(account(1)), TokenId(1));
        assert_eq!(nft.mint(account(1)), TokenId(2));
        assert_eq!(nft.owner_of(TokenId(2)).unwrap(), account(1));
    }

    #[test]
    fn test_transfer_requires_current_owner() {
        let mut nft = NftState::default();
        let token = nft.mint(account(1));
        let err = nft.transfer(account(2), account(3), token).unwrap_err();
        assert!(matches!(err, LedgerError::Reverted(_)));
    }

    #[test]
    fn test_transfer_clears_approval() {
        let mut nft = NftState::default();
        let token = nft.mint(account(1));
        nft.approve(account(1), account(9), token).unwrap();
        nft.transfer(account(1), account(2), token).unwrap();
        assert_eq!(nft.approved_for(token), None);
    }

    #[test]
    fn test_child_cannot_attach_twice() {
        let mut composable = ComposableState::default();
        let parent_a = composable.nft.mint(account(1));
        let parent_b = composable.nft.mint(account(1));
        let child = ChildRef {
            contract: account(7),
            token: TokenId(1),
        };
        composable.receive_child(parent_a, child).unwrap();
        let err = composable.receive_child(parent_b, child).unwrap_err();
        assert!(matches!(err, LedgerError::Reverted(_)));
    }

    #[test]
    fn test_release_requires_recorded_edge() {
        let mut composable = ComposableState::default();
        let parent = composable.nft.mint(account(1));
        let child = ChildRef {
            contract: account(7),
            token: TokenId(1),
        };
        assert!(composable.release_child(parent, child).is_err());
        composable.receive_child(parent, child).unwrap();
        composable.release_child(parent, child).unwrap();
        assert_eq!(composable.child_count(parent), 0);
    }

    #[test]
    fn test_fungible_transfer_from_spends_allowance() {
        let mut fuel = FungibleState::default();
        fuel.mint_to(account(1), 100);
        fuel.approve(account(1), account(2), 60);
        fuel.transfer_from(account(2), account(1), account(3), 50)
            .unwrap();
        assert_eq!(fuel.balance_of(account(3)), 50);
        let err = fuel
            .transfer_from(account(2), account(1), account(3), 20)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Reverted(_)));
    }
}
