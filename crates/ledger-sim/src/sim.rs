//! In-process simulated ledger.
//!
//! [`SimLedger`] plays the role an in-process development network plays for
//! the real system: it knows the five demo contract artifacts by name,
//! executes their ownership transitions atomically, and hands back receipts
//! with ordered event logs and a gas figure. Addresses and transaction
//! hashes are derived deterministically from a monotonic nonce.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::client::{Call, ContractHandle, EventLog, Ledger, Receipt};
use crate::contracts::{
    ChildRef, ComposableState, Contract, ContractState, FungibleState, NftState,
};
use crate::error::{LedgerError, LedgerResult};
use crate::types::{Address, TokenId, TxHash, Value};

/// Amount credited by one fungible `mintTo` call (1000 units at 18 decimals).
pub const FUEL_MINT_AMOUNT: u128 = 1_000_000_000_000_000_000_000;

/// An in-process ledger implementing [`Ledger`].
#[derive(Debug, Default)]
pub struct SimLedger {
    state: Mutex<SimState>,
}

#[derive(Debug, Default)]
struct SimState {
    nonce: u64,
    contracts: HashMap<Address, Contract>,
    submitted: u64,
}

impl SimLedger {
    /// Create an empty simulated ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions submitted so far (deploys and calls).
    ///
    /// Tests use this to assert that a failing operation never reached the
    /// ledger.
    pub fn transaction_count(&self) -> u64 {
        self.lock().submitted
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Ledger for SimLedger {
    async fn deploy(&self, artifact: &str) -> LedgerResult<ContractHandle> {
        let mut state = self.lock();
        let contract = match artifact {
            "Car" | "FuelTank" => {
                Contract::new(artifact, ContractState::Composable(ComposableState::default()))
            }
            "Engine" | "Wheel" => {
                Contract::new(artifact, ContractState::Nft(NftState::default()))
            }
            "Fuel" => Contract::new(artifact, ContractState::Fungible(FungibleState::default())),
            other => return Err(LedgerError::UnknownArtifact(other.to_string())),
        };

        state.nonce += 1;
        state.submitted += 1;
        let address = contract_address(state.nonce, artifact);
        tracing::debug!(artifact, %address, "deployed contract");
        state.contracts.insert(address, contract);

        Ok(ContractHandle {
            artifact: artifact.to_string(),
            address,
        })
    }

    async fn submit(&self, call: Call) -> LedgerResult<Receipt> {
        let mut state = self.lock();
        state.nonce += 1;
        state.submitted += 1;
        let tx_hash = transaction_hash(state.nonce, &call);

        let logs = state.execute(&call)?;
        let gas_used = gas_for(&call, &logs);
        tracing::debug!(method = %call.method, %tx_hash, gas_used, "confirmed transaction");

        Ok(Receipt {
            tx_hash,
            gas_used,
            logs,
        })
    }

    async fn query(&self, call: Call) -> LedgerResult<Value> {
        self.lock().query(&call)
    }

    async fn create_account(&self) -> LedgerResult<Address> {
        let mut bytes = [0u8; 20];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(Address::new(bytes))
    }
}

impl SimState {
    fn contract(&self, address: Address) -> LedgerResult<&Contract> {
        self.contracts
            .get(&address)
            .ok_or(LedgerError::UnknownContract(address))
    }

    fn contract_mut(&mut self, address: Address) -> LedgerResult<&mut Contract> {
        self.contracts
            .get_mut(&address)
            .ok_or(LedgerError::UnknownContract(address))
    }

    // ========================================================================
    // State-changing methods
    // ========================================================================

    fn execute(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        match call.method.as_str() {
            "mint" => self.mint(call),
            "mintTo" => self.mint_to(call),
            "approve" => self.approve(call),
            "safeTransferFrom" => self.safe_transfer_from(call),
            "transferFrom" => self.transfer_from(call),
            "getChild" => self.get_child(call),
            "getERC20" => self.get_erc20(call),
            "transferChild" => self.transfer_child(call),
            "transferChildToParent" => self.transfer_child_to_parent(call),
            other => Err(LedgerError::UnknownMethod {
                contract: call.contract,
                method: other.to_string(),
            }),
        }
    }

    /// `mint(to)` on an NFT or composable contract.
    fn mint(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let to = arg_address(call, 0)?;
        let token = self.contract_mut(call.contract)?.nft_mut()?.mint(to);
        Ok(vec![EventLog {
            contract: call.contract,
            event: "Transfer".to_string(),
            args: vec![Address::ZERO.into(), to.into(), token.into()],
        }])
    }

    /// `mintTo(to)` on the fungible contract. Mints a fixed amount.
    fn mint_to(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let to = arg_address(call, 0)?;
        self.contract_mut(call.contract)?
            .fungible_mut()?
            .mint_to(to, FUEL_MINT_AMOUNT);
        Ok(vec![EventLog {
            contract: call.contract,
            event: "Transfer".to_string(),
            args: vec![Address::ZERO.into(), to.into(), FUEL_MINT_AMOUNT.into()],
        }])
    }

    /// `approve(operator, tokenId)` on NFTs, `approve(spender, amount)` on
    /// the fungible contract.
    fn approve(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let operator = arg_address(call, 0)?;
        let contract = self.contract_mut(call.contract)?;
        if let ContractState::Fungible(fungible) = &mut contract.state {
            let amount = arg_uint(call, 1)?;
            fungible.approve(call.caller, operator, amount);
            return Ok(vec![EventLog {
                contract: call.contract,
                event: "Approval".to_string(),
                args: vec![call.caller.into(), operator.into(), amount.into()],
            }]);
        }

        let token = arg_token(call, 1)?;
        contract.nft_mut()?.approve(call.caller, operator, token)?;
        Ok(vec![EventLog {
            contract: call.contract,
            event: "Approval".to_string(),
            args: vec![call.caller.into(), operator.into(), token.into()],
        }])
    }

    /// `safeTransferFrom(from, to, tokenId, data)`.
    ///
    /// When `to` is a composable contract the data must carry the
    /// destination parent token id; the receiving contract records the
    /// ownership edge. A plain account destination behaves like
    /// `transferFrom`.
    fn safe_transfer_from(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let from = arg_address(call, 0)?;
        let to = arg_address(call, 1)?;
        let token = arg_token(call, 2)?;

        let nft = self.contract(call.contract)?.nft()?;
        nft.authorize(call.caller, token)?;
        let owner = nft.owner_of(token)?;
        if owner != from {
            return Err(LedgerError::Reverted(format!(
                "token {} is owned by {}, not {}",
                token, owner, from
            )));
        }

        if self.contracts.contains_key(&to) {
            // Contract destination: must be composable and the data must
            // name one of its tokens.
            let data = call
                .args
                .get(3)
                .and_then(Value::as_bytes)
                .ok_or_else(|| {
                    LedgerError::Reverted(format!(
                        "contract {} cannot receive a token without transfer data",
                        to
                    ))
                })?;
            let parent = TokenId::from_transfer_data(data).ok_or_else(|| {
                LedgerError::BadArgument("transfer data is not a 32-byte token id".to_string())
            })?;
            self.contract(to)?.composable()?.require_token(parent)?;

            self.contract_mut(call.contract)?
                .nft_mut()?
                .transfer(from, to, token)?;
            self.contract_mut(to)?.composable_mut()?.receive_child(
                parent,
                ChildRef {
                    contract: call.contract,
                    token,
                },
            )?;

            Ok(vec![
                EventLog {
                    contract: call.contract,
                    event: "Transfer".to_string(),
                    args: vec![from.into(), to.into(), token.into()],
                },
                EventLog {
                    contract: to,
                    event: "ReceivedChild".to_string(),
                    args: vec![
                        from.into(),
                        parent.into(),
                        call.contract.into(),
                        token.into(),
                    ],
                },
            ])
        } else {
            self.contract_mut(call.contract)?
                .nft_mut()?
                .transfer(from, to, token)?;
            Ok(vec![EventLog {
                contract: call.contract,
                event: "Transfer".to_string(),
                args: vec![from.into(), to.into(), token.into()],
            }])
        }
    }

    /// `transferFrom(from, to, tokenId)` - plain NFT transfer.
    fn transfer_from(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let from = arg_address(call, 0)?;
        let to = arg_address(call, 1)?;
        let token = arg_token(call, 2)?;

        let nft = self.contract(call.contract)?.nft()?;
        nft.authorize(call.caller, token)?;

        self.contract_mut(call.contract)?
            .nft_mut()?
            .transfer(from, to, token)?;
        Ok(vec![EventLog {
            contract: call.contract,
            event: "Transfer".to_string(),
            args: vec![from.into(), to.into(), token.into()],
        }])
    }

    /// `getChild(from, parentTokenId, childContract, childTokenId)` on a
    /// composable contract: pull in a child token previously approved to
    /// this contract's address.
    fn get_child(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let from = arg_address(call, 0)?;
        let parent = arg_token(call, 1)?;
        let child_contract = arg_address(call, 2)?;
        let child_token = arg_token(call, 3)?;

        if call.caller != from {
            return Err(LedgerError::Reverted(format!(
                "getChild: caller {} is not {}",
                call.caller, from
            )));
        }
        self.contract(call.contract)?.composable()?.require_token(parent)?;

        let child_nft = self.contract(child_contract)?.nft()?;
        let owner = child_nft.owner_of(child_token)?;
        if owner != from {
            return Err(LedgerError::Reverted(format!(
                "getChild: token {} is owned by {}, not {}",
                child_token, owner, from
            )));
        }
        if child_nft.approved_for(child_token) != Some(call.contract) {
            return Err(LedgerError::Reverted(format!(
                "getChild: token {} is not approved to {}",
                child_token, call.contract
            )));
        }

        self.contract_mut(child_contract)?
            .nft_mut()?
            .transfer(from, call.contract, child_token)?;
        self.contract_mut(call.contract)?.composable_mut()?.receive_child(
            parent,
            ChildRef {
                contract: child_contract,
                token: child_token,
            },
        )?;

        Ok(vec![
            EventLog {
                contract: child_contract,
                event: "Transfer".to_string(),
                args: vec![from.into(), call.contract.into(), child_token.into()],
            },
            EventLog {
                contract: call.contract,
                event: "ReceivedChild".to_string(),
                args: vec![
                    from.into(),
                    parent.into(),
                    child_contract.into(),
                    child_token.into(),
                ],
            },
        ])
    }

    /// `getERC20(from, parentTokenId, erc20Contract, amount)` on a
    /// composable contract: pull in an approved fungible balance.
    fn get_erc20(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let from = arg_address(call, 0)?;
        let parent = arg_token(call, 1)?;
        let erc20 = arg_address(call, 2)?;
        let amount = arg_uint(call, 3)?;

        if call.caller != from {
            return Err(LedgerError::Reverted(format!(
                "getERC20: caller {} is not {}",
                call.caller, from
            )));
        }
        self.contract(call.contract)?.composable()?.require_token(parent)?;

        self.contract_mut(erc20)?.fungible_mut()?.transfer_from(
            call.contract,
            from,
            call.contract,
            amount,
        )?;
        self.contract_mut(call.contract)?
            .composable_mut()?
            .credit_erc20(parent, erc20, amount)?;

        Ok(vec![
            EventLog {
                contract: erc20,
                event: "Transfer".to_string(),
                args: vec![from.into(), call.contract.into(), amount.into()],
            },
            EventLog {
                contract: call.contract,
                event: "ReceivedERC20".to_string(),
                args: vec![from.into(), parent.into(), erc20.into(), amount.into()],
            },
        ])
    }

    /// `transferChild(parentTokenId, to, childContract, childTokenId)`:
    /// detach a child token to an external account.
    fn transfer_child(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let parent = arg_token(call, 0)?;
        let to = arg_address(call, 1)?;
        let child_contract = arg_address(call, 2)?;
        let child_token = arg_token(call, 3)?;

        self.require_root_owner(call.contract, parent, call.caller)?;

        let child = ChildRef {
            contract: child_contract,
            token: child_token,
        };
        self.contract_mut(call.contract)?
            .composable_mut()?
            .release_child(parent, child)?;
        self.contract_mut(child_contract)?
            .nft_mut()?
            .transfer(call.contract, to, child_token)?;

        Ok(vec![
            EventLog {
                contract: call.contract,
                event: "TransferChild".to_string(),
                args: vec![
                    parent.into(),
                    to.into(),
                    child_contract.into(),
                    child_token.into(),
                ],
            },
            EventLog {
                contract: child_contract,
                event: "Transfer".to_string(),
                args: vec![call.contract.into(), to.into(), child_token.into()],
            },
        ])
    }

    /// `transferChildToParent(fromParentTokenId, toContract, toParentTokenId,
    /// childContract, childTokenId)`: move a child directly between two
    /// parent tokens without passing through an external account.
    fn transfer_child_to_parent(&mut self, call: &Call) -> LedgerResult<Vec<EventLog>> {
        let from_parent = arg_token(call, 0)?;
        let to_contract = arg_address(call, 1)?;
        let to_parent = arg_token(call, 2)?;
        let child_contract = arg_address(call, 3)?;
        let child_token = arg_token(call, 4)?;

        self.require_root_owner(call.contract, from_parent, call.caller)?;
        self.contract(to_contract)?
            .composable()?
            .require_token(to_parent)?;

        let child = ChildRef {
            contract: child_contract,
            token: child_token,
        };
        self.contract_mut(call.contract)?
            .composable_mut()?
            .release_child(from_parent, child)?;
        self.contract_mut(child_contract)?.nft_mut()?.transfer(
            call.contract,
            to_contract,
            child_token,
        )?;
        self.contract_mut(to_contract)?
            .composable_mut()?
            .receive_child(to_parent, child)?;

        Ok(vec![
            EventLog {
                contract: call.contract,
                event: "TransferChild".to_string(),
                args: vec![
                    from_parent.into(),
                    to_contract.into(),
                    child_contract.into(),
                    child_token.into(),
                ],
            },
            EventLog {
                contract: child_contract,
                event: "Transfer".to_string(),
                args: vec![call.contract.into(), to_contract.into(), child_token.into()],
            },
            EventLog {
                contract: to_contract,
                event: "ReceivedChild".to_string(),
                args: vec![
                    call.contract.into(),
                    to_parent.into(),
                    child_contract.into(),
                    child_token.into(),
                ],
            },
        ])
    }

    // ========================================================================
    // Read-only methods
    // ========================================================================

    fn query(&self, call: &Call) -> LedgerResult<Value> {
        match call.method.as_str() {
            "ownerOf" => {
                let token = arg_token(call, 0)?;
                let owner = self.contract(call.contract)?.nft()?.owner_of(token)?;
                Ok(owner.into())
            }
            "rootOwnerOf" => {
                let token = arg_token(call, 0)?;
                let root = self.root_owner(call.contract, token)?;
                Ok(root.into())
            }
            "balanceOf" => {
                let account = arg_address(call, 0)?;
                let balance = self.contract(call.contract)?.fungible()?.balance_of(account);
                Ok(balance.into())
            }
            "balanceOfERC20" => {
                let parent = arg_token(call, 0)?;
                let erc20 = arg_address(call, 1)?;
                let held = self
                    .contract(call.contract)?
                    .composable()?
                    .erc20_balance(parent, erc20);
                Ok(held.into())
            }
            "totalChildTokens" => {
                let parent = arg_token(call, 0)?;
                let count = self
                    .contract(call.contract)?
                    .composable()?
                    .child_count(parent);
                Ok((count as u128).into())
            }
            "childExists" => {
                let child_contract = arg_address(call, 0)?;
                let child_token = arg_token(call, 1)?;
                let attached = self
                    .contract(call.contract)?
                    .composable()?
                    .parent_of(ChildRef {
                        contract: child_contract,
                        token: child_token,
                    })
                    .is_some();
                Ok(Value::Uint(attached as u128))
            }
            other => Err(LedgerError::UnknownMethod {
                contract: call.contract,
                method: other.to_string(),
            }),
        }
    }

    /// Resolve the externally owned account at the top of a token's
    /// ownership chain, walking parent edges through composable contracts.
    fn root_owner(&self, contract: Address, token: TokenId) -> LedgerResult<Address> {
        let mut current = (contract, token);
        loop {
            let owner = self.contract(current.0)?.nft()?.owner_of(current.1)?;
            let Some(holder) = self.contracts.get(&owner) else {
                return Ok(owner);
            };
            let Ok(composable) = holder.composable() else {
                return Ok(owner);
            };
            match composable.parent_of(ChildRef {
                contract: current.0,
                token: current.1,
            }) {
                Some(parent) => current = (owner, parent),
                None => return Ok(owner),
            }
        }
    }

    fn require_root_owner(
        &self,
        contract: Address,
        parent: TokenId,
        caller: Address,
    ) -> LedgerResult<()> {
        let root = self.root_owner(contract, parent)?;
        if root != caller {
            return Err(LedgerError::Reverted(format!(
                "caller {} is not the root owner of parent token {}",
                caller, parent
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Argument access
// ============================================================================

fn arg(call: &Call, index: usize) -> LedgerResult<&Value> {
    call.args.get(index).ok_or_else(|| {
        LedgerError::BadArgument(format!("{} expects an argument at index {}", call.method, index))
    })
}

fn arg_address(call: &Call, index: usize) -> LedgerResult<Address> {
    arg(call, index)?.as_address().ok_or_else(|| {
        LedgerError::BadArgument(format!("{} argument {} must be an address", call.method, index))
    })
}

fn arg_uint(call: &Call, index: usize) -> LedgerResult<u128> {
    arg(call, index)?.as_uint().ok_or_else(|| {
        LedgerError::BadArgument(format!("{} argument {} must be a uint", call.method, index))
    })
}

fn arg_token(call: &Call, index: usize) -> LedgerResult<TokenId> {
    arg_uint(call, index).map(TokenId)
}

// ============================================================================
// Deterministic identifiers and gas
// ============================================================================

fn contract_address(nonce: u64, artifact: &str) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(b"contract");
    hasher.update(nonce.to_be_bytes());
    hasher.update(artifact.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[..20]);
    Address::new(bytes)
}

fn transaction_hash(nonce: u64, call: &Call) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(nonce.to_be_bytes());
    hasher.update(call.contract.to_bytes());
    hasher.update(call.caller.to_bytes());
    hasher.update(call.method.as_bytes());
    for arg in &call.args {
        match arg {
            Value::Address(addr) => {
                hasher.update([0u8]);
                hasher.update(addr.to_bytes());
            }
            Value::Uint(value) => {
                hasher.update([1u8]);
                hasher.update(value.to_be_bytes());
            }
            Value::Bytes(bytes) => {
                hasher.update([2u8]);
                hasher.update(bytes);
            }
        }
    }
    TxHash::new(hasher.finalize().into())
}

fn gas_for(call: &Call, logs: &[EventLog]) -> u64 {
    21_000 + 1_200 * call.args.len() as u64 + 8_000 * logs.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn deploy_pair() -> (SimLedger, Address, Address, Address) {
        let ledger = SimLedger::new();
        let car = ledger.deploy("Car").await.unwrap().address;
        let engine = ledger.deploy("Engine").await.unwrap().address;
        let alice = ledger.create_account().await.unwrap();
        (ledger, car, engine, alice)
    }

    #[tokio::test]
    async fn test_unknown_artifact_is_rejected() {
        let ledger = SimLedger::new();
        let err = ledger.deploy("Rocket").await.unwrap_err();
        assert!(matches!(err, LedgerError::UnknownArtifact(_)));
    }

    #[tokio::test]
    async fn test_mint_emits_transfer_from_zero() {
        let (ledger, _car, engine, alice) = deploy_pair().await;
        let receipt = ledger
            .submit(Call::new(engine, alice, "mint").arg(alice))
            .await
            .unwrap();
        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(receipt.logs[0].event, "Transfer");
        assert_eq!(receipt.logs[0].args[0].as_address(), Some(Address::ZERO));
        assert_eq!(receipt.logs[0].args[1].as_address(), Some(alice));
        assert_eq!(receipt.logs[0].args[2].as_token_id(), Some(TokenId(1)));
    }

    #[tokio::test]
    async fn test_transfer_with_data_attaches_child() {
        let (ledger, car, engine, alice) = deploy_pair().await;
        ledger
            .submit(Call::new(car, alice, "mint").arg(alice))
            .await
            .unwrap();
        ledger
            .submit(Call::new(engine, alice, "mint").arg(alice))
            .await
            .unwrap();

        ledger
            .submit(
                Call::new(engine, alice, "safeTransferFrom")
                    .arg(alice)
                    .arg(car)
                    .arg(TokenId(1))
                    .arg(TokenId(1).to_transfer_data()),
            )
            .await
            .unwrap();

        let owner = ledger
            .query(Call::new(engine, alice, "ownerOf").arg(TokenId(1)))
            .await
            .unwrap();
        assert_eq!(owner.as_address(), Some(car));

        let root = ledger
            .query(Call::new(engine, alice, "rootOwnerOf").arg(TokenId(1)))
            .await
            .unwrap();
        assert_eq!(root.as_address(), Some(alice));
    }

    #[tokio::test]
    async fn test_transfer_with_data_requires_existing_parent() {
        let (ledger, car, engine, alice) = deploy_pair().await;
        ledger
            .submit(Call::new(engine, alice, "mint").arg(alice))
            .await
            .unwrap();

        let err = ledger
            .submit(
                Call::new(engine, alice, "safeTransferFrom")
                    .arg(alice)
                    .arg(car)
                    .arg(TokenId(1))
                    .arg(TokenId(9).to_transfer_data()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Reverted(_)));
    }

    #[tokio::test]
    async fn test_detach_requires_root_owner() {
        let (ledger, car, engine, alice) = deploy_pair().await;
        let mallory = ledger.create_account().await.unwrap();
        ledger
            .submit(Call::new(car, alice, "mint").arg(alice))
            .await
            .unwrap();
        ledger
            .submit(Call::new(engine, alice, "mint").arg(alice))
            .await
            .unwrap();
        ledger
            .submit(
                Call::new(engine, alice, "safeTransferFrom")
                    .arg(alice)
                    .arg(car)
                    .arg(TokenId(1))
                    .arg(TokenId(1).to_transfer_data()),
            )
            .await
            .unwrap();

        let err = ledger
            .submit(
                Call::new(car, mallory, "transferChild")
                    .arg(TokenId(1))
                    .arg(mallory)
                    .arg(engine)
                    .arg(TokenId(1)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Reverted(_)));
    }

    #[tokio::test]
    async fn test_root_owner_follows_resale() {
        let (ledger, car, engine, alice) = deploy_pair().await;
        let bob = ledger.create_account().await.unwrap();
        ledger
            .submit(Call::new(car, alice, "mint").arg(alice))
            .await
            .unwrap();
        ledger
            .submit(Call::new(engine, alice, "mint").arg(alice))
            .await
            .unwrap();
        ledger
            .submit(
                Call::new(engine, alice, "safeTransferFrom")
                    .arg(alice)
                    .arg(car)
                    .arg(TokenId(1))
                    .arg(TokenId(1).to_transfer_data()),
            )
            .await
            .unwrap();
        ledger
            .submit(
                Call::new(car, alice, "transferFrom")
                    .arg(alice)
                    .arg(bob)
                    .arg(TokenId(1)),
            )
            .await
            .unwrap();

        let root = ledger
            .query(Call::new(engine, alice, "rootOwnerOf").arg(TokenId(1)))
            .await
            .unwrap();
        assert_eq!(root.as_address(), Some(bob));
    }

    #[tokio::test]
    async fn test_fungible_attach_credits_parent_token() {
        let ledger = SimLedger::new();
        let tank = ledger.deploy("FuelTank").await.unwrap().address;
        let fuel = ledger.deploy("Fuel").await.unwrap().address;
        let alice = ledger.create_account().await.unwrap();

        ledger
            .submit(Call::new(tank, alice, "mint").arg(alice))
            .await
            .unwrap();
        ledger
            .submit(Call::new(fuel, alice, "mintTo").arg(alice))
            .await
            .unwrap();
        ledger
            .submit(
                Call::new(fuel, alice, "approve")
                    .arg(tank)
                    .arg(FUEL_MINT_AMOUNT),
            )
            .await
            .unwrap();
        ledger
            .submit(
                Call::new(tank, alice, "getERC20")
                    .arg(alice)
                    .arg(TokenId(1))
                    .arg(fuel)
                    .arg(FUEL_MINT_AMOUNT),
            )
            .await
            .unwrap();

        let held = ledger
            .query(
                Call::new(tank, alice, "balanceOfERC20")
                    .arg(TokenId(1))
                    .arg(fuel),
            )
            .await
            .unwrap();
        assert_eq!(held.as_uint(), Some(FUEL_MINT_AMOUNT));
    }
}
