//! Enumerable NFT used as loan collateral
//!
//! Follows the CEP-95 shape (the Casper take on ERC-721): single-token
//! approvals, operators, `transfer_from` and owner enumeration. Anyone can mint
//! the next id to themselves through `faucet`, which is how borrowers obtain
//! collateral in tests and CLI scenarios.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{ApprovalForAll, NftApproval, NftTransfer};
use crate::errors::NftError;

/// Collateral NFT module
#[odra::module]
pub struct CollateralNft {
    name: Var<String>,
    symbol: Var<String>,
    /// Number of minted tokens, also the next id
    total_supply: Var<U256>,
    /// token id -> owner
    owners: Mapping<U256, Address>,
    /// token id -> approved account, `None` once cleared
    token_approvals: Mapping<U256, Option<Address>>,
    /// (owner, operator) -> approved
    operator_approvals: Mapping<(Address, Address), bool>,
    /// owner -> number of tokens held
    balances: Mapping<Address, u32>,
    /// (owner, index) -> token id
    owned_tokens: Mapping<(Address, u32), U256>,
    /// token id -> index in its owner's list
    owned_tokens_index: Mapping<U256, u32>,
}

#[odra::module]
impl CollateralNft {
    pub fn init(&mut self, name: String, symbol: String) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.total_supply.set(U256::zero());
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> u32 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn owner_of(&self, token_id: U256) -> Option<Address> {
        self.owners.get(&token_id)
    }

    pub fn get_approved(&self, token_id: U256) -> Option<Address> {
        self.token_approvals.get(&token_id).flatten()
    }

    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals.get(&(owner, operator)).unwrap_or(false)
    }

    /// Token held by `owner` at position `index`, in no particular order
    pub fn token_of_owner_by_index(&self, owner: Address, index: u32) -> Option<U256> {
        if index >= self.balance_of(owner) {
            return None;
        }
        self.owned_tokens.get(&(owner, index))
    }

    /// Mint the next token id to the caller
    pub fn faucet(&mut self) -> U256 {
        let caller = self.env().caller();
        let token_id = self.total_supply();
        let next = token_id.checked_add(U256::one())
            .unwrap_or_else(|| self.env().revert(NftError::Overflow));
        self.total_supply.set(next);

        self.owners.set(&token_id, caller);
        self.add_to_owner(caller, token_id);

        self.env().emit_event(NftTransfer {
            from: Address::from(self.env().self_address()),
            to: caller,
            token_id,
        });
        token_id
    }

    /// Allow `spender` to move a single token
    pub fn approve(&mut self, spender: Address, token_id: U256) {
        let caller = self.env().caller();
        let owner = self.owner_or_revert(token_id);

        if spender == owner {
            self.env().revert(NftError::ApprovalToOwner);
        }
        if caller != owner && !self.is_approved_for_all(owner, caller) {
            self.env().revert(NftError::NotAuthorized);
        }

        self.token_approvals.set(&token_id, Some(spender));
        self.env().emit_event(NftApproval {
            owner,
            approved: spender,
            token_id,
        });
    }

    /// Enable or disable `operator` for every token of the caller
    pub fn set_approval_for_all(&mut self, operator: Address, approved: bool) {
        let caller = self.env().caller();
        self.operator_approvals.set(&(caller, operator), approved);
        self.env().emit_event(ApprovalForAll {
            owner: caller,
            operator,
            approved,
        });
    }

    /// Move `token_id` from `from` to `to`; clears the single-token approval
    pub fn transfer_from(&mut self, from: Address, to: Address, token_id: U256) {
        let caller = self.env().caller();
        let owner = self.owner_or_revert(token_id);

        if owner != from {
            self.env().revert(NftError::NotTokenOwner);
        }
        let approved = self.get_approved(token_id) == Some(caller);
        if caller != owner && !approved && !self.is_approved_for_all(owner, caller) {
            self.env().revert(NftError::NotAuthorized);
        }

        self.token_approvals.set(&token_id, None);
        self.remove_from_owner(from, token_id);
        self.owners.set(&token_id, to);
        self.add_to_owner(to, token_id);

        self.env().emit_event(NftTransfer { from, to, token_id });
    }

    fn owner_or_revert(&self, token_id: U256) -> Address {
        self.owners.get(&token_id)
            .unwrap_or_revert_with(&self.env(), NftError::TokenNotFound)
    }

    fn add_to_owner(&mut self, owner: Address, token_id: U256) {
        let count = self.balance_of(owner);
        self.owned_tokens.set(&(owner, count), token_id);
        self.owned_tokens_index.set(&token_id, count);
        self.balances.set(&owner, count + 1);
    }

    /// Swap-remove so the owner's list stays dense; slots past the balance are stale
    fn remove_from_owner(&mut self, owner: Address, token_id: U256) {
        let last_index = self.balance_of(owner) - 1;
        let index = self.owned_tokens_index.get(&token_id).unwrap_or_default();

        if index != last_index {
            if let Some(last_token) = self.owned_tokens.get(&(owner, last_index)) {
                self.owned_tokens.set(&(owner, index), last_token);
                self.owned_tokens_index.set(&last_token, index);
            }
        }
        self.balances.set(&owner, last_index);
    }
}

/// External interface the vault uses to hold and release collateral
#[odra::external_contract]
pub trait Cep95Nft {
    fn owner_of(&self, token_id: U256) -> Option<Address>;
    fn get_approved(&self, token_id: U256) -> Option<Address>;
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;
    fn transfer_from(&mut self, from: Address, to: Address, token_id: U256);
    fn balance_of(&self, owner: Address) -> u32;
    fn token_of_owner_by_index(&self, owner: Address, index: u32) -> Option<U256>;
}
