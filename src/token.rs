//! CEP-18 currency plumbing
//!
//! `Cep18Token` is the slice of CEP-18 the collect modules and the pool
//! double call into. `TestCurrency` is the collect currency used in tests and
//! on test networks: freely mintable, and able to misbehave on demand by
//! reporting failed transfers or approvals, or by calling back into the hub
//! from `transfer_from`.
use odra::prelude::*;
use odra::casper_types::U256;
use odra::casper_types::bytesrepr::Bytes;
use odra::ContractRef;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;
use crate::mocks::hub::MockLensHubContractRef;

/// Mintable collect currency
#[odra::module]
pub struct TestCurrency {
    name: Var<String>,
    symbol: Var<String>,
    decimals: Var<u8>,
    total_supply: Var<U256>,
    /// Holder -> balance
    balances: Mapping<Address, U256>,
    /// (holder, spender) -> allowance
    allowances: Mapping<(Address, Address), U256>,
    /// `transfer` and `transfer_from` return `false` without moving funds
    refuse_transfers: Var<bool>,
    /// `approve` returns `false` without touching the allowance
    refuse_approvals: Var<bool>,
    /// Hub that `transfer_from` collects through before paying out
    reentry_hub: Var<Option<Address>>,
    /// (profile id, pub id) collected on re-entry
    reentry_publication: Var<(U256, U256)>,
    /// Payment data sent with the re-entrant collect
    reentry_data: Var<Bytes>,
}

#[odra::module]
impl TestCurrency {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        if self.refuse_transfers.get_or_default() {
            return false;
        }
        let caller = self.env().caller();
        self.move_balance(caller, to, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        if self.refuse_approvals.get_or_default() {
            return false;
        }
        let caller = self.env().caller();
        self.write_allowance(caller, spender, amount);
        true
    }

    /// Spend `amount` of the caller's allowance over `from`.
    /// An armed re-entry collects through the hub before any funds move.
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        if self.refuse_transfers.get_or_default() {
            return false;
        }
        if let Some(hub) = self.reentry_hub.get_or_default() {
            self.collect_again(hub);
        }

        let spender = self.env().caller();
        let current_allowance = self.allowance(from, spender);
        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.write_allowance(from, spender, current_allowance - amount);
        self.move_balance(from, to, amount);
        true
    }

    /// Mint tokens to any account
    pub fn mint(&mut self, to: Address, amount: U256) {
        let new_supply = self.total_supply() + amount;
        self.total_supply.set(new_supply);

        let balance = self.balance_of(to);
        self.balances.set(&to, balance + amount);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
    }

    /// Make transfers and/or approvals report failure
    pub fn set_refusals(&mut self, transfers: bool, approvals: bool) {
        self.refuse_transfers.set(transfers);
        self.refuse_approvals.set(approvals);
    }

    /// Collect `pub_id` of `profile_id` through `hub` from inside every
    /// `transfer_from`
    pub fn arm_reentry(&mut self, hub: Address, profile_id: U256, pub_id: U256, data: Bytes) {
        self.reentry_hub.set(Some(hub));
        self.reentry_publication.set((profile_id, pub_id));
        self.reentry_data.set(data);
    }

    pub fn disarm_reentry(&mut self) {
        self.reentry_hub.set(None);
    }

    fn collect_again(&self, hub: Address) {
        let (profile_id, pub_id) = self.reentry_publication.get_or_default();
        let data = self.reentry_data.get_or_default();
        let mut hub = MockLensHubContractRef::new(self.env(), hub);
        hub.collect(profile_id, pub_id, profile_id, data);
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    fn write_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }
}

/// CEP-18 calls made by contracts holding or moving the collect currency.
/// Each reports success as a `bool`.
#[odra::external_contract]
pub trait Cep18Token {
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    fn approve(&mut self, spender: Address, amount: U256) -> bool;
}
