//! Reward SBT - soulbound token tracking reward units per collection
//!
//! Only the registered collect module mints. Holders may burn their own
//! tokens. Rewards of an (account, collection) pair are always
//! `holdings * reward_units(collection)`, recomputed on mint, burn and on an
//! explicit `update_rewards` call. Entries are overwritten, never removed.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::SbtError;
use super::events::{RewardsUpdated, SbtBurned, SbtMinted};

/// Rewards earned by `holdings` tokens at `units` per token
pub fn compute_rewards(holdings: U256, units: U256) -> Result<U256, SbtError> {
    holdings.checked_mul(units).ok_or(SbtError::Overflow)
}

#[odra::module]
pub struct RewardSbt {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Admin address
    owner: Var<Address>,
    /// Only minter
    collect_module: Var<Option<Address>>,
    /// Tokens minted so far, also the last token id
    token_count: Var<U256>,
    /// Token id -> holder
    token_owners: Mapping<U256, Address>,
    /// Token id -> collection
    token_collections: Mapping<U256, U256>,
    /// Token id -> burned
    burned: Mapping<U256, bool>,
    /// Holder -> live tokens
    balances: Mapping<Address, U256>,
    /// (holder, collection) -> live tokens
    holdings: Mapping<(Address, U256), U256>,
    /// Collection -> reward units per token
    reward_units: Mapping<U256, U256>,
    /// (holder, collection) -> reward units earned
    rewards: Mapping<(Address, U256), U256>,
}

#[odra::module]
impl RewardSbt {
    pub fn init(&mut self, name: String, symbol: String) {
        let caller = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.owner.set(caller);
        self.collect_module.set(None);
        self.token_count.set(U256::zero());
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(SbtError::Unauthorized)
    }

    pub fn collect_module(&self) -> Option<Address> {
        self.collect_module.get_or_default()
    }

    pub fn total_minted(&self) -> U256 {
        self.token_count.get_or_default()
    }

    pub fn owner_of(&self, token_id: U256) -> Address {
        if self.burned.get(&token_id).unwrap_or_default() {
            self.env().revert(SbtError::TokenNotFound);
        }
        self.token_owners
            .get(&token_id)
            .unwrap_or_revert_with(&self.env(), SbtError::TokenNotFound)
    }

    pub fn collection_of(&self, token_id: U256) -> U256 {
        self.token_collections
            .get(&token_id)
            .unwrap_or_revert_with(&self.env(), SbtError::TokenNotFound)
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or_default()
    }

    pub fn holdings_of(&self, account: Address, collection_id: U256) -> U256 {
        self.holdings.get(&(account, collection_id)).unwrap_or_default()
    }

    pub fn rewards_of(&self, account: Address, collection_id: U256) -> U256 {
        self.rewards.get(&(account, collection_id)).unwrap_or_default()
    }

    pub fn reward_units(&self, collection_id: U256) -> U256 {
        self.reward_units.get(&collection_id).unwrap_or_default()
    }

    /// Set the only address allowed to mint (owner only)
    pub fn set_collect_module(&mut self, collect_module: Address) {
        self.only_owner();
        self.collect_module.set(Some(collect_module));
    }

    /// Set reward units per token of a collection (owner only).
    /// Existing balances pick the new rate up on their next update.
    pub fn set_reward_units(&mut self, collection_id: U256, units: U256) {
        self.only_owner();
        self.reward_units.set(&collection_id, units);
    }

    /// Mint a token of `collection_id` to `to` (collect module only)
    pub fn mint(&mut self, to: Address, collection_id: U256) -> U256 {
        let minter = self
            .collect_module()
            .unwrap_or_revert_with(&self.env(), SbtError::CollectModuleNotSet);
        if self.env().caller() != minter {
            self.env().revert(SbtError::Unauthorized);
        }

        let token_id = self.total_minted() + U256::one();
        self.token_count.set(token_id);
        self.token_owners.set(&token_id, to);
        self.token_collections.set(&token_id, collection_id);

        let balance = self.balance_of(to) + U256::one();
        self.balances.set(&to, balance);
        let holdings = self.holdings_of(to, collection_id) + U256::one();
        self.holdings.set(&(to, collection_id), holdings);

        self.env().emit_event(SbtMinted {
            token_id,
            to,
            collection_id,
        });
        self.refresh_rewards(to, collection_id);

        token_id
    }

    /// Burn one of the caller's tokens
    pub fn burn(&mut self, token_id: U256) {
        let holder = self.owner_of(token_id);
        if self.env().caller() != holder {
            self.env().revert(SbtError::NotTokenOwner);
        }

        let collection_id = self.collection_of(token_id);
        self.burned.set(&token_id, true);
        let balance = self.balance_of(holder) - U256::one();
        self.balances.set(&holder, balance);
        let holdings = self.holdings_of(holder, collection_id) - U256::one();
        self.holdings.set(&(holder, collection_id), holdings);

        self.env().emit_event(SbtBurned {
            token_id,
            from: holder,
            collection_id,
        });
        self.refresh_rewards(holder, collection_id);
    }

    /// Recompute the rewards of `account` in `collection_id`
    pub fn update_rewards(&mut self, account: Address, collection_id: U256) -> U256 {
        self.refresh_rewards(account, collection_id)
    }

    /// Always fails, tokens are bound to their holder
    pub fn transfer(&mut self, _to: Address, _token_id: U256) {
        self.env().revert(SbtError::Soulbound);
    }

    fn refresh_rewards(&mut self, account: Address, collection_id: U256) -> U256 {
        let rewards = compute_rewards(
            self.holdings_of(account, collection_id),
            self.reward_units(collection_id),
        )
        .unwrap_or_else(|error| self.env().revert(error));
        self.rewards.set(&(account, collection_id), rewards);

        self.env().emit_event(RewardsUpdated {
            account,
            collection_id,
            rewards,
        });
        rewards
    }

    fn only_owner(&self) {
        if self.env().caller() != self.owner() {
            self.env().revert(SbtError::Unauthorized);
        }
    }
}
