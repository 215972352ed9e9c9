//! Aave pool and addresses provider doubles

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::token::Cep18TokenContractRef;
use super::errors::MockError;

/// Pool that either accepts supplies or declines them
#[odra::module]
pub struct MockAavePool {
    /// Whether supply calls are accepted
    accepting: Var<bool>,
    /// (asset, account) -> supplied amount
    supplied: Mapping<(Address, Address), U256>,
    /// Referral code of the last accepted supply
    last_referral_code: Var<u32>,
}

#[odra::module]
impl MockAavePool {
    pub fn init(&mut self) {
        self.accepting.set(true);
    }

    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting.set(accepting);
    }

    /// Pull `amount` of `asset` from the caller and credit `on_behalf_of`.
    /// Returns `false` without crediting anything when supplies are declined
    /// or the pull fails.
    pub fn supply(&mut self, asset: Address, amount: U256, on_behalf_of: Address, referral_code: u32) -> bool {
        if !self.accepting.get_or_default() {
            return false;
        }

        let caller = self.env().caller();
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer_from(caller, self.env().self_address(), amount) {
            return false;
        }

        let balance = self.supplied_balance(asset, on_behalf_of);
        self.supplied.set(&(asset, on_behalf_of), balance + amount);
        self.last_referral_code.set(referral_code);
        true
    }

    pub fn supplied_balance(&self, asset: Address, account: Address) -> U256 {
        self.supplied.get(&(asset, account)).unwrap_or_default()
    }

    pub fn last_referral_code(&self) -> u32 {
        self.last_referral_code.get_or_default()
    }
}

/// Addresses provider returning a settable pool address
#[odra::module]
pub struct MockPoolAddressesProvider {
    pool: Var<Address>,
}

#[odra::module]
impl MockPoolAddressesProvider {
    pub fn init(&mut self, pool: Address) {
        self.pool.set(pool);
    }

    pub fn get_pool(&self) -> Address {
        self.pool.get_or_revert_with(MockError::PoolNotSet)
    }

    pub fn set_pool(&mut self, pool: Address) {
        self.pool.set(pool);
    }
}
