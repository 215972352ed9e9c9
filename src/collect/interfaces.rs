//! External contracts the collect modules talk to, and the adapters that
//! expose them to the routing engine

use alloc::rc::Rc;
use odra::prelude::*;
use odra::casper_types::U256;
use odra::casper_types::bytesrepr::Bytes;
use odra::{ContractEnv, ContractRef};
use crate::token::Cep18TokenContractRef;
use super::errors::CollectError;
use super::routing::{DepositError, Ledger, YieldPool};

/// Read-only view of the Lens hub
#[odra::external_contract]
pub trait LensHub {
    /// Current owner of a profile
    fn owner_of(&self, profile_id: U256) -> Address;

    /// Whether `follower` holds a valid follow of `profile_id`
    fn is_following(&self, profile_id: U256, follower: Address) -> bool;
}

/// Protocol-wide currency whitelist and treasury settings
#[odra::external_contract]
pub trait ModuleGlobalsReader {
    fn is_currency_whitelisted(&self, currency: Address) -> bool;
    fn get_treasury(&self) -> Address;
    fn get_treasury_fee(&self) -> u32;
}

/// Hub-facing surface every collect module exposes
#[odra::external_contract]
pub trait CollectModule {
    fn initialize_publication_collect_module(&mut self, profile_id: U256, pub_id: U256, data: Bytes) -> Bytes;

    fn process_collect(
        &mut self,
        referrer_profile_id: U256,
        collector: Address,
        profile_id: U256,
        pub_id: U256,
        data: Bytes,
    );
}

/// Aave V3 style pool. `supply` reports a declined deposit by returning
/// `false` instead of reverting.
#[odra::external_contract]
pub trait AavePool {
    fn supply(&mut self, asset: Address, amount: U256, on_behalf_of: Address, referral_code: u32) -> bool;
}

/// Registry resolving the current Aave pool
#[odra::external_contract]
pub trait PoolAddressesProvider {
    fn get_pool(&self) -> Address;
}

/// `Ledger` over a CEP-18 currency contract
pub struct TokenLedger {
    token: Cep18TokenContractRef,
}

impl TokenLedger {
    pub fn new(env: Rc<ContractEnv>, currency: Address) -> Self {
        Self {
            token: Cep18TokenContractRef::new(env, currency),
        }
    }
}

impl Ledger for TokenLedger {
    fn pull(&mut self, from: Address, to: Address, amount: U256) -> Result<(), CollectError> {
        if self.token.transfer_from(from, to, amount) {
            Ok(())
        } else {
            Err(CollectError::TransferFailed)
        }
    }

    fn pay(&mut self, to: Address, amount: U256) -> Result<(), CollectError> {
        if self.token.transfer(to, amount) {
            Ok(())
        } else {
            Err(CollectError::TransferFailed)
        }
    }

    fn approve(&mut self, spender: Address, amount: U256) -> Result<(), CollectError> {
        if self.token.approve(spender, amount) {
            Ok(())
        } else {
            Err(CollectError::ApprovalFailed)
        }
    }
}

/// `YieldPool` over an Aave pool contract
pub struct AavePoolSink {
    pool: AavePoolContractRef,
    address: Address,
    referral_code: u32,
}

impl AavePoolSink {
    pub fn new(env: Rc<ContractEnv>, pool: Address, referral_code: u32) -> Self {
        Self {
            pool: AavePoolContractRef::new(env, pool),
            address: pool,
            referral_code,
        }
    }
}

impl YieldPool for AavePoolSink {
    fn address(&self) -> Address {
        self.address
    }

    fn supply(&mut self, asset: Address, amount: U256, on_behalf_of: Address) -> Result<(), DepositError> {
        if self.pool.supply(asset, amount, on_behalf_of, self.referral_code) {
            Ok(())
        } else {
            Err(DepositError::Refused)
        }
    }
}
