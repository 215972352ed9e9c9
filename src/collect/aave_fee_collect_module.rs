//! Aave Fee Collect Module
//!
//! Same pricing rules as the plain fee collect module, but the recipient's
//! net proceeds are supplied to an Aave pool on their behalf. When the pool
//! declines the supply the recipient is paid in plain currency and the
//! collect still succeeds.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::casper_types::bytesrepr::Bytes;
use odra::ContractRef;
use super::base::FeeCollectBase;
use super::config::PublicationFeeConfig;
use super::errors::CollectError;
use super::events::{AavePoolUpdated, YieldDeposited, YieldDepositFallback};
use super::gate::CollectState;
use super::interfaces::{AavePoolSink, PoolAddressesProviderContractRef, TokenLedger};
use super::routing::{route_through_pool, NetDelivery};

/// Referral code passed along with every Aave supply
pub const AAVE_REFERRAL_CODE: u32 = 0;

/// Fee collect module depositing proceeds into Aave
#[odra::module]
pub struct AaveFeeCollectModule {
    base: SubModule<FeeCollectBase>,
    /// Admin address
    owner: Var<Address>,
    /// Aave addresses provider the pool is resolved from
    pool_addresses_provider: Var<Address>,
    /// Cached pool address
    aave_pool: Var<Address>,
}

#[odra::module]
impl AaveFeeCollectModule {
    /// Initialize the module and cache the current Aave pool
    pub fn init(&mut self, hub: Address, module_globals: Address, pool_addresses_provider: Address) {
        let caller = self.env().caller();
        self.base.init(hub, module_globals);
        self.owner.set(caller);
        self.pool_addresses_provider.set(pool_addresses_provider);

        let pool = self.resolve_pool();
        self.aave_pool.set(pool);
    }

    /// Hub hook run when a publication selects this module.
    /// Returns `data` unchanged.
    pub fn initialize_publication_collect_module(
        &mut self,
        profile_id: U256,
        pub_id: U256,
        data: Bytes,
    ) -> Bytes {
        self.base.configure(profile_id, pub_id, &data);
        data
    }

    /// Hub hook run on every collect of a configured publication
    pub fn process_collect(
        &mut self,
        referrer_profile_id: U256,
        collector: Address,
        profile_id: U256,
        pub_id: U256,
        data: Bytes,
    ) {
        let pending = self
            .base
            .begin_collect(referrer_profile_id, collector, profile_id, pub_id, &data);

        let pool = self.aave_pool();
        let mut ledger = TokenLedger::new(self.env(), pending.plan.currency);
        let mut sink = AavePoolSink::new(self.env(), pool, AAVE_REFERRAL_CODE);
        let receipt = self
            .base
            .or_revert(route_through_pool(&mut ledger, &mut sink, &pending.plan));

        match receipt.delivery {
            NetDelivery::Deposited => self.env().emit_event(YieldDeposited {
                profile_id,
                pub_id,
                pool,
                recipient: pending.plan.recipient,
                amount: receipt.split.net_amount,
            }),
            NetDelivery::Fallback => self.env().emit_event(YieldDepositFallback {
                profile_id,
                pub_id,
                pool,
                recipient: pending.plan.recipient,
                amount: receipt.split.net_amount,
            }),
            NetDelivery::Direct => {}
        }

        self.base.finish_collect(pending, &receipt);
    }

    /// Re-read the pool address from the addresses provider (owner only)
    pub fn update_aave_pool_address(&mut self) {
        self.only_owner();

        let old_pool = self.aave_pool();
        let new_pool = self.resolve_pool();
        self.aave_pool.set(new_pool);

        self.env().emit_event(AavePoolUpdated { old_pool, new_pool });
    }

    pub fn aave_pool(&self) -> Address {
        self.aave_pool.get_or_revert_with(CollectError::InitParamsInvalid)
    }

    pub fn pool_addresses_provider(&self) -> Address {
        self.pool_addresses_provider.get_or_revert_with(CollectError::InitParamsInvalid)
    }

    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(CollectError::Unauthorized)
    }

    pub fn get_publication_data(&self, profile_id: U256, pub_id: U256) -> Option<PublicationFeeConfig> {
        self.base.get_publication_data(profile_id, pub_id)
    }

    pub fn collect_state(&self, profile_id: U256, pub_id: U256) -> CollectState {
        self.base.collect_state(profile_id, pub_id)
    }

    pub fn hub(&self) -> Address {
        self.base.hub()
    }

    pub fn module_globals(&self) -> Address {
        self.base.module_globals()
    }

    fn resolve_pool(&self) -> Address {
        let provider = PoolAddressesProviderContractRef::new(self.env(), self.pool_addresses_provider());
        provider.get_pool()
    }

    fn only_owner(&self) {
        if self.env().caller() != self.owner() {
            self.env().revert(CollectError::Unauthorized);
        }
    }
}
