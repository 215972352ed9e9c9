//! Fee Collect Module
//!
//! Charges a fixed price per collect and pays the recipient directly.
//! Collect limit, expiry and the follower restriction are all optional, so
//! one module serves plain, limited, timed and limited-timed publications.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::casper_types::bytesrepr::Bytes;
use super::base::FeeCollectBase;
use super::config::PublicationFeeConfig;
use super::gate::CollectState;
use super::interfaces::TokenLedger;
use super::routing::route_direct;

/// Fee collect module paying recipients in plain currency
#[odra::module]
pub struct FeeCollectModule {
    base: SubModule<FeeCollectBase>,
}

#[odra::module]
impl FeeCollectModule {
    /// Initialize with the hub allowed to call in and the module globals
    pub fn init(&mut self, hub: Address, module_globals: Address) {
        self.base.init(hub, module_globals);
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

        let mut ledger = TokenLedger::new(self.env(), pending.plan.currency);
        let receipt = self.base.or_revert(route_direct(&mut ledger, &pending.plan));

        self.base.finish_collect(pending, &receipt);
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
}
