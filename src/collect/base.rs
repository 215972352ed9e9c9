//! State and bookkeeping shared by every fee collect module
//!
//! Owns the hub identity, the module-globals address and the per-publication
//! configuration store. Variants embed it as a `SubModule` and only supply
//! the payment routing step.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::casper_types::bytesrepr::Bytes;
use odra::ContractRef;
use super::config::{decode, CollectPaymentData, FeeCollectInitData, PublicationFeeConfig, PublicationKey};
use super::errors::CollectError;
use super::events::{Collected, PublicationCollectConfigured};
use super::gate::{self, CollectState};
use super::interfaces::{LensHubContractRef, ModuleGlobalsReaderContractRef};
use super::routing::{RoutePlan, RouteReceipt};

/// A collect that passed authorization and waits for its payment
pub struct PendingCollect {
    pub profile_id: U256,
    pub pub_id: U256,
    pub referrer_profile_id: U256,
    pub collector: Address,
    /// Configuration with the collect counter already advanced
    pub staged: PublicationFeeConfig,
    pub plan: RoutePlan,
}

/// Shared fee collect state
#[odra::module]
pub struct FeeCollectBase {
    /// Hub allowed to drive the module
    hub: Var<Address>,
    /// Module globals contract (whitelist, treasury)
    module_globals: Var<Address>,
    /// (profile id, pub id) -> configuration
    publications: Mapping<PublicationKey, PublicationFeeConfig>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl FeeCollectBase {
    pub fn init(&mut self, hub: Address, module_globals: Address) {
        self.hub.set(hub);
        self.module_globals.set(module_globals);
        self.locked.set(false);
    }

    pub fn hub(&self) -> Address {
        self.hub.get_or_revert_with(CollectError::NotHub)
    }

    pub fn module_globals(&self) -> Address {
        self.module_globals.get_or_revert_with(CollectError::InitParamsInvalid)
    }

    /// Stored configuration, `None` when the publication was never set up
    pub fn get_publication_data(&self, profile_id: U256, pub_id: U256) -> Option<PublicationFeeConfig> {
        self.publications.get(&(profile_id, pub_id))
    }

    /// Collect state at the current block time
    pub fn collect_state(&self, profile_id: U256, pub_id: U256) -> CollectState {
        let config = self.get_publication_data(profile_id, pub_id);
        gate::collect_state(config.as_ref(), self.env().get_block_time())
    }
}

impl FeeCollectBase {
    /// Validate and store the configuration carried by `data`
    pub fn configure(&mut self, profile_id: U256, pub_id: U256, data: &Bytes) {
        self.only_hub();

        let init_data: FeeCollectInitData = self.or_revert(decode(data));
        let key = (profile_id, pub_id);
        if self.publications.get(&key).is_some() {
            self.env().revert(CollectError::PublicationAlreadyConfigured);
        }

        let globals = ModuleGlobalsReaderContractRef::new(self.env(), self.module_globals());
        let whitelisted = globals.is_currency_whitelisted(init_data.currency);
        let now = self.env().get_block_time();
        let config = self.or_revert(PublicationFeeConfig::from_init(&init_data, whitelisted, now));

        self.publications.set(&key, config.clone());

        self.env().emit_event(PublicationCollectConfigured {
            profile_id,
            pub_id,
            currency: config.currency,
            amount: config.amount,
            collect_limit: config.collect_limit,
            end_timestamp: config.end_timestamp,
            recipient: config.recipient,
        });
    }

    /// Authorize a collect and prepare its payment.
    ///
    /// Takes the reentrancy lock; `finish_collect` releases it. The stored
    /// counter is not advanced here.
    pub fn begin_collect(
        &mut self,
        referrer_profile_id: U256,
        collector: Address,
        profile_id: U256,
        pub_id: U256,
        data: &Bytes,
    ) -> PendingCollect {
        self.only_hub();
        self.lock();

        let config = self
            .get_publication_data(profile_id, pub_id)
            .unwrap_or_revert_with(&self.env(), CollectError::PublicationNotConfigured);

        let hub = LensHubContractRef::new(self.env(), self.hub());
        let now = self.env().get_block_time();
        let staged = self.or_revert(gate::authorize(&config, now, || {
            hub.is_following(profile_id, collector)
        }));

        let payment: CollectPaymentData = self.or_revert(decode(data));
        if !staged.matches_payment(&payment) {
            self.env().revert(CollectError::ModuleDataMismatch);
        }

        // Owner is looked up on every collect, profiles can change hands
        let referrer = if referrer_profile_id != profile_id && staged.referral_fee != 0 {
            Some(hub.owner_of(referrer_profile_id))
        } else {
            None
        };

        let globals = ModuleGlobalsReaderContractRef::new(self.env(), self.module_globals());
        let plan = RoutePlan {
            collector,
            currency: staged.currency,
            amount: staged.amount,
            treasury: globals.get_treasury(),
            treasury_fee: globals.get_treasury_fee(),
            referral_fee: staged.referral_fee,
            referrer,
            recipient: staged.recipient,
            custody: self.env().self_address(),
        };

        PendingCollect {
            profile_id,
            pub_id,
            referrer_profile_id,
            collector,
            staged,
            plan,
        }
    }

    /// Commit the advanced counter once the payment went through
    pub fn finish_collect(&mut self, pending: PendingCollect, receipt: &RouteReceipt) {
        let collect_number = pending.staged.current_collects;
        self.publications
            .set(&(pending.profile_id, pending.pub_id), pending.staged);

        self.env().emit_event(Collected {
            profile_id: pending.profile_id,
            pub_id: pending.pub_id,
            collector: pending.collector,
            referrer_profile_id: pending.referrer_profile_id,
            collect_number,
            amount: pending.plan.amount,
            treasury_amount: receipt.split.treasury_amount,
            referral_amount: receipt.split.referral_amount,
            net_amount: receipt.split.net_amount,
        });

        self.unlock();
    }

    /// Unwrap a collect result or revert the whole call
    pub fn or_revert<T>(&self, result: Result<T, CollectError>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => self.env().revert(error),
        }
    }

    fn only_hub(&self) {
        if self.env().caller() != self.hub() {
            self.env().revert(CollectError::NotHub);
        }
    }

    /// Reentrancy lock
    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(CollectError::Locked);
        }
        self.locked.set(true);
    }

    /// Reentrancy unlock
    fn unlock(&mut self) {
        self.locked.set(false);
    }
}
