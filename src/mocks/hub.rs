//! Minimal Lens hub
//!
//! Tracks profile ownership and follows, and forwards publish / collect
//! actions to the selected collect module, so modules see the hub as caller.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::casper_types::bytesrepr::Bytes;
use odra::ContractRef;
use crate::collect::interfaces::CollectModuleContractRef;
use super::errors::MockError;

#[odra::module]
pub struct MockLensHub {
    /// Number of profiles created, also the last profile id
    profile_count: Var<U256>,
    /// Profile id -> owner
    profile_owners: Mapping<U256, Address>,
    /// (profile id, follower) -> following
    follows: Mapping<(U256, Address), bool>,
    /// Profile id -> publications created
    pub_counts: Mapping<U256, U256>,
    /// (profile id, pub id) -> collect module
    collect_modules: Mapping<(U256, U256), Address>,
}

#[odra::module]
impl MockLensHub {
    /// Create a profile owned by `owner`, returns its id (starting at 1)
    pub fn create_profile(&mut self, owner: Address) -> U256 {
        let profile_id = self.profile_count.get_or_default() + U256::one();
        self.profile_count.set(profile_id);
        self.profile_owners.set(&profile_id, owner);
        profile_id
    }

    pub fn owner_of(&self, profile_id: U256) -> Address {
        self.profile_owners
            .get(&profile_id)
            .unwrap_or_revert_with(&self.env(), MockError::ProfileNotFound)
    }

    /// Move a profile to a new owner (current owner only)
    pub fn transfer_profile(&mut self, profile_id: U256, new_owner: Address) {
        self.only_profile_owner(profile_id);
        self.profile_owners.set(&profile_id, new_owner);
    }

    /// Caller follows `profile_id`
    pub fn follow(&mut self, profile_id: U256) {
        self.owner_of(profile_id);
        let follower = self.env().caller();
        self.follows.set(&(profile_id, follower), true);
    }

    pub fn is_following(&self, profile_id: U256, follower: Address) -> bool {
        self.follows.get(&(profile_id, follower)).unwrap_or_default()
    }

    /// Publish under `profile_id` with `collect_module` and return the pub id
    pub fn post(&mut self, profile_id: U256, collect_module: Address, collect_module_init_data: Bytes) -> U256 {
        self.only_profile_owner(profile_id);

        let pub_id = self.pub_counts.get(&profile_id).unwrap_or_default() + U256::one();
        self.pub_counts.set(&profile_id, pub_id);
        self.collect_modules.set(&(profile_id, pub_id), collect_module);

        let mut module = CollectModuleContractRef::new(self.env(), collect_module);
        module.initialize_publication_collect_module(profile_id, pub_id, collect_module_init_data);

        pub_id
    }

    /// Caller collects a publication, crediting `referrer_profile_id`
    pub fn collect(&mut self, profile_id: U256, pub_id: U256, referrer_profile_id: U256, data: Bytes) {
        let collector = self.env().caller();
        let collect_module = self.get_collect_module(profile_id, pub_id);

        let mut module = CollectModuleContractRef::new(self.env(), collect_module);
        module.process_collect(referrer_profile_id, collector, profile_id, pub_id, data);
    }

    pub fn get_collect_module(&self, profile_id: U256, pub_id: U256) -> Address {
        self.collect_modules
            .get(&(profile_id, pub_id))
            .unwrap_or_revert_with(&self.env(), MockError::PublicationNotFound)
    }

    fn only_profile_owner(&self, profile_id: U256) {
        if self.env().caller() != self.owner_of(profile_id) {
            self.env().revert(MockError::NotProfileOwner);
        }
    }
}
