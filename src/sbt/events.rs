//! Events for the soulbound reward token

use odra::prelude::*;
use odra::casper_types::U256;

#[odra::event]
pub struct SbtMinted {
    pub token_id: U256,
    pub to: Address,
    pub collection_id: U256,
}

#[odra::event]
pub struct SbtBurned {
    pub token_id: U256,
    pub from: Address,
    pub collection_id: U256,
}

/// Reward balance of an account in a collection was recomputed
#[odra::event]
pub struct RewardsUpdated {
    pub account: Address,
    pub collection_id: U256,
    pub rewards: U256,
}
