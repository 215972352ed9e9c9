//! Events for the collect modules

use odra::prelude::*;
use odra::casper_types::U256;

/// Emitted when a publication is configured with a fee collect module
#[odra::event]
pub struct PublicationCollectConfigured {
    pub profile_id: U256,
    pub pub_id: U256,
    pub currency: Address,
    pub amount: U256,
    pub collect_limit: U256,
    pub end_timestamp: u64,
    pub recipient: Address,
}

/// Emitted after a paid collect went through
#[odra::event]
pub struct Collected {
    pub profile_id: U256,
    pub pub_id: U256,
    pub collector: Address,
    pub referrer_profile_id: U256,
    /// Value of `current_collects` after this collect
    pub collect_number: U256,
    pub amount: U256,
    pub treasury_amount: U256,
    pub referral_amount: U256,
    pub net_amount: U256,
}

/// Net proceeds supplied to the Aave pool for the recipient
#[odra::event]
pub struct YieldDeposited {
    pub profile_id: U256,
    pub pub_id: U256,
    pub pool: Address,
    pub recipient: Address,
    pub amount: U256,
}

/// The Aave pool declined the supply and the recipient was paid directly
#[odra::event]
pub struct YieldDepositFallback {
    pub profile_id: U256,
    pub pub_id: U256,
    pub pool: Address,
    pub recipient: Address,
    pub amount: U256,
}

/// Cached Aave pool address refreshed from the addresses provider
#[odra::event]
pub struct AavePoolUpdated {
    pub old_pool: Address,
    pub new_pool: Address,
}
