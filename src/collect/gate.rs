//! Collect authorization
//!
//! A publication moves `Uninitialized -> Active -> LimitReached | Expired`.
//! Checks run in a fixed order: follower restriction, collect limit, expiry.
//! The limit is checked before expiry, so a sold-out publication reports
//! `MintLimitExceeded` even after its window closed.

use odra::prelude::*;
use odra::casper_types::U256;
use super::config::PublicationFeeConfig;
use super::errors::CollectError;

/// Observable collect state of a publication
#[odra::odra_type]
pub enum CollectState {
    /// No configuration stored
    Uninitialized,
    /// Accepting collects
    Active,
    /// Collect limit reached
    LimitReached,
    /// Past the end timestamp
    Expired,
}

pub fn limit_reached(config: &PublicationFeeConfig) -> bool {
    !config.collect_limit.is_zero() && config.current_collects >= config.collect_limit
}

pub fn is_expired(config: &PublicationFeeConfig, now: u64) -> bool {
    config.end_timestamp != 0 && now > config.end_timestamp
}

/// State of a publication at block time `now`
pub fn collect_state(config: Option<&PublicationFeeConfig>, now: u64) -> CollectState {
    match config {
        None => CollectState::Uninitialized,
        Some(config) if limit_reached(config) => CollectState::LimitReached,
        Some(config) if is_expired(config, now) => CollectState::Expired,
        Some(_) => CollectState::Active,
    }
}

/// Authorize one collect attempt.
///
/// Returns the configuration with `current_collects` advanced by one. The
/// caller commits it only once the payment went through; nothing here
/// touches storage. `is_follower` is only consulted for follower-only
/// publications.
pub fn authorize<F>(
    config: &PublicationFeeConfig,
    now: u64,
    is_follower: F,
) -> Result<PublicationFeeConfig, CollectError>
where
    F: FnOnce() -> bool,
{
    if config.follower_only && !is_follower() {
        return Err(CollectError::FollowerRequired);
    }
    if limit_reached(config) {
        return Err(CollectError::MintLimitExceeded);
    }
    if is_expired(config, now) {
        return Err(CollectError::CollectExpired);
    }

    let mut staged = config.clone();
    staged.current_collects = config
        .current_collects
        .checked_add(U256::one())
        .ok_or(CollectError::Overflow)?;
    Ok(staged)
}
