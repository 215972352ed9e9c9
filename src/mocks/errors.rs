//! Error types for the test doubles

use odra::prelude::*;

#[odra::odra_error]
pub enum MockError {
    /// Profile id was never created
    ProfileNotFound = 400,
    /// Caller does not own the profile
    NotProfileOwner = 401,
    /// Publication has no collect module
    PublicationNotFound = 402,
    /// Caller is not the governance account
    NotGovernance = 403,
    /// Treasury fee must stay below half of BPS_MAX
    InvalidTreasuryFee = 404,
    /// Addresses provider has no pool
    PoolNotSet = 405,
}
