//! Error types for the soulbound reward token

use odra::prelude::*;

#[odra::odra_error]
pub enum SbtError {
    /// Caller is not the owner
    Unauthorized = 300,
    /// Soulbound tokens cannot be transferred
    Soulbound = 301,
    /// Token id does not exist or was burned
    TokenNotFound = 302,
    /// Caller does not hold the token
    NotTokenOwner = 303,
    /// No collect module registered to mint
    CollectModuleNotSet = 304,
    /// Reward computation overflowed
    Overflow = 305,
}
