//! Error types for the collect modules

use odra::prelude::*;

/// Errors raised by the fee collect modules
#[odra::odra_error]
pub enum CollectError {
    // Initialization Errors
    /// Currency not whitelisted, null recipient, referral fee above 100%,
    /// zero price or an end timestamp already in the past
    InitParamsInvalid = 200,
    /// Publication already carries a collect configuration
    PublicationAlreadyConfigured = 201,
    /// Hub payload could not be decoded
    InvalidModuleData = 202,

    // Authorization Errors
    /// Caller is not the registered hub
    NotHub = 210,
    /// Collector does not follow the publishing profile
    FollowerRequired = 211,
    /// Collect limit already reached
    MintLimitExceeded = 212,
    /// Collect window has closed
    CollectExpired = 213,
    /// Publication was never configured with this module
    PublicationNotConfigured = 214,
    /// Caller is not the module owner
    Unauthorized = 215,
    /// Reentrant call into a hub entry point
    Locked = 216,

    // Payment Errors
    /// Payment data does not match the stored currency and amount
    ModuleDataMismatch = 220,
    /// Token transfer reported failure
    TransferFailed = 221,
    /// Token approval reported failure
    ApprovalFailed = 222,
    /// Treasury fee outside the allowed range
    TreasuryFeeInvalid = 223,

    // Math Errors
    /// Math overflow occurred
    Overflow = 230,
    /// Math underflow occurred
    Underflow = 231,
}
