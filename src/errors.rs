//! Error definitions shared across the crate
use odra::prelude::*;

/// Custom errors for the CEP-18 currency token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,
    
    /// Insufficient balance for operation
    InsufficientBalance = 101,
}
