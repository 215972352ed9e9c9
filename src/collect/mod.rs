//! Fee Collect Modules
//!
//! Collect modules attached to Lens publications. The hub calls
//! `initialize_publication_collect_module` when a publication selects the
//! module and `process_collect` on every collect. Each collect is gated by
//! the follower restriction, collect limit and expiry, then paid for in the
//! publication's currency with treasury and referral cuts.
//!
//! Variants:
//! - `FeeCollectModule`: net proceeds go straight to the recipient
//! - `AaveFeeCollectModule`: net proceeds are supplied to Aave for the
//!   recipient, with a plain transfer when the pool declines

pub mod aave_fee_collect_module;
pub mod base;
pub mod config;
pub mod errors;
pub mod events;
pub mod fee_collect_module;
pub mod gate;
pub mod interfaces;
pub mod routing;

#[cfg(test)]
mod tests;

pub use aave_fee_collect_module::AaveFeeCollectModule;
pub use base::FeeCollectBase;
pub use config::{CollectPaymentData, FeeCollectInitData, PublicationFeeConfig};
pub use errors::CollectError;
pub use events::*;
pub use fee_collect_module::FeeCollectModule;
pub use gate::CollectState;
