//! Soulbound reward tokens
//!
//! Non-transferable tokens minted by a collect module. Each holding of a
//! collection earns that collection's reward units.

pub mod errors;
pub mod events;
pub mod reward_sbt;

pub use errors::SbtError;
pub use events::*;
pub use reward_sbt::RewardSbt;
