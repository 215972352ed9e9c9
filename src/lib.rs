#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared plumbing
pub mod token;
pub mod errors;
pub mod events;
pub mod math;

// Fee collect modules
pub mod collect;

// Soulbound reward tokens
pub mod sbt;

// Stand-ins for the hub, module globals and Aave
pub mod mocks;
