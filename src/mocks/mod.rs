//! Deployable stand-ins for the contracts the collect modules depend on.
//! Used by the test suite and for test-network deployments.

pub mod aave;
pub mod errors;
pub mod globals;
pub mod hub;

pub use aave::{MockAavePool, MockPoolAddressesProvider};
pub use errors::MockError;
pub use globals::ModuleGlobals;
pub use hub::MockLensHub;
