//! Module Globals - protocol-wide settings read by collect modules

use odra::prelude::*;
use crate::math::BPS_MAX;
use super::errors::MockError;

/// Currency whitelist and treasury configuration
#[odra::module]
pub struct ModuleGlobals {
    /// Governance address
    governance: Var<Address>,
    /// Treasury receiving protocol fees
    treasury: Var<Address>,
    /// Treasury fee in basis points
    treasury_fee: Var<u32>,
    /// Currency -> whitelisted
    currency_whitelist: Mapping<Address, bool>,
}

#[odra::module]
impl ModuleGlobals {
    pub fn init(&mut self, governance: Address, treasury: Address, treasury_fee: u32) {
        self.governance.set(governance);
        self.treasury.set(treasury);
        self.write_treasury_fee(treasury_fee);
    }

    pub fn is_currency_whitelisted(&self, currency: Address) -> bool {
        self.currency_whitelist.get(&currency).unwrap_or_default()
    }

    pub fn get_treasury(&self) -> Address {
        self.treasury.get_or_revert_with(MockError::NotGovernance)
    }

    pub fn get_treasury_fee(&self) -> u32 {
        self.treasury_fee.get_or_default()
    }

    pub fn get_governance(&self) -> Address {
        self.governance.get_or_revert_with(MockError::NotGovernance)
    }

    pub fn whitelist_currency(&mut self, currency: Address, whitelisted: bool) {
        self.only_governance();
        self.currency_whitelist.set(&currency, whitelisted);
    }

    pub fn set_treasury(&mut self, treasury: Address) {
        self.only_governance();
        self.treasury.set(treasury);
    }

    pub fn set_treasury_fee(&mut self, treasury_fee: u32) {
        self.only_governance();
        self.write_treasury_fee(treasury_fee);
    }

    fn write_treasury_fee(&mut self, treasury_fee: u32) {
        if treasury_fee >= BPS_MAX / 2 {
            self.env().revert(MockError::InvalidTreasuryFee);
        }
        self.treasury_fee.set(treasury_fee);
    }

    fn only_governance(&self) {
        if self.env().caller() != self.get_governance() {
            self.env().revert(MockError::NotGovernance);
        }
    }
}
