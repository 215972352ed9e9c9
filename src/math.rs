//! Fee arithmetic shared by the collect modules
//! Splits a gross collect price between treasury, referrer and recipient
use odra::casper_types::U256;
use crate::collect::errors::CollectError;

/// Basis point denominator (100%)
pub const BPS_MAX: u32 = 10_000;

/// Checked math over U256 that reports collect errors
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, CollectError> {
        a.checked_add(b).ok_or(CollectError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, CollectError> {
        a.checked_sub(b).ok_or(CollectError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, CollectError> {
        a.checked_mul(b).ok_or(CollectError::Overflow)
    }
}

/// Result of splitting a gross amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    /// Protocol treasury cut
    pub treasury_amount: U256,
    /// Referrer cut, taken from the post-treasury remainder
    pub referral_amount: U256,
    /// What is left for the publication's recipient
    pub net_amount: U256,
}

/// Basis point calculations
pub struct FeeMath;

impl FeeMath {
    /// floor(amount * bps / BPS_MAX)
    pub fn bps_of(amount: U256, bps: u32) -> Result<U256, CollectError> {
        let scaled = SafeMath::mul(amount, U256::from(bps))?;
        Ok(scaled / U256::from(BPS_MAX))
    }

    /// Split `gross_amount` into treasury, referral and net portions.
    ///
    /// The referral fee applies to what remains after the treasury fee, so
    /// a referral payout never eats into the treasury cut. The three parts
    /// always sum to `gross_amount`.
    pub fn compute_split(
        gross_amount: U256,
        treasury_fee_bps: u32,
        referral_fee_bps: u32,
        has_distinct_referrer: bool,
    ) -> Result<FeeSplit, CollectError> {
        if treasury_fee_bps > BPS_MAX {
            return Err(CollectError::TreasuryFeeInvalid);
        }
        if referral_fee_bps > BPS_MAX {
            return Err(CollectError::InitParamsInvalid);
        }

        let treasury_amount = Self::bps_of(gross_amount, treasury_fee_bps)?;
        let after_treasury = SafeMath::sub(gross_amount, treasury_amount)?;

        let referral_amount = if has_distinct_referrer && referral_fee_bps != 0 {
            Self::bps_of(after_treasury, referral_fee_bps)?
        } else {
            U256::zero()
        };

        let net_amount = SafeMath::sub(after_treasury, referral_amount)?;

        Ok(FeeSplit {
            treasury_amount,
            referral_amount,
            net_amount,
        })
    }
}
