//! Publication configuration records and hub payload codecs

use odra::prelude::*;
use odra::casper_types::U256;
use odra::casper_types::account::AccountHash;
use odra::casper_types::bytesrepr::{Bytes, FromBytes, ToBytes};
use crate::math::BPS_MAX;
use super::errors::CollectError;

/// Storage key of a publication: (profile id, publication id)
pub type PublicationKey = (U256, U256);

/// Parameters a publisher encodes when attaching a fee collect module
#[odra::odra_type]
pub struct FeeCollectInitData {
    /// Price per collect in `currency` units
    pub amount: U256,
    /// CEP-18 currency contract
    pub currency: Address,
    /// Maximum number of collects, 0 for unlimited
    pub collect_limit: U256,
    /// Referral fee in basis points
    pub referral_fee: u32,
    /// Only followers of the publishing profile may collect
    pub follower_only: bool,
    /// Last block time (ms) at which a collect is accepted, 0 for no expiry
    pub end_timestamp: u64,
    /// Receiver of the net proceeds
    pub recipient: Address,
}

/// Payment terms the collector commits to when collecting
#[odra::odra_type]
pub struct CollectPaymentData {
    /// Expected currency
    pub currency: Address,
    /// Expected price
    pub amount: U256,
}

/// Stored collect configuration of a publication
#[odra::odra_type]
pub struct PublicationFeeConfig {
    /// Price per collect
    pub amount: U256,
    /// CEP-18 currency contract
    pub currency: Address,
    /// Maximum number of collects, 0 for unlimited
    pub collect_limit: U256,
    /// Successful collects so far
    pub current_collects: U256,
    /// Receiver of the net proceeds
    pub recipient: Address,
    /// Referral fee in basis points
    pub referral_fee: u32,
    /// Only followers may collect
    pub follower_only: bool,
    /// Expiry block time (ms), 0 for none
    pub end_timestamp: u64,
}

impl PublicationFeeConfig {
    /// Validate publisher parameters and build a fresh configuration.
    ///
    /// `currency_whitelisted` is the module-globals answer for
    /// `data.currency`; the whitelist is only consulted here.
    pub fn from_init(
        data: &FeeCollectInitData,
        currency_whitelisted: bool,
        now: u64,
    ) -> Result<Self, CollectError> {
        let expired = data.end_timestamp != 0 && data.end_timestamp < now;
        if !currency_whitelisted
            || is_null_address(&data.recipient)
            || data.referral_fee > BPS_MAX
            || data.amount.is_zero()
            || expired
        {
            return Err(CollectError::InitParamsInvalid);
        }

        Ok(Self {
            amount: data.amount,
            currency: data.currency,
            collect_limit: data.collect_limit,
            current_collects: U256::zero(),
            recipient: data.recipient,
            referral_fee: data.referral_fee,
            follower_only: data.follower_only,
            end_timestamp: data.end_timestamp,
        })
    }

    /// True when `payment` names exactly the stored currency and price
    pub fn matches_payment(&self, payment: &CollectPaymentData) -> bool {
        self.currency == payment.currency && self.amount == payment.amount
    }

    /// Payment data a collector has to submit for this publication
    pub fn payment_data(&self) -> CollectPaymentData {
        CollectPaymentData {
            currency: self.currency,
            amount: self.amount,
        }
    }
}

/// The all-zero account, never a valid recipient
pub fn null_address() -> Address {
    Address::Account(AccountHash::new([0u8; 32]))
}

/// True for the all-zero hash, whether account or contract
pub fn is_null_address(address: &Address) -> bool {
    #[allow(unreachable_patterns)]
    match address {
        Address::Account(hash) => hash.value() == [0u8; 32],
        Address::Contract(hash) => hash.value() == [0u8; 32],
        _ => false,
    }
}

/// Decode a hub payload, rejecting trailing bytes
pub fn decode<T: FromBytes>(data: &Bytes) -> Result<T, CollectError> {
    let bytes: &[u8] = data;
    match T::from_bytes(bytes) {
        Ok((value, rest)) if rest.is_empty() => Ok(value),
        _ => Err(CollectError::InvalidModuleData),
    }
}

/// Encode a hub payload
pub fn encode<T: ToBytes>(value: &T) -> Result<Bytes, CollectError> {
    value
        .to_bytes()
        .map(Bytes::from)
        .map_err(|_| CollectError::InvalidModuleData)
}
