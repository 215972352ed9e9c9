//! Fund routing for a collect payment
//!
//! Moves one collect's price from the collector to the referrer, the
//! recipient and the treasury. Every transfer failure is returned to the
//! caller and aborts the collect. The one exception is the yield deposit of
//! the net amount: if the pool refuses it, the net amount is paid to the
//! recipient directly and routing still succeeds.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::math::{FeeMath, FeeSplit};
use super::errors::CollectError;

/// Token movements in the publication's currency
pub trait Ledger {
    /// Move `amount` from `from` to `to` using the module's allowance
    fn pull(&mut self, from: Address, to: Address, amount: U256) -> Result<(), CollectError>;

    /// Move `amount` out of the module's own balance
    fn pay(&mut self, to: Address, amount: U256) -> Result<(), CollectError>;

    /// Set the module's allowance for `spender`
    fn approve(&mut self, spender: Address, amount: U256) -> Result<(), CollectError>;
}

/// Why a yield deposit did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositError {
    /// The pool declined the supply call
    Refused,
}

/// A lending pool that accepts deposits on behalf of a third party
pub trait YieldPool {
    fn address(&self) -> Address;

    /// Supply `amount` of `asset` credited to `on_behalf_of`. The pool pulls
    /// the funds from the caller's approved balance.
    fn supply(&mut self, asset: Address, amount: U256, on_behalf_of: Address) -> Result<(), DepositError>;
}

/// Everything needed to route one collect payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    /// Account paying for the collect
    pub collector: Address,
    /// Currency of the publication
    pub currency: Address,
    /// Gross price
    pub amount: U256,
    /// Protocol treasury
    pub treasury: Address,
    /// Treasury fee in basis points
    pub treasury_fee: u32,
    /// Publication referral fee in basis points
    pub referral_fee: u32,
    /// Owner of the referring profile when it differs from the publisher
    pub referrer: Option<Address>,
    /// Receiver of the net amount
    pub recipient: Address,
    /// The module itself, used as temporary custody for pool deposits
    pub custody: Address,
}

/// How the net amount reached the recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetDelivery {
    /// Paid straight from the collector
    Direct,
    /// Supplied to the yield pool on the recipient's behalf
    Deposited,
    /// Pool refused, paid from custody in plain currency
    Fallback,
}

/// Outcome of a routed payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteReceipt {
    pub split: FeeSplit,
    pub delivery: NetDelivery,
}

/// Route a payment paying the recipient directly
pub fn route_direct<L: Ledger>(ledger: &mut L, plan: &RoutePlan) -> Result<RouteReceipt, CollectError> {
    route(ledger, None, plan)
}

/// Route a payment supplying the net amount to `pool` for the recipient
pub fn route_through_pool<L: Ledger, P: YieldPool>(
    ledger: &mut L,
    pool: &mut P,
    plan: &RoutePlan,
) -> Result<RouteReceipt, CollectError> {
    route(ledger, Some(pool), plan)
}

fn route<L: Ledger>(
    ledger: &mut L,
    pool: Option<&mut dyn YieldPool>,
    plan: &RoutePlan,
) -> Result<RouteReceipt, CollectError> {
    let split = FeeMath::compute_split(
        plan.amount,
        plan.treasury_fee,
        plan.referral_fee,
        plan.referrer.is_some(),
    )?;

    if let Some(referrer) = plan.referrer {
        if !split.referral_amount.is_zero() {
            ledger.pull(plan.collector, referrer, split.referral_amount)?;
        }
    }

    let delivery = if split.net_amount.is_zero() {
        NetDelivery::Direct
    } else {
        match pool {
            None => {
                ledger.pull(plan.collector, plan.recipient, split.net_amount)?;
                NetDelivery::Direct
            }
            Some(pool) => deposit_or_pay(ledger, pool, plan, split.net_amount)?,
        }
    };

    if !split.treasury_amount.is_zero() {
        ledger.pull(plan.collector, plan.treasury, split.treasury_amount)?;
    }

    Ok(RouteReceipt { split, delivery })
}

fn deposit_or_pay<L: Ledger>(
    ledger: &mut L,
    pool: &mut dyn YieldPool,
    plan: &RoutePlan,
    net_amount: U256,
) -> Result<NetDelivery, CollectError> {
    ledger.pull(plan.collector, plan.custody, net_amount)?;
    ledger.approve(pool.address(), net_amount)?;

    match pool.supply(plan.currency, net_amount, plan.recipient) {
        Ok(()) => Ok(NetDelivery::Deposited),
        Err(DepositError::Refused) => {
            ledger.approve(pool.address(), U256::zero())?;
            ledger.pay(plan.recipient, net_amount)?;
            Ok(NetDelivery::Fallback)
        }
    }
}
