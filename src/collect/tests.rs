//! Tests for the fee collect modules, driven through the hub

use odra::casper_types::U256;
use odra::casper_types::bytesrepr::{Bytes, ToBytes};
use odra::host::{Deployer, HostEnv, NoArgs};
use odra::prelude::*;
use crate::collect::{
    AaveFeeCollectModule, CollectError, CollectPaymentData, CollectState, FeeCollectInitData,
    FeeCollectModule,
};
use crate::collect::aave_fee_collect_module::{AaveFeeCollectModuleHostRef, AaveFeeCollectModuleInitArgs};
use crate::collect::fee_collect_module::{FeeCollectModuleHostRef, FeeCollectModuleInitArgs};
use crate::errors::TokenError;
use crate::mocks::aave::{
    MockAavePoolHostRef, MockPoolAddressesProvider, MockPoolAddressesProviderHostRef,
    MockPoolAddressesProviderInitArgs,
};
use crate::mocks::globals::{ModuleGlobalsHostRef, ModuleGlobalsInitArgs};
use crate::mocks::hub::MockLensHubHostRef;
use crate::mocks::{MockAavePool, MockLensHub, ModuleGlobals};
use crate::token::{TestCurrency, TestCurrencyHostRef, TestCurrencyInitArgs};

const PRICE: u64 = 1000;
const TREASURY_FEE: u32 = 50;
const REFERRAL_FEE: u32 = 250;

struct Setup {
    env: HostEnv,
    hub: MockLensHubHostRef,
    globals: ModuleGlobalsHostRef,
    currency: TestCurrencyHostRef,
    publisher_profile: U256,
    referrer_profile: U256,
}

impl Setup {
    fn publisher(&self) -> Address {
        self.env.get_account(1)
    }

    fn recipient(&self) -> Address {
        self.env.get_account(2)
    }

    fn collector(&self) -> Address {
        self.env.get_account(3)
    }

    fn treasury(&self) -> Address {
        self.env.get_account(4)
    }

    fn referrer(&self) -> Address {
        self.env.get_account(5)
    }

    fn currency_address(&self) -> Address {
        self.currency.address().clone()
    }

    fn fee_module(&self) -> FeeCollectModuleHostRef {
        FeeCollectModule::deploy(
            &self.env,
            FeeCollectModuleInitArgs {
                hub: self.hub.address().clone(),
                module_globals: self.globals.address().clone(),
            },
        )
    }

    fn init_data(&self) -> FeeCollectInitData {
        FeeCollectInitData {
            amount: U256::from(PRICE),
            currency: self.currency_address(),
            collect_limit: U256::zero(),
            referral_fee: REFERRAL_FEE,
            follower_only: false,
            end_timestamp: 0,
            recipient: self.recipient(),
        }
    }

    fn payment(&self, amount: u64) -> Bytes {
        encoded(&CollectPaymentData {
            currency: self.currency_address(),
            amount: U256::from(amount),
        })
    }

    /// Publish under the publisher profile with `module`
    fn post(&mut self, module: Address, data: &FeeCollectInitData) -> U256 {
        self.env.set_caller(self.publisher());
        let profile_id = self.publisher_profile;
        self.hub.post(profile_id, module, encoded(data))
    }

    /// Collector approves `module` for `amount`
    fn approve(&mut self, module: Address, amount: u64) {
        self.env.set_caller(self.collector());
        self.currency.approve(module, U256::from(amount));
    }

    fn balance(&self, account: Address) -> U256 {
        self.currency.balance_of(account)
    }
}

fn encoded<T: ToBytes>(value: &T) -> Bytes {
    Bytes::from(value.to_bytes().unwrap())
}

fn setup() -> Setup {
    let env = odra_test::env();
    let governance = env.get_account(0);

    let mut globals = ModuleGlobals::deploy(
        &env,
        ModuleGlobalsInitArgs {
            governance,
            treasury: env.get_account(4),
            treasury_fee: TREASURY_FEE,
        },
    );
    let mut currency = TestCurrency::deploy(
        &env,
        TestCurrencyInitArgs {
            name: String::from("Wrapped Matic"),
            symbol: String::from("WMATIC"),
            decimals: 18,
        },
    );
    globals.whitelist_currency(currency.address().clone(), true);
    currency.mint(env.get_account(3), U256::from(10 * PRICE));

    let mut hub = MockLensHub::deploy(&env, NoArgs);
    let publisher_profile = hub.create_profile(env.get_account(1));
    let referrer_profile = hub.create_profile(env.get_account(5));

    Setup {
        env,
        hub,
        globals,
        currency,
        publisher_profile,
        referrer_profile,
    }
}

#[test]
fn test_initialize_stores_configuration() {
    let mut s = setup();
    let module = s.fee_module();
    let data = s.init_data();

    let pub_id = s.post(module.address().clone(), &data);

    let config = module.get_publication_data(s.publisher_profile, pub_id).unwrap();
    assert_eq!(config.amount, U256::from(PRICE));
    assert_eq!(config.currency, s.currency_address());
    assert_eq!(config.current_collects, U256::zero());
    assert_eq!(config.recipient, s.recipient());
    assert_eq!(config.referral_fee, REFERRAL_FEE);
    assert_eq!(module.collect_state(s.publisher_profile, pub_id), CollectState::Active);
}

#[test]
fn test_initialize_rejects_unlisted_currency() {
    let mut s = setup();
    let module = s.fee_module();
    let mut data = s.init_data();
    data.currency = s.env.get_account(9);

    s.env.set_caller(s.publisher());
    let profile_id = s.publisher_profile;
    assert_eq!(
        s.hub.try_post(profile_id, module.address().clone(), encoded(&data)),
        Err(CollectError::InitParamsInvalid.into())
    );
    assert_eq!(module.get_publication_data(profile_id, U256::one()), None);
    assert_eq!(module.collect_state(profile_id, U256::one()), CollectState::Uninitialized);
}

#[test]
fn test_initialize_rejects_past_end_timestamp() {
    let mut s = setup();
    let module = s.fee_module();
    s.env.advance_block_time(10_000);
    let mut data = s.init_data();
    data.end_timestamp = s.env.block_time() - 1;

    s.env.set_caller(s.publisher());
    let profile_id = s.publisher_profile;
    assert_eq!(
        s.hub.try_post(profile_id, module.address().clone(), encoded(&data)),
        Err(CollectError::InitParamsInvalid.into())
    );
}

#[test]
fn test_initialize_echoes_data_and_runs_once() {
    let s = setup();
    let hub_account = s.env.get_account(6);
    let mut module = FeeCollectModule::deploy(
        &s.env,
        FeeCollectModuleInitArgs {
            hub: hub_account,
            module_globals: s.globals.address().clone(),
        },
    );
    let data = encoded(&s.init_data());

    s.env.set_caller(hub_account);
    let echoed = module.initialize_publication_collect_module(U256::one(), U256::one(), data.clone());
    assert_eq!(echoed, data);

    assert_eq!(
        module.try_initialize_publication_collect_module(U256::one(), U256::one(), data),
        Err(CollectError::PublicationAlreadyConfigured.into())
    );
}

#[test]
fn test_entry_points_are_hub_only() {
    let mut s = setup();
    let mut module = s.fee_module();
    let data = s.init_data();
    let pub_id = s.post(module.address().clone(), &data);

    s.env.set_caller(s.collector());
    assert_eq!(
        module.try_initialize_publication_collect_module(U256::one(), U256::from(7), encoded(&data)),
        Err(CollectError::NotHub.into())
    );
    assert_eq!(
        module.try_process_collect(
            s.publisher_profile,
            s.collector(),
            s.publisher_profile,
            pub_id,
            s.payment(PRICE)
        ),
        Err(CollectError::NotHub.into())
    );
}

#[test]
fn test_collect_without_configuration_fails() {
    let s = setup();
    let hub_account = s.env.get_account(6);
    let mut module = FeeCollectModule::deploy(
        &s.env,
        FeeCollectModuleInitArgs {
            hub: hub_account,
            module_globals: s.globals.address().clone(),
        },
    );

    s.env.set_caller(hub_account);
    assert_eq!(
        module.try_process_collect(U256::one(), s.collector(), U256::one(), U256::one(), s.payment(PRICE)),
        Err(CollectError::PublicationNotConfigured.into())
    );
}

#[test]
fn test_collect_splits_payment_with_referrer() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);

    s.approve(module_address, PRICE);
    let (profile_id, referrer_profile) = (s.publisher_profile, s.referrer_profile);
    let payment = s.payment(PRICE);
    s.hub.collect(profile_id, pub_id, referrer_profile, payment);

    assert_eq!(s.balance(s.treasury()), U256::from(5));
    assert_eq!(s.balance(s.referrer()), U256::from(24));
    assert_eq!(s.balance(s.recipient()), U256::from(971));
    assert_eq!(s.balance(s.collector()), U256::from(9 * PRICE));
    assert_eq!(s.balance(module_address), U256::zero());

    let config = module.get_publication_data(profile_id, pub_id).unwrap();
    assert_eq!(config.current_collects, U256::one());
}

#[test]
fn test_collect_without_referrer_skips_referral_fee() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);

    s.approve(module_address, PRICE);
    let profile_id = s.publisher_profile;
    let payment = s.payment(PRICE);
    s.hub.collect(profile_id, pub_id, profile_id, payment);

    assert_eq!(s.balance(s.treasury()), U256::from(5));
    assert_eq!(s.balance(s.referrer()), U256::zero());
    assert_eq!(s.balance(s.recipient()), U256::from(995));
}

#[test]
fn test_referral_paid_to_current_profile_owner() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);

    let new_owner = s.env.get_account(7);
    s.env.set_caller(s.referrer());
    let referrer_profile = s.referrer_profile;
    s.hub.transfer_profile(referrer_profile, new_owner);

    s.approve(module_address, PRICE);
    let profile_id = s.publisher_profile;
    let payment = s.payment(PRICE);
    s.hub.collect(profile_id, pub_id, referrer_profile, payment);

    assert_eq!(s.balance(new_owner), U256::from(24));
    assert_eq!(s.balance(s.referrer()), U256::zero());
}

#[test]
fn test_collect_limit_reached() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let mut data = s.init_data();
    data.collect_limit = U256::one();
    let pub_id = s.post(module_address, &data);
    let profile_id = s.publisher_profile;

    s.approve(module_address, 2 * PRICE);
    let payment = s.payment(PRICE);
    s.hub.collect(profile_id, pub_id, profile_id, payment.clone());
    assert_eq!(module.collect_state(profile_id, pub_id), CollectState::LimitReached);

    let collector_before = s.balance(s.collector());
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, profile_id, payment),
        Err(CollectError::MintLimitExceeded.into())
    );

    let config = module.get_publication_data(profile_id, pub_id).unwrap();
    assert_eq!(config.current_collects, U256::one());
    assert_eq!(s.balance(s.collector()), collector_before);
}

#[test]
fn test_collect_after_end_timestamp_fails() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let mut data = s.init_data();
    data.end_timestamp = s.env.block_time() + 1_000;
    let pub_id = s.post(module_address, &data);
    let profile_id = s.publisher_profile;

    s.approve(module_address, PRICE);
    s.env.advance_block_time(2_000);

    let payment = s.payment(PRICE);
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, profile_id, payment),
        Err(CollectError::CollectExpired.into())
    );
    assert_eq!(module.collect_state(profile_id, pub_id), CollectState::Expired);

    let config = module.get_publication_data(profile_id, pub_id).unwrap();
    assert_eq!(config.current_collects, U256::zero());
    assert_eq!(s.balance(s.collector()), U256::from(10 * PRICE));
}

#[test]
fn test_follower_only_collect() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let mut data = s.init_data();
    data.follower_only = true;
    let pub_id = s.post(module_address, &data);
    let profile_id = s.publisher_profile;

    s.approve(module_address, PRICE);
    let payment = s.payment(PRICE);
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, profile_id, payment.clone()),
        Err(CollectError::FollowerRequired.into())
    );

    s.env.set_caller(s.collector());
    s.hub.follow(profile_id);
    s.hub.collect(profile_id, pub_id, profile_id, payment);

    assert_eq!(s.balance(s.recipient()), U256::from(995));
}

#[test]
fn test_mismatched_payment_data_rejected() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);
    let profile_id = s.publisher_profile;

    s.approve(module_address, PRICE);
    let underpaid = s.payment(PRICE - 1);
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, profile_id, underpaid),
        Err(CollectError::ModuleDataMismatch.into())
    );

    let wrong_currency = encoded(&CollectPaymentData {
        currency: s.env.get_account(9),
        amount: U256::from(PRICE),
    });
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, profile_id, wrong_currency),
        Err(CollectError::ModuleDataMismatch.into())
    );

    let config = module.get_publication_data(profile_id, pub_id).unwrap();
    assert_eq!(config.current_collects, U256::zero());
}

#[test]
fn test_failed_payment_leaves_no_trace() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);
    let (profile_id, referrer_profile) = (s.publisher_profile, s.referrer_profile);

    // Enough for the referral and net transfers, not the treasury cut
    s.approve(module_address, PRICE - 1);
    let payment = s.payment(PRICE);
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, referrer_profile, payment),
        Err(TokenError::InsufficientAllowance.into())
    );

    let config = module.get_publication_data(profile_id, pub_id).unwrap();
    assert_eq!(config.current_collects, U256::zero());
    assert_eq!(s.balance(s.collector()), U256::from(10 * PRICE));
    assert_eq!(s.balance(s.referrer()), U256::zero());
    assert_eq!(s.balance(s.recipient()), U256::zero());
    assert_eq!(s.balance(s.treasury()), U256::zero());
    assert_eq!(s.currency.allowance(s.collector(), module_address), U256::from(PRICE - 1));
}

#[test]
fn test_reentrant_collect_is_locked() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);
    let profile_id = s.publisher_profile;

    let payment = s.payment(PRICE);
    let hub_address = s.hub.address().clone();
    s.currency.arm_reentry(hub_address, profile_id, pub_id, payment.clone());
    s.approve(module_address, PRICE);

    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, profile_id, payment.clone()),
        Err(CollectError::Locked.into())
    );

    let config = module.get_publication_data(profile_id, pub_id).unwrap();
    assert_eq!(config.current_collects, U256::zero());
    assert_eq!(s.balance(s.collector()), U256::from(10 * PRICE));
    assert_eq!(s.balance(s.recipient()), U256::zero());
    assert_eq!(s.balance(s.treasury()), U256::zero());

    // The lock was rolled back with the failed call
    s.currency.disarm_reentry();
    s.env.set_caller(s.collector());
    s.hub.collect(profile_id, pub_id, profile_id, payment);
    assert_eq!(s.balance(s.recipient()), U256::from(995));
}

#[test]
fn test_refused_transfer_aborts_collect() {
    let mut s = setup();
    let module = s.fee_module();
    let module_address = module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);
    let (profile_id, referrer_profile) = (s.publisher_profile, s.referrer_profile);

    s.approve(module_address, PRICE);
    s.currency.set_refusals(true, false);

    s.env.set_caller(s.collector());
    let payment = s.payment(PRICE);
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, referrer_profile, payment),
        Err(CollectError::TransferFailed.into())
    );

    let config = module.get_publication_data(profile_id, pub_id).unwrap();
    assert_eq!(config.current_collects, U256::zero());
    assert_eq!(s.balance(s.collector()), U256::from(10 * PRICE));
    assert_eq!(s.balance(s.referrer()), U256::zero());
    assert_eq!(s.balance(s.recipient()), U256::zero());
    assert_eq!(s.balance(s.treasury()), U256::zero());
    assert_eq!(s.currency.allowance(s.collector(), module_address), U256::from(PRICE));
}

struct AaveSetup {
    pool: MockAavePoolHostRef,
    provider: MockPoolAddressesProviderHostRef,
    module: AaveFeeCollectModuleHostRef,
}

fn aave_setup(s: &Setup) -> AaveSetup {
    let pool = MockAavePool::deploy(&s.env, NoArgs);
    let provider = MockPoolAddressesProvider::deploy(
        &s.env,
        MockPoolAddressesProviderInitArgs {
            pool: pool.address().clone(),
        },
    );
    s.env.set_caller(s.env.get_account(0));
    let module = AaveFeeCollectModule::deploy(
        &s.env,
        AaveFeeCollectModuleInitArgs {
            hub: s.hub.address().clone(),
            module_globals: s.globals.address().clone(),
            pool_addresses_provider: provider.address().clone(),
        },
    );
    AaveSetup { pool, provider, module }
}

#[test]
fn test_aave_collect_supplies_net_amount() {
    let mut s = setup();
    let aave = aave_setup(&s);
    let module_address = aave.module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);
    let profile_id = s.publisher_profile;

    s.approve(module_address, PRICE);
    let payment = s.payment(PRICE);
    s.hub.collect(profile_id, pub_id, profile_id, payment);

    let pool_address = aave.pool.address().clone();
    assert_eq!(aave.pool.supplied_balance(s.currency_address(), s.recipient()), U256::from(995));
    assert_eq!(s.balance(pool_address), U256::from(995));
    assert_eq!(s.balance(s.recipient()), U256::zero());
    assert_eq!(s.balance(s.treasury()), U256::from(5));
    assert_eq!(s.balance(module_address), U256::zero());
    assert_eq!(aave.module.get_publication_data(profile_id, pub_id).unwrap().current_collects, U256::one());
}

#[test]
fn test_aave_refusal_pays_recipient_directly() {
    let mut s = setup();
    let mut aave = aave_setup(&s);
    aave.pool.set_accepting(false);
    let module_address = aave.module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);
    let (profile_id, referrer_profile) = (s.publisher_profile, s.referrer_profile);

    s.approve(module_address, PRICE);
    let payment = s.payment(PRICE);
    s.hub.collect(profile_id, pub_id, referrer_profile, payment);

    let pool_address = aave.pool.address().clone();
    assert_eq!(s.balance(s.recipient()), U256::from(971));
    assert_eq!(s.balance(s.referrer()), U256::from(24));
    assert_eq!(s.balance(s.treasury()), U256::from(5));
    assert_eq!(s.balance(module_address), U256::zero());
    assert_eq!(s.balance(pool_address), U256::zero());
    assert_eq!(s.currency.allowance(module_address, pool_address), U256::zero());
    assert_eq!(aave.pool.supplied_balance(s.currency_address(), s.recipient()), U256::zero());
    assert_eq!(aave.module.get_publication_data(profile_id, pub_id).unwrap().current_collects, U256::one());
}

#[test]
fn test_update_aave_pool_address_is_owner_only() {
    let s = setup();
    let mut aave = aave_setup(&s);
    let original_pool = aave.pool.address().clone();
    assert_eq!(aave.module.aave_pool(), original_pool);

    let replacement = MockAavePool::deploy(&s.env, NoArgs);
    assert_eq!(aave.module.pool_addresses_provider(), aave.provider.address().clone());
    aave.provider.set_pool(replacement.address().clone());

    s.env.set_caller(s.env.get_account(3));
    assert_eq!(
        aave.module.try_update_aave_pool_address(),
        Err(CollectError::Unauthorized.into())
    );
    assert_eq!(aave.module.aave_pool(), original_pool);

    s.env.set_caller(s.env.get_account(0));
    aave.module.update_aave_pool_address();
    assert_eq!(aave.module.aave_pool(), replacement.address().clone());
}

#[test]
fn test_aave_refused_approval_aborts_collect() {
    let mut s = setup();
    let aave = aave_setup(&s);
    let module_address = aave.module.address().clone();
    let data = s.init_data();
    let pub_id = s.post(module_address, &data);
    let profile_id = s.publisher_profile;

    s.approve(module_address, PRICE);
    s.currency.set_refusals(false, true);

    s.env.set_caller(s.collector());
    let payment = s.payment(PRICE);
    assert_eq!(
        s.hub.try_collect(profile_id, pub_id, profile_id, payment),
        Err(CollectError::ApprovalFailed.into())
    );

    let pool_address = aave.pool.address().clone();
    assert_eq!(s.balance(s.collector()), U256::from(10 * PRICE));
    assert_eq!(s.balance(module_address), U256::zero());
    assert_eq!(s.balance(pool_address), U256::zero());
    assert_eq!(aave.module.get_publication_data(profile_id, pub_id).unwrap().current_collects, U256::zero());
}
