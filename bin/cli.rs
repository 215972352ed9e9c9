//! CLI tool for deploying and interacting with the collect modules.

use lens_collect_modules::collect::{AaveFeeCollectModule, FeeCollectModule};
use lens_collect_modules::mocks::{MockLensHub, ModuleGlobals};
use lens_collect_modules::sbt::RewardSbt;
use lens_collect_modules::token::TestCurrency;
use odra::prelude::{Address, Addressable};
use odra::host::{HostEnv, NoArgs};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Treasury fee used for fresh test-network deployments (0.5%)
const DEFAULT_TREASURY_FEE: u32 = 50;

/// Deploys the module globals with the deployer as governance and treasury.
pub struct ModuleGlobalsDeployScript;

impl DeployScript for ModuleGlobalsDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lens_collect_modules::mocks::globals::ModuleGlobalsInitArgs;

        let caller = env.caller();
        let _globals = ModuleGlobals::load_or_deploy(
            &env,
            ModuleGlobalsInitArgs {
                governance: caller,
                treasury: caller,
                treasury_fee: DEFAULT_TREASURY_FEE,
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the test-network hub.
pub struct HubDeployScript;

impl DeployScript for HubDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        let _hub = MockLensHub::load_or_deploy(&env, NoArgs, container, 400_000_000_000)?;
        Ok(())
    }
}

/// Deploys the fee collect module.
/// Requires the hub and module globals to be deployed first.
pub struct FeeCollectModuleDeployScript;

impl DeployScript for FeeCollectModuleDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lens_collect_modules::collect::fee_collect_module::FeeCollectModuleInitArgs;

        let hub = container.contract_ref::<MockLensHub>(env)?;
        let globals = container.contract_ref::<ModuleGlobals>(env)?;

        let _module = FeeCollectModule::load_or_deploy(
            &env,
            FeeCollectModuleInitArgs {
                hub: hub.address().clone(),
                module_globals: globals.address().clone(),
            },
            container,
            500_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the whole test-network stack (globals, hub, fee collect module).
pub struct CollectStackDeployScript;

impl DeployScript for CollectStackDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        ModuleGlobalsDeployScript.deploy(env, container)?;
        HubDeployScript.deploy(env, container)?;
        FeeCollectModuleDeployScript.deploy(env, container)?;
        Ok(())
    }
}

/// Scenario to add or remove a currency from the whitelist.
pub struct WhitelistCurrencyScenario;

impl Scenario for WhitelistCurrencyScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "currency",
                "Address of the CEP-18 currency",
                NamedCLType::Key,
            ),
            CommandArg::new(
                "whitelisted",
                "Whether collects may be priced in this currency",
                NamedCLType::Bool,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut globals = container.contract_ref::<ModuleGlobals>(env)?;
        let currency = args.get_single::<Address>("currency")?;
        let whitelisted = args.get_single::<bool>("whitelisted")?;

        env.set_gas(50_000_000_000);
        globals.try_whitelist_currency(currency, whitelisted)?;

        println!("Currency whitelist updated");
        Ok(())
    }
}

impl ScenarioMetadata for WhitelistCurrencyScenario {
    const NAME: &'static str = "whitelist-currency";
    const DESCRIPTION: &'static str = "Adds or removes a collect currency from the module globals whitelist";
}

/// Scenario to change the protocol treasury fee.
pub struct SetTreasuryFeeScenario;

impl Scenario for SetTreasuryFeeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new(
            "treasury_fee",
            "Treasury fee in basis points, below 5000",
            NamedCLType::U32,
        )]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut globals = container.contract_ref::<ModuleGlobals>(env)?;
        let treasury_fee = args.get_single::<u32>("treasury_fee")?;

        env.set_gas(50_000_000_000);
        globals.try_set_treasury_fee(treasury_fee)?;

        println!("Treasury fee set to {} bps", treasury_fee);
        Ok(())
    }
}

impl ScenarioMetadata for SetTreasuryFeeScenario {
    const NAME: &'static str = "set-treasury-fee";
    const DESCRIPTION: &'static str = "Sets the treasury fee charged on every collect";
}

/// Scenario to refresh the Aave module's cached pool address.
pub struct UpdateAavePoolScenario;

impl Scenario for UpdateAavePoolScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut module = container.contract_ref::<AaveFeeCollectModule>(env)?;

        env.set_gas(50_000_000_000);
        module.try_update_aave_pool_address()?;

        println!("Aave pool address refreshed");
        Ok(())
    }
}

impl ScenarioMetadata for UpdateAavePoolScenario {
    const NAME: &'static str = "update-aave-pool";
    const DESCRIPTION: &'static str = "Re-reads the Aave pool address from the addresses provider";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for Lens fee collect modules on Casper")
        // Deploy scripts
        .deploy(ModuleGlobalsDeployScript)
        .deploy(HubDeployScript)
        .deploy(FeeCollectModuleDeployScript)
        .deploy(CollectStackDeployScript)
        // Contract references
        .contract::<ModuleGlobals>()
        .contract::<MockLensHub>()
        .contract::<FeeCollectModule>()
        .contract::<AaveFeeCollectModule>()
        .contract::<RewardSbt>()
        .contract::<TestCurrency>()
        // Scenarios
        .scenario(WhitelistCurrencyScenario)
        .scenario(SetTreasuryFeeScenario)
        .scenario(UpdateAavePoolScenario)
        .build()
        .run();
}
