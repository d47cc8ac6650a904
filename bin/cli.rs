//! CLI tool for deploying and interacting with the NFT loan vault.

use nft_loan_vault::nft::CollateralNft;
use nft_loan_vault::token::PaymentToken;
use nft_loan_vault::vault::LoanVault;
use odra::casper_types::U256;
use odra::host::HostEnv;
use odra::prelude::Addressable;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the CEP-18 payment token.
pub struct PaymentTokenDeployScript;

impl DeployScript for PaymentTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use nft_loan_vault::token::PaymentTokenInitArgs;

        let _token = PaymentToken::load_or_deploy(
            &env,
            PaymentTokenInitArgs {
                name: String::from("Buckie"),
                symbol: String::from("BKE"),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the collateral NFT collection.
pub struct CollateralNftDeployScript;

impl DeployScript for CollateralNftDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use nft_loan_vault::nft::CollateralNftInitArgs;

        let _nft = CollateralNft::load_or_deploy(
            &env,
            CollateralNftInitArgs {
                name: String::from("Blockie"),
                symbol: String::from("KIE"),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the Loan Vault.
/// Requires the payment token to be deployed first.
pub struct LoanVaultDeployScript;

impl DeployScript for LoanVaultDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use nft_loan_vault::vault::loan_vault::LoanVaultInitArgs;

        let token = container.contract_ref::<PaymentToken>(env)?;

        let _vault = LoanVault::load_or_deploy(
            &env,
            LoanVaultInitArgs {
                payment_token: token.address().clone(),
            },
            container,
            500_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the full set: payment token, NFT collection and vault.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        PaymentTokenDeployScript.deploy(env, container)?;
        CollateralNftDeployScript.deploy(env, container)?;
        LoanVaultDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to deposit payment tokens into the vault.
pub struct LendScenario;

impl Scenario for LendScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "amount",
                "Amount of payment tokens to lend",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut token = container.contract_ref::<PaymentToken>(env)?;
        let mut vault = container.contract_ref::<LoanVault>(env)?;
        let amount = args.get_single::<U256>("amount")?;

        env.set_gas(100_000_000_000);
        token.try_approve(vault.address().clone(), amount)?;

        env.set_gas(300_000_000_000);
        vault.try_lend(amount)?;

        println!("Lent {} tokens, vault now holds {}", amount, vault.locked_amount());
        Ok(())
    }
}

impl ScenarioMetadata for LendScenario {
    const NAME: &'static str = "lend";
    const DESCRIPTION: &'static str = "Approves the vault and deposits payment tokens";
}

/// Scenario to liquidate every overdue loan.
pub struct LiquidateLoansScenario;

impl Scenario for LiquidateLoansScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut vault = container.contract_ref::<LoanVault>(env)?;

        env.set_gas(500_000_000_000);
        let liquidated = vault.try_liquidate_loans()?;

        println!("Liquidated {} of {} loans", liquidated, vault.loans_count());
        Ok(())
    }
}

impl ScenarioMetadata for LiquidateLoansScenario {
    const NAME: &'static str = "liquidate-loans";
    const DESCRIPTION: &'static str = "Liquidates all loans past their term";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the NFT loan vault")
        // Deploy scripts
        .deploy(PaymentTokenDeployScript)
        .deploy(CollateralNftDeployScript)
        .deploy(LoanVaultDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<PaymentToken>()
        .contract::<CollateralNft>()
        .contract::<LoanVault>()
        // Scenarios
        .scenario(LendScenario)
        .scenario(LiquidateLoansScenario)
        .build()
        .run();
}
