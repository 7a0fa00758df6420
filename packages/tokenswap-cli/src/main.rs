mod config;
mod render;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::Config;
use tokenswap_rs::{
    all_networks, deploy_token_swap, format_display_amount, short_address, BridgeError,
    BridgeOrchestrator, BridgeReceipt, Connection, ContractArtifact, DeployConfig, EventBus,
    NetworkKey, WalletConnector, TOKEN_DECIMALS,
};

/// A failure the renderer has already printed as a toast
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
struct Reported(BridgeError);

/// Wrap errors the orchestrator toasted so they are not reported twice
fn reported(err: BridgeError) -> eyre::Report {
    if err.is_silent() {
        err.into()
    } else {
        Reported(err).into()
    }
}

#[derive(Parser)]
#[command(name = "tokenswap")]
#[command(about = "Bridge V1 tokens to V2 through the TokenSwap contract", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Target network (overrides TOKENSWAP_NETWORK)
    #[arg(long, global = true)]
    network: Option<NetworkKey>,

    /// Switch networks without asking
    #[arg(short = 'y', long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known networks and their contract addresses
    Networks,

    /// Show the signer's V1 and V2 balances
    Balance,

    /// Bridge an amount of V1 to V2
    Bridge {
        /// Decimal amount, e.g. "12.5"
        #[arg(short, long, required_unless_present = "max", conflicts_with = "max")]
        amount: Option<String>,

        /// Bridge the whole cached V1 balance
        #[arg(long)]
        max: bool,
    },

    /// Bridge the whole V1 balance with bridgeAll()
    BridgeAll,

    /// Deploy the TokenSwap contract
    Deploy {
        /// Compiled TokenSwap artifact (Hardhat or Foundry JSON)
        #[arg(long)]
        artifact: PathBuf,

        /// V1 token (defaults to the network's)
        #[arg(long)]
        v1: Option<Address>,

        /// V2 token (defaults to the network's)
        #[arg(long)]
        v2: Option<Address>,

        /// Gas price in gwei (overrides GAS_PRICE_GWEI)
        #[arg(long)]
        gas_price_gwei: Option<u64>,
    },
}

fn main() -> Result<ExitCode> {
    // Install color-eyre for better error reporting
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(cli));
    exit_code(result)
}

/// Toasted failures only set the exit status; everything else gets a report
fn exit_code(result: Result<()>) -> Result<ExitCode> {
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(report) if report.downcast_ref::<Reported>().is_some() => Ok(ExitCode::FAILURE),
        Err(report) => Err(report),
    }
}

async fn async_main(cli: Cli) -> Result<()> {
    if let Commands::Networks = cli.command {
        print_networks();
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(network) = cli.network {
        config.network = network;
    }
    tracing::debug!(config = ?config, "Configuration loaded");

    tokio::select! {
        result = run(cli.command, &config, cli.yes) => result,
        _ = wait_for_shutdown_signal() => {
            Err(eyre!("Interrupted; a transaction already submitted may still be mined"))
        }
    }
}

async fn run(command: Commands, config: &Config, yes: bool) -> Result<()> {
    match command {
        Commands::Networks => {
            print_networks();
            Ok(())
        }
        Commands::Balance => {
            let v2 = with_renderer(|events| async move {
                let orchestrator = open_session(config, &events, yes).await?;
                let profile = orchestrator.channel().profile();
                let signer = orchestrator.channel().signer_address();
                let v2 = orchestrator
                    .channel()
                    .chain()
                    .balance_of(profile.v2_token, signer)
                    .await?;
                Ok(v2)
            })
            .await?;

            println!(
                "V2 balance: {}",
                format_display_amount(v2, TOKEN_DECIMALS)
            );
            Ok(())
        }
        Commands::Bridge { amount, max } => {
            let receipt = with_renderer(|events| async move {
                let orchestrator = open_session(config, &events, yes).await?;
                match amount {
                    Some(input) if !max => {
                        orchestrator.set_amount_from_str(&input).await?;
                    }
                    _ => {
                        orchestrator.set_max().await;
                    }
                }
                orchestrator.bridge_pending().await.map_err(reported)
            })
            .await?;

            print_receipt(receipt);
            Ok(())
        }
        Commands::BridgeAll => {
            let receipt = with_renderer(|events| async move {
                let orchestrator = open_session(config, &events, yes).await?;
                orchestrator.bridge_all().await.map_err(reported)
            })
            .await?;

            print_receipt(receipt);
            Ok(())
        }
        Commands::Deploy {
            artifact,
            v1,
            v2,
            gas_price_gwei,
        } => {
            let profile = config.profile();
            let deploy_config = DeployConfig::new(
                v1.unwrap_or(profile.v1_token),
                v2.unwrap_or(profile.v2_token),
            )
            .with_gas_price_gwei(gas_price_gwei.unwrap_or(config.gas_price_gwei));

            let artifact = ContractArtifact::from_file(&artifact)?;
            let deployment = deploy_token_swap(
                &config.rpc_url()?,
                config.require_private_key()?,
                &artifact,
                &deploy_config,
            )
            .await?;

            println!("TokenSwap deployed at {}", deployment.address);
            println!("Transaction: {}", deployment.tx_hash);
            Ok(())
        }
    }
}

/// Connect, resolve a network mismatch, and read the initial balance
async fn open_session(config: &Config, events: &EventBus, yes: bool) -> Result<BridgeOrchestrator> {
    let profile = config.profile();
    if !profile.is_deployed() {
        return Err(eyre!("TokenSwap is not deployed on {} yet", profile.name));
    }

    let wallet = config.build_wallet()?;
    let mut connector = WalletConnector::new(Arc::new(wallet), profile, events.clone());

    let channel = match connector.connect().await? {
        Connection::Ready(channel) => channel,
        Connection::Mismatch { expected, actual } => {
            let question = format!(
                "Wallet is on chain {}, but TokenSwap lives on {} (chain {}). Switch?",
                actual, profile.name, expected
            );
            if !yes && !confirm(question).await? {
                connector.disconnect();
                return Err(eyre!("Incorrect network: switch to {} to continue", profile.name));
            }
            connector.switch_network().await?
        }
    };

    println!(
        "Connected to {} as {}",
        profile.name,
        short_address(&channel.signer_address())
    );

    let orchestrator = BridgeOrchestrator::new(channel, config.approval_policy, events.clone());
    orchestrator.refresh_balance().await.map_err(reported)?;
    Ok(orchestrator)
}

/// Run a session with the event renderer attached. Every queued line is
/// printed before this returns, on success or failure.
async fn with_renderer<F, Fut, T>(session: F) -> Result<T>
where
    F: FnOnce(EventBus) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let events = EventBus::new();
    let renderer = render::spawn(&events);
    // The session future owns the last publishers; they drop when it completes
    let result = session(events).await;
    renderer.await?;
    result
}

async fn confirm(question: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || -> Result<bool> {
        print!("{} [y/N] ", question);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    })
    .await
    .wrap_err("Prompt task failed")?
}

fn print_networks() {
    for profile in all_networks() {
        let status = if profile.is_deployed() {
            "deployed"
        } else {
            "not deployed"
        };
        println!(
            "{:<8} chain {:<4} {:<16} swap {} ({})",
            profile.key.as_str(),
            profile.chain_id,
            profile.name,
            short_address(&profile.token_swap),
            status
        );
    }
}

fn print_receipt(receipt: BridgeReceipt) {
    println!(
        "Bridged {} V1 -> V2 in {}",
        format_display_amount(receipt.amount, TOKEN_DECIMALS),
        receipt.bridge.tx_hash
    );
    if let Some(approval) = receipt.approval {
        println!("Approval: {}", approval.tx_hash);
    }
}

/// Initialize tracing/logging with structured output
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,tokenswap_rs=debug"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Wait for shutdown signals (SIGINT/SIGTERM)
async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
