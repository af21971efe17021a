//! Crypto Mania mint client.
//!
//! Terminal front end for the Crypto Mania NFT contract.
//!
//! # Architecture Overview
//!
//! ```text
//!   wallet key (env) + config (TOML)
//!            │
//!            ▼
//!   ┌─────────────────┐   chain id, reads,   ┌──────────────────┐
//!   │  chain::client  │◀────── writes ──────▶│  JSON-RPC node   │
//!   │   (RpcWallet)   │                      └──────────────────┘
//!   └────────┬────────┘
//!            │ WalletBridge
//!            ▼
//!   ┌─────────────────┐  every 5s  ┌──────────────────┐
//!   │ session::       │◀───────────│ session::poller  │
//!   │ MintController  │            │ (2 tasks)        │
//!   └────────┬────────┘            └──────────────────┘
//!            │ watch<MintStatus>
//!            ▼
//!   ┌─────────────────┐
//!   │ presentation    │  RenderMode → View → stdout
//!   └─────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use cryptomania_mint::chain::contract::{contract_ref, COLLECTION_NAME, TARGET_CHAIN_ID};
use cryptomania_mint::chain::{MintError, MintResult, RpcWallet, TxOutcome, Wallet};
use cryptomania_mint::config::{load_or_default, MintConfig};
use cryptomania_mint::lifecycle::signals::wait_for_interrupt;
use cryptomania_mint::observability::logging;
use cryptomania_mint::session::SessionAlert;
use cryptomania_mint::{Action, MintController, MintStatus, View};

#[derive(Parser)]
#[command(name = "cryptomania-mint")]
#[command(about = "Mint client for the Crypto Mania NFT collection", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the page as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the mint state once and print it
    Status,
    /// Keep the page open, re-render on change; Enter triggers the offered action
    Watch,
    /// Owner only: open the presale
    StartPresale,
    /// Mint during the presale at the presale price
    MintPresale,
    /// Mint after the presale at the public price
    MintPublic,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);
    tracing::info!("cryptomania-mint v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: MintConfig) -> Result<(), Box<dyn std::error::Error>> {
    let address: Address = config.contract.address.parse()?;
    let wallet = Wallet::from_env(TARGET_CHAIN_ID)?;
    let bridge = Arc::new(RpcWallet::new(config.network.clone(), wallet)?);

    tracing::info!(
        contract = %address,
        chain_id = TARGET_CHAIN_ID.0,
        poll_interval_secs = config.polling.interval_secs,
        "Configuration loaded"
    );

    let controller = Arc::new(MintController::new(
        bridge,
        contract_ref(address),
        Duration::from_secs(config.polling.interval_secs),
    ));

    let result = match cli.command {
        Commands::Status => status(&controller, cli.json).await,
        Commands::Watch => watch(controller.clone(), cli.json).await,
        Commands::StartPresale => one_shot(&controller, Action::StartPresale, cli.json).await,
        Commands::MintPresale => one_shot(&controller, Action::MintPresale, cli.json).await,
        Commands::MintPublic => one_shot(&controller, Action::MintPublic, cli.json).await,
    };

    controller.disconnect().await;
    result
}

async fn status(controller: &MintController, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = controller.load().await;
    controller.stop_polling().await;
    if let Err(e) = &loaded {
        alert(e);
    }
    render(controller.status(), json)?;
    loaded.map_err(Into::into)
}

async fn one_shot(
    controller: &MintController,
    action: Action,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = controller.load().await;
    controller.stop_polling().await;
    if let Err(e) = loaded {
        alert(&e);
        return Err(e.into());
    }

    let view = View::new(controller.status());
    if view.action != Some(action) {
        render(view.status, json)?;
        return Err(format!("'{}' is not available right now ({:?})", action.label(), view.mode).into());
    }

    let outcome = execute(controller, action).await;
    report(action, &outcome);
    render(controller.status(), json)?;
    outcome.map(|_| ()).map_err(Into::into)
}

async fn watch(controller: Arc<MintController>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = controller.load().await {
        alert(&e);
    }

    let mut updates = controller.subscribe();
    let mut alerts = controller.alerts();
    let mut alerts_open = true;
    render(*updates.borrow_and_update(), json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let interrupt = wait_for_interrupt();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            _ = &mut interrupt => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *updates.borrow_and_update();
                render(status, json)?;
            }
            received = alerts.recv(), if alerts_open => {
                match received {
                    Ok(SessionAlert::NetworkSwitched { expected, .. }) => {
                        println!("! Please switch your wallet to Goerli (chain {})", expected)
                    }
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => alerts_open = false,
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(_) => trigger(&controller),
                    // stdin closed: keep rendering until interrupted
                    None => stdin_open = false,
                }
            }
        }
    }

    controller.stop_polling().await;
    Ok(())
}

/// Run the action offered by the current render mode without blocking the page.
fn trigger(controller: &Arc<MintController>) {
    let Some(action) = View::new(controller.status()).action else {
        return;
    };

    let controller = controller.clone();
    tokio::spawn(async move {
        let outcome = execute(&controller, action).await;
        report(action, &outcome);
    });
}

async fn execute(controller: &MintController, action: Action) -> MintResult<Option<TxOutcome>> {
    match action {
        Action::Connect => controller.load().await.map(|_| None),
        Action::StartPresale => controller.start_presale().await.map(Some),
        Action::MintPresale => controller.mint_presale().await.map(Some),
        Action::MintPublic => controller.mint_public().await.map(Some),
    }
}

fn report(action: Action, outcome: &MintResult<Option<TxOutcome>>) {
    match outcome {
        Ok(Some(tx)) => match action {
            Action::StartPresale => println!("Presale started (tx {})", tx.tx_hash),
            _ => println!("Minted {} successfully (tx {})", COLLECTION_NAME, tx.tx_hash),
        },
        Ok(None) => println!("Wallet connected"),
        Err(e) => alert(e),
    }
}

fn alert(e: &MintError) {
    if !e.is_user_visible() {
        return;
    }
    match e {
        MintError::NetworkMismatch { expected, .. } => {
            println!("! Please switch your wallet to Goerli (chain {})", expected)
        }
        other => println!("! {}", other),
    }
}

fn render(status: MintStatus, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let view = View::new(status);
    if json {
        println!("{}", serde_json::to_string(&view)?);
    } else {
        println!("{}", view);
    }
    Ok(())
}
