//! Option Desk CLI
//!
//! Drives a CosmWasm option contract from the terminal.
//!
//! # Architecture Overview
//!
//! ```text
//!   option-desk <command>
//!        │
//!        ▼
//!   ┌──────────┐   ┌───────────┐   ┌──────────────────────────────┐
//!   │  config  │──▶│ lifecycle │──▶│  contract (OptionContract)   │
//!   └──────────┘   │  startup  │   └──────┬───────────────┬───────┘
//!                  └───────────┘          │ actions       │ status
//!                                         ▼               ▼
//!                               ┌──────────────────┐  ┌─────────────┐
//!                               │   confirmation   │  │   ledger    │
//!                               │ executor, poller │─▶│ LCD, signer │
//!                               └──────────────────┘  └─────────────┘
//! ```
//!
//! Confirmations are printed to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use option_desk::config::{load_config, DeskConfig};
use option_desk::ledger::{Coin, Confirmation, LcdClient, TxHash};
use option_desk::lifecycle::{signals, startup};
use option_desk::observability::{logging, metrics};
use option_desk::Shutdown;

#[derive(Parser)]
#[command(name = "option-desk")]
#[command(about = "Submit option contract calls and wait for confirmation", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "OPTION_DESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the LCD is reachable and on the configured chain
    Health,
    /// Show the option contract's current state
    Status,
    /// Deposit collateral into the option
    FundCollateral {
        #[arg(long, required = true, num_args = 1..)]
        funds: Vec<Coin>,
    },
    /// Pay the option premium
    FundPremium {
        #[arg(long, required = true, num_args = 1..)]
        funds: Vec<Coin>,
    },
    /// Underwrite the option on its current terms
    Underwrite {
        #[arg(long, required = true, num_args = 1..)]
        funds: Vec<Coin>,
    },
    /// Exercise the option
    Execute {
        #[arg(long, num_args = 1..)]
        funds: Vec<Coin>,
    },
    /// Withdraw from an expired option (or an unlocked one with --unlocked)
    Withdraw {
        #[arg(long)]
        unlocked: bool,
    },
    /// Transfer the option to a new holder
    Transfer {
        #[arg(long)]
        recipient: String,
    },
    /// Wait for an already submitted transaction
    Wait { tx_hash: TxHash },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => DeskConfig::default(),
    };

    logging::init_logging(&config.observability);
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    match shutdown.run_until_triggered(run(cli.command, &config)).await {
        Some(Ok(code)) => code,
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        None => {
            eprintln!("Interrupted. A submitted transaction may still be confirmed; check it with `option-desk wait <hash>`.");
            ExitCode::from(130)
        }
    }
}

async fn run(command: Commands, config: &DeskConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::Health => {
            let lcd = LcdClient::new(config.network.clone())?;
            lcd.check_health().await?;
            println!("{} is serving {}", config.network.lcd_url, config.network.chain_id);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status => {
            let state = startup::build_reader(config)?.state().await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Wait { tx_hash } => {
            let poller = startup::build_poller(config)?;
            report(poller.wait(&tx_hash).await?)
        }
        Commands::FundCollateral { funds } => {
            report(startup::build_contract(config)?.fund_collateral(funds).await?)
        }
        Commands::FundPremium { funds } => {
            report(startup::build_contract(config)?.fund_premium(funds).await?)
        }
        Commands::Underwrite { funds } => {
            report(startup::build_contract(config)?.underwrite(funds).await?)
        }
        Commands::Execute { funds } => {
            report(startup::build_contract(config)?.execute_option(funds).await?)
        }
        Commands::Withdraw { unlocked } => {
            let contract = startup::build_contract(config)?;
            let confirmation = if unlocked {
                contract.withdraw_unlocked().await?
            } else {
                contract.withdraw_expired().await?
            };
            report(confirmation)
        }
        Commands::Transfer { recipient } => {
            report(startup::build_contract(config)?.transfer(recipient).await?)
        }
    }
}

fn report(confirmation: Confirmation) -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&confirmation)?);
    match confirmation.failure_summary() {
        None => Ok(ExitCode::SUCCESS),
        Some(summary) => {
            eprintln!("{}", summary);
            Ok(ExitCode::FAILURE)
        }
    }
}
