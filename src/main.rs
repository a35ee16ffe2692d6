use anyhow::Result;
use clap::{Parser, Subcommand};

use payplan::cli::{
    handle_allocate_command, handle_debt_command, handle_envelope_command, handle_export_command,
    handle_income_command, handle_payday_command, handle_rebalance_command,
};
use payplan::config::{paths::PayplanPaths, settings::Settings};
use payplan::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "payplan",
    version,
    about = "Envelope budgeting and debt-snowball planner",
    long_about = "payplan is a zero-based envelope budgeting tool: give every \
                  dollar of income a job across named envelopes, keep bills \
                  funded on schedule, and pay debts down smallest-balance-first."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new budget
    Init,

    /// Envelope management commands
    #[command(subcommand, alias = "env")]
    Envelope(payplan::cli::EnvelopeCommands),

    /// Income source commands
    #[command(subcommand)]
    Income(payplan::cli::IncomeCommands),

    /// Income allocation commands
    #[command(subcommand, alias = "alloc")]
    Allocate(payplan::cli::AllocateCommands),

    /// Report how one pay event lands across the budget
    Payday {
        /// The pay amount received
        amount: String,

        /// The date of the pay event (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Debt tracking and snowball payments
    #[command(subcommand)]
    Debt(payplan::cli::DebtCommands),

    /// Rebalance over-spent envelopes from surplus
    #[command(subcommand)]
    Rebalance(payplan::cli::RebalanceCommands),

    /// Export budget data
    #[command(subcommand)]
    Export(payplan::cli::ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = PayplanPaths::new()?;

    if let Commands::Init = cli.command {
        initialize_storage(&paths)?;
        println!("Initialized payplan at {}", paths.base_dir().display());
        return Ok(());
    }

    let settings = Settings::load_or_create(&paths)?;
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Envelope(cmd) => handle_envelope_command(&storage, &settings, cmd)?,
        Commands::Income(cmd) => handle_income_command(&storage, &settings, cmd)?,
        Commands::Allocate(cmd) => handle_allocate_command(&storage, &settings, cmd)?,
        Commands::Payday { amount, date } => {
            handle_payday_command(&storage, &settings, amount, date)?
        }
        Commands::Debt(cmd) => handle_debt_command(&storage, &settings, cmd)?,
        Commands::Rebalance(cmd) => handle_rebalance_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::Config => {
            println!("Base directory: {}", paths.base_dir().display());
            println!("Pay cycle:      {}", settings.pay_cycle);
            println!("Currency:       {}", settings.currency_symbol);
            println!("Tolerance:      {} cents", settings.tolerance_cents);
        }
    }

    Ok(())
}
