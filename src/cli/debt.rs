//! Debt CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_debt_list, format_schedule};
use crate::engine::DebtEvent;
use crate::error::{PayplanError, PayplanResult};
use crate::models::Money;
use crate::services::DebtService;
use crate::storage::Storage;

/// Debt subcommands
#[derive(Subcommand)]
pub enum DebtCommands {
    /// Declare a new debt under an envelope
    Add {
        /// Envelope the debt belongs to
        envelope: String,

        /// Debt name
        name: String,

        /// Current balance owed
        balance: String,

        /// APR as a percentage (e.g., 24 for 24%)
        #[arg(short, long)]
        apr: Option<f64>,

        /// Minimum monthly payment
        #[arg(short, long)]
        minimum: Option<String>,
    },

    /// List debts in snowball order
    List,

    /// Apply a payment across debts, smallest balance first
    Pay {
        /// Payment amount
        amount: String,
    },

    /// Project the payoff curve for a debt
    Project {
        /// Debt name
        name: String,

        /// Extra payment on top of the minimum
        #[arg(short, long)]
        extra: Option<String>,

        /// Print the full amortization schedule
        #[arg(short, long)]
        schedule: bool,

        /// Write the amortization schedule to a CSV file
        #[arg(long)]
        csv: Option<std::path::PathBuf>,
    },
}

/// Handle a debt command
pub fn handle_debt_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DebtCommands,
) -> PayplanResult<()> {
    let service = DebtService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        DebtCommands::Add {
            envelope,
            name,
            balance,
            apr,
            minimum,
        } => {
            let envelope = storage
                .envelopes
                .find_by_name(&envelope)?
                .ok_or_else(|| PayplanError::envelope_not_found(&envelope))?;
            let balance = Money::parse(&balance)
                .map_err(|e| PayplanError::Validation(format!("Invalid balance: {}", e)))?;
            let minimum = minimum
                .map(|m| {
                    Money::parse(&m).map_err(|e| {
                        PayplanError::Validation(format!("Invalid minimum payment: {}", e))
                    })
                })
                .transpose()?;
            // APR arrives as a percentage on the command line
            let apr = apr.map(|rate| rate / 100.0);

            let debt = service.add_debt(envelope.id, name, balance, apr, minimum)?;
            println!(
                "Added debt '{}': {} owed",
                debt.name,
                debt.current_balance.format_with_symbol(symbol)
            );
        }

        DebtCommands::List => {
            let debts = service.list()?;
            if debts.is_empty() {
                println!("No debts tracked. That is the goal!");
            } else {
                println!("{}", format_debt_list(&debts, symbol));
                let outstanding: Money = debts.iter().map(|d| d.current_balance).sum();
                println!("Total outstanding: {}", outstanding.format_with_symbol(symbol));
            }
        }

        DebtCommands::Pay { amount } => {
            let amount = Money::parse(&amount)
                .map_err(|e| PayplanError::Validation(format!("Invalid amount: {}", e)))?;

            let outcome = service.apply_payment(amount)?;

            println!(
                "Applied {} across debts.",
                outcome.payment_applied.format_with_symbol(symbol)
            );
            for event in &outcome.events {
                match event {
                    DebtEvent::DebtPaidOff { name, .. } => {
                        println!("  Paid off '{}'!", name);
                    }
                    DebtEvent::AllDebtsCleared => {
                        println!("  ALL DEBTS CLEARED!");
                    }
                }
            }
            if outcome.remaining_payment.is_positive() {
                println!(
                    "  {} left over after clearing everything - move it to savings.",
                    outcome.remaining_payment.format_with_symbol(symbol)
                );
            }
            println!();
            println!("{}", format_debt_list(&outcome.debts, symbol));
        }

        DebtCommands::Project {
            name,
            extra,
            schedule,
            csv,
        } => {
            let debt = storage
                .debts
                .find_by_name(&name)?
                .ok_or_else(|| PayplanError::debt_not_found(&name))?;
            let extra = extra
                .map(|e| {
                    Money::parse(&e).map_err(|err| {
                        PayplanError::Validation(format!("Invalid extra payment: {}", err))
                    })
                })
                .transpose()?
                .unwrap_or_default();

            let (projection, payoff) = service.project(debt.id, extra)?;

            println!("Payoff projection for '{}':", debt.name);
            println!(
                "  Balance:        {}",
                projection.current_balance.format_with_symbol(symbol)
            );
            println!(
                "  Payment:        {}/month",
                projection.monthly_payment().format_with_symbol(symbol)
            );
            println!("  Months to payoff: {}", projection.months_to_payoff);
            println!(
                "  Total interest:   {}",
                projection.total_interest.format_with_symbol(symbol)
            );

            if schedule {
                println!();
                println!("{}", format_schedule(&payoff.schedule, symbol));
            }

            if let Some(path) = csv {
                let mut file = std::fs::File::create(&path).map_err(|e| {
                    PayplanError::Export(format!("Cannot create {}: {}", path.display(), e))
                })?;
                crate::export::export_schedule_csv(&payoff.schedule, &mut file)?;
                println!("Schedule written to {}", path.display());
            }
        }
    }

    Ok(())
}
