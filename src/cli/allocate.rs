//! Allocation CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_source_totals;
use crate::error::{PayplanError, PayplanResult};
use crate::models::Money;
use crate::services::AllocationService;
use crate::storage::Storage;

/// Allocation subcommands
#[derive(Subcommand)]
pub enum AllocateCommands {
    /// Set how much of an envelope's contribution one source funds
    Set {
        /// Envelope name
        envelope: String,

        /// Income source name
        source: String,

        /// Amount of the envelope's per-cycle contribution this source funds
        amount: String,
    },

    /// Divide every envelope's contribution evenly across active sources
    Auto,

    /// Show per-source allocation totals
    Status,

    /// Finalize the budget (every source must balance to zero)
    Commit,
}

/// Handle an allocation command
pub fn handle_allocate_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AllocateCommands,
) -> PayplanResult<()> {
    let service = AllocationService::new(storage, settings);

    match cmd {
        AllocateCommands::Set {
            envelope,
            source,
            amount,
        } => {
            let envelope = storage
                .envelopes
                .find_by_name(&envelope)?
                .ok_or_else(|| PayplanError::envelope_not_found(&envelope))?;
            let source = storage
                .incomes
                .find_by_name(&source)?
                .ok_or_else(|| PayplanError::income_source_not_found(&source))?;
            let amount = Money::parse(&amount)
                .map_err(|e| PayplanError::Validation(format!("Invalid amount: {}", e)))?;

            let outcome = service.set_allocation(envelope.id, source.id, amount)?;

            println!(
                "Allocated {} of '{}' to '{}'",
                amount.format_with_symbol(&settings.currency_symbol),
                envelope.name,
                source.name
            );
            println!(
                "{}",
                format_source_totals(&outcome.per_source_totals, &settings.currency_symbol)
            );
        }

        AllocateCommands::Auto => {
            let outcome = service.auto_distribute()?;
            println!("Distributed allocations evenly across active sources.");
            println!(
                "{}",
                format_source_totals(&outcome.per_source_totals, &settings.currency_symbol)
            );
        }

        AllocateCommands::Status => {
            let outcome = service.status()?;
            println!(
                "{}",
                format_source_totals(&outcome.per_source_totals, &settings.currency_symbol)
            );
            if outcome.balanced {
                println!("Budget is balanced.");
            } else {
                println!("Budget is NOT balanced - every dollar needs a job before commit.");
            }
        }

        AllocateCommands::Commit => {
            let outcome = service.commit_budget()?;
            println!("Budget committed. Every active source is fully allocated.");
            println!(
                "{}",
                format_source_totals(&outcome.per_source_totals, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
