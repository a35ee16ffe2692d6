//! Income source CLI commands

use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::engine::normalize_amount;
use crate::error::{PayplanError, PayplanResult};
use crate::models::{Frequency, IncomeSource, Money};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income source
    Add {
        /// Income source name
        name: String,

        /// Amount per occurrence (e.g., "2600" or "2600.00")
        amount: String,

        /// Frequency the amount recurs at (weekly, fortnightly, monthly, quarterly, annual)
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
    },

    /// List income sources
    List,

    /// Deactivate an income source
    Deactivate {
        /// Income source name
        name: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> PayplanResult<()> {
    match cmd {
        IncomeCommands::Add {
            name,
            amount,
            frequency,
        } => {
            if storage.incomes.find_by_name(&name)?.is_some() {
                return Err(PayplanError::Duplicate {
                    entity_type: "Income source",
                    identifier: name,
                });
            }

            let amount = Money::parse(&amount)
                .map_err(|e| PayplanError::Validation(format!("Invalid amount: {}", e)))?;
            let frequency: Frequency = frequency
                .parse()
                .map_err(|e| PayplanError::Validation(format!("{}", e)))?;

            // Store normalized to the user's pay cycle
            let per_cycle =
                normalize_amount(amount, frequency, settings.pay_cycle.frequency())?;
            let source = IncomeSource::new(name, per_cycle, frequency);
            source
                .validate()
                .map_err(|e| PayplanError::Validation(e.to_string()))?;

            storage.incomes.upsert(source.clone())?;
            storage.incomes.save()?;
            storage.log_create(
                EntityType::IncomeSource,
                source.id.to_string(),
                Some(source.name.clone()),
                &source,
            )?;

            println!(
                "Added income source '{}': {} per {} cycle",
                source.name,
                source.amount.format_with_symbol(&settings.currency_symbol),
                settings.pay_cycle
            );
        }

        IncomeCommands::List => {
            let sources = storage.incomes.get_all()?;
            if sources.is_empty() {
                println!("No income sources yet.");
            }
            for source in sources {
                let status = if source.active { "" } else { " (inactive)" };
                println!(
                    "{}: {} per {} cycle{}",
                    source.name,
                    source.amount.format_with_symbol(&settings.currency_symbol),
                    settings.pay_cycle,
                    status
                );
            }
        }

        IncomeCommands::Deactivate { name } => {
            let mut source = storage
                .incomes
                .find_by_name(&name)?
                .ok_or_else(|| PayplanError::income_source_not_found(&name))?;
            source.deactivate();
            storage.incomes.upsert(source.clone())?;
            storage.incomes.save()?;
            storage.log_update(
                EntityType::IncomeSource,
                source.id.to_string(),
                Some(source.name.clone()),
                &source,
                "deactivated",
            )?;

            println!("Deactivated '{}'", source.name);
        }
    }

    Ok(())
}
