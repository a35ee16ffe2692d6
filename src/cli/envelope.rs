//! Envelope CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::display::format_envelope_list;
use crate::error::{PayplanError, PayplanResult};
use crate::models::{Envelope, Frequency, Money, Priority};
use crate::storage::Storage;

/// Envelope subcommands
#[derive(Subcommand)]
pub enum EnvelopeCommands {
    /// Create a new envelope
    Add {
        /// Envelope name
        name: String,

        /// Target amount per funding cycle (e.g., "1200" or "1200.00")
        target: String,

        /// Funding frequency (none, weekly, fortnightly, monthly, quarterly, annual)
        #[arg(short, long, default_value = "monthly")]
        frequency: String,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,

        /// Priority tier (essential, important, discretionary)
        #[arg(short, long)]
        priority: Option<String>,

        /// Mark as a savings goal (exempt from budget balance)
        #[arg(long)]
        goal: bool,

        /// Mark as free spending (exempt from budget balance)
        #[arg(long)]
        spending: bool,

        /// Mark as tracking-only (exempt from budget balance)
        #[arg(long)]
        tracking: bool,
    },

    /// List all envelopes
    List,

    /// Set an envelope's live balance
    SetBalance {
        /// Envelope name
        name: String,

        /// New balance (negative means over-spent)
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle an envelope command
pub fn handle_envelope_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EnvelopeCommands,
) -> PayplanResult<()> {
    match cmd {
        EnvelopeCommands::Add {
            name,
            target,
            frequency,
            due,
            priority,
            goal,
            spending,
            tracking,
        } => {
            if storage.envelopes.find_by_name(&name)?.is_some() {
                return Err(PayplanError::Duplicate {
                    entity_type: "Envelope",
                    identifier: name,
                });
            }

            let target = Money::parse(&target)
                .map_err(|e| PayplanError::Validation(format!("Invalid target: {}", e)))?;
            let frequency: Frequency = frequency
                .parse()
                .map_err(|e| PayplanError::Validation(format!("{}", e)))?;

            let mut envelope = Envelope::new(name, target, frequency);
            if let Some(due) = due {
                let due = NaiveDate::parse_from_str(&due, "%Y-%m-%d")
                    .map_err(|e| PayplanError::Validation(format!("Invalid due date: {}", e)))?;
                envelope.set_due_date(Some(due));
            }
            if let Some(priority) = priority {
                let priority: Priority = priority
                    .parse()
                    .map_err(|e| PayplanError::Validation(format!("{}", e)))?;
                envelope.set_priority(priority);
            }
            envelope.is_goal = goal;
            envelope.is_spending = spending;
            envelope.is_tracking_only = tracking;

            envelope
                .validate()
                .map_err(|e| PayplanError::Validation(e.to_string()))?;

            storage.envelopes.upsert(envelope.clone())?;
            storage.envelopes.save()?;
            storage.log_create(
                EntityType::Envelope,
                envelope.id.to_string(),
                Some(envelope.name.clone()),
                &envelope,
            )?;

            println!("Created envelope '{}' ({})", envelope.name, envelope.id);
        }

        EnvelopeCommands::List => {
            let envelopes = storage.envelopes.get_all()?;
            if envelopes.is_empty() {
                println!("No envelopes yet. Add one with: payplan envelope add <name> <target>");
            } else {
                println!(
                    "{}",
                    format_envelope_list(&envelopes, settings.pay_cycle, &settings.currency_symbol)?
                );
            }
        }

        EnvelopeCommands::SetBalance { name, amount } => {
            let mut envelope = storage
                .envelopes
                .find_by_name(&name)?
                .ok_or_else(|| PayplanError::envelope_not_found(&name))?;
            let amount = Money::parse(&amount)
                .map_err(|e| PayplanError::Validation(format!("Invalid amount: {}", e)))?;

            let before = envelope.current_amount;
            envelope.set_balance(amount);
            storage.envelopes.upsert(envelope.clone())?;
            storage.envelopes.save()?;
            storage.log_update(
                EntityType::Envelope,
                envelope.id.to_string(),
                Some(envelope.name.clone()),
                &envelope,
                format!("balance: {} -> {}", before, amount),
            )?;

            println!("Set '{}' balance to {}", envelope.name, amount);
        }
    }

    Ok(())
}
