//! Payday CLI command

use chrono::{Local, NaiveDate};

use crate::config::settings::Settings;
use crate::engine::{GapStatus, Suggestion, SurplusStatus};
use crate::error::{PayplanError, PayplanResult};
use crate::models::Money;
use crate::services::PaydayService;
use crate::storage::Storage;

/// Handle the payday command: report how one pay event lands
pub fn handle_payday_command(
    storage: &Storage,
    settings: &Settings,
    amount: String,
    date: Option<String>,
) -> PayplanResult<()> {
    let amount = Money::parse(&amount)
        .map_err(|e| PayplanError::Validation(format!("Invalid amount: {}", e)))?;
    let as_of = match date {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| PayplanError::Validation(format!("Invalid date: {}", e)))?,
        None => Local::now().date_naive(),
    };

    let service = PaydayService::new(storage, settings);
    let result = service.compute(amount, as_of)?;
    let symbol = &settings.currency_symbol;

    println!("Payday: {}", result.pay_amount.format_with_symbol(symbol));
    println!("{}", "-".repeat(40));
    for tier in &result.tiers {
        if tier.envelope_count > 0 {
            println!(
                "  {:14} {} ({} envelopes)",
                tier.priority.to_string(),
                tier.total.format_with_symbol(symbol),
                tier.envelope_count
            );
        }
    }
    println!("  Regular total: {}", result.total_regular.format_with_symbol(symbol));

    match result.surplus_status {
        SurplusStatus::Available => {
            println!("  Surplus:       {}", result.surplus.format_with_symbol(symbol));
        }
        SurplusStatus::Shortfall => {
            println!(
                "  Shortfall:     {} - this pay does not cover the budget",
                result.surplus.abs().format_with_symbol(symbol)
            );
        }
        SurplusStatus::Exact => {
            println!("  Exact: this pay covers the budget to the cent.");
        }
    }

    if !result.envelope_health.is_empty() {
        println!();
        println!("Envelope health:");
        for health in &result.envelope_health {
            let marker = match health.status {
                GapStatus::Ahead => "ahead",
                GapStatus::OnTrack => "on track",
                GapStatus::Behind => "BEHIND",
            };
            println!(
                "  {:20} have {} / want {} ({})",
                health.name,
                health.current_amount.format_with_symbol(symbol),
                health.should_have_saved.format_with_symbol(symbol),
                marker
            );
        }
        if result.behind_count > 0 {
            println!(
                "  {} envelope(s) behind by {} total",
                result.behind_count,
                result.total_gap.format_with_symbol(symbol)
            );
        }
    }

    if !result.suggestions.is_empty() {
        println!();
        println!("Suggestions for the surplus:");
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            match suggestion {
                Suggestion::TopUp { name, amount, .. } => {
                    println!(
                        "  {}. Top up '{}' with {}",
                        i + 1,
                        name,
                        amount.format_with_symbol(symbol)
                    );
                }
                Suggestion::StartGoal { amount } => {
                    println!(
                        "  {}. Start a savings goal with {}",
                        i + 1,
                        amount.format_with_symbol(symbol)
                    );
                }
                Suggestion::HoldAsBuffer { amount } => {
                    println!(
                        "  {}. Hold {} as buffer",
                        i + 1,
                        amount.format_with_symbol(symbol)
                    );
                }
            }
        }
    }

    Ok(())
}
