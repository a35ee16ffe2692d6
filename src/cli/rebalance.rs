//! Rebalance CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::PayplanResult;
use crate::services::RebalanceService;
use crate::storage::Storage;

/// Rebalance subcommands
#[derive(Subcommand)]
pub enum RebalanceCommands {
    /// Show the transfer plan without moving anything
    Plan,

    /// Execute the plan as one atomic batch
    Execute,
}

/// Handle a rebalance command
pub fn handle_rebalance_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RebalanceCommands,
) -> PayplanResult<()> {
    let service = RebalanceService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        RebalanceCommands::Plan => {
            let plan = service.plan()?;
            print_plan_summary(&plan, symbol);
            for transfer in &plan.transfers {
                println!(
                    "  {} -> {}: {}",
                    transfer.from_name,
                    transfer.to_name,
                    transfer.amount.format_with_symbol(symbol)
                );
            }
            if !plan.transfers.is_empty() {
                println!("Run 'payplan rebalance execute' to apply.");
            }
        }

        RebalanceCommands::Execute => {
            let (plan, transfers) = service.execute()?;
            print_plan_summary(&plan, symbol);
            if transfers.is_empty() {
                println!("Nothing to rebalance.");
            } else {
                for transfer in &transfers {
                    println!("  moved {}", transfer.amount.format_with_symbol(symbol));
                }
                println!("Executed {} transfer(s).", transfers.len());
            }
        }
    }

    Ok(())
}

fn print_plan_summary(plan: &crate::engine::RebalancePlan, symbol: &str) {
    println!(
        "Overspent: {}  Surplus: {}",
        plan.total_overspent.format_with_symbol(symbol),
        plan.total_surplus.format_with_symbol(symbol)
    );
    if !plan.can_balance && plan.total_overspent.is_positive() {
        println!(
            "Surplus cannot cover every deficit; {} will remain overspent.",
            (plan.total_overspent - plan.total_surplus).format_with_symbol(symbol)
        );
    }
}
