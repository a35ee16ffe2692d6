//! Debt and schedule display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::engine::ScheduleMonth;
use crate::models::DebtItem;

#[derive(Tabled)]
struct DebtRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Starting")]
    starting: String,
    #[tabled(rename = "APR")]
    apr: String,
    #[tabled(rename = "Min Payment")]
    minimum: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format the debt list as a table (callers pass snowball order)
pub fn format_debt_list(debts: &[DebtItem], symbol: &str) -> String {
    let rows: Vec<DebtRow> = debts
        .iter()
        .map(|debt| DebtRow {
            name: debt.name.clone(),
            balance: debt.current_balance.format_with_symbol(symbol),
            starting: debt.starting_balance.format_with_symbol(symbol),
            apr: debt
                .interest_rate
                .map(|r| format!("{:.1}%", r * 100.0))
                .unwrap_or_else(|| "-".to_string()),
            minimum: debt
                .minimum_payment
                .map(|m| m.format_with_symbol(symbol))
                .unwrap_or_else(|| "-".to_string()),
            status: if debt.paid_off_at.is_some() {
                "paid off".to_string()
            } else {
                "active".to_string()
            },
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format an amortization schedule as a table
pub fn format_schedule(schedule: &[ScheduleMonth], symbol: &str) -> String {
    let rows: Vec<ScheduleRow> = schedule
        .iter()
        .map(|month| ScheduleRow {
            month: month.month,
            interest: month.interest.format_with_symbol(symbol),
            principal: month.principal.format_with_symbol(symbol),
            balance: month.balance.format_with_symbol(symbol),
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}
