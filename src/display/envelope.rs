//! Envelope display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::engine::{pay_cycle_amount, SourceTotal};
use crate::error::PayplanResult;
use crate::models::{Envelope, PayCycle};

#[derive(Tabled)]
struct EnvelopeRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Per Cycle")]
    per_cycle: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
}

/// Format the envelope list as a table
pub fn format_envelope_list(
    envelopes: &[Envelope],
    pay_cycle: PayCycle,
    symbol: &str,
) -> PayplanResult<String> {
    let mut rows = Vec::new();
    for envelope in envelopes {
        let per_cycle = pay_cycle_amount(envelope, pay_cycle)?;
        rows.push(EnvelopeRow {
            name: envelope.name.clone(),
            target: envelope.target_amount.format_with_symbol(symbol),
            frequency: envelope.frequency.to_string(),
            per_cycle: per_cycle.format_with_symbol(symbol),
            balance: envelope.current_amount.format_with_symbol(symbol),
            priority: envelope.priority.to_string(),
            due: envelope
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        });
    }

    Ok(Table::new(rows).with(Style::sharp()).to_string())
}

#[derive(Tabled)]
struct SourceTotalRow {
    #[tabled(rename = "Income Source")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Format per-source allocation totals as a table
pub fn format_source_totals(totals: &[SourceTotal], symbol: &str) -> String {
    let rows: Vec<SourceTotalRow> = totals
        .iter()
        .map(|t| SourceTotalRow {
            name: t.name.clone(),
            amount: t.amount.format_with_symbol(symbol),
            allocated: t.allocated.format_with_symbol(symbol),
            remaining: t.remaining.format_with_symbol(symbol),
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}
