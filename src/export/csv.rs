//! CSV export functionality
//!
//! Spreadsheet-friendly exports for envelopes, debts, transfers and
//! amortization schedules. Money is written as decimal currency units.

use std::io::Write;

use crate::engine::ScheduleMonth;
use crate::error::{PayplanError, PayplanResult};
use crate::models::Money;
use crate::storage::Storage;

fn to_decimal(amount: Money) -> String {
    format!("{}.{:02}", amount.units(), amount.cents_part())
}

fn csv_error(e: csv::Error) -> PayplanError {
    PayplanError::Export(e.to_string())
}

/// Export all envelopes to CSV
pub fn export_envelopes_csv<W: Write>(storage: &Storage, writer: &mut W) -> PayplanResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID", "Name", "Target", "Balance", "Frequency", "Due", "Priority", "Goal", "Spending",
            "Tracking",
        ])
        .map_err(csv_error)?;

    for envelope in storage.envelopes.get_all()? {
        csv_writer
            .write_record([
                envelope.id.to_string(),
                envelope.name.clone(),
                to_decimal(envelope.target_amount),
                to_decimal(envelope.current_amount),
                envelope.frequency.to_string(),
                envelope
                    .due_date
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                envelope.priority.to_string(),
                envelope.is_goal.to_string(),
                envelope.is_spending.to_string(),
                envelope.is_tracking_only.to_string(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|e| PayplanError::Export(e.to_string()))?;
    Ok(())
}

/// Export all debts to CSV, snowball order
pub fn export_debts_csv<W: Write>(storage: &Storage, writer: &mut W) -> PayplanResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID",
            "Name",
            "Starting Balance",
            "Current Balance",
            "APR",
            "Minimum Payment",
            "Paid Off At",
        ])
        .map_err(csv_error)?;

    for debt in storage.debts.get_all()? {
        csv_writer
            .write_record([
                debt.id.to_string(),
                debt.name.clone(),
                to_decimal(debt.starting_balance),
                to_decimal(debt.current_balance),
                debt.interest_rate
                    .map(|r| format!("{}", r))
                    .unwrap_or_default(),
                debt.minimum_payment.map(to_decimal).unwrap_or_default(),
                debt.paid_off_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|e| PayplanError::Export(e.to_string()))?;
    Ok(())
}

/// Export the transfer history to CSV
pub fn export_transfers_csv<W: Write>(storage: &Storage, writer: &mut W) -> PayplanResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["ID", "From", "To", "Amount", "Occurred At", "Note"])
        .map_err(csv_error)?;

    for transfer in storage.transfers.get_all()? {
        csv_writer
            .write_record([
                transfer.id.to_string(),
                transfer.from_id.to_string(),
                transfer.to_id.to_string(),
                to_decimal(transfer.amount),
                transfer.occurred_at.to_rfc3339(),
                transfer.note.clone().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|e| PayplanError::Export(e.to_string()))?;
    Ok(())
}

/// Export an amortization schedule to CSV
pub fn export_schedule_csv<W: Write>(
    schedule: &[ScheduleMonth],
    writer: &mut W,
) -> PayplanResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Month", "Interest", "Principal", "Balance"])
        .map_err(csv_error)?;

    for month in schedule {
        csv_writer
            .write_record([
                month.month.to_string(),
                to_decimal(month.interest),
                to_decimal(month.principal),
                to_decimal(month.balance),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|e| PayplanError::Export(e.to_string()))?;
    Ok(())
}
