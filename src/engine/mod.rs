//! The budget computation engine
//!
//! Every function in this module is pure and synchronous: snapshots in,
//! results out, no storage access and no clocks. Mutating outcomes (updated
//! debt balances, transfer plans) are returned as new snapshots for the
//! service layer to persist atomically.

pub mod allocation;
pub mod opening_balance;
pub mod pay_cycle;
pub mod payday;
pub mod payoff;
pub mod rebalance;
pub mod snowball;

pub use allocation::{
    allocate_income, auto_distribute, source_totals, validate_commit, AllocationEdit,
    AllocationOutcome, SourceTotal,
};
pub use opening_balance::{calculate_opening_balance, OpeningBalance};
pub use pay_cycle::{normalize_amount, pay_cycle_amount};
pub use payday::{
    compute_payday_allocation, EnvelopeHealth, GapStatus, PaydayAllocation, Suggestion,
    SurplusStatus, TierSummary,
};
pub use payoff::{project_payoff, PayoffSchedule, ScheduleMonth, MAX_PROJECTION_MONTHS};
pub use rebalance::{plan_rebalance, PlannedTransfer, RebalancePlan};
pub use snowball::{apply_snowball_payment, snowball_order, DebtEvent, SnowballOutcome};
