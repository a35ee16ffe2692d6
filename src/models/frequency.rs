//! Funding frequencies and the user's pay cycle
//!
//! Every scheduled amount in the budget is declared at some frequency and
//! converted to the user's pay cycle through annualization factors:
//! weekly x52, fortnightly x26, monthly x12, quarterly x4, annual x1.
//! `Frequency::None` marks envelopes with no schedule (goals, tracking) and
//! has no factor.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often an envelope's target or an income amount recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// No schedule (goals and tracking-only envelopes)
    #[default]
    None,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    /// Number of occurrences per year, or None for unscheduled amounts
    pub const fn annual_factor(&self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Weekly => Some(52),
            Self::Fortnightly => Some(26),
            Self::Monthly => Some(12),
            Self::Quarterly => Some(4),
            Self::Annual => Some(1),
        }
    }

    /// All frequencies that carry a schedule
    pub const fn scheduled() -> [Frequency; 5] {
        [
            Self::Weekly,
            Self::Fortnightly,
            Self::Monthly,
            Self::Quarterly,
            Self::Annual,
        ]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Weekly => "weekly",
            Self::Fortnightly => "fortnightly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "weekly" => Ok(Self::Weekly),
            "fortnightly" | "biweekly" | "bi-weekly" => Ok(Self::Fortnightly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" | "yearly" => Ok(Self::Annual),
            other => Err(FrequencyParseError::Unrecognized(other.to_string())),
        }
    }
}

/// The user's recurring income interval
///
/// The pay cycle is the common unit all per-cycle contributions are
/// expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayCycle {
    Weekly,
    Fortnightly,
    #[default]
    Monthly,
}

impl PayCycle {
    /// The equivalent frequency, for amount normalization
    pub const fn frequency(&self) -> Frequency {
        match self {
            Self::Weekly => Frequency::Weekly,
            Self::Fortnightly => Frequency::Fortnightly,
            Self::Monthly => Frequency::Monthly,
        }
    }

    /// Whole pay cycles between two dates (0 if `to` is not after `from`)
    ///
    /// Weekly and fortnightly cycles count elapsed days; monthly cycles count
    /// whole calendar months, stepping back one when the day-of-month has not
    /// yet been reached.
    pub fn cycles_between(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        if to <= from {
            return 0;
        }
        match self {
            Self::Weekly => ((to - from).num_days() / 7) as u32,
            Self::Fortnightly => ((to - from).num_days() / 14) as u32,
            Self::Monthly => {
                let months =
                    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
                let months = if to.day() < from.day() {
                    months - 1
                } else {
                    months
                };
                months.max(0) as u32
            }
        }
    }
}

impl fmt::Display for PayCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frequency())
    }
}

impl FromStr for PayCycle {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Frequency::from_str(s)? {
            Frequency::Weekly => Ok(Self::Weekly),
            Frequency::Fortnightly => Ok(Self::Fortnightly),
            Frequency::Monthly => Ok(Self::Monthly),
            other => Err(FrequencyParseError::NotAPayCycle(other.to_string())),
        }
    }
}

/// Error type for frequency parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrequencyParseError {
    Unrecognized(String),
    NotAPayCycle(String),
}

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(s) => write!(f, "Unrecognized frequency: {}", s),
            Self::NotAPayCycle(s) => {
                write!(f, "Not a valid pay cycle: {} (use weekly, fortnightly or monthly)", s)
            }
        }
    }
}

impl std::error::Error for FrequencyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_annual_factors() {
        assert_eq!(Frequency::Weekly.annual_factor(), Some(52));
        assert_eq!(Frequency::Fortnightly.annual_factor(), Some(26));
        assert_eq!(Frequency::Monthly.annual_factor(), Some(12));
        assert_eq!(Frequency::Quarterly.annual_factor(), Some(4));
        assert_eq!(Frequency::Annual.annual_factor(), Some(1));
        assert_eq!(Frequency::None.annual_factor(), None);
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("YEARLY".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!(
            "biweekly".parse::<Frequency>().unwrap(),
            Frequency::Fortnightly
        );
        assert!("daily".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_parse_pay_cycle() {
        assert_eq!("monthly".parse::<PayCycle>().unwrap(), PayCycle::Monthly);
        assert!("quarterly".parse::<PayCycle>().is_err());
        assert!("daily".parse::<PayCycle>().is_err());
    }

    #[test]
    fn test_weekly_cycles_between() {
        let from = date(2025, 1, 1);
        assert_eq!(PayCycle::Weekly.cycles_between(from, date(2025, 1, 8)), 1);
        assert_eq!(PayCycle::Weekly.cycles_between(from, date(2025, 1, 7)), 0);
        assert_eq!(PayCycle::Weekly.cycles_between(from, date(2025, 1, 29)), 4);
    }

    #[test]
    fn test_fortnightly_cycles_between() {
        let from = date(2025, 1, 1);
        assert_eq!(
            PayCycle::Fortnightly.cycles_between(from, date(2025, 1, 15)),
            1
        );
        assert_eq!(
            PayCycle::Fortnightly.cycles_between(from, date(2025, 2, 12)),
            3
        );
    }

    #[test]
    fn test_monthly_cycles_between() {
        let from = date(2025, 1, 15);
        assert_eq!(PayCycle::Monthly.cycles_between(from, date(2025, 4, 15)), 3);
        // Day-of-month not yet reached: one fewer whole cycle
        assert_eq!(PayCycle::Monthly.cycles_between(from, date(2025, 4, 14)), 2);
        assert_eq!(PayCycle::Monthly.cycles_between(from, date(2025, 2, 1)), 0);
    }

    #[test]
    fn test_cycles_between_past_date_is_zero() {
        let from = date(2025, 6, 1);
        assert_eq!(PayCycle::Monthly.cycles_between(from, date(2025, 1, 1)), 0);
        assert_eq!(PayCycle::Weekly.cycles_between(from, from), 0);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Frequency::Fortnightly).unwrap();
        assert_eq!(json, "\"fortnightly\"");

        let cycle: PayCycle = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(cycle, PayCycle::Weekly);
    }
}
