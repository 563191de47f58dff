//! Progressive-rate bracket tables and their canonical form.
//!
//! User-edited bracket rows arrive in arbitrary order, with rates entered
//! either as decimals (`0.22`) or whole percentages (`22`), and with the
//! top slab marked by an absent upper limit. [`BracketSchedule::normalize`]
//! is the single boundary where that raw shape is coerced into a canonical
//! schedule; nothing downstream ever sees an unnormalized table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A bracket row as edited by a user: both fields may be absent.
///
/// An absent `upper_limit` marks the top-open slab. An absent `rate` is
/// treated as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBracketRow {
    pub upper_limit: Option<Decimal>,
    pub rate: Option<Decimal>,
}

/// The upper boundary of a bracket.
///
/// The derived ordering sorts every finite cap below `OpenEnded`, so a
/// plain sort puts the top-open slab last without any `Option` comparison
/// tricks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BracketCap {
    Capped(Decimal),
    OpenEnded,
}

impl BracketCap {
    /// Returns the finite cap, or `None` for the top-open slab.
    pub fn as_option(&self) -> Option<Decimal> {
        match self {
            Self::Capped(limit) => Some(*limit),
            Self::OpenEnded => None,
        }
    }
}

/// One slab of a normalized schedule: income up to `cap` (and above the
/// previous entry's cap) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketEntry {
    pub cap: BracketCap,
    pub rate: Decimal,
}

/// A canonical progressive-rate schedule.
///
/// Invariants, established by [`BracketSchedule::normalize`] and preserved
/// by immutability:
///
/// - entries are sorted ascending by cap, with exactly one [`BracketCap::OpenEnded`]
///   entry, and it is last;
/// - every rate is a fraction in `[0, 1]` (whole percentages were rescaled);
/// - the schedule covers all non-negative income (the open entry is
///   synthesized from the highest finite cap's rate when the input lacks
///   one).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use netpay_core::models::{BracketCap, BracketSchedule, RawBracketRow};
///
/// let rows = vec![
///     RawBracketRow { upper_limit: None, rate: Some(dec!(0.20)) },
///     RawBracketRow { upper_limit: Some(dec!(50000)), rate: Some(dec!(10)) },
/// ];
///
/// let schedule = BracketSchedule::normalize(&rows);
///
/// // Sorted, with the whole-percentage rate rescaled.
/// assert_eq!(schedule.entries()[0].cap, BracketCap::Capped(dec!(50000)));
/// assert_eq!(schedule.entries()[0].rate, dec!(0.10));
/// assert_eq!(schedule.entries()[1].cap, BracketCap::OpenEnded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    entries: Vec<BracketEntry>,
}

impl BracketSchedule {
    /// Builds a canonical schedule from raw user-edited rows.
    ///
    /// Malformed input is coerced, never rejected: rates above 1 are read
    /// as whole percentages and divided by 100, missing rates default to 0,
    /// and surplus top-open rows beyond the first are dropped. Zero input
    /// rows normalize to a single open-ended 0% entry.
    pub fn normalize(rows: &[RawBracketRow]) -> Self {
        if rows.is_empty() {
            return Self {
                entries: vec![BracketEntry {
                    cap: BracketCap::OpenEnded,
                    rate: Decimal::ZERO,
                }],
            };
        }

        let mut entries: Vec<BracketEntry> = rows
            .iter()
            .map(|row| BracketEntry {
                cap: match row.upper_limit {
                    Some(limit) => BracketCap::Capped(limit),
                    None => BracketCap::OpenEnded,
                },
                rate: normalize_rate(row.rate),
            })
            .collect();

        // Stable sort: ties keep their input order, OpenEnded sorts last.
        entries.sort_by(|a, b| a.cap.cmp(&b.cap));

        let open_count = entries
            .iter()
            .filter(|e| e.cap == BracketCap::OpenEnded)
            .count();
        match open_count {
            0 => {
                let last_rate = entries.last().map(|e| e.rate).unwrap_or(Decimal::ZERO);
                entries.push(BracketEntry {
                    cap: BracketCap::OpenEnded,
                    rate: last_rate,
                });
            }
            1 => {}
            n => {
                warn!(surplus = n - 1, "dropping surplus top-open bracket rows");
                entries.truncate(entries.len() - (n - 1));
            }
        }

        Self { entries }
    }

    /// The normalized entries, ascending by cap, open entry last.
    pub fn entries(&self) -> &[BracketEntry] {
        &self.entries
    }

    /// Converts the schedule back into raw rows.
    ///
    /// Normalizing the returned rows yields the same schedule again;
    /// normalization is a fixed point.
    pub fn to_raw_rows(&self) -> Vec<RawBracketRow> {
        self.entries
            .iter()
            .map(|entry| RawBracketRow {
                upper_limit: entry.cap.as_option(),
                rate: Some(entry.rate),
            })
            .collect()
    }
}

/// Coerces a raw rate into a fraction: values above 1 are whole
/// percentages, missing values are 0.
fn normalize_rate(rate: Option<Decimal>) -> Decimal {
    match rate {
        None => Decimal::ZERO,
        Some(r) if r > Decimal::ONE => {
            debug!(%r, "rescaling whole-percentage rate");
            r / Decimal::ONE_HUNDRED
        }
        Some(r) => r,
    }
}
