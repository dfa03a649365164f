//! Per-account spend accumulation with ceiling alerts
//!
//! [`SpendAccumulator`] keeps a running total of base units per account.
//! Every `record` call re-checks the total against [`SPEND_CEILING`]; while
//! the total stays above it, each call emits another [`SpendAlert`] through
//! the configured [`AlertSink`].
//!
//! The ledger sits behind a mutex and the add-then-check happens under a
//! single lock acquisition, so concurrent callers never lose updates.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::units::{format_wpu, WEI_PER_WPU};

/// Totals strictly above this many base units (10 WPU) raise an alert
pub const SPEND_CEILING: u128 = 10 * WEI_PER_WPU;

/// Number of recent spends kept per account
pub const HISTORY_LIMIT: usize = 5;

/// Account used by the startup harness
pub const DEMO_ACCOUNT: &str = "0xYourAddress";

/// Amounts recorded by the startup harness, in order (5 WPU then 6 WPU)
pub const DEMO_AMOUNTS: [u128; 2] = [5 * WEI_PER_WPU, 6 * WEI_PER_WPU];

/// A ceiling-exceeded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendAlert {
    pub account: String,
    /// Running total in base units at the time of the alert
    pub total: u128,
}

impl fmt::Display for SpendAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alert: You've spent {} WPU—slow down!",
            format_wpu(self.total)
        )
    }
}

/// A single recorded spend, kept in the per-account history window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSpend {
    pub amount: u128,
    pub recorded_at: DateTime<Utc>,
}

/// Destination for spend alerts
pub trait AlertSink: Send + Sync {
    fn notify(&self, alert: &SpendAlert);
}

/// Writes each alert as one plain line on standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl AlertSink for StdoutSink {
    fn notify(&self, alert: &SpendAlert) {
        println!("{}", alert);
    }
}

/// Collects alerts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    alerts: Mutex<Vec<SpendAlert>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts received so far, oldest first
    pub fn alerts(&self) -> Vec<SpendAlert> {
        lock(&self.alerts).clone()
    }
}

impl AlertSink for MemorySink {
    fn notify(&self, alert: &SpendAlert) {
        lock(&self.alerts).push(alert.clone());
    }
}

impl<S: AlertSink + ?Sized> AlertSink for std::sync::Arc<S> {
    fn notify(&self, alert: &SpendAlert) {
        (**self).notify(alert)
    }
}

#[derive(Debug, Default)]
struct LedgerEntry {
    total: u128,
    recent: VecDeque<RecordedSpend>,
}

/// Running spend totals keyed by account
pub struct SpendAccumulator {
    ledger: Mutex<HashMap<String, LedgerEntry>>,
    sink: Box<dyn AlertSink>,
}

impl Default for SpendAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpendAccumulator {
    /// Create an accumulator that prints alerts to standard output
    pub fn new() -> Self {
        Self::with_sink(StdoutSink)
    }

    pub fn with_sink(sink: impl AlertSink + 'static) -> Self {
        Self {
            ledger: Mutex::new(HashMap::new()),
            sink: Box::new(sink),
        }
    }

    /// Add `amount` base units to `account` and alert if the total is above the ceiling
    ///
    /// Returns the alert that was emitted, if any. Totals saturate at
    /// `u128::MAX` rather than wrapping.
    pub fn record(&self, account: &str, amount: u128) -> Option<SpendAlert> {
        let total = {
            let mut ledger = lock(&self.ledger);
            let entry = ledger.entry(account.to_string()).or_default();

            entry.total = match entry.total.checked_add(amount) {
                Some(total) => total,
                None => {
                    warn!(account, "Spend total saturated at u128::MAX");
                    u128::MAX
                }
            };

            entry.recent.push_back(RecordedSpend {
                amount,
                recorded_at: Utc::now(),
            });
            while entry.recent.len() > HISTORY_LIMIT {
                entry.recent.pop_front();
            }

            entry.total
        };

        debug!(
            account,
            amount = %format_wpu(amount),
            total = %format_wpu(total),
            "Recorded spend"
        );

        if total > SPEND_CEILING {
            let alert = SpendAlert {
                account: account.to_string(),
                total,
            };
            self.sink.notify(&alert);
            Some(alert)
        } else {
            None
        }
    }

    /// Running total for `account` in base units (0 if never seen)
    pub fn total_for(&self, account: &str) -> u128 {
        lock(&self.ledger)
            .get(account)
            .map(|e| e.total)
            .unwrap_or(0)
    }

    /// The last few spends recorded for `account`, oldest first
    pub fn recent(&self, account: &str) -> Vec<RecordedSpend> {
        lock(&self.ledger)
            .get(account)
            .map(|e| e.recent.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All accounts with at least one recorded spend, sorted
    pub fn accounts(&self) -> Vec<String> {
        let mut accounts: Vec<String> = lock(&self.ledger).keys().cloned().collect();
        accounts.sort();
        accounts
    }
}

/// Replay the fixed startup transactions against `accumulator`
///
/// Records 5 WPU then 6 WPU for [`DEMO_ACCOUNT`]; only the second call
/// crosses the ceiling.
pub fn run_startup_demo(accumulator: &SpendAccumulator) -> Vec<SpendAlert> {
    DEMO_AMOUNTS
        .iter()
        .filter_map(|&amount| accumulator.record(DEMO_ACCOUNT, amount))
        .collect()
}

// Every critical section leaves the map consistent, so a poisoned lock is safe to reuse.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
