//! Pulse Core Library
//!
//! Shared functionality for the Pulse WPU spending assistant:
//! - Rule-based spending suggestions
//! - Per-account spend accumulation with ceiling alerts
//! - WPU unit conversion (18-decimal fixed point)

pub mod accumulator;
pub mod error;
pub mod suggestion;
pub mod units;

pub use accumulator::{
    run_startup_demo, AlertSink, MemorySink, RecordedSpend, SpendAccumulator, SpendAlert,
    StdoutSink, DEMO_ACCOUNT, DEMO_AMOUNTS, HISTORY_LIMIT, SPEND_CEILING,
};
pub use error::{Error, Result};
pub use suggestion::{classify, Suggestion, HIGH_SPEND_THRESHOLD, RISING_SPEND_THRESHOLD};
pub use units::{format_wpu, parse_wpu, to_whole_units, WEI_PER_WPU, WPU_DECIMALS};
