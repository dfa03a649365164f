//! Demo command implementation
//!
//! Replays spends through a fresh accumulator the way the wallet reacts to
//! each transfer event: add to the running total, re-check the ceiling, then
//! show the suggestion for the new total.

use anyhow::{Context, Result};
use pulse_core::{
    classify, format_wpu, parse_wpu, to_whole_units, RecordedSpend, SpendAccumulator, SpendAlert,
    Suggestion, DEMO_AMOUNTS,
};

/// Running state after one replayed spend
#[derive(Debug, Clone, PartialEq)]
pub struct DemoStep {
    pub amount: u128,
    pub total: u128,
    pub suggestion: Suggestion,
    pub alert: Option<SpendAlert>,
}

/// Outcome of a demo replay
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub steps: Vec<DemoStep>,
    pub recent: Vec<RecordedSpend>,
    pub total: u128,
}

impl DemoReport {
    pub fn alert_count(&self) -> usize {
        self.steps.iter().filter(|s| s.alert.is_some()).count()
    }
}

/// Parse whole-unit amount arguments, falling back to the startup amounts
pub fn parse_amounts(amounts: &[String]) -> Result<Vec<u128>> {
    if amounts.is_empty() {
        return Ok(DEMO_AMOUNTS.to_vec());
    }

    amounts
        .iter()
        .map(|a| parse_wpu(a).with_context(|| format!("Invalid amount '{}'", a)))
        .collect()
}

/// Record `amounts` for `account` on `accumulator`, one step per spend
pub fn replay_spends(
    accumulator: &SpendAccumulator,
    account: &str,
    amounts: &[u128],
) -> DemoReport {
    let steps = amounts
        .iter()
        .map(|&amount| {
            let alert = accumulator.record(account, amount);
            let total = accumulator.total_for(account);
            DemoStep {
                amount,
                total,
                suggestion: classify(to_whole_units(total)),
                alert,
            }
        })
        .collect();

    DemoReport {
        steps,
        recent: accumulator.recent(account),
        total: accumulator.total_for(account),
    }
}

pub fn cmd_demo(account: &str, amounts: &[String]) -> Result<()> {
    let amounts = parse_amounts(amounts)?;

    println!("📒 Recording {} spend(s) for {}", amounts.len(), account);

    let report = replay_spends(&SpendAccumulator::new(), account, &amounts);

    for step in &report.steps {
        println!(
            "   +{} WPU → total {} WPU ({})",
            format_wpu(step.amount),
            format_wpu(step.total),
            step.suggestion.as_str()
        );
    }

    println!();
    println!("Recent spends:");
    for spend in &report.recent {
        println!(
            "   {}  {} WPU",
            spend.recorded_at.format("%H:%M:%S%.3f"),
            format_wpu(spend.amount)
        );
    }

    println!();
    println!(
        "Total: {} WPU ({} alert(s)) - {}",
        format_wpu(report.total),
        report.alert_count(),
        classify(to_whole_units(report.total))
    );

    Ok(())
}
