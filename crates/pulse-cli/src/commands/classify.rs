//! Classify command implementation

use anyhow::Result;
use pulse_core::classify;

pub fn cmd_classify(total: f64) -> Result<()> {
    let suggestion = classify(total);

    println!("💡 {}", suggestion);
    println!("   Total spent: {} WPU ({})", total, suggestion.as_str());

    Ok(())
}
