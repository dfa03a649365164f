//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `classify` - One-off spending suggestion
//! - `demo` - Spend accumulation with ceiling alerts
//! - `serve` - Web server command

pub mod classify;
pub mod demo;
pub mod serve;

// Re-export command functions for main.rs
pub use classify::*;
pub use demo::*;
pub use serve::*;
