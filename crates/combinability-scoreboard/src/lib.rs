//! Record 2 Category 10 combinability scoreboard.
//!
//! Decides whether priced fare components may be combined into a pricing
//! unit, and whether pricing units may be joined into one fare path.

pub mod config;
pub mod error;
pub mod pricing;
pub mod telemetry;
