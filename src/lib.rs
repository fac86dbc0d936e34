//! Dashboard of a single device's day: 96 fifteen minute intervals marked active or idle,
//! measured against a daily usage quota and grouped by hour for display.
//!

pub mod activity;
pub mod cli;
pub mod dashboard;
pub mod utils;
