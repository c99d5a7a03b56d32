//! Shared test harness modules for the Itinera CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

mod config_unit;
mod helpers;
mod tour_steps;
