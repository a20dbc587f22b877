//! Shared test harness modules for the OptiRoute CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod geocode_steps;
mod geocode_unit;
mod helpers;
mod render_unit;
