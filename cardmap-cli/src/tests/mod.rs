//! Shared test harness modules for the cardmap CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod gazetteer_unit;
mod helpers;
