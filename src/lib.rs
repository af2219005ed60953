#![doc(test(attr(deny(warnings))))]

//! Finance Core turns snapshots of personal expense, income, and investment
//! records into the totals, balances, and projections a finance dashboard shows.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod session;
pub mod store;
pub mod utils;

pub use errors::{FinanceError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
