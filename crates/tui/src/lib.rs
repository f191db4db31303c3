//! # Local Market TUI
//!
//! Terminal front end for the travel listings market: a nav bar of
//! categories with a filter trigger, a grid of listing cards and a filter
//! panel that slides over the right edge of the screen.
//!
//! ## Architecture
//!
//! `App` holds the filter controller state from `localmarket-engine` plus the
//! per-component UI state. Components translate input into `FilterAction`s
//! and return `Effect`s that the runtime executes (focus moves, persisting
//! the chosen category, quitting).

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use localmarket_types::{Category, Listing};
use localmarket_util::UserPreferences;

/// Launch options resolved by the CLI.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Category to open on; falls back to the saved preference
    pub category: Option<Category>,
    /// Theme id or alias requested on the command line
    pub theme: Option<String>,
    pub preferences: Arc<UserPreferences>,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            category: None,
            theme: None,
            preferences: Arc::new(UserPreferences::ephemeral()),
        }
    }
}

/// Runs the TUI over `store` until the user quits.
///
/// # Errors
///
/// Fails when the terminal cannot be switched into raw mode or the
/// alternate screen, or when drawing a frame fails.
pub async fn run(store: Arc<[Listing]>, options: TuiOptions) -> Result<()> {
    ui::runtime::run_app(store, options).await
}
