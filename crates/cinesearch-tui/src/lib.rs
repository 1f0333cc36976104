//! Terminal UI for cinesearch.
//!
//! [`controller`] holds the search, pagination and detail state.
//! [`browser`] renders it with `ratatui` + `crossterm`.

/// Interactive movie browser.
pub mod browser;
/// Search and detail state controller.
pub mod controller;

pub use browser::run_browser;
pub use controller::{Controller, ModalState, Outcome, OutcomeReceiver, UiState};
