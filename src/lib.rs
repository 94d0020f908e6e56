//! Client for a shared, wallet-gated list of GIF links kept in one ledger account.
//!
//! Layers, leaves first: [`gate`] owns the wallet connection, [`remote`]
//! owns the list account and its last fetched snapshot, and [`view`] turns
//! both into what the terminal shell renders.

pub mod config;
pub mod gate;
pub mod logging;
pub mod model;
pub mod remote;
pub mod tui;
pub mod view;
pub mod wallet;

mod tui_shell;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
