//! Web server for the estimation form and its JSON API.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
pub mod views;
