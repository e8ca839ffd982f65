//! Request handlers.

mod api;
mod form;

pub use api::*;
pub use form::*;
