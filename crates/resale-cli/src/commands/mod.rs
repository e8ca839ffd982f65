//! CLI command implementations.

pub mod info;
pub mod predict;
pub mod regions;
pub mod serve;
pub mod sweep;
