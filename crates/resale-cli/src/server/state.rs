//! Application state for the web server.

use resale::Estimator;

/// Shared application state.
///
/// The estimator's model and region data are loaded once and only read
/// afterwards, so requests share them without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded model, region data and configuration.
    pub estimator: Estimator,
    /// Whether to print a line per request.
    pub verbose: bool,
}

impl AppState {
    /// Create new application state.
    pub fn new(estimator: Estimator, verbose: bool) -> Self {
        Self { estimator, verbose }
    }
}
