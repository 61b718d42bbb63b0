//! Ledger session configuration.

use messmate_core::repository::LedgerMode;

/// Configuration for a ledger session.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Backend to run against (default: guest).
    pub mode: LedgerMode,
    /// Populate a guest ledger with a sample household (default: true).
    /// Ignored in remote mode.
    pub seed_sample_data: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            mode: LedgerMode::Guest,
            seed_sample_data: true,
        }
    }
}
