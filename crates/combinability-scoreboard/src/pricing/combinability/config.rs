use serde::{Deserialize, Serialize};

/// Runtime switches for the scoreboard and its service facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    /// Report the offending fare component alongside a failure.
    pub report_failed_fare: bool,
    /// Collect diagnostic lines into service reports.
    pub diagnostics: bool,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            report_failed_fare: true,
            diagnostics: true,
        }
    }
}
