use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What Dijkstra does when the graph has negative weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegativeWeights {
    /// Run anyway. Distances may be wrong but the run completes.
    #[default]
    Allow,
    /// Fail with [`crate::AlgorithmError::NegativeWeight`] and no steps.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsAlgorithm {
    /// Negative weight policy of algorithms that assume non-negative weights
    pub negative_weights: NegativeWeights,
}

impl SettingsAlgorithm {
    pub fn with_negative_weights(mut self, policy: NegativeWeights) -> Self {
        self.negative_weights = policy;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsPlayback {
    /// Delay between automatically played steps
    pub interval: Duration,

    /// Stepping past the last step rewinds to the start
    pub loop_at_end: bool,
}

impl Default for SettingsPlayback {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            loop_at_end: true,
        }
    }
}

impl SettingsPlayback {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_loop_at_end(mut self, loop_at_end: bool) -> Self {
        self.loop_at_end = loop_at_end;
        self
    }
}
