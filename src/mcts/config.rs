//! Tunable search parameters, threaded explicitly into the tree instead
//! of living as free-standing module constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AgentError, Result};

/// Configuration for one search-tree run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of select/expand/simulate/backpropagate iterations.
    pub iterations: usize,
    /// Maximum number of actions applied during one random rollout.
    pub rollout_depth: usize,
    /// UCB1 exploration constant used during selection.
    pub exploration_constant: f64,
    /// Independent black-box runs an end-turn successor is sampled from.
    pub opponent_samples: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            rollout_depth: 6,
            exploration_constant: 1.0,
            opponent_samples: 2,
        }
    }
}

impl SearchConfig {
    /// Loads a configuration from a JSON file; missing fields fall back
    /// to the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&raw)
            .map_err(|e| AgentError::Config(format!("invalid search config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(AgentError::Config("iterations must be at least 1".into()));
        }
        if self.rollout_depth == 0 {
            return Err(AgentError::Config("rollout_depth must be at least 1".into()));
        }
        if self.opponent_samples == 0 {
            return Err(AgentError::Config(
                "opponent_samples must be at least 1".into(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(AgentError::Config(
                "exploration_constant must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}
