//! MCTS configuration parameters.

use std::time::Duration;

use crate::search::SearchError;

/// Stopping condition for a search, resolved from [`MctsConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimit {
    /// Run exactly this many select/expand/simulate/backpropagate iterations.
    Iterations(u32),
    /// Keep iterating until this much wall-clock time has elapsed.
    Time(Duration),
}

/// Configuration for Monte Carlo Tree Search.
///
/// Exactly one of `iteration_limit` and `time_limit` must be set; anything
/// else is rejected by [`MctsConfig::limit`] before the search starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MctsConfig {
    /// Number of iterations to run per search.
    pub iteration_limit: Option<u32>,

    /// Wall-clock budget per search.
    pub time_limit: Option<Duration>,
}

impl MctsConfig {
    /// Create an iteration-bounded config.
    pub fn with_iterations(n: u32) -> Self {
        Self {
            iteration_limit: Some(n),
            time_limit: None,
        }
    }

    /// Create a time-bounded config.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            iteration_limit: None,
            time_limit: Some(limit),
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self::with_iterations(50)
    }

    /// Builder pattern: set the iteration limit (leaves any time limit in place).
    pub fn iterations(mut self, n: u32) -> Self {
        self.iteration_limit = Some(n);
        self
    }

    /// Builder pattern: set the time limit (leaves any iteration limit in place).
    pub fn time(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Resolve the configured stopping condition.
    pub fn limit(&self) -> Result<SearchLimit, SearchError> {
        match (self.iteration_limit, self.time_limit) {
            (Some(_), Some(_)) => Err(SearchError::InvalidConfiguration(
                "only one of iteration_limit and time_limit may be set".to_string(),
            )),
            (None, None) => Err(SearchError::InvalidConfiguration(
                "one of iteration_limit or time_limit must be set".to_string(),
            )),
            (Some(0), None) => Err(SearchError::InvalidConfiguration(
                "iteration_limit must be positive".to_string(),
            )),
            (Some(n), None) => Ok(SearchLimit::Iterations(n)),
            (None, Some(limit)) if limit.is_zero() => Err(SearchError::InvalidConfiguration(
                "time_limit must be positive".to_string(),
            )),
            (None, Some(limit)) => Ok(SearchLimit::Time(limit)),
        }
    }
}
