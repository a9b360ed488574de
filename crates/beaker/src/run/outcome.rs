use super::Sample;

/// Indicates how a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of driving a scene for a number of ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// How the run terminated.
    pub status: Status,

    /// Samples from each step, including the initial state.
    pub history: Vec<Sample>,

    /// Number of ticks completed.
    pub steps: usize,
}

impl Run {
    /// Returns the last recorded sample.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.history.last()
    }
}
