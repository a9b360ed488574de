/// Control actions an observer may return while a scene runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run early and return the history so far.
    StopEarly,
}
