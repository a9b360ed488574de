/// Receives events from a running simulation.
///
/// An observer may return an action to steer the simulation, such as stopping
/// early once the beaker is full. Returning `None` lets the simulation continue.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()`
/// is an observer that ignores every event.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
    }

    #[test]
    fn unit_observer_never_acts() {
        let mut observer = ();
        let action: Option<Action> = observer.observe(&42);
        assert_eq!(action, None);
    }

    #[test]
    fn closure_observer_counts_events() {
        let mut seen = 0;
        let mut observer = |event: &usize| {
            seen += 1;
            (*event >= 3).then_some(Action::Stop)
        };

        assert_eq!(observer.observe(&1), None);
        assert_eq!(observer.observe(&3), Some(Action::Stop));
        assert_eq!(seen, 2);
    }
}
