use slumber_core::Aggregate;

/// Execute an aggregate command deterministically (no IO).
///
/// 1. **Decide**: calls `aggregate.handle(command)` to get events (pure, no mutation)
/// 2. **Evolve**: applies each event via `aggregate.apply(event)`
///
/// The returned events are exactly the ones applied. An empty vector means the
/// command was a no-op for the current state and nothing was touched.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Rejection>
where
    A: Aggregate,
{
    let events = aggregate.handle(command)?;
    for ev in &events {
        aggregate.apply(ev);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter that only accepts positive increments.
    #[derive(Debug, Default)]
    struct Counter {
        value: u32,
        version: u64,
    }

    impl Aggregate for Counter {
        type Command = u32;
        type Event = u32;
        type Rejection = &'static str;

        fn apply(&mut self, event: &u32) {
            self.value += event;
            self.version += 1;
        }

        fn handle(&self, command: &u32) -> Result<Vec<u32>, &'static str> {
            match *command {
                0 => Ok(vec![]),
                n if n > 100 => Err("too large"),
                n => Ok(vec![n]),
            }
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    #[test]
    fn execute_applies_emitted_events() {
        let mut counter = Counter::default();
        let events = execute(&mut counter, &5).unwrap();
        assert_eq!(events, vec![5]);
        assert_eq!(counter.value, 5);
        assert_eq!(counter.version(), 1);
    }

    #[test]
    fn execute_leaves_state_alone_on_noop_and_rejection() {
        let mut counter = Counter::default();
        assert!(execute(&mut counter, &0).unwrap().is_empty());
        assert_eq!(execute(&mut counter, &500), Err("too large"));
        assert_eq!(counter.value, 0);
        assert_eq!(counter.version(), 0);
    }
}
