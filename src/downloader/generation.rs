// Request generation tokens
//
// Every submission takes the next generation. A result may only be rendered
// if no newer submission has been made since; older in-flight results are
// dropped when they arrive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Monotonic id of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// A result tagged with the generation that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<T> {
    pub generation: Generation,
    pub value: T,
}

/// Issues generations and filters stale results. Cheap to clone; clones
/// share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestGenerations {
    latest: Arc<AtomicU64>,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission, superseding all earlier ones
    pub fn next(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }

    /// Unwrap `stamped` if it is still the newest submission, else drop it
    pub fn accept<T>(&self, stamped: Stamped<T>) -> Option<T> {
        if self.is_current(stamped.generation) {
            Some(stamped.value)
        } else {
            debug!("Discarding stale result from generation {}", stamped.generation.0);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_wins() {
        let generations = RequestGenerations::new();
        let first = generations.next();
        let second = generations.next();

        assert!(first < second);
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));

        // The slow first request finishing late must not overwrite the second
        assert_eq!(generations.accept(Stamped { generation: first, value: "old" }), None);
        assert_eq!(
            generations.accept(Stamped { generation: second, value: "new" }),
            Some("new")
        );
    }

    #[test]
    fn test_clones_share_counter() {
        let generations = RequestGenerations::new();
        let other = generations.clone();
        let first = generations.next();
        other.next();
        assert!(!generations.is_current(first));
    }
}
