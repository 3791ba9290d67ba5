//! Testing utilities for resource-scoping code.
//!
//! This module provides small instrumented helpers for asserting on
//! disposal behavior: a [`Tracked`] resource whose disposal can be checked
//! after a batch settles, and a [`SequenceLog`] for recording the order of
//! handler and cleanup events.
//!
//! # Examples
//!
//! ## Tracked resources
//!
//! ```
//! use breakwater::testing::Tracked;
//! use breakwater::{assert_disposed, using, Acquirable, DisposerExt};
//!
//! # tokio_test::block_on(async {
//! let resource = Tracked::new("db");
//! let item = {
//!     let resource = resource.clone();
//!     async move { Ok::<_, String>(resource.clone()) }.disposer_sync(|r| {
//!         r.mark_disposed();
//!         Ok(())
//!     })
//! };
//!
//! let result = using(vec![Acquirable::from(item)], |values: &[Tracked]| {
//!     let label = values[0].label().to_string();
//!     async move { Ok::<_, String>(label) }
//! })
//! .await;
//!
//! assert_eq!(result, Ok("db".to_string()));
//! assert_disposed!(resource);
//! # });
//! ```
//!
//! ## Sequence logging
//!
//! ```
//! use breakwater::testing::SequenceLog;
//!
//! let log = SequenceLog::new();
//! log.record("first");
//! log.record("second");
//! assert_eq!(log.entries(), vec!["first", "second"]);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A labeled test resource with an atomic disposed flag.
///
/// Clones share the flag, so a clone can go through a batch while the
/// original stays behind for assertions. Marking a resource disposed twice
/// panics, which surfaces double-release bugs directly in the failing test.
#[derive(Clone, Debug)]
pub struct Tracked {
    label: String,
    disposed: Arc<AtomicBool>,
}

impl Tracked {
    /// Create a new tracked resource with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Tracked {
            label: label.into(),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The label this resource was created with.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the resource has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Mark the resource disposed.
    ///
    /// # Panics
    ///
    /// Panics if the resource was already disposed - cleanup must run at
    /// most once per resource.
    pub fn mark_disposed(&self) {
        let already = self.disposed.swap(true, Ordering::SeqCst);
        assert!(!already, "resource '{}' disposed twice", self.label);
    }
}

/// A thread-safe, ordered event recorder.
///
/// Clones share the underlying log, so a handler and several cleanup
/// closures can all record into the same sequence.
#[derive(Clone, Debug, Default)]
pub struct SequenceLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl SequenceLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// Snapshot of the recorded entries, in order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

/// Assert that a [`Tracked`] resource has been disposed.
///
/// # Example
///
/// ```
/// use breakwater::assert_disposed;
/// use breakwater::testing::Tracked;
///
/// let r = Tracked::new("r");
/// r.mark_disposed();
/// assert_disposed!(r);
/// ```
#[macro_export]
macro_rules! assert_disposed {
    ($tracked:expr) => {
        assert!(
            $tracked.is_disposed(),
            "expected resource '{}' to be disposed",
            $tracked.label()
        );
    };
}

/// Assert that a [`Tracked`] resource has NOT been disposed.
///
/// # Example
///
/// ```
/// use breakwater::assert_not_disposed;
/// use breakwater::testing::Tracked;
///
/// let r = Tracked::new("r");
/// assert_not_disposed!(r);
/// ```
#[macro_export]
macro_rules! assert_not_disposed {
    ($tracked:expr) => {
        assert!(
            !$tracked.is_disposed(),
            "expected resource '{}' to not be disposed",
            $tracked.label()
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_starts_undisposed() {
        let r = Tracked::new("r");
        assert!(!r.is_disposed());
        assert_eq!(r.label(), "r");
    }

    #[test]
    fn tracked_clones_share_the_flag() {
        let r = Tracked::new("r");
        let clone = r.clone();
        clone.mark_disposed();
        assert!(r.is_disposed());
    }

    #[test]
    #[should_panic(expected = "disposed twice")]
    fn tracked_panics_on_double_disposal() {
        let r = Tracked::new("r");
        r.mark_disposed();
        r.mark_disposed();
    }

    #[test]
    fn sequence_log_preserves_order() {
        let log = SequenceLog::new();
        log.record("a");
        log.record("b");
        log.record("c");
        assert_eq!(log.entries(), vec!["a", "b", "c"]);
    }

    #[test]
    fn assert_disposed_macro() {
        let r = Tracked::new("r");
        r.mark_disposed();
        assert_disposed!(r);
    }

    #[test]
    #[should_panic(expected = "expected resource 'r' to be disposed")]
    fn assert_disposed_panics_when_undisposed() {
        let r = Tracked::new("r");
        assert_disposed!(r);
    }

    #[test]
    fn assert_not_disposed_macro() {
        let r = Tracked::new("r");
        assert_not_disposed!(r);
    }
}
