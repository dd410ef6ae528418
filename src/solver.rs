//! Search entry points shared by every strategy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::models::{Candidate, Problem};

/// Callback invoked with every new champion.
pub type Listener = Arc<dyn Fn(&Candidate) + Send + Sync>;

/// Something that turns a problem into a ranked tour.
pub trait Solver: Send + Sync {
    /// Short diagnostic label.
    fn name(&self) -> &str;

    /// Runs the search and returns the best candidate found.
    fn search(&self, problem: &Problem) -> Candidate;
}

/// Cooperative cancellation shared between a search and its caller.
///
/// Searches poll the flag between units of work; a unit that has started
/// always runs to completion.
///
/// # Examples
///
/// ```
/// use u_tour::solver::StopFlag;
///
/// let flag = StopFlag::new();
/// let handle = flag.clone();
/// assert!(!flag.is_stopped());
/// handle.stop();
/// assert!(flag.is_stopped());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// A flag that has not been raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing atomic flag.
    pub fn from_shared(flag: Arc<AtomicBool>) -> Self {
        Self(flag)
    }

    /// Requests a stop.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Lowers the flag again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_shared() {
        let shared = Arc::new(AtomicBool::new(false));
        let flag = StopFlag::from_shared(shared.clone());
        shared.store(true, Ordering::Relaxed);
        assert!(flag.is_stopped());
        flag.reset();
        assert!(!shared.load(Ordering::Relaxed));
    }
}
