//! Turn penalties for direction-aware tours.

use std::collections::HashMap;

/// Sparse table of penalties charged when a tour passes `prev → cur → next`.
///
/// Unlisted turns cost nothing.
///
/// # Examples
///
/// ```
/// use u_tour::models::TurnPenalties;
///
/// let mut turns = TurnPenalties::new();
/// turns.set(0, 1, 0, 30.0); // u-turn at 1
/// assert_eq!(turns.get(0, 1, 0), 30.0);
/// assert_eq!(turns.get(0, 1, 2), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnPenalties {
    penalties: HashMap<(usize, usize, usize), f64>,
}

impl TurnPenalties {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the penalty for the turn `prev → cur → next`.
    pub fn set(&mut self, prev: usize, cur: usize, next: usize, penalty: f64) {
        self.penalties.insert((prev, cur, next), penalty);
    }

    /// Penalty for the turn `prev → cur → next`.
    pub fn get(&self, prev: usize, cur: usize, next: usize) -> f64 {
        self.penalties
            .get(&(prev, cur, next))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of listed turns.
    pub fn len(&self) -> usize {
        self.penalties.len()
    }

    /// Returns `true` if no turn carries a penalty.
    pub fn is_empty(&self) -> bool {
        self.penalties.is_empty()
    }

    /// Largest id mentioned by any listed turn.
    pub(crate) fn max_id(&self) -> Option<usize> {
        self.penalties
            .keys()
            .map(|&(a, b, c)| a.max(b).max(c))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let turns = TurnPenalties::new();
        assert!(turns.is_empty());
        assert_eq!(turns.get(1, 2, 3), 0.0);
        assert_eq!(turns.max_id(), None);
    }

    #[test]
    fn test_overwrite() {
        let mut turns = TurnPenalties::new();
        turns.set(1, 2, 3, 4.0);
        turns.set(1, 2, 3, 5.0);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns.get(1, 2, 3), 5.0);
        assert_eq!(turns.max_id(), Some(3));
    }
}
