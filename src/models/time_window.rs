//! Per-visit time windows.

use serde::{Deserialize, Serialize};

/// A time window constraint for a visit.
///
/// Arriving before `min` means waiting until `min`; arriving after `max` is a
/// violation of `arrival - max`.
///
/// # Examples
///
/// ```
/// use u_tour::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert_eq!(tw.service_start(50.0), 100.0);
/// assert_eq!(tw.violation(250.0), 50.0);
/// assert!(tw.contains(150.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    min: f64,
    max: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `min > max` or either value is NaN. An infinite
    /// `max` is allowed and means "no deadline".
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_nan() || max.is_nan() || min > max || min == f64::INFINITY {
            return None;
        }
        Some(Self { min, max })
    }

    /// Earliest service start.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Latest allowable arrival.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.min && time <= self.max
    }

    /// Time at which service starts when arriving at `arrival`.
    pub fn service_start(&self, arrival: f64) -> f64 {
        arrival.max(self.min)
    }

    /// Amount by which `arrival` exceeds the deadline, zero when on time.
    pub fn violation(&self, arrival: f64) -> f64 {
        (arrival - self.max).max(0.0)
    }

    /// Returns `true` if arriving at the given time violates this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.max
    }
}
