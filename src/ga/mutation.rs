//! Random perturbation of a tour.

use rand::Rng;

use crate::models::Tour;

/// Applies one random move: a shift of one visit or a segment reversal,
/// each with probability ½.
///
/// The first visit and a fixed last visit never move. Returns `false` when
/// the tour has fewer than two movable visits.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
/// use u_tour::ga::mutate;
/// use u_tour::models::{Problem, Tour};
/// use u_tour::random::create_rng;
///
/// let problem = Problem::closed(WeightMatrix::new(6), 0).unwrap();
/// let mut tour = Tour::new(&problem);
/// assert!(mutate(&mut tour, &mut create_rng(3)));
/// assert_ne!(tour.ids(), &[0, 1, 2, 3, 4, 5]);
/// ```
pub fn mutate<R: Rng>(tour: &mut Tour, rng: &mut R) -> bool {
    // movable positions are 1..limit
    let limit = if tour.last().is_some() && !tour.is_closed() {
        tour.count().saturating_sub(1)
    } else {
        tour.count()
    };
    if limit < 3 {
        return false;
    }

    if rng.random_bool(0.5) {
        let pc = rng.random_range(1..limit);
        // any position except the customer's own and its predecessor's
        let mut pb = rng.random_range(0..limit - 2);
        if pb + 1 >= pc {
            pb += 2;
        }
        match (tour.at(pc), tour.at(pb)) {
            (Some(customer), Some(before)) => tour.shift_after(customer, before).is_some(),
            _ => false,
        }
    } else {
        let from = rng.random_range(1..limit - 1);
        let to = rng.random_range(from + 1..limit);
        tour.reverse(from, to)
    }
}
