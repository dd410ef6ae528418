//! Dense weight matrix.

use crate::error::ProblemError;

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Weights may be asymmetric: `get(a, b)` and `get(b, a)` are independent.
///
/// # Examples
///
/// ```
/// use u_tour::distance::WeightMatrix;
///
/// let wm = WeightMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 3.0],
///     vec![8.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(wm.size(), 3);
/// assert_eq!(wm.get(2, 1), 4.0);
/// assert!(!wm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    data: Vec<f64>,
    size: usize,
}

impl WeightMatrix {
    /// Creates a weight matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a weight matrix from an explicit row-major grid.
    ///
    /// Fails with [`ProblemError::NotSquare`] if the data length doesn't
    /// match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, ProblemError> {
        if data.len() != size * size {
            return Err(ProblemError::NotSquare {
                size,
                len: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a weight matrix from nested rows.
    ///
    /// Fails with [`ProblemError::NotSquare`] if any row length differs
    /// from the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ProblemError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(ProblemError::NotSquare {
                size,
                len: rows.iter().map(Vec::len).sum(),
            });
        }
        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Creates a matrix by evaluating `f(from, to)` for every ordered pair.
    pub fn from_fn(size: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut wm = Self::new(size);
        for from in 0..size {
            for to in 0..size {
                wm.set(from, to, f(from, to));
            }
        }
        wm
    }

    /// Returns the weight from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the weight from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, weight: f64) {
        self.data[from * self.size + to] = weight;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the position of the first NaN entry as `(from, to)`.
    pub fn find_nan(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|w| w.is_nan())
            .map(|idx| (idx / self.size, idx % self.size))
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns a copy where every weight into `target` is replaced by
    /// `weight(from)`.
    pub fn with_column(&self, target: usize, weight: impl Fn(usize) -> f64) -> Self {
        let mut wm = self.clone();
        for from in 0..self.size {
            wm.set(from, target, weight(from));
        }
        wm
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }

    /// Returns up to `k` ids from `candidates`, closest to `from` first.
    ///
    /// `from` itself is never part of the result.
    pub fn nearest_neighbors(&self, from: usize, candidates: &[usize], k: usize) -> Vec<usize> {
        let mut sorted: Vec<usize> = candidates.iter().copied().filter(|&c| c != from).collect();
        sorted.sort_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)));
        sorted.truncate(k);
        sorted
    }
}
