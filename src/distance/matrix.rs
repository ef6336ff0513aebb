//! Dense integer distance matrix.

use crate::error::ValidationError;
use crate::models::{Node, DEPOT};

/// Travel cost unit. Distances and skip penalties share this scale.
pub type Cost = i64;

/// A dense n×n integer distance matrix stored in row-major order.
///
/// Entries are Euclidean distances truncated toward zero, so cost
/// comparisons are exact and reproducible across runs.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (1.5, 1.5)]).unwrap();
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.get(0, 2), 2); // 2.12.. truncated
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<Cost>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the truncated Euclidean matrix for `points` (index 0 = depot).
    ///
    /// Fails if fewer than 2 points are given, any coordinate is not finite,
    /// or a distance exceeds [`DistanceMatrix::cost_limit`].
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, ValidationError> {
        let n = points.len();
        if n < 2 {
            return Err(ValidationError::TooFewPoints(n));
        }
        if let Some(index) = points
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ValidationError::NonFiniteCoordinate { index });
        }

        let mut data = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (xi, yi) = points[i];
                let (xj, yj) = points[j];
                let d = (xi - xj).hypot(yi - yj) as Cost;
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        let dm = Self { data, size: n };
        dm.check_limit()?;
        Ok(dm)
    }

    /// Computes the matrix from node positions, in slice order.
    pub fn from_nodes(nodes: &[Node]) -> Result<Self, ValidationError> {
        let points: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x(), n.y())).collect();
        Self::from_points(&points)
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// The grid must be square, symmetric, non-negative and have a zero
    /// diagonal.
    pub fn from_data(size: usize, data: Vec<Cost>) -> Result<Self, ValidationError> {
        if size < 2 {
            return Err(ValidationError::TooFewPoints(size));
        }
        if data.len() != size * size {
            return Err(ValidationError::InvalidMatrix(format!(
                "expected {} entries, got {}",
                size * size,
                data.len()
            )));
        }
        let dm = Self { data, size };
        if let Some(&d) = dm.data.iter().find(|&&d| d < 0) {
            return Err(ValidationError::InvalidMatrix(format!(
                "negative entry {d}"
            )));
        }
        if (0..size).any(|i| dm.get(i, i) != 0) {
            return Err(ValidationError::InvalidMatrix(
                "non-zero diagonal".to_string(),
            ));
        }
        if !dm.is_symmetric() {
            return Err(ValidationError::InvalidMatrix("not symmetric".to_string()));
        }
        dm.check_limit()?;
        Ok(dm)
    }

    /// Largest single cost (distance or skip penalty) accepted for an
    /// instance of `size` nodes.
    ///
    /// A plan visits at most `2 * size` edges and skips fewer than `size`
    /// nodes, so with every cost under this limit neither a total objective
    /// nor any move delta can overflow.
    pub fn cost_limit(size: usize) -> Cost {
        Cost::MAX / (size.max(1) as Cost).saturating_mul(4)
    }

    fn check_limit(&self) -> Result<(), ValidationError> {
        let limit = Self::cost_limit(self.size);
        match self.data.iter().copied().max() {
            Some(value) if value > limit => Err(ValidationError::CostOverflow { value, limit }),
            _ => Ok(()),
        }
    }

    /// Returns the distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Cost {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Length of `depot → route[0] → … → route[k-1] → depot`.
    ///
    /// An empty route has length zero.
    pub fn route_length(&self, route: &[usize]) -> Cost {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return 0;
        };
        let inner: Cost = route.windows(2).map(|w| self.get(w[0], w[1])).sum();
        self.get(DEPOT, first) + inner + self.get(last, DEPOT)
    }

    /// Returns the candidate nearest to `from`; ties go to the lowest index.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by_key(|&c| (self.get(from, c), c))
    }
}
