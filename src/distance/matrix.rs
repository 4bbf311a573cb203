//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::models::Customer;

/// A dense n×n distance matrix stored in row-major order.
///
/// Used both for the source problem (indexed by customer id) and for the
/// compressed problem (indexed by depot/service id). Entries are not assumed
/// symmetric.
///
/// # Examples
///
/// ```
/// use u_compress::models::Customer;
/// use u_compress::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10),
///     Customer::new(2, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

/// Unchecked wire form of [`DistanceMatrix`].
#[derive(Deserialize)]
struct MatrixRepr {
    data: Vec<f64>,
    size: usize,
}

impl TryFrom<MatrixRepr> for DistanceMatrix {
    type Error = String;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        let len = repr.data.len();
        let size = repr.size;
        Self::from_data(size, repr.data).ok_or_else(|| {
            format!(
                "distance matrix of size {size} needs {} entries, got {len}",
                size.saturating_mul(size)
            )
        })
    }
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from customer coordinates.
    ///
    /// This is the materialization step Euclidean problems go through before
    /// they can be compressed.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let n = customers.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = customers[i].distance_to(&customers[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if size.checked_mul(size) != Some(data.len()) {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Returns the distance from `from` to `to`, or `None` when out of bounds.
    pub fn try_get(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.data.get(from * self.size + to).copied()
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored entries.
    pub fn num_entries(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the storage holds exactly `size * size` entries.
    pub fn is_well_formed(&self) -> bool {
        Some(self.data.len()) == self.size.checked_mul(self.size)
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customers() -> Vec<Customer> {
        vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 3.0, 4.0, 10),
            Customer::new(2, 0.0, 8.0, 20),
        ]
    }

    #[test]
    fn test_from_customers() {
        let dm = DistanceMatrix::from_customers(&sample_customers());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 7.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 7.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_deserialize_checks_length() {
        let err = serde_json::from_str::<DistanceMatrix>(r#"{"data":[0.0],"size":3}"#)
            .unwrap_err();
        assert!(err.to_string().contains("needs 9 entries, got 1"));

        let dm: DistanceMatrix =
            serde_json::from_str(r#"{"data":[0.0,2.0,3.0,0.0],"size":2}"#).expect("valid");
        assert_eq!(dm.get(1, 0), 3.0);
        assert!(dm.is_well_formed());
    }

    #[test]
    fn test_builder_rejects_short_storage() {
        use crate::models::{ProblemError, Vehicle, VrpProblem};

        let short = DistanceMatrix {
            data: vec![0.0],
            size: 3,
        };
        assert!(!short.is_well_formed());
        let err = VrpProblem::builder("short")
            .depot(Customer::depot(0.0, 0.0))
            .customers(sample_customers().into_iter().skip(1))
            .vehicle(Vehicle::new(0, 10))
            .explicit_distances(short)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ProblemError::MalformedMatrix {
                size: 3,
                entries: 1
            }
        );
    }

    #[test]
    fn test_try_get_bounds() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(2, 0, 4.5);
        assert_eq!(dm.try_get(2, 0), Some(4.5));
        assert_eq!(dm.try_get(3, 0), None);
        assert_eq!(dm.try_get(0, 3), None);
    }
}
