//! Vehicle type.

use serde::{Deserialize, Serialize};

/// A vehicle of the fleet.
///
/// Compression never assigns vehicles; the fleet is carried through to the
/// compressed problem unchanged so the external solver sees the same one.
///
/// # Examples
///
/// ```
/// use u_compress::models::Vehicle;
///
/// let v = Vehicle::new(0, 200);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self { id, capacity }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(3, 150);
        assert_eq!(v.id(), 3);
        assert_eq!(v.capacity(), 150);
    }
}
