//! Homogeneous fleet.

use serde::{Deserialize, Serialize};

/// A fleet of identical vehicles, all based at the depot.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Fleet;
///
/// let fleet = Fleet::new(2, 100);
/// assert_eq!(fleet.vehicle_count(), 2);
/// assert_eq!(fleet.capacity(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    vehicle_count: usize,
    capacity: i32,
}

impl Fleet {
    /// Creates a fleet. Values are checked when the problem is built.
    pub fn new(vehicle_count: usize, capacity: i32) -> Self {
        Self {
            vehicle_count,
            capacity,
        }
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Maximum load per vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }
}
