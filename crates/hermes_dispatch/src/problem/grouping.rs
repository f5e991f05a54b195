use serde::{Deserialize, Serialize};

use super::{service_type::ServiceType, task::Task};

/// Fraction of unused vehicle capacity tolerated when enumerating groupings.
pub const WASTE_TOLERANCE: f64 = 0.1;

/// One sub-bundle of a zone assigned to a service type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VehicleGrouping {
    pub tasks: Vec<Task>,
    pub service_type: ServiceType,
}

/// One way of covering every task of a zone.
pub type GroupingCandidate = Vec<VehicleGrouping>;

impl VehicleGrouping {
    pub fn new(tasks: Vec<Task>, service_type: ServiceType) -> Self {
        Self {
            tasks,
            service_type,
        }
    }
}
