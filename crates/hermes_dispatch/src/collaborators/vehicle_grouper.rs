use crate::problem::{grouping::GroupingCandidate, service_type::ServiceType, task::Task};

/// Enumerates the feasible ways of covering a zone with vehicles.
pub trait VehicleGrouper: Send + Sync {
    fn optimize_vehicles(
        &self,
        zone: &[Task],
        service_types: &[ServiceType],
        waste_tolerance: f64,
    ) -> anyhow::Result<Vec<GroupingCandidate>>;
}

impl<F> VehicleGrouper for F
where
    F: Fn(&[Task], &[ServiceType], f64) -> anyhow::Result<Vec<GroupingCandidate>> + Send + Sync,
{
    fn optimize_vehicles(
        &self,
        zone: &[Task],
        service_types: &[ServiceType],
        waste_tolerance: f64,
    ) -> anyhow::Result<Vec<GroupingCandidate>> {
        self(zone, service_types, waste_tolerance)
    }
}
