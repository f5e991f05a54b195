use std::sync::Arc;

use futures::StreamExt;
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::{
    collaborators::{partitioner::Partitioner, sequencer::Sequencer, vehicle_grouper::VehicleGrouper},
    problem::{
        grouping::{GroupingCandidate, WASTE_TOLERANCE},
        service_type::ServiceType,
        task::Task,
    },
    utils::completion_barrier::CompletionBarrier,
};

use super::{
    consolidator::{ValidatedCandidate, consolidate},
    group_validator::GroupValidator,
    route_outcome::RouteOutcome,
};

/// Solves one working route: partitions it into zones, validates every
/// grouping candidate of every zone concurrently and consolidates the
/// survivors.
pub struct RouteSolver<'a, P, G, S> {
    partitioner: &'a P,
    grouper: &'a G,
    validator: Arc<GroupValidator<S>>,
}

impl<'a, P, G, S> RouteSolver<'a, P, G, S>
where
    P: Partitioner,
    G: VehicleGrouper,
    S: Sequencer,
{
    pub fn new(partitioner: &'a P, grouper: &'a G, validator: Arc<GroupValidator<S>>) -> Self {
        Self {
            partitioner,
            grouper,
            validator,
        }
    }

    /// Partitioning and grouping errors are fatal and returned before any
    /// candidate is launched.
    #[instrument(skip_all, fields(tasks = route.len()))]
    pub async fn solve<R>(
        &self,
        route: &[Task],
        service_types: &[ServiceType],
        rng: &mut R,
    ) -> anyhow::Result<RouteOutcome>
    where
        R: Rng,
    {
        let zones = self.partitioner.partition(route)?;

        let partitioned_tasks: usize = zones.iter().map(|zone| zone.len()).sum();
        if partitioned_tasks != route.len() {
            anyhow::bail!(
                "Partition holds {} tasks, the route has {}",
                partitioned_tasks,
                route.len()
            );
        }

        let groupings = zones
            .iter()
            .map(|zone| {
                self.grouper
                    .optimize_vehicles(zone, service_types, WASTE_TOLERANCE)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let barrier = CompletionBarrier::<ValidatedCandidate>::new();

        for (zone, candidates) in groupings.into_iter().enumerate() {
            debug!(zone, candidates = candidates.len(), "Validating candidates");

            for (candidate, grouping) in candidates.into_iter().enumerate() {
                if !covers_zone(&zones[zone], &grouping) {
                    warn!(zone, candidate, "Discarded candidate not covering its zone");
                    continue;
                }

                let producer = barrier.producer();
                let validator = Arc::clone(&self.validator);

                tokio::spawn(async move {
                    match validator.validate(zone, candidate, grouping).await {
                        Ok(validated) => producer.complete(validated),
                        Err(discarded) => {
                            warn!(
                                zone = discarded.zone,
                                candidate = discarded.candidate,
                                bundle = discarded.bundle,
                                reason = %discarded.reason,
                                "Discarded candidate"
                            );
                            producer.discard();
                        }
                    }
                });
            }
        }

        let validated: Vec<ValidatedCandidate> = barrier.into_stream().collect().await;

        debug!(
            zones = zones.len(),
            validated = validated.len(),
            "Collected candidates"
        );

        Ok(consolidate(&zones, validated, rng))
    }
}

/// Whether the bundles of `grouping` hold exactly the tasks of `zone`.
fn covers_zone(zone: &[Task], grouping: &GroupingCandidate) -> bool {
    let mut expected: Vec<&str> = zone.iter().map(Task::id).collect();
    let mut grouped: Vec<&str> = grouping
        .iter()
        .flat_map(|vehicle_grouping| vehicle_grouping.tasks.iter().map(Task::id))
        .collect();

    expected.sort_unstable();
    grouped.sort_unstable();

    expected == grouped
}
