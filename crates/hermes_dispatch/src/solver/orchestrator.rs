use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    collaborators::{partitioner::Partitioner, sequencer::Sequencer, vehicle_grouper::VehicleGrouper},
    problem::{
        service_type::ServiceType,
        task::{Route, Task},
    },
};

use super::{
    dispatch_error::DispatchError, group_validator::GroupValidator,
    optimization_params::OptimizationParams, route_solver::RouteSolver, solution::Solution,
};

/// A route waiting to be solved, with the number of consecutive rounds it came
/// back without shrinking.
struct WorkingRoute {
    route: Route,
    stalls: usize,
}

/// Runs solve rounds over the unsolved routes until every task is either
/// routed or declared impossible.
pub struct Orchestrator<P, G, S> {
    partitioner: P,
    grouper: G,
    sequencer: Arc<S>,
}

impl<P, G, S> Orchestrator<P, G, S>
where
    P: Partitioner,
    G: VehicleGrouper,
    S: Sequencer,
{
    pub fn new(partitioner: P, grouper: G, sequencer: S) -> Self {
        Self {
            partitioner,
            grouper,
            sequencer: Arc::new(sequencer),
        }
    }

    /// `route[0]` is the depot. `on_solution` receives the zones solved in each
    /// round that solved at least one. A fatal collaborator error still
    /// delivers the zones already solved in its round before returning.
    pub async fn optimize<F>(
        &self,
        route: Route,
        service_types: &[ServiceType],
        mut on_solution: F,
        params: OptimizationParams,
    ) -> Result<(), DispatchError>
    where
        F: FnMut(Solution),
    {
        if route.len() <= 2 {
            return Err(DispatchError::EmptyRoute);
        }
        if service_types.is_empty() {
            return Err(DispatchError::EmptyServiceTypes);
        }
        if params.max_time.is_negative() {
            return Err(DispatchError::InvalidMaxTime);
        }

        let client = params.http_client.clone().unwrap_or_default();
        let stall_limit = params.stall_limit();
        let mut rng = params.create_rng();

        let mut stops = route;
        let depot = stops.remove(0);

        let validator = Arc::new(GroupValidator::new(
            depot.clone(),
            Arc::clone(&self.sequencer),
            client,
            params.max_time,
        ));
        let solver = RouteSolver::new(&self.partitioner, &self.grouper, validator);

        let mut working = vec![WorkingRoute {
            route: stops,
            stalls: 0,
        }];
        let mut impossible: Route = Vec::new();
        let mut round = 0;
        let mut delivered = 0;

        loop {
            info!(round, routes = working.len(), "Starting round");

            let mut solution = Solution {
                iteration: delivered,
                round,
                ..Solution::default()
            };
            let mut next = Vec::new();

            for working_route in working {
                let outcome = match solver
                    .solve(&working_route.route, service_types, &mut rng)
                    .await
                {
                    Ok(outcome) => outcome,
                    Err(error) => {
                        if !solution.is_empty() {
                            on_solution(solution);
                        }
                        return Err(error.into());
                    }
                };
                let (zones, pending) = outcome.into_parts();

                for items in zones.into_values() {
                    solution.zones.insert(solution.zones.len(), items);
                }

                for pending_route in pending.into_values() {
                    if pending_route.len() <= 1 {
                        let ids: Vec<&str> = pending_route.iter().map(Task::id).collect();
                        warn!(round, tasks = ?ids, "Zone cannot be split further, impossible");
                        impossible.extend(pending_route);
                        continue;
                    }

                    let stalls = if pending_route.len() < working_route.route.len() {
                        0
                    } else {
                        working_route.stalls + 1
                    };

                    if stalls >= stall_limit {
                        warn!(
                            round,
                            stalls,
                            tasks = pending_route.len(),
                            "Zone made no progress, impossible"
                        );
                        impossible.extend(pending_route);
                        continue;
                    }

                    next.push(WorkingRoute {
                        route: pending_route,
                        stalls,
                    });
                }
            }

            let solved_zones = solution.zones.len();
            if !solution.is_empty() {
                on_solution(solution);
                delivered += 1;
            }

            info!(
                round,
                solved_zones,
                pending = next.len(),
                impossible = impossible.len(),
                "Finished round"
            );

            if next.is_empty() {
                break;
            }

            working = next;
            round += 1;
        }

        if impossible.is_empty() {
            info!(rounds = round + 1, solutions = delivered, "All tasks routed");
            return Ok(());
        }

        warn!(
            rounds = round + 1,
            solutions = delivered,
            impossible = impossible.len(),
            "Some tasks could not be routed"
        );

        let mut tasks = Vec::with_capacity(impossible.len() + 1);
        tasks.push(depot);
        tasks.extend(impossible);

        Err(DispatchError::ImpossibleSolution { tasks })
    }
}
