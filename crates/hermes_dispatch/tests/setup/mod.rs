#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use hermes_dispatch::{
    collaborators::sequencer::{SequencedRoute, Sequencer},
    problem::{
        grouping::{GroupingCandidate, VehicleGrouping},
        service_type::ServiceType,
        task::{Route, Task},
    },
    solver::solution::Solution,
};
use jiff::SignedDuration;

pub fn create_depot() -> Task {
    Task::new("depot", "Cra. 68 #22-41", 4.6321, -74.1204)
}

pub fn create_stops(count: usize) -> Route {
    (0..count)
        .map(|index| {
            Task::new(
                format!("s{index}"),
                format!("Stop {index}"),
                4.60 + index as f64 * 0.005,
                -74.07 - index as f64 * 0.005,
            )
        })
        .collect()
}

pub fn create_route(stops: &Route) -> Route {
    let mut route = vec![create_depot()];
    route.extend(stops.iter().cloned());
    route
}

pub fn create_service_type(id: &str) -> ServiceType {
    ServiceType::new(id, format!("Service {id}"), 10.0)
}

pub fn ids(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id.clone()).collect()
}

pub fn solution_ids(solutions: &[Solution]) -> Vec<String> {
    solutions
        .iter()
        .flat_map(|solution| solution.tasks().map(|task| task.id.clone()))
        .collect()
}

/// Splits routes of three or more tasks into the first task and the rest, and
/// routes of two tasks into singletons.
pub fn peel_partitioner(route: &[Task]) -> anyhow::Result<Vec<Route>> {
    Ok(match route.len() {
        0 | 1 => vec![route.to_vec()],
        2 => route.iter().map(|task| vec![task.clone()]).collect(),
        _ => vec![vec![route[0].clone()], route[1..].to_vec()],
    })
}

pub fn whole_route_partitioner(route: &[Task]) -> anyhow::Result<Vec<Route>> {
    Ok(vec![route.to_vec()])
}

pub fn halves_partitioner(route: &[Task]) -> anyhow::Result<Vec<Route>> {
    if route.len() <= 1 {
        return Ok(vec![route.to_vec()]);
    }

    let (left, right) = route.split_at(route.len() / 2);
    Ok(vec![left.to_vec(), right.to_vec()])
}

/// One candidate covering the whole zone with the first service type.
pub fn single_bundle_grouper(
    zone: &[Task],
    service_types: &[ServiceType],
    _waste_tolerance: f64,
) -> anyhow::Result<Vec<GroupingCandidate>> {
    Ok(vec![vec![VehicleGrouping::new(
        zone.to_vec(),
        service_types[0].clone(),
    )]])
}

/// One whole-zone candidate per service type, plus one candidate with a
/// vehicle per task.
pub fn many_candidates_grouper(
    zone: &[Task],
    service_types: &[ServiceType],
    _waste_tolerance: f64,
) -> anyhow::Result<Vec<GroupingCandidate>> {
    let mut candidates: Vec<GroupingCandidate> = service_types
        .iter()
        .map(|service_type| vec![VehicleGrouping::new(zone.to_vec(), service_type.clone())])
        .collect();

    candidates.push(
        zone.iter()
            .map(|task| VehicleGrouping::new(vec![task.clone()], service_types[0].clone()))
            .collect(),
    );

    Ok(candidates)
}

/// Keeps the input order and fails bundles containing one of `failing_tasks`,
/// bundles using one of `failing_service_types`, and the first
/// `failing_first_calls` calls.
#[derive(Default)]
pub struct ScriptedSequencer {
    pub failing_tasks: Vec<String>,
    pub failing_service_types: Vec<String>,
    pub failing_first_calls: usize,
    pub calls: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<(Route, SignedDuration)>>>,
}

impl ScriptedSequencer {
    pub fn failing_tasks(ids: &[&str]) -> Self {
        Self {
            failing_tasks: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing_service_types(ids: &[&str]) -> Self {
        Self {
            failing_service_types: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Sequencer for ScriptedSequencer {
    async fn sequence(
        &self,
        _client: &reqwest::Client,
        tasks: Vec<Task>,
        service_type: ServiceType,
        max_time: SignedDuration,
    ) -> anyhow::Result<SequencedRoute> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((tasks.clone(), max_time));

        for _ in 0..(tasks.len() % 3) {
            tokio::task::yield_now().await;
        }

        if call < self.failing_first_calls {
            anyhow::bail!("backend unavailable");
        }

        if self.failing_service_types.contains(&service_type.id) {
            anyhow::bail!("{} cannot serve this bundle", service_type.id);
        }

        if let Some(task) = tasks
            .iter()
            .find(|task| self.failing_tasks.contains(&task.id))
        {
            anyhow::bail!("{} is unreachable", task.id);
        }

        Ok(SequencedRoute {
            time: SignedDuration::from_mins(10 * tasks.len() as i64),
            route: tasks,
            service_type,
        })
    }
}
