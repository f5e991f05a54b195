use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use jiff::SignedDuration;

use crate::{
    collaborators::sequencer::{SequencedRoute, Sequencer},
    problem::{
        service_type::ServiceType,
        task::{Route, Task},
    },
    solver::solution::SolutionItem,
};

pub fn create_depot() -> Task {
    Task::new("depot", "Warehouse", 4.60, -74.08)
}

pub fn create_tasks(ids: &[&str]) -> Route {
    ids.iter()
        .enumerate()
        .map(|(index, id)| {
            Task::new(
                *id,
                format!("Stop {id}"),
                4.60 + index as f64 * 0.01,
                -74.08 + index as f64 * 0.01,
            )
        })
        .collect()
}

pub fn create_service_type(id: &str) -> ServiceType {
    ServiceType::new(id, format!("Vehicle {id}"), 100.0)
}

pub fn create_solution_item(ids: &[&str]) -> SolutionItem {
    SolutionItem {
        service_type: create_service_type("van"),
        time: SignedDuration::from_mins(ids.len() as i64),
        route: create_tasks(ids),
    }
}

/// Keeps the input order, one minute per task, and fails every bundle that
/// contains one of `failing`. With `round_trip` the first task is repeated at
/// the end of the route.
#[derive(Default)]
pub struct TestSequencer {
    pub failing: Vec<String>,
    pub round_trip: bool,
    pub calls: Arc<AtomicUsize>,
}

impl TestSequencer {
    pub fn failing_on(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Sequencer for TestSequencer {
    async fn sequence(
        &self,
        _client: &reqwest::Client,
        tasks: Vec<Task>,
        service_type: ServiceType,
        _max_time: SignedDuration,
    ) -> anyhow::Result<SequencedRoute> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        // Longer bundles finish later so completion order differs from launch order
        for _ in 0..tasks.len() {
            tokio::task::yield_now().await;
        }

        if let Some(task) = tasks
            .iter()
            .find(|task| self.failing.iter().any(|id| id == &task.id))
        {
            anyhow::bail!("no route within max time for {}", task.id);
        }

        let time = SignedDuration::from_mins(tasks.len() as i64);
        let mut route = tasks;
        if self.round_trip {
            if let Some(first) = route.first().cloned() {
                route.push(first);
            }
        }

        Ok(SequencedRoute {
            time,
            route,
            service_type,
        })
    }
}
