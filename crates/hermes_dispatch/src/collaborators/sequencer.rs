use jiff::SignedDuration;

use crate::problem::{service_type::ServiceType, task::Route, task::Task};

/// The sequenced visiting order of one sub-bundle.
#[derive(Debug, Clone)]
pub struct SequencedRoute {
    pub route: Route,
    pub service_type: ServiceType,
    pub time: SignedDuration,
}

/// Orders a bundle of tasks against a routing backend.
///
/// `tasks` always starts with the depot. The returned future resolves exactly
/// once, with either the sequenced route or the reason it could not be built
/// within `max_time`.
pub trait Sequencer: Send + Sync + 'static {
    fn sequence(
        &self,
        client: &reqwest::Client,
        tasks: Vec<Task>,
        service_type: ServiceType,
        max_time: SignedDuration,
    ) -> impl Future<Output = anyhow::Result<SequencedRoute>> + Send;
}
