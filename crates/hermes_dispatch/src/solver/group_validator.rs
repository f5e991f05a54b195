use std::{pin::pin, sync::Arc};

use futures::StreamExt;
use jiff::SignedDuration;
use tracing::{debug, instrument};

use crate::{
    collaborators::sequencer::{SequencedRoute, Sequencer},
    problem::{grouping::GroupingCandidate, task::Task},
    utils::completion_barrier::CompletionBarrier,
};

use super::{consolidator::ValidatedCandidate, solution::SolutionItem};

/// A candidate that lost at least one sub-bundle.
#[derive(Debug)]
pub struct Discarded {
    pub zone: usize,
    pub candidate: usize,
    pub bundle: usize,
    pub reason: anyhow::Error,
}

/// Sequences every sub-bundle of a grouping candidate concurrently.
pub struct GroupValidator<S> {
    depot: Task,
    sequencer: Arc<S>,
    client: reqwest::Client,
    max_time: SignedDuration,
}

impl<S> GroupValidator<S>
where
    S: Sequencer,
{
    pub fn new(
        depot: Task,
        sequencer: Arc<S>,
        client: reqwest::Client,
        max_time: SignedDuration,
    ) -> Self {
        Self {
            depot,
            sequencer,
            client,
            max_time,
        }
    }

    /// Either every sub-bundle is sequenced and the candidate is validated, or
    /// the whole candidate is discarded. Every launched sequencing task is
    /// awaited before returning, even after a failure.
    #[instrument(skip(self, grouping), fields(bundles = grouping.len()))]
    pub async fn validate(
        &self,
        zone: usize,
        candidate: usize,
        grouping: GroupingCandidate,
    ) -> Result<ValidatedCandidate, Discarded> {
        let barrier: CompletionBarrier<(usize, anyhow::Result<SequencedRoute>)> =
            CompletionBarrier::new();

        for (bundle, vehicle_grouping) in grouping.into_iter().enumerate() {
            let producer = barrier.producer();
            let sequencer = Arc::clone(&self.sequencer);
            let client = self.client.clone();
            let max_time = self.max_time;

            let service_type = vehicle_grouping.service_type;
            let mut tasks = Vec::with_capacity(vehicle_grouping.tasks.len() + 1);
            tasks.push(self.depot.clone());
            tasks.extend(vehicle_grouping.tasks);

            tokio::spawn(async move {
                let result = sequencer
                    .sequence(&client, tasks, service_type, max_time)
                    .await;
                producer.complete((bundle, result));
            });
        }

        debug!(bundles = barrier.outstanding(), "Sequencing candidate");

        let mut results = pin!(barrier.into_stream());
        let mut sequenced: Vec<(usize, SequencedRoute)> = Vec::new();
        let mut failure: Option<(usize, anyhow::Error)> = None;

        while let Some((bundle, result)) = results.next().await {
            match result {
                Ok(route) => sequenced.push((bundle, route)),
                Err(reason) if failure.is_none() => failure = Some((bundle, reason)),
                Err(_) => {}
            }
        }

        if let Some((bundle, reason)) = failure {
            return Err(Discarded {
                zone,
                candidate,
                bundle,
                reason,
            });
        }

        sequenced.sort_by_key(|(bundle, _)| *bundle);

        let items = sequenced
            .into_iter()
            .map(|(_, sequenced)| self.solution_item(sequenced))
            .collect();

        Ok(ValidatedCandidate {
            zone,
            candidate,
            items,
        })
    }

    fn solution_item(&self, sequenced: SequencedRoute) -> SolutionItem {
        let mut route = sequenced.route;
        route.retain(|task| task.id != self.depot.id);

        SolutionItem {
            service_type: sequenced.service_type,
            time: sequenced.time,
            route,
        }
    }
}
