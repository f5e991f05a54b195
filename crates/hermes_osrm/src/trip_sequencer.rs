use hermes_dispatch::{
    collaborators::sequencer::{SequencedRoute, Sequencer},
    problem::{service_type::ServiceType, task::Task},
};
use jiff::SignedDuration;
use tracing::debug;

use crate::client::{OsrmError, OsrmTripClient};

/// Sequences bundles with the OSRM trip service. A zero `max_time` leaves the
/// trip duration unbounded.
pub struct OsrmTripSequencer {
    trip_client: OsrmTripClient,
}

impl OsrmTripSequencer {
    pub fn new(trip_client: OsrmTripClient) -> Self {
        Self { trip_client }
    }
}

impl Sequencer for OsrmTripSequencer {
    async fn sequence(
        &self,
        client: &reqwest::Client,
        tasks: Vec<Task>,
        service_type: ServiceType,
        max_time: SignedDuration,
    ) -> anyhow::Result<SequencedRoute> {
        let trip = self.trip_client.fetch_trip(client, &tasks).await?;
        let time = SignedDuration::try_from_secs_f64(trip.duration)
            .map_err(|_| OsrmError::IncompleteResponse)?;

        if max_time.is_positive() && time > max_time {
            return Err(OsrmError::ExceedsMaxTime { time, max_time }.into());
        }

        debug!(
            service_type = %service_type.id,
            tasks = tasks.len(),
            duration = trip.duration,
            distance = trip.distance,
            "OSRM: Sequenced bundle"
        );

        let mut slots: Vec<Option<Task>> = tasks.into_iter().map(Some).collect();
        let route = trip
            .order
            .iter()
            .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
            .collect();

        Ok(SequencedRoute {
            route,
            service_type,
            time,
        })
    }
}
