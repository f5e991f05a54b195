use serde::{Deserialize, Serialize};

/// A single stop of a route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
}

/// An ordered sequence of tasks. The first task of the route handed to the
/// orchestrator is the depot.
pub type Route = Vec<Task>;

impl Task {
    pub fn new(id: impl Into<String>, address: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            lat,
            lon,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl From<&Task> for geo_types::Point<f64> {
    fn from(task: &Task) -> Self {
        geo_types::Point::new(task.lon, task.lat)
    }
}
