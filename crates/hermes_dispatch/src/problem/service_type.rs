use serde::{Deserialize, Serialize};

/// A class of vehicle able to serve a bundle of tasks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceType {
    pub id: String,
    pub name: String,

    /// Carrying capacity, in whatever unit the vehicle grouper works with
    pub capacity: f64,
}

impl ServiceType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
        }
    }
}
