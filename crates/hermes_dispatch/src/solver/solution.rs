use std::collections::BTreeMap;

use jiff::SignedDuration;
use serde::Serialize;

use crate::problem::{
    service_type::ServiceType,
    task::{Route, Task},
};

/// The sequenced route of one sub-bundle, without the depot.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SolutionItem {
    pub service_type: ServiceType,
    pub time: SignedDuration,
    pub route: Route,
}

/// Zones solved during one round, delivered to the caller.
#[derive(Serialize, Debug, Clone, Default)]
pub struct Solution {
    /// Position of this solution in the sequence delivered to the caller
    pub iteration: usize,

    /// Retry round that produced it
    pub round: usize,

    pub zones: BTreeMap<usize, Vec<SolutionItem>>,
}

impl Solution {
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.zones
            .values()
            .flatten()
            .flat_map(|item| item.route.iter())
    }
}
