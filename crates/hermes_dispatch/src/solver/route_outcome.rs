use std::collections::BTreeMap;

use crate::problem::task::Route;

use super::solution::SolutionItem;

/// Result of solving one working route. Zone indices are positions in the
/// partition of that route.
#[derive(Debug)]
pub enum RouteOutcome {
    Solved(BTreeMap<usize, Vec<SolutionItem>>),
    PartiallySolved {
        zones: BTreeMap<usize, Vec<SolutionItem>>,
        pending: BTreeMap<usize, Route>,
    },
}

impl RouteOutcome {
    pub fn into_parts(self) -> (BTreeMap<usize, Vec<SolutionItem>>, BTreeMap<usize, Route>) {
        match self {
            RouteOutcome::Solved(zones) => (zones, BTreeMap::new()),
            RouteOutcome::PartiallySolved { zones, pending } => (zones, pending),
        }
    }
}
