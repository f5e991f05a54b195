use std::collections::BTreeMap;

use rand::{Rng, seq::IndexedRandom};
use tracing::debug;

use crate::problem::task::Route;

use super::{route_outcome::RouteOutcome, solution::SolutionItem};

/// A grouping candidate whose every sub-bundle was sequenced.
#[derive(Debug, Clone)]
pub struct ValidatedCandidate {
    pub zone: usize,

    /// Position of the grouping in the vehicle grouper's output for the zone
    pub candidate: usize,

    pub items: Vec<SolutionItem>,
}

/// Picks one validated candidate per zone, uniformly at random.
///
/// Candidates are ordered by their grouping position before picking, so the
/// pick only depends on the generator state and the candidate set, never on
/// the order in which validations completed. Zones without any candidate are
/// returned as pending with their original route.
pub fn consolidate<R>(zones: &[Route], candidates: Vec<ValidatedCandidate>, rng: &mut R) -> RouteOutcome
where
    R: Rng,
{
    let mut candidates_by_zone: Vec<Vec<ValidatedCandidate>> =
        zones.iter().map(|_| Vec::new()).collect();

    for candidate in candidates {
        if let Some(bucket) = candidates_by_zone.get_mut(candidate.zone) {
            bucket.push(candidate);
        }
    }

    let mut solved = BTreeMap::new();
    let mut pending = BTreeMap::new();

    for (zone, mut bucket) in candidates_by_zone.into_iter().enumerate() {
        bucket.sort_by_key(|candidate| candidate.candidate);

        let Some(picked) = bucket.choose(rng) else {
            pending.insert(zone, zones[zone].clone());
            continue;
        };

        debug!(
            zone,
            candidate = picked.candidate,
            alternatives = bucket.len(),
            "Picked candidate"
        );

        solved.insert(zone, picked.items.clone());
    }

    if pending.is_empty() {
        RouteOutcome::Solved(solved)
    } else {
        RouteOutcome::PartiallySolved {
            zones: solved,
            pending,
        }
    }
}
