use jiff::SignedDuration;
use rand::{SeedableRng, rngs::SmallRng};

#[derive(Clone, Debug)]
pub struct OptimizationParams {
    /// Upper bound on the duration of every sequenced route
    pub max_time: SignedDuration,

    /// Transport handed to the sequencer, a default client is built when unset
    pub http_client: Option<reqwest::Client>,

    /// Seed of the generator used to pick between validated candidates
    pub seed: Option<u64>,

    /// Rounds a pending route may come back without shrinking before its tasks
    /// are declared impossible
    pub max_stalled_rounds: usize,
}

impl Default for OptimizationParams {
    fn default() -> Self {
        Self {
            max_time: SignedDuration::ZERO,
            http_client: None,
            seed: None,
            max_stalled_rounds: 3,
        }
    }
}

impl OptimizationParams {
    pub(crate) fn create_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }

    pub(crate) fn stall_limit(&self) -> usize {
        self.max_stalled_rounds.max(1)
    }
}
