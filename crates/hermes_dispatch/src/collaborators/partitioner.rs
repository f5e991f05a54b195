use crate::problem::task::{Route, Task};

/// Splits a route into zones. The returned order is the zone index for the
/// duration of one solve call.
pub trait Partitioner: Send + Sync {
    fn partition(&self, route: &[Task]) -> anyhow::Result<Vec<Route>>;
}

impl<F> Partitioner for F
where
    F: Fn(&[Task]) -> anyhow::Result<Vec<Route>> + Send + Sync,
{
    fn partition(&self, route: &[Task]) -> anyhow::Result<Vec<Route>> {
        self(route)
    }
}
