use thiserror::Error;

use crate::problem::task::Route;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("The route must have more than 1 task")]
    EmptyRoute,

    #[error("There must be more than 0 service types")]
    EmptyServiceTypes,

    #[error("The max time is invalid")]
    InvalidMaxTime,

    /// `tasks` starts with the depot, followed by every task that could not be routed.
    #[error("Solutions could not be found for {} tasks", .tasks.len().saturating_sub(1))]
    ImpossibleSolution { tasks: Route },

    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
