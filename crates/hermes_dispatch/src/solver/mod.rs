pub mod consolidator;
pub mod dispatch_error;
pub mod group_validator;
pub mod optimization_params;
pub mod orchestrator;
pub mod route_outcome;
pub mod route_solver;
pub mod solution;
