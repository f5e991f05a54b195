pub mod grouping;
pub mod service_type;
pub mod task;
