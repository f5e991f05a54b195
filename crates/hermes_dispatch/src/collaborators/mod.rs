pub mod partitioner;
pub mod sequencer;
pub mod vehicle_grouper;
