pub mod client;
pub mod trip_sequencer;
