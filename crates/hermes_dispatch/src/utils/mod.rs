pub mod completion_barrier;
