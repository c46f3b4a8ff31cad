pub mod jobs;
pub mod machines;
pub mod tags;
