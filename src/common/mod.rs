pub mod config;
pub mod heartbeat;
pub mod job;
pub mod machine;
