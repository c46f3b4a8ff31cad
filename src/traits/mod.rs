pub mod directory;
pub mod inventory;
pub mod workflow;
