pub mod listener;
pub mod loader;
pub mod rest_server;
#[allow(clippy::module_inception)]
pub mod server;
pub mod transport;
