#![allow(clippy::async_fn_in_trait)]
pub mod clients;
pub mod common;
pub mod rest;
pub mod server;
pub mod sync;
pub mod traits;

pub use server::server::server_start;
