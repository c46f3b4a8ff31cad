pub mod cache;
pub mod dispatcher;
pub mod reconciler;
