//! HTTP surface over the feedback service.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
