//! Quarry gateway service library.
//!
//! # Purpose
//! Exposes the gateway's wiring so integration tests can drive the full
//! router in memory: identity resolution middleware, the federation
//! identify endpoint, and repository frame serving.
pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod federation;
pub mod frames;
pub mod observability;
pub mod repos;
