//! Imposter game server
//!
//! Connection registry, round state machine, broadcast router and submission
//! aggregator behind an axum WebSocket and HTTP API.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
