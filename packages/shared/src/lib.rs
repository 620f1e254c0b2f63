//! Utilities shared by the Imposter game server binaries and tests.

pub mod logger;
pub mod time;
