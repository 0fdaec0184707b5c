//! Shared utilities for market-report
//!
//! This crate provides the ambient pieces used across the workspace:
//! tracing setup and typed access to environment overrides.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_flag, env_var};
pub use logging::{LogFormat, init_tracing};
