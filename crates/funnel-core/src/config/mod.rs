//! Configuration loading for the reader-demo funnel.
//!
//! Timings, page bounds and collaborator endpoints are centralized here and
//! loaded from `conf/config.toml` if present. Any missing or invalid entries
//! fall back to defaults so the widget still runs.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{FunnelConfig, LogLevel};
