//! Core of the reader demo engagement funnel.
//!
//! The [`funnel::Funnel`] is a pure state machine driven by [`funnel::Message`]s.
//! It returns [`funnel::Effect`]s that a host executes; [`runtime::FunnelRuntime`]
//! is the reference host with a virtual clock.

pub mod auth;
pub mod bindings;
pub mod config;
pub mod content;
pub mod funnel;
pub mod language;
pub mod liveness;
pub mod runtime;
#[cfg(test)]
mod test_support;
pub mod text_utils;
pub mod timers;
pub mod tracking;
pub mod translation;
pub mod visitor;

pub use bindings::export_ts_bindings;
pub use config::{FunnelConfig, LogLevel, load_config};
pub use funnel::{Effect, Funnel, FunnelSnapshot, HostEffect, Message};
pub use runtime::FunnelRuntime;
