//! Fire-and-forget conversion tracking.

use crate::language::Level;
use anyhow::Result;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConversionEvent {
    WidgetRevealed,
    MilestoneReached { milestone: u32 },
    LanguageSelected { language: String, level: Level },
    SignupStarted { manual: bool },
    SignupCompleted,
    SignupFailed { reason: String },
    OAuthStarted { provider: String },
    GateClosed,
}

impl ConversionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WidgetRevealed => "widget_revealed",
            Self::MilestoneReached { .. } => "milestone_reached",
            Self::LanguageSelected { .. } => "language_selected",
            Self::SignupStarted { .. } => "signup_started",
            Self::SignupCompleted => "signup_completed",
            Self::SignupFailed { .. } => "signup_failed",
            Self::OAuthStarted { .. } => "oauth_started",
            Self::GateClosed => "gate_closed",
        }
    }
}

/// Callers log and drop tracking errors; they never affect the funnel.
pub trait ConversionTracker {
    fn track(&mut self, event: &ConversionEvent) -> Result<()>;
}

/// Emits events as structured log lines.
#[derive(Debug, Default)]
pub struct LogTracker;

impl ConversionTracker for LogTracker {
    fn track(&mut self, event: &ConversionEvent) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        info!(event = event.name(), %payload, "Conversion event");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NullTracker;

impl ConversionTracker for NullTracker {
    fn track(&mut self, _event: &ConversionEvent) -> Result<()> {
        Ok(())
    }
}
