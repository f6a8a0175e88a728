use serde::Deserialize;
use std::time::Duration;

use super::defaults;

/// Flattened funnel configuration; the on-disk shape lives in `tables.rs`.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct FunnelConfig {
    #[serde(default = "defaults::default_total_pages")]
    pub total_pages: u32,
    #[serde(default = "defaults::default_start_page")]
    pub start_page: u32,
    #[serde(default = "defaults::default_visibility_threshold")]
    pub visibility_threshold: f32,
    #[serde(default = "defaults::default_visibility_dwell_ms")]
    pub visibility_dwell_ms: u64,
    #[serde(default = "defaults::default_calculating_ms")]
    pub calculating_ms: u64,
    #[serde(default = "defaults::default_tally_reveal_delay_ms")]
    pub tally_reveal_delay_ms: u64,
    #[serde(default = "defaults::default_badge_stagger_ms")]
    pub badge_stagger_ms: u64,
    #[serde(default = "defaults::default_interstitial_dwell_ms")]
    pub interstitial_dwell_ms: u64,
    #[serde(default = "defaults::default_interstitial_hide_ms")]
    pub interstitial_hide_ms: u64,
    #[serde(default = "defaults::default_tally_flash_ms")]
    pub tally_flash_ms: u64,
    #[serde(default = "defaults::default_gate_show_delay_ms")]
    pub gate_show_delay_ms: u64,
    #[serde(default)]
    pub alphabet_seed: Option<u64>,
    #[serde(default = "defaults::default_fallback_language")]
    pub fallback_language: String,
    #[serde(default = "defaults::default_native_language")]
    pub native_language: String,
    #[serde(default = "defaults::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "defaults::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "defaults::default_tracking_enabled")]
    pub tracking_enabled: bool,
    #[serde(default = "defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "defaults::default_cache_dir")]
    pub cache_dir: String,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        FunnelConfig {
            total_pages: defaults::default_total_pages(),
            start_page: defaults::default_start_page(),
            visibility_threshold: defaults::default_visibility_threshold(),
            visibility_dwell_ms: defaults::default_visibility_dwell_ms(),
            calculating_ms: defaults::default_calculating_ms(),
            tally_reveal_delay_ms: defaults::default_tally_reveal_delay_ms(),
            badge_stagger_ms: defaults::default_badge_stagger_ms(),
            interstitial_dwell_ms: defaults::default_interstitial_dwell_ms(),
            interstitial_hide_ms: defaults::default_interstitial_hide_ms(),
            tally_flash_ms: defaults::default_tally_flash_ms(),
            gate_show_delay_ms: defaults::default_gate_show_delay_ms(),
            alphabet_seed: None,
            fallback_language: defaults::default_fallback_language(),
            native_language: defaults::default_native_language(),
            api_base_url: defaults::default_api_base_url(),
            request_timeout_secs: defaults::default_request_timeout_secs(),
            tracking_enabled: defaults::default_tracking_enabled(),
            log_level: defaults::default_log_level(),
            cache_dir: defaults::default_cache_dir(),
        }
    }
}

impl FunnelConfig {
    /// Keep values the state machines depend on inside workable bounds.
    pub fn sanitized(mut self) -> Self {
        self.total_pages = self.total_pages.max(1);
        self.start_page = self.start_page.clamp(1, self.total_pages);
        if !self.visibility_threshold.is_finite() {
            self.visibility_threshold = defaults::default_visibility_threshold();
        }
        self.visibility_threshold = self.visibility_threshold.clamp(0.0, 1.0);
        self
    }

    pub fn visibility_dwell(&self) -> Duration {
        Duration::from_millis(self.visibility_dwell_ms)
    }

    pub fn calculating(&self) -> Duration {
        Duration::from_millis(self.calculating_ms)
    }

    pub fn tally_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.tally_reveal_delay_ms)
    }

    pub fn interstitial_dwell(&self) -> Duration {
        Duration::from_millis(self.interstitial_dwell_ms)
    }

    pub fn interstitial_hide(&self) -> Duration {
        Duration::from_millis(self.interstitial_hide_ms)
    }

    pub fn tally_flash(&self) -> Duration {
        Duration::from_millis(self.tally_flash_ms)
    }

    pub fn gate_show_delay(&self) -> Duration {
        Duration::from_millis(self.gate_show_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
