use super::defaults;
use super::models::{FunnelConfig, LogLevel};
use serde::Deserialize;

/// Grouped on-disk layout of `conf/config.toml`.
#[derive(Debug, Clone, Deserialize, serde::Serialize, Default)]
pub(super) struct ConfigTables {
    #[serde(default)]
    reader: ReaderConfig,
    #[serde(default)]
    timing: TimingConfig,
    #[serde(default)]
    alphabet: AlphabetConfig,
    #[serde(default)]
    language: LanguageConfig,
    #[serde(default)]
    signup: SignupConfig,
    #[serde(default)]
    tracking: TrackingConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for FunnelConfig {
    fn from(tables: ConfigTables) -> Self {
        FunnelConfig {
            total_pages: tables.reader.total_pages,
            start_page: tables.reader.start_page,
            visibility_threshold: tables.reader.visibility_threshold,
            visibility_dwell_ms: tables.timing.visibility_dwell_ms,
            calculating_ms: tables.timing.calculating_ms,
            tally_reveal_delay_ms: tables.timing.tally_reveal_delay_ms,
            badge_stagger_ms: tables.timing.badge_stagger_ms,
            interstitial_dwell_ms: tables.timing.interstitial_dwell_ms,
            interstitial_hide_ms: tables.timing.interstitial_hide_ms,
            tally_flash_ms: tables.timing.tally_flash_ms,
            gate_show_delay_ms: tables.timing.gate_show_delay_ms,
            alphabet_seed: tables.alphabet.seed,
            fallback_language: tables.language.fallback_language,
            native_language: tables.language.native_language,
            api_base_url: tables.signup.api_base_url,
            request_timeout_secs: tables.signup.request_timeout_secs,
            tracking_enabled: tables.tracking.enabled,
            cache_dir: tables.storage.cache_dir,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&FunnelConfig> for ConfigTables {
    fn from(config: &FunnelConfig) -> Self {
        ConfigTables {
            reader: ReaderConfig {
                total_pages: config.total_pages,
                start_page: config.start_page,
                visibility_threshold: config.visibility_threshold,
            },
            timing: TimingConfig {
                visibility_dwell_ms: config.visibility_dwell_ms,
                calculating_ms: config.calculating_ms,
                tally_reveal_delay_ms: config.tally_reveal_delay_ms,
                badge_stagger_ms: config.badge_stagger_ms,
                interstitial_dwell_ms: config.interstitial_dwell_ms,
                interstitial_hide_ms: config.interstitial_hide_ms,
                tally_flash_ms: config.tally_flash_ms,
                gate_show_delay_ms: config.gate_show_delay_ms,
            },
            alphabet: AlphabetConfig {
                seed: config.alphabet_seed,
            },
            language: LanguageConfig {
                fallback_language: config.fallback_language.clone(),
                native_language: config.native_language.clone(),
            },
            signup: SignupConfig {
                api_base_url: config.api_base_url.clone(),
                request_timeout_secs: config.request_timeout_secs,
            },
            tracking: TrackingConfig {
                enabled: config.tracking_enabled,
            },
            storage: StorageConfig {
                cache_dir: config.cache_dir.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ReaderConfig {
    #[serde(default = "defaults::default_total_pages")]
    total_pages: u32,
    #[serde(default = "defaults::default_start_page")]
    start_page: u32,
    #[serde(default = "defaults::default_visibility_threshold")]
    visibility_threshold: f32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            total_pages: defaults::default_total_pages(),
            start_page: defaults::default_start_page(),
            visibility_threshold: defaults::default_visibility_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct TimingConfig {
    #[serde(default = "defaults::default_visibility_dwell_ms")]
    visibility_dwell_ms: u64,
    #[serde(default = "defaults::default_calculating_ms")]
    calculating_ms: u64,
    #[serde(default = "defaults::default_tally_reveal_delay_ms")]
    tally_reveal_delay_ms: u64,
    #[serde(default = "defaults::default_badge_stagger_ms")]
    badge_stagger_ms: u64,
    #[serde(default = "defaults::default_interstitial_dwell_ms")]
    interstitial_dwell_ms: u64,
    #[serde(default = "defaults::default_interstitial_hide_ms")]
    interstitial_hide_ms: u64,
    #[serde(default = "defaults::default_tally_flash_ms")]
    tally_flash_ms: u64,
    #[serde(default = "defaults::default_gate_show_delay_ms")]
    gate_show_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            visibility_dwell_ms: defaults::default_visibility_dwell_ms(),
            calculating_ms: defaults::default_calculating_ms(),
            tally_reveal_delay_ms: defaults::default_tally_reveal_delay_ms(),
            badge_stagger_ms: defaults::default_badge_stagger_ms(),
            interstitial_dwell_ms: defaults::default_interstitial_dwell_ms(),
            interstitial_hide_ms: defaults::default_interstitial_hide_ms(),
            tally_flash_ms: defaults::default_tally_flash_ms(),
            gate_show_delay_ms: defaults::default_gate_show_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize, Default)]
struct AlphabetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LanguageConfig {
    #[serde(default = "defaults::default_fallback_language")]
    fallback_language: String,
    #[serde(default = "defaults::default_native_language")]
    native_language: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        LanguageConfig {
            fallback_language: defaults::default_fallback_language(),
            native_language: defaults::default_native_language(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SignupConfig {
    #[serde(default = "defaults::default_api_base_url")]
    api_base_url: String,
    #[serde(default = "defaults::default_request_timeout_secs")]
    request_timeout_secs: u64,
}

impl Default for SignupConfig {
    fn default() -> Self {
        SignupConfig {
            api_base_url: defaults::default_api_base_url(),
            request_timeout_secs: defaults::default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct TrackingConfig {
    #[serde(default = "defaults::default_tracking_enabled")]
    enabled: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            enabled: defaults::default_tracking_enabled(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct StorageConfig {
    #[serde(default = "defaults::default_cache_dir")]
    cache_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            cache_dir: defaults::default_cache_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
