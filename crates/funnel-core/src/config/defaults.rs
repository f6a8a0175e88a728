pub(crate) fn default_total_pages() -> u32 {
    511
}

pub(crate) fn default_start_page() -> u32 {
    8
}

pub(crate) fn default_visibility_threshold() -> f32 {
    0.5
}

pub(crate) fn default_visibility_dwell_ms() -> u64 {
    2000
}

pub(crate) fn default_calculating_ms() -> u64 {
    2000
}

pub(crate) fn default_tally_reveal_delay_ms() -> u64 {
    1000
}

pub(crate) fn default_badge_stagger_ms() -> u64 {
    80
}

pub(crate) fn default_interstitial_dwell_ms() -> u64 {
    4500
}

pub(crate) fn default_interstitial_hide_ms() -> u64 {
    500
}

pub(crate) fn default_tally_flash_ms() -> u64 {
    1000
}

pub(crate) fn default_gate_show_delay_ms() -> u64 {
    1500
}

pub(crate) fn default_fallback_language() -> String {
    "es".to_string()
}

pub(crate) fn default_native_language() -> String {
    "en".to_string()
}

pub(crate) fn default_api_base_url() -> String {
    "https://api.example.com".to_string()
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_tracking_enabled() -> bool {
    true
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}
