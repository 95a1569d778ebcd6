//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "honyaku".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_api_port() -> u16 {
    8080
}

pub fn default_webhook_path() -> String {
    "/webhook".to_string()
}

pub fn default_max_body_bytes() -> usize {
    1024 * 1024
}

pub fn default_line_api_base_url() -> String {
    "https://api.line.me".to_string()
}

pub fn default_deepl_base_url() -> String {
    "https://api-free.deepl.com/v2".to_string()
}

pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_fallback_text() -> String {
    "文字情報を入力してください。".to_string()
}

pub fn default_segment_separator() -> String {
    "-".to_string()
}
