//! Application configuration. API credentials, thresholds, paths.

use serde::Deserialize;

/// Default `is_scam` threshold. Hand-tuned on the demo transcript set.
pub const DEFAULT_SCAM_THRESHOLD: f64 = 0.7;

/// Seconds of audio transcribed for the initial screening segment.
pub const DEFAULT_TRANSCRIBE_WINDOW_SECS: u32 = 5;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Data directory for seed files, snapshots, and the pattern store.
    pub data_dir: Option<String>,

    /// Webhook server bind address. Read from CALLSHIELD_HTTP_ADDR.
    #[serde(default)]
    pub http_addr: Option<String>,

    /// `is_scam` threshold override. Read from CALLSHIELD_SCAM_THRESHOLD
    /// (parsed directly in `load`, not via the env source).
    #[serde(skip)]
    pub scam_threshold: Option<f64>,

    /// Initial transcription window in seconds. Read from
    /// CALLSHIELD_TRANSCRIBE_WINDOW_SECS (parsed directly in `load`).
    #[serde(skip)]
    pub transcribe_window_secs: Option<u32>,

    // ─────────────────────────────────────────────────────────────────────────
    // Call Gateway Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Call-control API base URL. Read from CALLSHIELD_GATEWAY_API_URL.
    #[serde(default)]
    pub gateway_api_url: Option<String>,

    /// Call-control API key. Read from CALLSHIELD_GATEWAY_API_KEY.
    #[serde(default)]
    pub gateway_api_key: Option<String>,

    /// Family contact number for warm transfers (E.164).
    #[serde(default)]
    pub contact_number: Option<String>,

    /// Protected senior's number for normal transfers (E.164).
    #[serde(default)]
    pub senior_number: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // News Feed Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Dataset-trigger API endpoint. Read from CALLSHIELD_FEED_API_URL.
    #[serde(default)]
    pub feed_api_url: Option<String>,

    /// Dataset-trigger API key. Read from CALLSHIELD_FEED_API_KEY.
    #[serde(default)]
    pub feed_api_key: Option<String>,

    /// Dataset id for the trigger API. Read from CALLSHIELD_FEED_DATASET_ID.
    #[serde(default)]
    pub feed_dataset_id: Option<String>,

    /// Public URL of our collector webhook; when set, trigger results are
    /// delivered there asynchronously. Read from CALLSHIELD_FEED_WEBHOOK_URL.
    #[serde(default)]
    pub feed_webhook_url: Option<String>,

    /// News search API endpoint. Read from CALLSHIELD_NEWS_API_URL.
    #[serde(default)]
    pub news_api_url: Option<String>,

    /// News search API key. Read from CALLSHIELD_NEWS_API_KEY.
    #[serde(default)]
    pub news_api_key: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Transcript Enhancer Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Enhancer API key (OpenAI-compatible). Read from CALLSHIELD_ENHANCER_API_KEY.
    #[serde(default)]
    pub enhancer_api_key: Option<String>,

    /// Enhancer API URL. Defaults to OpenAI. Read from CALLSHIELD_ENHANCER_API_URL.
    #[serde(default)]
    pub enhancer_api_url: Option<String>,

    /// Enhancer model name. Read from CALLSHIELD_ENHANCER_MODEL.
    #[serde(default)]
    pub enhancer_model: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // SMS Alert Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// SMS API endpoint. Read from CALLSHIELD_SMS_API_URL.
    #[serde(default)]
    pub sms_api_url: Option<String>,

    /// SMS API key. Read from CALLSHIELD_SMS_API_KEY.
    #[serde(default)]
    pub sms_api_key: Option<String>,

    /// Sender number (E.164). Read from CALLSHIELD_SMS_FROM.
    #[serde(default)]
    pub sms_from: Option<String>,

    /// Family contact recipient number (E.164). Read from CALLSHIELD_SMS_TO.
    #[serde(default)]
    pub sms_to: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CALLSHIELD"));
        if let Ok(path) = std::env::var("CALLSHIELD_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Numeric env values arrive as strings; parse them directly
        if let Ok(s) = std::env::var("CALLSHIELD_SCAM_THRESHOLD") {
            if let Ok(t) = s.parse::<f64>() {
                cfg.scam_threshold = Some(t);
            }
        }
        if let Ok(s) = std::env::var("CALLSHIELD_TRANSCRIBE_WINDOW_SECS") {
            if let Ok(n) = s.parse::<u32>() {
                cfg.transcribe_window_secs = Some(n);
            }
        }
        Ok(cfg)
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the webhook server bind address. Defaults to 0.0.0.0:8080.
    pub fn http_addr_or_default(&self) -> String {
        self.http_addr
            .clone()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
    }

    /// Returns the `is_scam` threshold. Defaults to 0.7.
    pub fn scam_threshold_or_default(&self) -> f64 {
        self.scam_threshold.unwrap_or(DEFAULT_SCAM_THRESHOLD)
    }

    /// Returns the initial transcription window in seconds. Defaults to 5.
    pub fn transcribe_window_or_default(&self) -> u32 {
        self.transcribe_window_secs
            .unwrap_or(DEFAULT_TRANSCRIBE_WINDOW_SECS)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Call Gateway Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn gateway_api_key(&self) -> Option<String> {
        self.gateway_api_key
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_GATEWAY_API_KEY").ok())
    }

    pub fn gateway_api_url(&self) -> Option<String> {
        self.gateway_api_url
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_GATEWAY_API_URL").ok())
    }

    /// Returns true if a real call-control platform is configured.
    pub fn is_gateway_configured(&self) -> bool {
        self.gateway_api_url().is_some() && self.gateway_api_key().is_some()
    }

    /// Family contact number for warm transfers. Demo default.
    pub fn contact_number_or_default(&self) -> String {
        self.contact_number
            .clone()
            .unwrap_or_else(|| "+1-555-0100".to_string())
    }

    /// Protected senior's number. Demo default.
    pub fn senior_number_or_default(&self) -> String {
        self.senior_number
            .clone()
            .unwrap_or_else(|| "+1-555-0199".to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // News Feed Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn feed_api_key(&self) -> Option<String> {
        self.feed_api_key
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_FEED_API_KEY").ok())
    }

    pub fn feed_api_url(&self) -> Option<String> {
        self.feed_api_url
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_FEED_API_URL").ok())
    }

    pub fn feed_dataset_id(&self) -> Option<String> {
        self.feed_dataset_id
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_FEED_DATASET_ID").ok())
    }

    pub fn feed_webhook_url(&self) -> Option<String> {
        self.feed_webhook_url
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_FEED_WEBHOOK_URL").ok())
    }

    /// Returns true if the dataset-trigger feed is configured.
    pub fn is_trigger_feed_configured(&self) -> bool {
        self.feed_api_url().is_some()
            && self.feed_api_key().is_some()
            && self.feed_dataset_id().is_some()
    }

    pub fn news_api_key(&self) -> Option<String> {
        self.news_api_key
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_NEWS_API_KEY").ok())
    }

    pub fn news_api_url(&self) -> Option<String> {
        self.news_api_url
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_NEWS_API_URL").ok())
    }

    /// Returns true if the news search API is configured.
    pub fn is_news_feed_configured(&self) -> bool {
        self.news_api_url().is_some() && self.news_api_key().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Enhancer Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enhancer_api_key(&self) -> Option<String> {
        self.enhancer_api_key
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_ENHANCER_API_KEY").ok())
    }

    /// Returns the enhancer API URL. Defaults to OpenAI chat completions.
    pub fn enhancer_api_url_or_default(&self) -> String {
        self.enhancer_api_url
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_ENHANCER_API_URL").ok())
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    /// Returns the enhancer model name. Defaults to "gpt-4o-mini".
    pub fn enhancer_model_or_default(&self) -> String {
        self.enhancer_model
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_ENHANCER_MODEL").ok())
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    /// Returns true if the remote enhancer is configured (API key present).
    pub fn is_enhancer_configured(&self) -> bool {
        self.enhancer_api_key().is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // SMS Alert Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sms_api_url(&self) -> Option<String> {
        self.sms_api_url
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_SMS_API_URL").ok())
    }

    pub fn sms_api_key(&self) -> Option<String> {
        self.sms_api_key
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_SMS_API_KEY").ok())
    }

    pub fn sms_from(&self) -> Option<String> {
        self.sms_from
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_SMS_FROM").ok())
    }

    pub fn sms_to(&self) -> Option<String> {
        self.sms_to
            .clone()
            .or_else(|| std::env::var("CALLSHIELD_SMS_TO").ok())
    }

    /// Returns true if SMS alerting is fully configured.
    pub fn is_sms_configured(&self) -> bool {
        self.sms_api_url().is_some()
            && self.sms_api_key().is_some()
            && self.sms_from().is_some()
            && self.sms_to().is_some()
    }
}
