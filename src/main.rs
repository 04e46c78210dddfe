//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use callshield::adapters::enhancement::{HeuristicEnhancer, LlmEnhancer};
use callshield::adapters::intel::{NewsApiFeed, SimFeed, TriggerFeed};
use callshield::adapters::notify::SmsAdapter;
use callshield::adapters::persistence::{CallLog, PatternStore, SeedData, StateJson};
use callshield::adapters::telephony::{ApiCallGateway, SimCallGateway};
use callshield::adapters::ui::TuiInputPort;
use callshield::domain::PatternIndex;
use callshield::ports::{
    AlertPort, CallGatewayPort, CallLogPort, CollectionStatePort, EnhancerPort, InputPort,
    NewsFeedPort, PatternStorePort,
};
use callshield::usecases::{IntelligenceService, ReportService, ScreeningService};
use dotenv::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    callshield::adapters::ui::init_ui();

    let cfg = callshield::shared::config::AppConfig::load().unwrap_or_default();

    let data_dir = cfg.data_dir_or_default();
    let data_path = PathBuf::from(&data_dir);
    let data_dir_abs = data_path
        .canonicalize()
        .unwrap_or_else(|_| data_path.clone());
    info!(path = %data_dir_abs.display(), "data directory");
    tokio::fs::create_dir_all(&data_path).await?;

    let http_addr: SocketAddr = cfg
        .http_addr_or_default()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid CALLSHIELD_HTTP_ADDR: {}", e))?;

    // --- Persistence: pattern store, collection state, call log ---
    let store: Arc<dyn PatternStorePort> =
        Arc::new(PatternStore::new(data_path.join("patterns.json")));
    let state_impl = StateJson::new(data_path.join("collection_state.json"));
    state_impl
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let state: Arc<dyn CollectionStatePort> = Arc::new(state_impl);
    let call_log: Arc<dyn CallLogPort> = Arc::new(CallLog::new(data_path.join("calls")));

    // --- Pattern index: resume from the persisted store when present ---
    let persisted = store.load().await.map_err(|e| anyhow::anyhow!("{}", e))?;
    if !persisted.is_empty() {
        info!(count = persisted.len(), "resuming pattern index from store");
    }
    let index = Arc::new(RwLock::new(PatternIndex::from_patterns(persisted)));

    // --- Feeds: configured collectors, or the simulated feed ---
    let mut feeds: Vec<Arc<dyn NewsFeedPort>> = Vec::new();
    if cfg.is_trigger_feed_configured() {
        info!("trigger feed enabled (CALLSHIELD_FEED_API_URL)");
        feeds.push(Arc::new(TriggerFeed::new(
            cfg.feed_api_url().unwrap_or_default(),
            cfg.feed_api_key().unwrap_or_default(),
            cfg.feed_dataset_id().unwrap_or_default(),
            cfg.feed_webhook_url(),
        )));
    }
    if cfg.is_news_feed_configured() {
        info!("news search feed enabled (CALLSHIELD_NEWS_API_URL)");
        feeds.push(Arc::new(NewsApiFeed::new(
            cfg.news_api_url().unwrap_or_default(),
            cfg.news_api_key().unwrap_or_default(),
        )));
    }
    if feeds.is_empty() {
        warn!("no feed API keys set, using simulated feed");
        feeds.push(Arc::new(SimFeed::new()));
    }

    // --- Transcript enhancer: LLM when configured, heuristic otherwise ---
    let enhancer: Arc<dyn EnhancerPort> = if cfg.is_enhancer_configured() {
        info!(
            model = %cfg.enhancer_model_or_default(),
            url = %cfg.enhancer_api_url_or_default(),
            "transcript enhancement enabled with LLM adapter"
        );
        Arc::new(LlmEnhancer::new(
            cfg.enhancer_api_url_or_default(),
            cfg.enhancer_api_key().unwrap_or_default(),
            cfg.enhancer_model_or_default(),
        ))
    } else {
        warn!("CALLSHIELD_ENHANCER_API_KEY not set, using heuristic enhancer");
        Arc::new(HeuristicEnhancer::new())
    };

    // --- Call gateway: platform API when configured, simulated otherwise ---
    let gateway: Arc<dyn CallGatewayPort> = if cfg.is_gateway_configured() {
        info!("call platform enabled (CALLSHIELD_GATEWAY_API_URL)");
        Arc::new(ApiCallGateway::new(
            cfg.gateway_api_url().unwrap_or_default(),
            cfg.gateway_api_key().unwrap_or_default(),
            cfg.contact_number_or_default(),
            cfg.senior_number_or_default(),
        ))
    } else {
        warn!("CALLSHIELD_GATEWAY_API_KEY not set, using simulated call gateway");
        Arc::new(SimCallGateway::new(
            cfg.contact_number_or_default(),
            cfg.senior_number_or_default(),
        ))
    };

    // --- Alerts: SMS when fully configured ---
    let alerts: Option<Arc<dyn AlertPort>> = if cfg.is_sms_configured() {
        info!("SMS alerts enabled (CALLSHIELD_SMS_API_URL, _FROM, _TO)");
        Some(Arc::new(SmsAdapter::new(
            cfg.sms_api_url().unwrap_or_default(),
            cfg.sms_api_key().unwrap_or_default(),
            cfg.sms_from().unwrap_or_default(),
            cfg.sms_to().unwrap_or_default(),
        )))
    } else {
        warn!("SMS alerting not configured; alerts will be logged only");
        None
    };

    // --- Services ---
    let intel = Arc::new(IntelligenceService::new(
        feeds,
        store,
        state,
        Arc::clone(&index),
        SeedData::new(&data_path),
        data_path.clone(),
    ));

    let reports = Arc::new(ReportService::new(data_path.join("reports")));
    let screening = Arc::new(ScreeningService::new(
        Arc::clone(&gateway),
        enhancer,
        alerts,
        call_log,
        index,
        reports,
        cfg.scam_threshold_or_default(),
        cfg.transcribe_window_or_default(),
    ));

    // --- Run (main menu -> pipeline / collection / simulation / server) ---
    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(intel, screening, gateway, http_addr));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
