//! Implements InputPort. Inquire-based interactive menu.

use crate::adapters::http::{self, AppState};
use crate::domain::{DomainError, ScreeningDecision};
use crate::ports::{CallGatewayPort, InputPort};
use crate::usecases::{IntelligenceService, ScreeningService};
use async_trait::async_trait;
use indicatif::ProgressBar;
use inquire::{Select, Text};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const MENU_INIT: &str = "Initialize knowledge pipeline";
const MENU_COLLECT: &str = "Collect latest scam intelligence";
const MENU_SIMULATE: &str = "Simulate incoming call";
const MENU_SERVER: &str = "Start webhook server";
const MENU_STATS: &str = "Show index statistics";
const MENU_QUIT: &str = "Quit";

/// TUI adapter. Inquire prompts over the screening services.
pub struct TuiInputPort {
    intel: Arc<IntelligenceService>,
    screening: Arc<ScreeningService>,
    gateway: Arc<dyn CallGatewayPort>,
    http_addr: SocketAddr,
}

impl TuiInputPort {
    pub fn new(
        intel: Arc<IntelligenceService>,
        screening: Arc<ScreeningService>,
        gateway: Arc<dyn CallGatewayPort>,
        http_addr: SocketAddr,
    ) -> Self {
        Self {
            intel,
            screening,
            gateway,
            http_addr,
        }
    }

    fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    async fn run_initialize(&self) -> Result<(), DomainError> {
        let pb = Self::spinner("Building pattern index from seed data...");
        let count = self.intel.initialize().await?;
        pb.finish_with_message(format!("Indexed {} scam patterns", count));
        Ok(())
    }

    async fn run_collect(&self) -> Result<(), DomainError> {
        let pb = Self::spinner("Collecting scam intelligence from feeds...");
        let stats = self.intel.refresh().await?;
        pb.finish_with_message(format!(
            "{} source(s), {} article(s), {} new pattern(s){}",
            stats.sources_collected,
            stats.articles,
            stats.new_patterns,
            if stats.triggered.is_empty() {
                String::new()
            } else {
                format!("; {} async trigger(s) pending", stats.triggered.len())
            }
        ));
        Ok(())
    }

    async fn run_simulation(&self) -> Result<(), DomainError> {
        let caller = Text::new("Caller number:")
            .with_default("+15550001234")
            .prompt()
            .map_err(|e| DomainError::Server(e.to_string()))?;

        let outcome = self.screening.handle_incoming_call(None, &caller).await?;

        println!("\nCall {} screened", outcome.call_id);
        println!(
            "  Risk score: {:.2} ({})",
            outcome.assessment.risk_score,
            if outcome.assessment.is_scam {
                "scam indicators present"
            } else {
                "no scam indicators"
            }
        );
        if !outcome.assessment.matches.is_empty() {
            let patterns: Vec<&str> = outcome
                .assessment
                .matches
                .iter()
                .map(|m| m.pattern.as_str())
                .collect();
            println!("  Matched: {}", patterns.join(", "));
        }
        println!("  Decision: {}", decision_line(&outcome.decision));
        if let Some(insights) = &outcome.insights {
            println!(
                "  Cues: {}",
                if insights.behavioral_cues.is_empty() {
                    "none".to_string()
                } else {
                    insights.behavioral_cues.join(", ")
                }
            );
        }
        Ok(())
    }

    async fn run_server(&self) -> Result<(), DomainError> {
        println!("Webhook endpoints:");
        println!("  POST /scam-alerts        (platform scam alerts)");
        println!("  POST /collector-results  (async feed results)");
        println!("  GET  /health             (health check)");
        println!("  GET  /calls/{{id}}         (call lookup)");
        http::serve(
            self.http_addr,
            AppState {
                screening: Arc::clone(&self.screening),
                intel: Arc::clone(&self.intel),
                gateway: Arc::clone(&self.gateway),
            },
        )
        .await
    }

    async fn run_stats(&self) -> Result<(), DomainError> {
        let stats = self.intel.stats().await;
        let pretty = serde_json::to_string_pretty(&stats)
            .map_err(|e| DomainError::Server(e.to_string()))?;
        println!("{}", pretty);
        Ok(())
    }
}

fn decision_line(decision: &ScreeningDecision) -> String {
    match decision {
        ScreeningDecision::Block { reason } => format!("BLOCK ({})", reason),
        ScreeningDecision::TransferContact => "WARM TRANSFER to family contact".to_string(),
        ScreeningDecision::TransferMonitored => "TRANSFER with monitoring".to_string(),
        ScreeningDecision::TransferNormal => "NORMAL TRANSFER".to_string(),
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let options = vec![
            MENU_INIT,
            MENU_COLLECT,
            MENU_SIMULATE,
            MENU_SERVER,
            MENU_STATS,
            MENU_QUIT,
        ];

        loop {
            // Esc / Ctrl+C at the prompt exits the loop
            let Ok(choice) = Select::new("Main menu", options.clone()).prompt() else {
                break;
            };

            let result = match choice {
                MENU_INIT => self.run_initialize().await,
                MENU_COLLECT => self.run_collect().await,
                MENU_SIMULATE => self.run_simulation().await,
                MENU_SERVER => self.run_server().await,
                MENU_STATS => self.run_stats().await,
                _ => break,
            };

            if let Err(e) = result {
                eprintln!("Error: {}", e);
            }
        }
        Ok(())
    }
}
