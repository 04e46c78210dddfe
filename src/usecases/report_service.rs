//! Post-call reporting. Generates a Markdown summary per screened call.

use crate::domain::{CallRecord, DomainError, RiskAssessment, ScreeningDecision};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Service for family-facing call reports.
pub struct ReportService {
    reports_dir: PathBuf,
}

impl ReportService {
    pub fn new(reports_dir: PathBuf) -> Self {
        Self { reports_dir }
    }

    /// Generate a Markdown report for a screened call.
    ///
    /// Returns the path of the written report.
    pub async fn generate(
        &self,
        call: &CallRecord,
        assessment: &RiskAssessment,
        decision: &ScreeningDecision,
        summary: &str,
    ) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Repo(format!("Failed to create reports dir: {}", e)))?;

        let filename = format!("call_{}.md", call.call_id);
        let path = self.reports_dir.join(&filename);

        let screened_at = DateTime::<Utc>::from_timestamp(call.started_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let mut md = String::new();

        // Header
        md.push_str(&format!("# Call Screening Report: {}\n\n", call.call_id));
        md.push_str(&format!(
            "**Caller:** {} | **Screened:** {}\n\n",
            call.caller_number, screened_at
        ));
        md.push_str("---\n\n");

        // Risk
        md.push_str("## Risk Assessment\n\n");
        md.push_str(&format!(
            "- Risk score: **{:.2}** ({})\n",
            assessment.risk_score,
            if assessment.is_scam {
                "scam indicators present"
            } else {
                "no scam indicators"
            }
        ));
        md.push_str(&format!("- Decision: **{}**\n\n", decision_label(decision)));

        // Matched patterns
        if !assessment.matches.is_empty() {
            md.push_str("## Matched Patterns\n\n");
            for m in &assessment.matches {
                md.push_str(&format!(
                    "- \"{}\" ({}, {:.2})\n",
                    m.pattern,
                    m.scam_type.as_str(),
                    m.score
                ));
            }
            md.push('\n');
        }

        // Transcript preview
        if let Some(first) = call.transcripts.first() {
            md.push_str("## Transcript Preview\n\n");
            md.push_str(&format!(
                "> {}\n\n",
                first.text.chars().take(200).collect::<String>()
            ));
        }

        // Summary
        if !summary.is_empty() {
            md.push_str("## Summary\n\n");
            md.push_str(summary);
            md.push_str("\n\n");
        }

        md.push_str("---\n");
        md.push_str("*Generated by callshield*\n");

        fs::write(&path, md)
            .await
            .map_err(|e| DomainError::Repo(format!("Failed to write report: {}", e)))?;

        info!(path = %path.display(), "report generated");

        Ok(path)
    }
}

fn decision_label(decision: &ScreeningDecision) -> String {
    match decision {
        ScreeningDecision::Block { reason } => format!("Blocked ({})", reason),
        ScreeningDecision::TransferContact => "Warm transfer to family contact".to_string(),
        ScreeningDecision::TransferMonitored => "Transferred with monitoring".to_string(),
        ScreeningDecision::TransferNormal => "Transferred normally".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallStatus, Recommendation};

    #[tokio::test]
    async fn report_contains_risk_and_decision() {
        let dir = tempfile::tempdir().unwrap();
        let service = ReportService::new(dir.path().to_path_buf());

        let call = CallRecord {
            call_id: "call_42".to_string(),
            caller_number: "+15550007777".to_string(),
            started_at: 1_700_000_000,
            status: CallStatus::Blocked,
            transcripts: Vec::new(),
            reason: None,
        };
        let assessment = RiskAssessment {
            transcript: String::new(),
            risk_score: 0.95,
            is_scam: true,
            matches: Vec::new(),
            recommendation: Recommendation::BlockAndAlert,
        };
        let decision = ScreeningDecision::Block {
            reason: "impersonation".to_string(),
        };

        let path = service
            .generate(&call, &assessment, &decision, "summary text")
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("call_42"));
        assert!(content.contains("0.95"));
        assert!(content.contains("Blocked (impersonation)"));
        assert!(content.contains("summary text"));
    }
}
