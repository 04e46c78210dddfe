//! OpenAI-compatible adapter for transcript enhancement.
//!
//! Works against OpenAI, Azure, or a local Ollama endpoint. Implements
//! `EnhancerPort` with robust JSON parsing and markdown stripping.

use crate::adapters::enhancement::context::segments_to_csv;
use crate::domain::{
    CallRecord, DomainError, RiskAssessment, Sentiment, TranscriptInsights,
};
use crate::ports::EnhancerPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// OpenAI-compatible transcript enhancer.
pub struct LlmEnhancer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmEnhancer {
    /// Create a new enhancer.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// System prompt with the JSON schema for transcript insights.
    fn system_prompt() -> &'static str {
        r#"You analyze phone-call transcripts screened on behalf of an elderly person.

## Your Task
1. Extract the suspicious keywords the caller used (nouns/phrases, not stopwords).
2. Judge the overall sentiment of the caller's speech.
3. List behavioral cues: pressure tactics, fear, urgency, authority claims,
   secrecy demands, emotional manipulation.

## Output Format
You MUST respond with valid JSON only. No markdown, no explanations outside JSON.

```json
{
  "keywords": ["keyword1", "keyword2"],
  "sentiment": "negative|neutral|positive",
  "behavioral_cues": ["fear", "urgency"]
}
```

If the transcript is benign, return empty arrays and "neutral".
Keep lists short and factual."#
    }

    fn user_prompt(transcript: &str) -> String {
        format!(
            "Analyze the following initial call segment.\n\n{}",
            transcript
        )
    }

    fn summary_prompt(context_csv: &str, assessment: &RiskAssessment) -> String {
        format!(
            "Write a short plain-text summary of this screened call for a family \
             member. Risk score {:.2} ({}). Transcript segments follow as CSV \
             (Time;Speaker;Text).\n\n{}",
            assessment.risk_score,
            if assessment.is_scam { "scam" } else { "no scam detected" },
            context_csv
        )
    }

    /// Sanitize JSON response from the LLM.
    ///
    /// LLMs sometimes wrap JSON in markdown code blocks. This strips them.
    fn sanitize_json(raw_text: &str) -> String {
        let trimmed = raw_text.trim();

        // Handle markdown code blocks: ```json ... ``` or ``` ... ```
        if trimmed.starts_with("```") {
            let without_prefix = if trimmed.starts_with("```json") {
                trimmed.strip_prefix("```json").unwrap_or(trimmed)
            } else {
                trimmed.strip_prefix("```").unwrap_or(trimmed)
            };

            if let Some(end_idx) = without_prefix.rfind("```") {
                return without_prefix[..end_idx].trim().to_string();
            }
            return without_prefix.trim().to_string();
        }

        // Handle cases where JSON might be wrapped in other markdown
        if let Some(start) = trimmed.find('{') {
            if let Some(end) = trimmed.rfind('}') {
                if start < end {
                    return trimmed[start..=end].to_string();
                }
            }
        }

        trimmed.to_string()
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::Enhancer(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "enhancer API returned error");
            return Err(DomainError::Enhancer(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Enhancer(format!("Failed to parse API response: {}", e)))?;

        chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DomainError::Enhancer("No response choices returned".to_string()))
    }
}

/// Chat-completions request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Parsed LLM response (matches our JSON schema).
#[derive(Deserialize)]
struct LlmInsights {
    keywords: Vec<String>,
    sentiment: String,
    behavioral_cues: Vec<String>,
}

fn parse_sentiment(raw: &str) -> Sentiment {
    match raw.to_lowercase().as_str() {
        "negative" => Sentiment::Negative,
        "positive" => Sentiment::Positive,
        _ => Sentiment::Neutral,
    }
}

#[async_trait::async_trait]
impl EnhancerPort for LlmEnhancer {
    async fn enhance(&self, transcript: &str) -> Result<TranscriptInsights, DomainError> {
        info!(
            transcript_len = transcript.len(),
            "sending transcript to enhancer"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::user_prompt(transcript),
                },
            ],
            temperature: 0.3,
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let raw_content = self.chat(&request).await?;
        debug!(raw_len = raw_content.len(), "received enhancer response");

        let clean_json = Self::sanitize_json(&raw_content);
        let insights: LlmInsights = serde_json::from_str(&clean_json).map_err(|e| {
            warn!(error = %e, json = %clean_json.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Enhancer(format!("Failed to parse LLM JSON: {}", e))
        })?;

        info!(
            keywords = insights.keywords.len(),
            cues = insights.behavioral_cues.len(),
            "transcript enhancement complete"
        );

        Ok(TranscriptInsights {
            keywords: insights.keywords,
            sentiment: parse_sentiment(&insights.sentiment),
            behavioral_cues: insights.behavioral_cues,
        })
    }

    async fn summarize(
        &self,
        call: &CallRecord,
        assessment: &RiskAssessment,
    ) -> Result<String, DomainError> {
        let context_csv = segments_to_csv(&call.transcripts)
            .map_err(|e| DomainError::Enhancer(format!("Failed to generate CSV: {}", e)))?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::summary_prompt(&context_csv, assessment),
            }],
            temperature: 0.3,
            response_format: None, // Plain text, no JSON
        };

        let summary = self.chat(&request).await?.trim().to_string();
        info!(summary_len = summary.len(), "call summary complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_json_clean() {
        let input = r#"{"keywords": []}"#;
        assert_eq!(LlmEnhancer::sanitize_json(input), input);
    }

    #[test]
    fn test_sanitize_json_markdown() {
        let input = r#"```json
{"keywords": []}
```"#;
        assert_eq!(LlmEnhancer::sanitize_json(input), r#"{"keywords": []}"#);
    }

    #[test]
    fn test_sanitize_json_markdown_no_lang() {
        let input = r#"```
{"keywords": []}
```"#;
        assert_eq!(LlmEnhancer::sanitize_json(input), r#"{"keywords": []}"#);
    }

    #[test]
    fn test_sanitize_json_with_text() {
        let input = r#"Here is the analysis:
{"keywords": [], "sentiment": "neutral"}"#;
        assert_eq!(
            LlmEnhancer::sanitize_json(input),
            r#"{"keywords": [], "sentiment": "neutral"}"#
        );
    }

    #[test]
    fn test_parse_sentiment_defaults_to_neutral() {
        assert_eq!(parse_sentiment("NEGATIVE"), Sentiment::Negative);
        assert_eq!(parse_sentiment("positive"), Sentiment::Positive);
        assert_eq!(parse_sentiment("confused"), Sentiment::Neutral);
    }
}
