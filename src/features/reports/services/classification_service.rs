use std::future::Future;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::config::VisionConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{ReportAnalysis, ReportKind, StreetAnalysis, WasteAnalysis};
use crate::shared::llm::{parse_with_fallback, LlmResponse};
use crate::shared::prompts::{render_street_prompt, render_waste_prompt};

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// Response body from the generateContent endpoint, reduced to the parts we
/// read
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn reply_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the generative vision model that classifies report images.
///
/// Every failure mode (timeout, network, malformed reply) is absorbed into
/// the kind's "unanalyzable" fallback payload; callers inspect the payload's
/// success flag instead of handling errors. One request per classification,
/// no retries.
pub struct ClassificationService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    request_timeout: Duration,
}

impl ClassificationService {
    pub fn new(config: VisionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url,
            request_timeout: config.request_timeout,
        }
    }

    /// Classify an image for the given report kind
    pub async fn classify(
        &self,
        kind: ReportKind,
        image: &[u8],
        mime_type: &str,
    ) -> ReportAnalysis {
        match kind {
            ReportKind::Waste => ReportAnalysis::Waste(self.analyze_waste(image, mime_type).await),
            ReportKind::Street => {
                ReportAnalysis::Street(self.analyze_street(image, mime_type).await)
            }
        }
    }

    pub async fn analyze_waste(&self, image: &[u8], mime_type: &str) -> WasteAnalysis {
        let prompt = match render_waste_prompt(&WasteAnalysis::json_schema_string()) {
            Ok(prompt) => prompt,
            Err(e) => return Self::waste_from_reply(Err(format!("Prompt error: {}", e))),
        };
        let reply = Self::reply_within(
            self.request_timeout,
            self.generate_content(prompt, image, mime_type),
        )
        .await;
        Self::waste_from_reply(reply)
    }

    pub async fn analyze_street(&self, image: &[u8], mime_type: &str) -> StreetAnalysis {
        let prompt = match render_street_prompt(&StreetAnalysis::json_schema_string()) {
            Ok(prompt) => prompt,
            Err(e) => return Self::street_from_reply(Err(format!("Prompt error: {}", e))),
        };
        let reply = Self::reply_within(
            self.request_timeout,
            self.generate_content(prompt, image, mime_type),
        )
        .await;
        Self::street_from_reply(reply)
    }

    /// Race one model request against the hard cutoff
    async fn reply_within<F>(timeout: Duration, request: F) -> std::result::Result<String, String>
    where
        F: Future<Output = Result<String>>,
    {
        match tokio::time::timeout(timeout, request).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                tracing::warn!("Vision request failed: {}", e);
                Err(e.to_string())
            }
            Err(_) => Err("Gemini request timeout".to_string()),
        }
    }

    fn waste_from_reply(reply: std::result::Result<String, String>) -> WasteAnalysis {
        match reply {
            Ok(text) => {
                let mut analysis: WasteAnalysis = parse_with_fallback(&text);
                if analysis.is_success() {
                    analysis.normalize();
                }
                analysis
            }
            Err(message) => {
                let mut fallback = WasteAnalysis::default();
                fallback.mark_as_fallback(message);
                fallback
            }
        }
    }

    fn street_from_reply(reply: std::result::Result<String, String>) -> StreetAnalysis {
        match reply {
            Ok(text) => {
                let mut analysis: StreetAnalysis = parse_with_fallback(&text);
                if analysis.is_success() {
                    analysis.normalize();
                }
                analysis
            }
            Err(message) => {
                let mut fallback = StreetAnalysis::default();
                fallback.mark_as_fallback(message);
                fallback
            }
        }
    }

    /// Issue one generateContent request and extract the textual reply
    async fn generate_content(
        &self,
        prompt: String,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: BASE64.encode(image),
                        },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Gemini returned status: {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse Gemini response: {}", e))
        })?;

        body.reply_text().ok_or_else(|| {
            AppError::ExternalServiceError("Gemini response contained no text".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WASTE_REPLY: &str = r#"{
        "category": "Plastic",
        "confidence": 95,
        "items": ["plastic bottle", "bottle cap"],
        "recyclable": true,
        "disposal_method": "Rinse and recycle.",
        "environmental_impact": "Takes centuries to decompose."
    }"#;

    #[test]
    fn test_fenced_reply_matches_bare_reply() {
        let bare = ClassificationService::waste_from_reply(Ok(WASTE_REPLY.to_string()));
        let fenced = ClassificationService::waste_from_reply(Ok(format!(
            "```json\n{}\n```",
            WASTE_REPLY
        )));
        assert_eq!(bare, fenced);
        assert!(bare.is_llm_success);
        assert_eq!(bare.category, "Plastic");
        assert_eq!(bare.confidence, 95);
    }

    #[test]
    fn test_missing_recyclable_defaults_to_false() {
        let analysis = ClassificationService::waste_from_reply(Ok(
            r#"{"category": "Glass", "confidence": 80}"#.to_string(),
        ));
        assert!(analysis.is_llm_success);
        assert!(!analysis.recyclable);
        assert_eq!(analysis.category, "Glass");
    }

    #[test]
    fn test_omitted_guidance_gets_success_defaults() {
        let analysis = ClassificationService::waste_from_reply(Ok(
            r#"{"category": "Organic", "confidence": 70, "items": ["banana peel"], "recyclable": false}"#
                .to_string(),
        ));
        assert!(analysis.is_llm_success);
        assert_eq!(
            analysis.disposal_method,
            "Please consult local waste management guidelines."
        );
        assert_eq!(
            analysis.environmental_impact,
            "Improper disposal can harm the environment."
        );
    }

    #[test]
    fn test_confidence_is_clamped() {
        let high = ClassificationService::waste_from_reply(Ok(
            r#"{"category": "Metal", "confidence": 250}"#.to_string(),
        ));
        assert_eq!(high.confidence, 100);

        let low = ClassificationService::waste_from_reply(Ok(
            r#"{"category": "Metal", "confidence": -5}"#.to_string(),
        ));
        assert_eq!(low.confidence, 0);
    }

    #[test]
    fn test_unparseable_waste_reply_yields_unanalyzable_payload() {
        let analysis = ClassificationService::waste_from_reply(Ok(
            "I'm sorry, I cannot see an image.".to_string(),
        ));
        assert!(!analysis.is_llm_success);
        assert!(analysis.llm_error_message.is_some());
        assert_eq!(analysis.category, "Unknown");
        assert_eq!(analysis.confidence, 0);
        assert_eq!(
            analysis.disposal_method,
            "Unable to analyze. Please check local waste guidelines."
        );
        assert_eq!(
            analysis.environmental_impact,
            "Unable to determine environmental impact."
        );
    }

    #[test]
    fn test_request_failure_carries_its_message() {
        let analysis =
            ClassificationService::waste_from_reply(Err("Gemini request timeout".to_string()));
        assert!(!analysis.is_llm_success);
        assert_eq!(
            analysis.llm_error_message.as_deref(),
            Some("Gemini request timeout")
        );
    }

    #[test]
    fn test_street_reply_accepts_camel_case_score() {
        let analysis = ClassificationService::street_from_reply(Ok(
            r#"{"cleanlinessScore": 65, "status": "moderate", "litter_count": 3}"#.to_string(),
        ));
        assert!(analysis.is_llm_success);
        assert_eq!(analysis.cleanliness_score, 65);
        assert_eq!(analysis.status, "moderate");
    }

    #[test]
    fn test_street_severity_falls_back_to_status() {
        let analysis = ClassificationService::street_from_reply(Ok(
            r#"{"cleanliness_score": 30, "status": "dirty"}"#.to_string(),
        ));
        assert_eq!(analysis.severity, "dirty");

        let blank = ClassificationService::street_from_reply(Ok(
            r#"{"cleanliness_score": 30}"#.to_string(),
        ));
        assert_eq!(blank.status, "unknown");
        assert_eq!(blank.severity, "unknown");
    }

    #[test]
    fn test_unparseable_street_reply_yields_unanalyzable_payload() {
        let analysis =
            ClassificationService::street_from_reply(Ok("no json here".to_string()));
        assert!(!analysis.is_llm_success);
        assert_eq!(analysis.cleanliness_score, 0);
        assert_eq!(analysis.status, "unknown");
        assert_eq!(analysis.issues, vec!["Unable to analyze image".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_request_resolves_to_timeout_failure() {
        let request = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("{}".to_string())
        };
        let reply = ClassificationService::reply_within(Duration::from_secs(20), request).await;
        assert_eq!(reply, Err("Gemini request timeout".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_fallback() {
        let service = ClassificationService::new(VisionConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Duration::from_secs(20),
        });
        let analysis = service
            .classify(ReportKind::Waste, b"not really an image", "image/jpeg")
            .await;
        match analysis {
            ReportAnalysis::Waste(waste) => {
                assert!(!waste.is_llm_success);
                assert_eq!(waste.category, "Unknown");
            }
            ReportAnalysis::Street(_) => panic!("expected a waste payload"),
        }
    }
}
