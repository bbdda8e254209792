//! # dealcalc-advisor: AI Deal Advisory for DealCalc
//!
//! Asks Google Gemini for a short "is this a good deal" verdict on a
//! computed pricing result.
//!
//! ## Failure Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Advisory Boundary                                  │
//! │                                                                         │
//! │  Caller                                                                 │
//! │    │  advisor.analyze(&input, &result).await → String (always)          │
//! │    ▼                                                                    │
//! │  DealAdvisor                                                            │
//! │    ├── no API key          → ADVICE_UNAVAILABLE                         │
//! │    ├── HTTP/service error  → ADVICE_UNREACHABLE                         │
//! │    ├── empty candidates    → ADVICE_EMPTY                               │
//! │    └── success             → model verdict text                         │
//! │                                                                         │
//! │  Failures never propagate to the caller as errors: the pricing          │
//! │  result already exists and stays usable either way. The internal        │
//! │  AdvisorError taxonomy exists for logging only.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never blocks on this call; callers invoke it after a result
//! is displayed and may drop or supersede it freely (last request wins).

use dealcalc_core::currency::format_amount;
use dealcalc_core::types::{DiscountType, PricingInput, PricingResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

// =============================================================================
// Fallback Messages
// =============================================================================

/// Shown when no API key is configured.
pub const ADVICE_UNAVAILABLE: &str = "AI Analysis unavailable: API Key not configured.";

/// Shown when the service cannot be reached or returns an error.
pub const ADVICE_UNREACHABLE: &str = "Unable to connect to deal analyzer.";

/// Shown when the service answers but produces no usable text.
pub const ADVICE_EMPTY: &str = "Could not analyze deal at this time.";

// =============================================================================
// Configuration
// =============================================================================

/// Advisory client configuration.
///
/// Loaded from environment variables with fallback to defaults.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Gemini API key. `None` disables the client (fallback text only).
    pub api_key: Option<String>,

    /// Model identifier.
    pub model: String,

    /// API endpoint prefix, up to `/models`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Cap on verdict length. The prompt asks for 2-3 sentences.
    pub max_output_tokens: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout: Duration::from_secs(30),
            max_output_tokens: 256,
        }
    }
}

impl AdvisorConfig {
    /// Loads configuration from environment variables.
    ///
    /// `GEMINI_API_KEY` is the canonical variable; `API_KEY` is accepted
    /// for compatibility with older deployments. A missing key is not an
    /// error - the client degrades to its fallback message.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.is_empty());

        AdvisorConfig {
            api_key,
            ..Default::default()
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

// =============================================================================
// Gemini Wire Types
// =============================================================================

/// Gemini API request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

// =============================================================================
// Errors (internal - mapped to fallback strings at the public boundary)
// =============================================================================

/// Advisory failures. Never escape [`DealAdvisor::analyze`]; used for
/// logging and for callers of the lower-level [`DealAdvisor::request_verdict`].
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No API key configured.
    #[error("API key not configured")]
    MissingApiKey,

    /// Transport-level failure (timeout, DNS, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// The response body could not be parsed.
    #[error("Invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The service answered with no usable verdict text.
    #[error("Empty response from service")]
    EmptyResponse,
}

// =============================================================================
// Advisor Client
// =============================================================================

/// Gemini-backed deal advisor.
#[derive(Debug, Clone)]
pub struct DealAdvisor {
    config: AdvisorConfig,
    client: Client,
}

impl DealAdvisor {
    /// Creates an advisor with the given configuration.
    pub fn new(config: AdvisorConfig) -> Self {
        // Builder only fails on TLS backend misconfiguration.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        DealAdvisor { config, client }
    }

    /// Creates an advisor configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(AdvisorConfig::from_env())
    }

    /// Requests a verdict, mapping every failure to a fixed user-readable
    /// fallback string. This is the boundary the rest of the system uses;
    /// it never errors.
    pub async fn analyze(&self, input: &PricingInput, result: &PricingResult) -> String {
        match self.request_verdict(input, result).await {
            Ok(text) => text,
            Err(AdvisorError::MissingApiKey) => {
                debug!("Advisory skipped: no API key configured");
                ADVICE_UNAVAILABLE.to_string()
            }
            Err(AdvisorError::EmptyResponse) => {
                warn!("Advisory service returned no verdict text");
                ADVICE_EMPTY.to_string()
            }
            Err(err) => {
                warn!(error = %err, "Advisory request failed");
                ADVICE_UNREACHABLE.to_string()
            }
        }
    }

    /// Requests a verdict, surfacing failures as [`AdvisorError`].
    pub async fn request_verdict(
        &self,
        input: &PricingInput,
        result: &PricingResult,
    ) -> Result<String, AdvisorError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AdvisorError::MissingApiKey)?;

        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: build_prompt(input, result),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            }),
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        );

        debug!(model = %self.config.model, "Sending advisory request");

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AdvisorError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(AdvisorError::EmptyResponse)?;

        Ok(text)
    }
}

// =============================================================================
// Prompt
// =============================================================================

/// Builds the verdict prompt from the deal parameters.
///
/// Pure function, kept separate from the client so its content is testable
/// without network access.
pub fn build_prompt(input: &PricingInput, result: &PricingResult) -> String {
    let discount_description = match input.discount_type {
        DiscountType::Percent => format!("{}% off", input.discount_value),
        DiscountType::Fixed => format!("{} flat off", input.discount_value),
    };

    let item = if input.item_name.trim().is_empty() {
        "an item".to_string()
    } else {
        input.item_name.trim().to_string()
    };

    format!(
        "Analyze this shopping deal for {item} and provide a short, witty, \
         and helpful verdict in 2-3 sentences.\n\
         \n\
         Original Price: {original}\n\
         Discount: {discount}\n\
         Additional Coupon: {coupon}%\n\
         Quantity: {quantity}\n\
         Final Total Cost (inc tax/shipping): {total}\n\
         Total Savings: {savings} ({rate:.1}%)\n\
         \n\
         Is this a good deal? Should the user buy it?\n\
         Don't mention you are an AI. Just give the advice.",
        item = item,
        original = format_amount(input.original_price, &input.currency),
        discount = discount_description,
        coupon = input.additional_coupon,
        quantity = input.quantity,
        total = format_amount(result.total_cost, &input.currency),
        savings = format_amount(result.total_saving, &input.currency),
        rate = result.effective_discount_rate,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dealcalc_core::compute;
    use dealcalc_core::types::CalculationMode;

    fn sample() -> (PricingInput, PricingResult) {
        let input = PricingInput {
            original_price: 100.0,
            discount_value: 20.0,
            item_name: "Wireless Headphones".to_string(),
            ..Default::default()
        };
        let result = compute(&input, CalculationMode::Price);
        (input, result)
    }

    #[test]
    fn test_prompt_contains_deal_facts() {
        let (input, result) = sample();
        let prompt = build_prompt(&input, &result);

        assert!(prompt.contains("Wireless Headphones"));
        assert!(prompt.contains("$100.00"));
        assert!(prompt.contains("20% off"));
        assert!(prompt.contains("$80.00"));
        assert!(prompt.contains("(20.0%)"));
        assert!(prompt.contains("Don't mention you are an AI"));
    }

    #[test]
    fn test_prompt_fixed_discount_wording() {
        let mut input = PricingInput {
            original_price: 50.0,
            discount_value: 15.0,
            discount_type: DiscountType::Fixed,
            currency: "EUR".to_string(),
            ..Default::default()
        };
        input.item_name = String::new();
        let result = compute(&input, CalculationMode::Price);

        let prompt = build_prompt(&input, &result);
        assert!(prompt.contains("15 flat off"));
        assert!(prompt.contains("an item"));
        assert!(prompt.contains("€35.00"));
    }

    #[test]
    fn test_config_defaults() {
        let config = AdvisorConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.base_url.starts_with("https://"));
    }

    #[test]
    fn test_config_builders() {
        let config = AdvisorConfig::default().api_key("test-key").model("gemini-x");
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.model, "gemini-x");
    }

    #[tokio::test]
    async fn test_analyze_without_key_returns_unavailable() {
        let advisor = DealAdvisor::new(AdvisorConfig::default());
        let (input, result) = sample();

        let advice = advisor.analyze(&input, &result).await;
        assert_eq!(advice, ADVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_request_verdict_without_key_errors() {
        let advisor = DealAdvisor::new(AdvisorConfig::default());
        let (input, result) = sample();

        let err = advisor.request_verdict(&input, &result).await.unwrap_err();
        assert!(matches!(err, AdvisorError::MissingApiKey));
    }

    #[test]
    fn test_response_parsing_shapes() {
        // Regular verdict
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Buy it."}]}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "Buy it.");

        // No candidates at all (safety-filtered responses look like this)
        let body = r#"{}"#;
        let parsed: GeminiResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
