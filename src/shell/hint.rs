//! Oracle hint service backed by the Gemini `generateContent` REST API.
//!
//! A single request/response wrapper: no retries, no cache. Every failure
//! (service disabled, missing API key, timeout, HTTP error, unparseable or
//! empty body) is turned into a fixed, player-displayable line so "no hint"
//! is always a valid outcome.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::HintConfig;
use crate::logutil::escape_log;
use crate::metrics;

pub const FALLBACK_DISABLED: &str = "ORACLE OFFLINE: the hint module is disabled.";
pub const FALLBACK_NO_KEY: &str = "ERROR: AI module disconnected. API key not found.";
pub const FALLBACK_WEAK_SIGNAL: &str = "The signal is weak... try again.";
pub const FALLBACK_CONNECTION: &str =
    "CONNECTION ERROR: could not establish a neural link with the Oracle.";

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Persona prompt sent to the model.
pub fn build_prompt(mission_title: &str, mission_context: &str, user_query: &str) -> String {
    format!(
        "You are \"The Oracle\", a mysterious helper AI in an alternate reality game about \
         programming.\n\
         The user is an \"Engineer\" trying to solve a challenge.\n\n\
         Mission: {}\n\
         Challenge context: {}\n\
         User question: {}\n\n\
         Instructions:\n\
         1. Answer with a mysterious cyberpunk persona.\n\
         2. Do NOT give the answer directly.\n\
         3. Give a conceptual or syntactic hint that helps the user think.\n\
         4. Be brief (two sentences at most).",
        mission_title, mission_context, user_query
    )
}

pub struct HintService {
    config: HintConfig,
    #[cfg(feature = "hint")]
    client: reqwest::Client,
}

impl HintService {
    pub fn new(config: HintConfig) -> Self {
        Self {
            config,
            #[cfg(feature = "hint")]
            client: reqwest::Client::new(),
        }
    }

    /// Check if the service can reach the model at all
    pub fn is_configured(&self) -> bool {
        self.config.enabled && self.config.resolved_api_key().is_some()
    }

    /// `<endpoint>/models/<model>:generateContent?key=<key>`
    pub fn build_api_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            urlencoding::encode(api_key)
        )
    }

    /// Ask the oracle for a hint. Never fails; see the module docs.
    pub async fn request_hint(
        &self,
        mission_title: &str,
        mission_context: &str,
        user_query: &str,
    ) -> String {
        if !self.config.enabled {
            debug!("Hint service is disabled");
            return FALLBACK_DISABLED.to_string();
        }
        let Some(api_key) = self.config.resolved_api_key() else {
            warn!("Hint API key not configured");
            metrics::inc_hints_failed();
            return FALLBACK_NO_KEY.to_string();
        };

        let prompt = build_prompt(mission_title, mission_context, user_query);
        debug!(
            "Requesting hint for '{}' (query '{}')",
            escape_log(mission_title),
            escape_log(user_query)
        );

        match self.fetch_from_api(&api_key, prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!("Hint response carried no text");
                metrics::inc_hints_failed();
                FALLBACK_WEAK_SIGNAL.to_string()
            }
            Err(e) => {
                warn!("Hint request failed: {}", e);
                metrics::inc_hints_failed();
                FALLBACK_CONNECTION.to_string()
            }
        }
    }

    #[cfg(feature = "hint")]
    async fn fetch_from_api(&self, api_key: &str, prompt: String) -> anyhow::Result<Option<String>> {
        use anyhow::anyhow;
        use std::time::Duration;
        use tokio::time::timeout;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        };
        let request = self.client.post(self.build_api_url(api_key)).json(&body);
        let timeout_duration = Duration::from_secs(self.config.timeout_seconds as u64);

        let response = timeout(timeout_duration, request.send())
            .await
            .map_err(|_| anyhow!("Request timeout after {}s", self.config.timeout_seconds))?
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("API returned status: {}", response.status()));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse JSON response: {}", e))?;

        Ok(parsed.text())
    }

    #[cfg(not(feature = "hint"))]
    async fn fetch_from_api(&self, _api_key: &str, _prompt: String) -> anyhow::Result<Option<String>> {
        Err(anyhow::anyhow!("built without the `hint` feature"))
    }
}
