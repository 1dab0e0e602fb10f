use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{strip_code_fences, GenerationOutcome, Generator};
use crate::wire::{GenerateRequest, GenerateResponse};

/// Client for a Gemini-style `generateContent` endpoint. Stateless across
/// invocations; the credential travels as a query parameter.
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Self {
        Self { endpoint, api_key, timeout }
    }

    async fn call(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            bail!("GEMINI_API_KEY is not set");
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("failed to build http client")?;

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let body = GenerateRequest::from_prompt(prompt);

        let resp = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("generation request failed")?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("failed to read generation response body")?;

        if !status.is_success() {
            bail!("generation service error ({status}): {}", truncate(&text, 400));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("generation response parse error: {e}"))?;

        let generated = parsed
            .first_text()
            .ok_or_else(|| anyhow!("invalid response from generation service"))?;

        let code = strip_code_fences(generated);
        if code.trim().is_empty() {
            bail!("generation service returned empty content");
        }
        Ok(code)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> GenerationOutcome {
        match self.call(prompt).await {
            Ok(code) => GenerationOutcome::Success { code },
            Err(e) => GenerationOutcome::Failure { reason: format!("{e:#}") },
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_a_failure_not_a_panic() {
        let client = GeminiClient::new(
            "https://example.invalid/generate".to_string(),
            String::new(),
            Duration::from_secs(1),
        );
        match client.generate("prompt").await {
            GenerationOutcome::Failure { reason } => {
                assert!(reason.contains("GEMINI_API_KEY"));
            }
            GenerationOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_failure() {
        // Reserved TLD, resolution fails fast without touching a real service.
        let client = GeminiClient::new(
            "https://sdkgen-test.invalid/generate".to_string(),
            "test-key".to_string(),
            Duration::from_secs(2),
        );
        match client.generate("prompt").await {
            GenerationOutcome::Failure { reason } => {
                assert!(reason.contains("generation request failed"));
            }
            GenerationOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
