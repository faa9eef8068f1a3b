//! Retrying, time-bounded judgment requests.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use noesis_core::config::{LlmConfig, OllamaConfig};
use noesis_core::{ExternalJudgment, PreAnalysis};

use crate::judgment::{parse_judgment, JudgmentError};
use crate::prompts::build_messages;
use crate::provider::{LlmError, LlmProvider};
use crate::providers::create_provider;

/// Result of asking the model for one item.
#[derive(Debug)]
pub enum JudgmentOutcome {
    Judged(ExternalJudgment),
    /// The model answered but the answer was unusable.
    Malformed(JudgmentError),
    /// No answer after all attempts, or a non-retryable failure.
    Unavailable(LlmError),
}

impl JudgmentOutcome {
    /// The usable judgment, if any. Malformed and unavailable both map to `None`.
    pub fn judgment(&self) -> Option<ExternalJudgment> {
        match self {
            JudgmentOutcome::Judged(j) => Some(*j),
            JudgmentOutcome::Malformed(_) | JudgmentOutcome::Unavailable(_) => None,
        }
    }
}

/// Upper bound on a single backoff wait, however many attempts came before.
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per item (at least one is always made).
    pub max_attempts: u32,
    pub timeout: Duration,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            timeout: Duration::from_secs(config.timeout_secs),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        }
    }

    /// Wait before the attempt following `attempt` (0-based): `base * 2^attempt`,
    /// capped at [`MAX_BACKOFF`].
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(MAX_BACKOFF)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            timeout: Duration::from_secs(60),
            backoff_base: Duration::from_secs(1),
        }
    }
}

/// Asks an [`LlmProvider`] for a classification and turns the answer into an
/// [`ExternalJudgment`]. Cheap to clone; clones share the provider.
#[derive(Clone)]
pub struct JudgmentClient {
    provider: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
    retry: RetryPolicy,
}

impl JudgmentClient {
    pub fn new(provider: Arc<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
            retry: RetryPolicy::default(),
        }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(llm: &LlmConfig, ollama: &OllamaConfig) -> Result<Self, LlmError> {
        let provider: Arc<dyn LlmProvider> = Arc::from(create_provider(llm, ollama)?);
        Ok(Self::new(provider, llm.temperature, llm.max_tokens).with_retry(RetryPolicy::from_config(llm)))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    async fn attempt(&self, description: &str, pre: Option<&PreAnalysis>) -> Result<String, LlmError> {
        let messages = build_messages(description, pre);
        let call = self.provider.complete(messages, self.temperature, self.max_tokens);
        tokio::time::timeout(self.retry.timeout, call)
            .await
            .map_err(|_| LlmError::Timeout(self.retry.timeout.as_secs()))?
    }

    /// Ask for a judgment on one description. Never fails: problems come back
    /// as [`JudgmentOutcome::Malformed`] or [`JudgmentOutcome::Unavailable`].
    pub async fn judge(&self, description: &str, pre: Option<&PreAnalysis>) -> JudgmentOutcome {
        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match self.attempt(description, pre).await {
                Ok(response) => {
                    debug!(provider = self.provider.name(), chars = response.len(), "LLM response");
                    return match parse_judgment(&response) {
                        Ok(j) => JudgmentOutcome::Judged(j),
                        Err(e) => {
                            warn!(provider = self.provider.name(), error = %e, "malformed external judgment");
                            JudgmentOutcome::Malformed(e)
                        }
                    };
                }
                Err(e) if e.is_retryable() && attempt + 1 < attempts => {
                    let wait = self.retry.backoff(attempt);
                    warn!(
                        provider = self.provider.name(),
                        attempt = attempt + 1,
                        wait_ms = wait.as_millis() as u64,
                        error = %e,
                        "LLM request failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(provider = self.provider.name(), attempts = attempt + 1, error = %e, "external judgment unavailable");
                    return JudgmentOutcome::Unavailable(e);
                }
            }
        }
    }
}
