use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub llm: LlmConfig,
    pub ollama: OllamaConfig,
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `NOESIS_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("NOESIS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            llm: LlmConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            classifier: ClassifierConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  llm:         provider={}, model={}, configured={}",
            self.llm.provider,
            self.llm.model_for_provider(),
            self.llm.is_configured()
        );
        tracing::info!(
            "  llm retry:   max_retries={}, timeout={}s, backoff_base={}ms",
            self.llm.max_retries,
            self.llm.timeout_secs,
            self.llm.backoff_base_ms
        );
        tracing::info!("  ollama:      url={}, model={}", self.ollama.url, self.ollama.model);
        tracing::info!(
            "  classifier:  rules_dir={}, concurrency={}, delay={}ms",
            self.classifier
                .rules_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(embedded)".to_string()),
            self.classifier.concurrency,
            self.classifier.request_delay_ms
        );
    }
}

// ── LLM (OpenRouter / OpenAI / Anthropic) ────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openrouter", "openai", "anthropic", "ollama"
    pub provider: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub http_referer: String,
    pub x_title: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-attempt request timeout.
    pub timeout_secs: u64,
    /// Attempts per item before the judgment is treated as unavailable.
    pub max_retries: u32,
    /// Backoff before retry `n` is `backoff_base_ms * 2^n`.
    pub backoff_base_ms: u64,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "openrouter"),
            openrouter_api_key: profiled_env_opt(p, "OPENROUTER_API_KEY"),
            openrouter_model: profiled_env_or(p, "OPENROUTER_MODEL", "anthropic/claude-3.5-sonnet"),
            http_referer: profiled_env_or(p, "HTTP_REFERER", "http://localhost:3000"),
            x_title: profiled_env_or(p, "X_TITLE", "Consciousness Classifier"),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_model: profiled_env_or(p, "OPENAI_MODEL", "gpt-4o"),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            anthropic_api_key: profiled_env_opt(p, "ANTHROPIC_API_KEY"),
            anthropic_model: profiled_env_or(p, "ANTHROPIC_MODEL", "claude-sonnet-4-5-20250929"),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0.0")
                .parse()
                .unwrap_or(0.0),
            max_tokens: profiled_env_u32(p, "LLM_MAX_TOKENS", 3000),
            timeout_secs: profiled_env_u64(p, "LLM_TIMEOUT_SECS", 60),
            max_retries: profiled_env_u32(p, "LLM_MAX_RETRIES", 3),
            backoff_base_ms: profiled_env_u64(p, "LLM_BACKOFF_BASE_MS", 1000),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openrouter" => self.openrouter_api_key.is_some(),
            "openai" => self.openai_api_key.is_some(),
            "anthropic" | "claude" => self.anthropic_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }

    /// Model name for the active provider (ollama reports its own config).
    pub fn model_for_provider(&self) -> &str {
        match self.provider.as_str() {
            "openrouter" => &self.openrouter_model,
            "openai" => &self.openai_model,
            "anthropic" | "claude" => &self.anthropic_model,
            _ => "(provider default)",
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            model: profiled_env_or(p, "OLLAMA_MODEL", "llama3.2"),
        }
    }
}

// ── Classifier ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Directory with ontology / scoring-policy YAML. `None` = embedded defaults.
    pub rules_dir: Option<PathBuf>,
    /// Maximum in-flight LLM requests.
    pub concurrency: u32,
    /// Pause after each LLM request, in milliseconds.
    pub request_delay_ms: u64,
}

impl ClassifierConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            rules_dir: profiled_env_opt(p, "NOESIS_RULES_DIR").map(PathBuf::from),
            concurrency: profiled_env_u32(p, "NOESIS_CONCURRENCY", 1).max(1),
            request_delay_ms: profiled_env_u64(p, "NOESIS_REQUEST_DELAY_MS", 500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_configured_depends_on_provider_key() {
        let mut cfg = LlmConfig::from_env_profiled("NOESIS_TEST_UNUSED_PROFILE");
        cfg.provider = "ollama".into();
        assert!(cfg.is_configured());

        cfg.provider = "openrouter".into();
        cfg.openrouter_api_key = None;
        assert!(!cfg.is_configured());
        cfg.openrouter_api_key = Some("sk-or-test".into());
        assert!(cfg.is_configured());

        cfg.provider = "mystery".into();
        assert!(!cfg.is_configured());
    }

    #[test]
    fn model_for_provider_selects_active_model() {
        let mut cfg = LlmConfig::from_env_profiled("NOESIS_TEST_UNUSED_PROFILE");
        cfg.provider = "openai".into();
        cfg.openai_model = "gpt-test".into();
        assert_eq!(cfg.model_for_provider(), "gpt-test");
        cfg.provider = "claude".into();
        cfg.anthropic_model = "claude-test".into();
        assert_eq!(cfg.model_for_provider(), "claude-test");
    }

    #[test]
    fn profiled_lookup_prefers_prefixed_key() {
        env::set_var("NOESIS_CFG_TEST_KEY", "plain");
        env::set_var("STAGING_NOESIS_CFG_TEST_KEY", "staged");
        assert_eq!(profiled_env_opt("STAGING", "NOESIS_CFG_TEST_KEY").as_deref(), Some("staged"));
        assert_eq!(profiled_env_opt("OTHER", "NOESIS_CFG_TEST_KEY").as_deref(), Some("plain"));
        assert_eq!(profiled_env_opt("", "NOESIS_CFG_TEST_KEY").as_deref(), Some("plain"));
    }
}
