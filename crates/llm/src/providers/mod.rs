pub mod claude;
pub mod ollama;
pub mod openai;

use noesis_core::config::{LlmConfig, OllamaConfig};

use crate::provider::{LlmError, LlmProvider};

/// Create the appropriate LLM provider based on config.
pub fn create_provider(
    llm_config: &LlmConfig,
    ollama_config: &OllamaConfig,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    match llm_config.provider.as_str() {
        "openrouter" => {
            let api_key = llm_config
                .openrouter_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("OPENROUTER_API_KEY not set".into()))?;
            Ok(Box::new(openai::OpenAiProvider::openrouter(
                api_key.clone(),
                llm_config.openrouter_model.clone(),
                llm_config.http_referer.clone(),
                llm_config.x_title.clone(),
            )))
        }
        "openai" => {
            let api_key = llm_config
                .openai_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            let base_url = llm_config
                .openai_base_url
                .as_deref()
                .unwrap_or(openai::OPENAI_BASE_URL);
            Ok(Box::new(openai::OpenAiProvider::new(
                api_key.clone(),
                llm_config.openai_model.clone(),
                base_url.to_string(),
            )))
        }
        "anthropic" | "claude" => {
            let api_key = llm_config
                .anthropic_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("ANTHROPIC_API_KEY not set".into()))?;
            Ok(Box::new(claude::ClaudeProvider::new(
                api_key.clone(),
                llm_config.anthropic_model.clone(),
            )))
        }
        "ollama" => Ok(Box::new(ollama::OllamaProvider::new(
            ollama_config.url.clone(),
            ollama_config.model.clone(),
        ))),
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noesis_core::Config;

    fn config(provider: &str) -> Config {
        let mut c = Config::for_profile("NOESIS_TEST_UNUSED_PROFILE");
        c.llm.provider = provider.into();
        c.llm.openrouter_api_key = None;
        c.llm.openai_api_key = None;
        c.llm.anthropic_api_key = None;
        c
    }

    #[test]
    fn missing_key_is_not_configured() {
        for provider in ["openrouter", "openai", "anthropic"] {
            let c = config(provider);
            let err = create_provider(&c.llm, &c.ollama).err().unwrap();
            assert!(matches!(err, LlmError::NotConfigured(_)), "{provider}");
        }
    }

    #[test]
    fn builds_each_known_provider() {
        let mut c = config("openrouter");
        c.llm.openrouter_api_key = Some("k".into());
        assert_eq!(create_provider(&c.llm, &c.ollama).unwrap().name(), "openrouter");

        c.llm.provider = "claude".into();
        c.llm.anthropic_api_key = Some("k".into());
        assert_eq!(create_provider(&c.llm, &c.ollama).unwrap().name(), "anthropic");

        c.llm.provider = "ollama".into();
        assert_eq!(create_provider(&c.llm, &c.ollama).unwrap().name(), "ollama");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let c = config("gpt-magic");
        let err = create_provider(&c.llm, &c.ollama).err().unwrap();
        assert!(err.to_string().contains("gpt-magic"));
    }
}
