use std::path::PathBuf;
use std::time::Duration;

use noesis_core::Config;

use crate::cli::ClassifyArgs;

/// Settings for one `classify` run.
/// Priority: command-line flag > environment (`Config`) > built-in default.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub rules_dir: Option<PathBuf>,
    pub use_llm: bool,
    pub concurrency: usize,
    pub request_delay: Duration,
}

impl RunSettings {
    pub fn resolve(config: &Config, rules_dir: Option<PathBuf>, args: &ClassifyArgs) -> Self {
        Self {
            rules_dir: rules_dir.or_else(|| config.classifier.rules_dir.clone()),
            use_llm: !args.no_llm,
            concurrency: args.concurrency.unwrap_or(config.classifier.concurrency).max(1) as usize,
            request_delay: Duration::from_millis(
                args.delay_ms.unwrap_or(config.classifier.request_delay_ms),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(concurrency: Option<u32>, delay_ms: Option<u64>, no_llm: bool) -> ClassifyArgs {
        ClassifyArgs {
            input: PathBuf::from("items.json"),
            output_dir: None,
            no_llm,
            concurrency,
            delay_ms,
        }
    }

    fn config() -> Config {
        let mut c = Config::for_profile("NOESIS_TEST_UNUSED_PROFILE");
        c.classifier.rules_dir = Some(PathBuf::from("env-rules"));
        c.classifier.concurrency = 2;
        c.classifier.request_delay_ms = 250;
        c
    }

    #[test]
    fn test_env_values_used_without_flags() {
        let s = RunSettings::resolve(&config(), None, &args(None, None, false));
        assert_eq!(s.rules_dir, Some(PathBuf::from("env-rules")));
        assert_eq!(s.concurrency, 2);
        assert_eq!(s.request_delay, Duration::from_millis(250));
        assert!(s.use_llm);
    }

    #[test]
    fn test_flags_override_env() {
        let s = RunSettings::resolve(
            &config(),
            Some(PathBuf::from("flag-rules")),
            &args(Some(8), Some(0), true),
        );
        assert_eq!(s.rules_dir, Some(PathBuf::from("flag-rules")));
        assert_eq!(s.concurrency, 8);
        assert_eq!(s.request_delay, Duration::ZERO);
        assert!(!s.use_llm);
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let s = RunSettings::resolve(&config(), None, &args(Some(0), None, false));
        assert_eq!(s.concurrency, 1);
    }
}
