//! External LLM judgment: providers, prompts, answer parsing and retries.

pub mod client;
pub mod judgment;
pub mod prompts;
pub mod provider;
pub mod providers;

pub use client::{JudgmentClient, JudgmentOutcome, RetryPolicy};
pub use judgment::{parse_judgment, JudgmentError};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
