//! Prompt construction for the classification request.

use noesis_core::PreAnalysis;

use crate::provider::Message;

/// System prompt describing the classes, metaphor levels and answer format.
pub const SYSTEM_PROMPT: &str = include_str!("../../../data/prompts/classifier-system.md");

/// User prompt template; the description replaces [`DESCRIPTION_PLACEHOLDER`].
pub const USER_TEMPLATE: &str = include_str!("../../../data/prompts/classifier-user.md");

pub const DESCRIPTION_PLACEHOLDER: &str = "<<<description>>>";

/// Render the user prompt. When pattern analysis found a meta-metaphor the
/// pattern-dominant theory is appended as a hint.
pub fn user_prompt(description: &str, pre: Option<&PreAnalysis>) -> String {
    let mut prompt = USER_TEMPLATE.replacen(DESCRIPTION_PLACEHOLDER, description, 1);
    if let Some(pre) = pre.filter(|p| p.meta_metaphor_present) {
        prompt.push_str(&format!(
            "\nHINT: meta-metaphors detected ({} pattern matches). Dominant theory by pattern analysis: {}.",
            pre.detected_metaphors, pre.dominant_theory
        ));
        for e in &pre.evidence_preview {
            prompt.push_str(&format!(
                "\n- {} {} {}: \"{}\"",
                e.theory,
                e.level.as_str(),
                e.ontological_type.as_str(),
                e.trigger_text
            ));
        }
        prompt.push('\n');
    }
    prompt
}

/// Full message list for one classification request.
pub fn build_messages(description: &str, pre: Option<&PreAnalysis>) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(user_prompt(description, pre)),
    ]
}
