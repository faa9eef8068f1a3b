//! The compiled rule set consumed by the classifier.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::loader::{LoadResult, LoadStatus, Result, RuleError, RuleLoader};
use crate::ontology::{PatternOntology, PatternOntologyRule};
use crate::policy::{ScoringPolicy, ScoringPolicyRule};
use crate::schema::{RuleDocument, RuleKind};
use crate::validation;

/// Shipped ontology, embedded in the binary.
pub const EMBEDDED_ONTOLOGY: &str =
    include_str!("../../../data/rules/ontology/pattern-ontology.yml");

/// Shipped scoring policy, embedded in the binary.
pub const EMBEDDED_POLICY: &str = include_str!("../../../data/rules/scoring/scoring-policy.yml");

/// Validated ontology and policy, shared read-only across threads.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub ontology: Arc<PatternOntology>,
    pub policy: Arc<ScoringPolicy>,
    /// ID of the policy document in use.
    pub policy_id: String,
}

impl RuleSet {
    /// Compile the embedded default documents.
    pub fn embedded() -> Result<Self> {
        let ontology: PatternOntologyRule = serde_yaml::from_str(EMBEDDED_ONTOLOGY)?;
        let policy: ScoringPolicyRule = serde_yaml::from_str(EMBEDDED_POLICY)?;
        Self::from_rules(&ontology, &policy)
    }

    /// Load a rules directory on top of the embedded defaults.
    ///
    /// The directory may hold at most one enabled document of each kind.
    /// Documents may `extends` the embedded defaults by ID. A kind missing
    /// from the directory falls back to its embedded default. Any file that
    /// fails to parse makes the whole load fail.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut loader = RuleLoader::new(dir.to_path_buf())
            .with_parent(EMBEDDED_ONTOLOGY)?
            .with_parent(EMBEDDED_POLICY)?;
        let results = loader.load_all()?;
        fail_on_errors(&results)?;

        let ontology = match single(&loader, RuleKind::PatternOntology)? {
            Some(doc) => doc.as_ontology().cloned(),
            None => None,
        };
        let ontology = match ontology {
            Some(rule) => rule,
            None => serde_yaml::from_str(EMBEDDED_ONTOLOGY)?,
        };

        let policy = match single(&loader, RuleKind::ScoringPolicy)? {
            Some(doc) => doc.as_policy().cloned(),
            None => None,
        };
        let policy = match policy {
            Some(rule) => rule,
            None => serde_yaml::from_str(EMBEDDED_POLICY)?,
        };

        Self::from_rules(&ontology, &policy)
    }

    /// Embedded defaults, or `dir` when given.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Self::embedded(),
        }
    }

    /// Validate and compile a pair of parsed documents.
    pub fn from_rules(ontology: &PatternOntologyRule, policy: &ScoringPolicyRule) -> Result<Self> {
        let compiled_ontology = ontology.compile()?;

        let report = validation::validate_policy(policy);
        if !report.valid {
            return Err(RuleError::defect(&policy.metadata.id, &report));
        }

        info!(
            ontology = %compiled_ontology.id(),
            version = compiled_ontology.version().unwrap_or("-"),
            patterns = compiled_ontology.pattern_count(),
            policy = %policy.metadata.id,
            "rule set ready"
        );

        Ok(Self {
            ontology: Arc::new(compiled_ontology),
            policy: Arc::new(policy.compile()),
            policy_id: policy.metadata.id.clone(),
        })
    }
}

fn fail_on_errors(results: &[LoadResult]) -> Result<()> {
    let errors: Vec<String> = results
        .iter()
        .filter_map(|r| match &r.status {
            LoadStatus::Failed { error } => Some(format!("{}: {}", r.path.display(), error)),
            _ => None,
        })
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(RuleError::ConfigurationDefect {
            rule_id: "rules directory".to_string(),
            errors,
        })
    }
}

fn single(loader: &RuleLoader, kind: RuleKind) -> Result<Option<&RuleDocument>> {
    let docs = loader.documents_of_kind(kind);
    match docs.len() {
        0 => Ok(None),
        1 => Ok(docs.into_iter().next()),
        _ => Err(RuleError::Ambiguous {
            kind,
            ids: docs.iter().map(|d| d.metadata().id.clone()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noesis_core::Theory;

    #[test]
    fn embedded_rules_compile() {
        let rules = RuleSet::embedded().unwrap();
        assert_eq!(rules.ontology.id(), "pattern-ontology-default");
        assert_eq!(rules.policy_id, "scoring-policy-default");
        assert_eq!(*rules.policy, ScoringPolicy::default());
        assert!(!rules.ontology.lookup(Theory::Emerg).is_empty());
    }

    #[test]
    fn resolve_none_is_embedded() {
        let rules = RuleSet::resolve(None).unwrap();
        assert_eq!(rules.policy_id, "scoring-policy-default");
    }

    #[test]
    fn rule_set_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
