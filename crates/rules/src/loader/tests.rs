//! Tests for the rule loader module.

use std::collections::HashMap;
use std::fs;

use tempfile::TempDir;

use super::*;
use crate::schema::RuleKind;

const POLICY_YAML: &str = r#"
apiVersion: v1
kind: ScoringPolicy
metadata:
  id: test-policy
  name: Test Policy
  enabled: true
spec:
  meta_window_tokens: 8
"#;

const DEFAULT_POLICY: &str = include_str!("../../../../data/rules/scoring/scoring-policy.yml");

fn temp_loader() -> (TempDir, RuleLoader) {
    let dir = TempDir::new().expect("create tempdir");
    let loader = RuleLoader::new(dir.path().to_path_buf());
    (dir, loader)
}

fn loaded_ids(results: &[LoadResult]) -> Vec<&str> {
    results
        .iter()
        .filter_map(|r| match &r.status {
            LoadStatus::Loaded { rule_id } => Some(rule_id.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn load_policy_from_file() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("test-policy.yml");
    fs::write(&path, POLICY_YAML).unwrap();

    let doc = loader.load_file(&path).unwrap();
    assert_eq!(doc.metadata().id, "test-policy");
    assert_eq!(doc.kind(), RuleKind::ScoringPolicy);
    assert_eq!(doc.as_policy().unwrap().spec.meta_window_tokens, 8);
}

#[test]
fn load_all_skips_dotfiles_and_non_yaml() {
    let (dir, mut loader) = temp_loader();

    fs::write(dir.path().join("policy.yml"), POLICY_YAML).unwrap();
    fs::write(dir.path().join(".hidden.yml"), POLICY_YAML).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a rule").unwrap();

    let results = loader.load_all().unwrap();

    let skipped = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Skipped { .. }))
        .count();
    assert_eq!(loaded_ids(&results), vec!["test-policy"]);
    assert_eq!(skipped, 2);
    assert!(loader.documents().contains_key("test-policy"));
}

#[test]
fn load_all_recursive_subdirectories() {
    let (dir, mut loader) = temp_loader();

    let sub = dir.path().join("ontology");
    fs::create_dir(&sub).unwrap();
    fs::write(
        sub.join("ontology.yml"),
        include_str!("../../../../data/rules/ontology/pattern-ontology.yml"),
    )
    .unwrap();
    fs::write(dir.path().join("policy.yml"), POLICY_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_ids(&results).len(), 2);
    assert_eq!(loader.documents_of_kind(RuleKind::PatternOntology).len(), 1);
    assert_eq!(loader.documents_of_kind(RuleKind::ScoringPolicy).len(), 1);
}

#[test]
fn disabled_documents_are_skipped() {
    let (dir, mut loader) = temp_loader();
    fs::write(
        dir.path().join("policy.yml"),
        POLICY_YAML.replace("enabled: true", "enabled: false"),
    )
    .unwrap();

    let results = loader.load_all().unwrap();
    assert!(loaded_ids(&results).is_empty());
    assert!(matches!(
        &results[0].status,
        LoadStatus::Skipped { reason } if reason == "disabled"
    ));
}

#[test]
fn duplicate_ids_fail_second_file() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("a.yml"), POLICY_YAML).unwrap();
    fs::write(dir.path().join("b.yml"), POLICY_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_ids(&results), vec!["test-policy"]);
    let failed: Vec<_> = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Failed { .. }))
        .collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].path.ends_with("b.yml"));
}

#[test]
fn extends_registered_parent() {
    let (dir, loader) = temp_loader();
    let mut loader = loader.with_parent(DEFAULT_POLICY).unwrap();
    fs::write(
        dir.path().join("narrow.yml"),
        r#"
apiVersion: v1
kind: ScoringPolicy
metadata:
  id: narrow-band
  name: Narrow Band
  extends: scoring-policy-default
spec:
  hybrid_band: 0.05
  level_multipliers:
    meta_metaphor: 2.0
"#,
    )
    .unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_ids(&results), vec!["narrow-band"]);

    let doc = &loader.documents()["narrow-band"];
    let policy = doc.as_policy().unwrap().compile();
    assert_eq!(policy.hybrid_band, 0.05);
    assert_eq!(policy.level_multipliers.meta_metaphor, 2.0);
    assert_eq!(policy.level_multipliers.nested_metaphor, 1.3);
    assert_eq!(policy.meta_window_tokens, 12);
    assert_eq!(doc.metadata().name, "Narrow Band");
    // The parent is only a base; it is not loaded as a document itself.
    assert!(!loader.documents().contains_key("scoring-policy-default"));
}

#[test]
fn broken_extends_chain_fails_load() {
    let (dir, mut loader) = temp_loader();
    fs::write(
        dir.path().join("orphan.yml"),
        POLICY_YAML.replace("  enabled: true", "  extends: nowhere"),
    )
    .unwrap();

    let err = loader.load_all().unwrap_err();
    assert!(matches!(
        err,
        RuleError::Extends(ExtendsError::MissingParent { ref parent, .. }) if parent == "nowhere"
    ));
}

#[test]
fn missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut loader = RuleLoader::new(dir.path().join("absent"));
    assert!(matches!(loader.load_all(), Err(RuleError::Io(_))));
}

#[test]
fn invalid_yaml_produces_error_not_panic() {
    let (dir, loader) = temp_loader();
    let bad_path = dir.path().join("bad.yml");
    fs::write(&bad_path, "this: is: not: valid: yaml: [[[").unwrap();

    assert!(loader.load_file(&bad_path).is_err());
}

#[test]
fn empty_id_fails_validation() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("empty-id.yml");
    fs::write(&path, POLICY_YAML.replace("id: test-policy", "id: \"\"")).unwrap();

    assert!(matches!(
        loader.load_file(&path).unwrap_err(),
        RuleError::Validation(_)
    ));
}

#[test]
fn load_all_reports_failed_files() {
    let (dir, mut loader) = temp_loader();

    fs::write(dir.path().join("good.yml"), POLICY_YAML).unwrap();
    fs::write(dir.path().join("bad.yml"), "not valid yaml: [[[").unwrap();
    fs::write(
        dir.path().join("typo.yml"),
        POLICY_YAML
            .replace("test-policy", "typo-policy")
            .replace("meta_window_tokens", "meta_windw_tokens"),
    )
    .unwrap();

    let results = loader.load_all().unwrap();
    let failed = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Failed { .. }))
        .count();

    assert_eq!(loaded_ids(&results), vec!["test-policy"]);
    assert_eq!(failed, 2);
}

// ── Deep-merge tests ────────────────────────────────────────────

#[test]
fn deep_merge_child_scalar_wins() {
    let parent: serde_yaml::Value = serde_yaml::from_str("a: 1\nb: 2").unwrap();
    let child: serde_yaml::Value = serde_yaml::from_str("b: 99").unwrap();
    let merged = deep_merge(&parent, &child);
    assert_eq!(merged.get("a").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(merged.get("b").and_then(|v| v.as_i64()), Some(99));
}

#[test]
fn deep_merge_arrays_replace_entirely() {
    let parent: serde_yaml::Value =
        serde_yaml::from_str("negation_cues:\n  - not\n  - never").unwrap();
    let child: serde_yaml::Value = serde_yaml::from_str("negation_cues:\n  - без").unwrap();
    let merged = deep_merge(&parent, &child);
    let cues = merged.get("negation_cues").unwrap().as_sequence().unwrap();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].as_str(), Some("без"));
}

#[test]
fn resolve_extends_keeps_child_metadata() {
    let parent: serde_yaml::Value = serde_yaml::from_str(
        "metadata:\n  id: parent\n  name: Parent\n  tags: [base]\nspec:\n  a: 1\n  b: 2",
    )
    .unwrap();
    let child: serde_yaml::Value = serde_yaml::from_str(
        "metadata:\n  id: child\n  name: Child\n  extends: parent\nspec:\n  b: 99",
    )
    .unwrap();

    let mut raw = HashMap::new();
    raw.insert("parent".to_string(), parent);
    raw.insert("child".to_string(), child);

    let resolved = resolve_extends(&raw).unwrap();
    let child = &resolved["child"];
    assert_eq!(child["spec"]["a"].as_i64(), Some(1));
    assert_eq!(child["spec"]["b"].as_i64(), Some(99));
    assert_eq!(child["metadata"]["name"].as_str(), Some("Child"));
    assert!(child["metadata"].get("tags").is_none());
}

#[test]
fn resolve_extends_circular_detected() {
    let a: serde_yaml::Value =
        serde_yaml::from_str("metadata:\n  id: a\n  name: A\n  extends: b").unwrap();
    let b: serde_yaml::Value =
        serde_yaml::from_str("metadata:\n  id: b\n  name: B\n  extends: a").unwrap();

    let mut raw = HashMap::new();
    raw.insert("a".to_string(), a);
    raw.insert("b".to_string(), b);

    let err = resolve_extends(&raw).unwrap_err();
    assert_eq!(
        err,
        ExtendsError::Cycle {
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()]
        }
    );
}
