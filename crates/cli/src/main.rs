mod cli;
mod config;
mod input;
mod output;
mod pipeline;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};

use noesis_compute::{classify_batch, BatchSummary, Classifier};
use noesis_core::Config;
use noesis_llm::JudgmentClient;
use noesis_rules::loader::{LoadStatus, RuleLoader};
use noesis_rules::ruleset::{EMBEDDED_ONTOLOGY, EMBEDDED_POLICY};
use noesis_rules::validation::validate_document;
use noesis_rules::RuleSet;

use crate::cli::{AnalyzeArgs, ClassifyArgs, CliArgs, Command};
use crate::config::RunSettings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    noesis_core::config::load_dotenv();
    let args = CliArgs::parse();
    let config = Config::from_env();

    match args.command {
        Command::Classify(ref classify) => run_classify(&config, args.rules_dir.clone(), classify).await,
        Command::Analyze(ref analyze) => {
            let dir = args.rules_dir.clone().or_else(|| config.classifier.rules_dir.clone());
            run_analyze(dir.as_deref(), analyze)
        }
        Command::ValidateRules => {
            let dir = args.rules_dir.clone().or_else(|| config.classifier.rules_dir.clone());
            run_validate(dir.as_deref())
        }
    }
}

fn load_rules(dir: Option<&Path>) -> Result<RuleSet> {
    RuleSet::resolve(dir).with_context(|| match dir {
        Some(d) => format!("failed to load rules from {}", d.display()),
        None => "failed to compile embedded rules".to_string(),
    })
}

async fn run_classify(
    config: &Config,
    rules_dir: Option<PathBuf>,
    args: &ClassifyArgs,
) -> Result<()> {
    config.log_summary();
    let settings = RunSettings::resolve(config, rules_dir, args);
    let classifier = Classifier::new(&load_rules(settings.rules_dir.as_deref())?);

    let items = input::read_items(&args.input)?;
    info!(items = items.len(), input = %args.input.display(), "input loaded");

    let client = if !settings.use_llm {
        None
    } else if !config.llm.is_configured() {
        warn!(provider = %config.llm.provider, "LLM provider not configured, using pattern analysis only");
        None
    } else {
        Some(
            JudgmentClient::from_config(&config.llm, &config.ollama)
                .context("failed to create LLM provider")?,
        )
    };

    let judgments = match &client {
        Some(client) => {
            info!(
                provider = client.provider_name(),
                concurrency = settings.concurrency,
                "requesting external judgments"
            );
            let (judgments, stats) = pipeline::collect_judgments(
                client,
                &classifier,
                &items,
                settings.concurrency,
                settings.request_delay,
            )
            .await;
            info!(
                judged = stats.judged,
                malformed = stats.malformed,
                unavailable = stats.unavailable,
                skipped = stats.skipped,
                "external judgments collected"
            );
            judgments
        }
        None => Vec::new(),
    };

    let results = classify_batch(&classifier, &items, &judgments);
    let summary = BatchSummary::from_results(&results);

    let now = Local::now();
    let out_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| output::default_output_dir(now));
    let generated_at = now.format("%Y-%m-%d %H:%M:%S").to_string();
    output::write_outputs(&out_dir, &results, &summary, &generated_at)?;

    println!("{}", summary.render_text(&generated_at));
    info!(dir = %out_dir.display(), "results written");
    Ok(())
}

fn run_analyze(rules_dir: Option<&Path>, args: &AnalyzeArgs) -> Result<()> {
    let text = match (&args.text, &args.input_text) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => input::read_text(path)?,
        (None, None) => bail!("either a text or --input-text is required"),
    };
    let classifier = Classifier::new(&load_rules(rules_dir)?);
    let analysis = classifier.analyze(&text);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&analysis).context("failed to serialize analysis")?
        );
        return Ok(());
    }

    let s = &analysis.summary;
    println!("Dominant theory:  {} ({})", s.dominant_theory, s.dominant_theory.label());
    if let Some(secondary) = s.secondary_theory {
        println!("Secondary theory: {}", secondary);
    }
    println!("Confidence:       {}", s.confidence);
    println!("Hybrid:           {}", s.hybrid);
    println!("Meta-metaphor:    {}", s.meta_metaphor_detected);
    println!();
    println!("Scores:");
    for (theory, score) in &s.theory_scores {
        println!("  {:<6} {:.3}", theory.tag(), score);
    }
    println!();
    println!("Evidence ({}):", analysis.evidence.len());
    for e in &analysis.evidence {
        println!(
            "  [{}..{}] {:<6} {:<20} {:<13} {:.2}  \"{}\"",
            e.span.start,
            e.span.end,
            e.theory.tag(),
            e.level.as_str(),
            e.ontological_type.as_str(),
            e.weight,
            e.trigger_text
        );
    }
    Ok(())
}

fn run_validate(rules_dir: Option<&Path>) -> Result<()> {
    let mut failed = false;

    if let Some(dir) = rules_dir {
        let mut loader = RuleLoader::new(dir.to_path_buf())
            .with_parent(EMBEDDED_ONTOLOGY)?
            .with_parent(EMBEDDED_POLICY)?;
        let results = loader
            .load_all()
            .with_context(|| format!("failed to load rules from {}", dir.display()))?;

        for r in &results {
            match &r.status {
                LoadStatus::Loaded { rule_id } => {
                    let Some(doc) = loader.documents().get(rule_id) else {
                        continue;
                    };
                    let report = validate_document(doc);
                    let status = if report.valid { "ok" } else { "INVALID" };
                    println!("{}: {} ({})", r.path.display(), status, rule_id);
                    for e in &report.errors {
                        println!("  error: {}", e);
                    }
                    for w in &report.warnings {
                        println!("  warning: {}: {}", w.path, w.message);
                    }
                    failed |= !report.valid;
                }
                LoadStatus::Skipped { reason } => {
                    println!("{}: skipped ({})", r.path.display(), reason);
                }
                LoadStatus::Failed { error } => {
                    println!("{}: FAILED: {}", r.path.display(), error);
                    failed = true;
                }
            }
        }
    }

    match RuleSet::resolve(rules_dir) {
        Ok(rules) => println!(
            "rule set ok: ontology '{}' ({} patterns), policy '{}'",
            rules.ontology.id(),
            rules.ontology.pattern_count(),
            rules.policy_id
        ),
        Err(e) => {
            println!("rule set failed: {}", e);
            failed = true;
        }
    }

    if failed {
        bail!("rule validation failed");
    }
    Ok(())
}
