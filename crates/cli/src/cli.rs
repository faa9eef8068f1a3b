use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Classify artwork descriptions by the theory of consciousness their
/// metaphors point to.
#[derive(Parser, Debug)]
#[command(name = "noesis", version, about = "Metaphor-based consciousness-theory classifier")]
pub struct CliArgs {
    /// Directory with pattern-ontology / scoring-policy YAML (embedded defaults when unset)
    #[arg(long, global = true, env = "NOESIS_RULES_DIR")]
    pub rules_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a file of items and write results plus a summary report
    Classify(ClassifyArgs),
    /// Run pattern analysis on a single text and print the metaphor network
    Analyze(AnalyzeArgs),
    /// Validate rule documents and report errors and warnings
    ValidateRules,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Input file: JSON array or JSON Lines of {title, description}
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output directory (default: analysis_results_<YYYYmmdd_HHMMSS>)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Skip the external LLM judgment; pattern analysis only
    #[arg(long)]
    pub no_llm: bool,

    /// Maximum in-flight LLM requests (overrides NOESIS_CONCURRENCY)
    #[arg(long)]
    pub concurrency: Option<u32>,

    /// Pause after each LLM request in milliseconds (overrides NOESIS_REQUEST_DELAY_MS)
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(conflicts_with = "input_text", required_unless_present = "input_text")]
    pub text: Option<String>,

    /// Read the text from a file ("-" for stdin)
    #[arg(long)]
    pub input_text: Option<PathBuf>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}
