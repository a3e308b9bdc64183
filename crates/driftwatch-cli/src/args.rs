use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "driftwatch",
    version,
    about = "Simulated PCI DSS compliance pipeline with an LLM reporting assistant"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one simulated compliance inspection
    Inspect(InspectArgs),
    /// Ask the compliance assistant a question
    Ask(AskArgs),
}

#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// Simulate a tampered device configuration
    #[arg(long)]
    pub tampered: bool,

    /// Run without a Gemini credential; report text uses the fallbacks
    #[arg(long)]
    pub offline: bool,

    /// Override every artificial stage delay, in milliseconds
    #[arg(long)]
    pub stage_delay_ms: Option<u64>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Suppress the live status feed on stderr
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, clap::Args)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    /// Answer from model knowledge only, without web search grounding
    #[arg(long)]
    pub no_grounding: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
