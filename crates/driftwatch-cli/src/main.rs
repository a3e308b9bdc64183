use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use driftwatch_core::chat::ChatSession;
use driftwatch_core::config::Config;
use driftwatch_core::digest::Baseline;
use driftwatch_core::genai::{GeminiClient, OfflineGenerator, TextGenerator};
use driftwatch_core::pipeline::{Pipeline, StageTiming};
use driftwatch_core::report::render;

mod args;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match args::Args::parse().command {
        args::Command::Inspect(cmd) => inspect(cmd).await,
        args::Command::Ask(cmd) => ask(cmd).await,
    }
}

async fn inspect(cmd: args::InspectArgs) -> Result<()> {
    let generator: Arc<dyn TextGenerator> = if cmd.offline {
        Arc::new(OfflineGenerator)
    } else {
        Arc::new(GeminiClient::new(&Config::from_env()?))
    };

    let timing = match cmd.stage_delay_ms {
        Some(ms) => StageTiming::uniform(Duration::from_millis(ms)),
        None => StageTiming::default(),
    };

    let pipeline = Pipeline::new(Baseline::pci_v1_2(), timing, generator);

    let feed = if cmd.quiet {
        None
    } else {
        let mut events = pipeline.subscribe();
        Some(tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                eprintln!("{}", event.headline);
            }
        }))
    };

    let report = pipeline.run(cmd.tampered).await?;

    // Dropping the pipeline closes the status feed and ends the task.
    drop(pipeline);
    if let Some(feed) = feed {
        let _ = feed.await;
    }

    let output = match cmd.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report),
    };

    match cmd.out {
        Some(path) => std::fs::write(path, &output)?,
        None => print!("{output}"),
    }

    std::process::exit(report.final_status.exit_code());
}

async fn ask(cmd: args::AskArgs) -> Result<()> {
    let config = Config::from_env()?;
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(&config));
    let mut session = ChatSession::new(generator, !cmd.no_grounding);

    let answer = session.ask(&cmd.question).await;

    println!("{}", answer.text);
    if !answer.sources.is_empty() {
        println!("\nSources:");
        for source in &answer.sources {
            println!("  - {} ({})", source.title, source.uri);
        }
    }
    Ok(())
}
