//! The `thumbduel compare` command: run one A/B analysis and render it.

use clap::{Args, ValueEnum};
use console::Style;
use std::path::{Path, PathBuf};
use thumbduel_core::{
    AnalysisClient, AnalysisError, AnalysisRequest, AnalysisVerdict, AnalyzeOptions, Config,
    CredentialResolver, HttpTransport, ImageInput, SettingsStore, Winner,
};

/// Arguments for the `compare` command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to thumbnail candidate A
    pub image_a: PathBuf,

    /// Path to thumbnail candidate B
    pub image_b: PathBuf,

    /// Title paired with thumbnail A
    #[arg(long)]
    pub title_a: String,

    /// Title paired with thumbnail B
    #[arg(long)]
    pub title_b: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Override the analysis deadline in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Execute the compare command.
pub async fn execute(args: CompareArgs, config: Config) -> anyhow::Result<()> {
    let request = AnalysisRequest {
        image_a: load_image(&args.image_a).await?,
        image_b: load_image(&args.image_b).await?,
        title_a: args.title_a,
        title_b: args.title_b,
    };

    // Seed the settings store from the config file so the operator
    // override participates in credential resolution.
    let store = SettingsStore::new();
    store.set_api_key_override(config.api_key_override());

    let client = AnalysisClient::with_options(
        CredentialResolver::with_default_sources(store),
        Box::new(HttpTransport::new(
            &config.gemini.endpoint,
            &config.gemini.model,
        )),
        AnalyzeOptions {
            timeout_ms: args.timeout_ms.unwrap_or(config.gemini.timeout_ms),
        },
    );

    tracing::info!(model = %config.gemini.model, "Running thumbnail comparison");

    match client.analyze(&request).await {
        Ok(verdict) => {
            render(&verdict, args.output)?;
            Ok(())
        }
        Err(e) => Err(with_guidance(e)),
    }
}

/// Read an image file and encode it for the analysis payload.
async fn load_image(path: &Path) -> anyhow::Result<ImageInput> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("png")
        .to_ascii_lowercase();
    Ok(ImageInput::from_bytes(&bytes, &format))
}

/// Attach operator guidance to the error classes that have a clear fix.
fn with_guidance(error: AnalysisError) -> anyhow::Error {
    let hint = match &error {
        AnalysisError::IncompleteInput { .. } => {
            Some("Both images and both titles are required.")
        }
        AnalysisError::MissingCredential | AnalysisError::Authentication { .. } => {
            Some("Configure a valid key with `thumbduel key set` or the GEMINI_API_KEY env var.")
        }
        _ => None,
    };
    match hint {
        Some(hint) => anyhow::anyhow!("{error}\n  {hint}"),
        None => anyhow::anyhow!(error),
    }
}

fn render(verdict: &AnalysisVerdict, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(verdict)?);
        }
        OutputFormat::Text => {
            let bold = Style::new().bold();
            let winner = match verdict.winner {
                Winner::A => "Thumbnail A",
                Winner::B => "Thumbnail B",
                Winner::Draw => "Draw",
            };

            println!("{}", bold.apply_to(format!("Winner: {winner}")));
            println!();
            println!(
                "  A: score {:>5.1}/100   est. CTR {:>4.1}%",
                verdict.score_a, verdict.ctr_estimate_a
            );
            println!(
                "  B: score {:>5.1}/100   est. CTR {:>4.1}%",
                verdict.score_b, verdict.ctr_estimate_b
            );
            println!();
            println!("{}", bold.apply_to("Reasoning"));
            println!("  {}", verdict.reasoning);

            print_improvements("Improvements for A", &verdict.improvements_a);
            print_improvements("Improvements for B", &verdict.improvements_b);

            println!();
            println!("{}", bold.apply_to("Eye tracking"));
            println!("  {}", verdict.eye_tracking_notes);
        }
    }
    Ok(())
}

fn print_improvements(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", Style::new().bold().apply_to(heading));
    for item in items {
        println!("  - {item}");
    }
}
