// SPDX-License-Identifier: PMPL-1.0-or-later
//! wcag-auditor CLI and server entry point

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wcag_auditor::analyzers::audit_html;
use wcag_auditor::color::{adjust_for_contrast_detailed, contrast_ratio, display_ratio, required_ratio};
use wcag_auditor::fallback::FallbackGenerator;
use wcag_auditor::report::{generate_report, OutputFormat};
use wcag_auditor::templates::SeededSelector;
use wcag_auditor::{build_router, AppState, Color, Config, WcagLevel};

#[derive(Parser)]
#[command(name = "wcag-auditor")]
#[command(about = "WCAG 2.1 AAA accessibility auditing service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "wcag-auditor.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed template selection so fallback output is reproducible
        #[arg(long, env = "WCAG_AUDITOR_SEED")]
        seed: Option<u64>,
    },

    /// Check and fix the contrast of one color pair
    Contrast {
        /// Text color (hex, rgb() or CSS name)
        foreground: String,

        /// Background color
        background: String,

        /// Required ratio; defaults to the level's normal-text threshold
        #[arg(long)]
        required: Option<f64>,

        /// Conformance level used when --required is absent
        #[arg(long, default_value = "aaa")]
        level: LevelArg,

        /// Use the large-text threshold
        #[arg(long)]
        large: bool,
    },

    /// Audit an HTML file with every analyzer
    Audit {
        /// HTML file to audit
        file: PathBuf,

        /// WCAG conformance level
        #[arg(long, default_value = "aaa")]
        level: LevelArg,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    A,
    Aa,
    Aaa,
}

impl From<LevelArg> for WcagLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::A => WcagLevel::A,
            LevelArg::Aa => WcagLevel::AA,
            LevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "wcag_auditor=debug,tower_http=debug"
    } else {
        "wcag_auditor=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { host, port, seed } => {
            let mut config = Config::load(&cli.config)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, seed).await
        }
        Commands::Contrast { foreground, background, required, level, large } => {
            let required = required.unwrap_or_else(|| required_ratio(level.into(), large));
            contrast(&foreground, &background, required)
        }
        Commands::Audit { file, level, format } => audit(&file, level.into(), format.into()),
    }
}

async fn serve(config: Config, seed: Option<u64>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let mut state = AppState::new(config)?;
    if let Some(seed) = seed {
        tracing::info!(seed, "Using seeded template selection");
        state = state.with_fallback(FallbackGenerator::new(Arc::new(SeededSelector::new(seed))));
    }
    tokio::fs::create_dir_all(state.uploads.root()).await?;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("API available at http://{}/api", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn contrast(foreground: &str, background: &str, required: f64) -> anyhow::Result<()> {
    if !required.is_finite() || required <= 0.0 {
        anyhow::bail!("required ratio must be a positive number, got {}", required);
    }

    let fg: Color = foreground.parse()?;
    let bg: Color = background.parse()?;
    let adjustment = adjust_for_contrast_detailed(fg, bg, required);

    println!("Original: {} on {} = {:.2}:1", fg, bg, display_ratio(contrast_ratio(fg, bg)));
    println!(
        "Improved: {} on {} = {:.2}:1 ({:?} after {} step(s), {:?})",
        adjustment.color,
        bg,
        display_ratio(adjustment.ratio),
        adjustment.direction,
        adjustment.iterations,
        adjustment.outcome,
    );
    println!(
        "Required: {:.2}:1 -> {}",
        required,
        if adjustment.ratio >= required { "PASS" } else { "FAIL" }
    );

    if adjustment.ratio < required {
        std::process::exit(1);
    }
    Ok(())
}

fn audit(file: &Path, level: WcagLevel, format: OutputFormat) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    let findings = audit_html(&content, Some(file), level);
    println!("{}", generate_report(&findings, format));

    if findings.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
