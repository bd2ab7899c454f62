//! ADAS Route Analyzer - Main Entry Point

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use route_analyzer::{
    init_logging, Advisory, AnalyzerConfig, RouteAnalysis, RouteAnalyzer, RouteInput,
};
use route_data::RefOnlyLookup;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Route document with intersection records and geometry
    Route,
    /// Raw OSRM `/route` response (steps=true, geometries=geojson)
    Osrm,
}

/// Plan ADAS feature usage along routes
#[derive(Parser, Debug)]
#[command(name = "adas-route", version, about)]
struct Args {
    /// Route files to analyze
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Input file format
    #[arg(short, long, value_enum, default_value_t = InputFormat::Route)]
    format: InputFormat,

    /// Autonomy level ("Level 0", "Level 1", "Level 2"), overrides config
    #[arg(short, long)]
    level: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also report the driver advisory at this polyline index
    #[arg(long)]
    vehicle_index: Option<usize>,

    /// Print curvature report lines to stderr
    #[arg(long)]
    curvature_report: bool,
}

#[derive(Serialize)]
struct FileReport {
    input: String,
    #[serde(flatten)]
    analysis: RouteAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<Advisory>,
}

fn analyze_document(
    analyzer: &RouteAnalyzer,
    body: &str,
    format: InputFormat,
) -> Result<RouteAnalysis> {
    let input = match format {
        InputFormat::Route => RouteInput::from_json(body)?,
        InputFormat::Osrm => RouteInput::from_osrm_json(body, &RefOnlyLookup)?,
    };
    Ok(analyzer.analyze(&input)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        AnalyzerConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = args.level {
        config.autonomy_level = level;
    }
    init_logging(&config.logging);

    info!("=== ADAS Route Analyzer v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Autonomy level: {}", config.autonomy_level);

    let analyzer = Arc::new(RouteAnalyzer::new(config));

    let mut tasks = Vec::with_capacity(args.inputs.len());
    for path in args.inputs {
        let body = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let analyzer = Arc::clone(&analyzer);
        let format = args.format;
        let task = tokio::task::spawn_blocking(move || analyze_document(&analyzer, &body, format));
        tasks.push((path, task));
    }

    let mut reports = Vec::with_capacity(tasks.len());
    for (path, task) in tasks {
        let analysis = task
            .await
            .context("Analysis task failed")?
            .with_context(|| format!("Failed to analyze {}", path.display()))?;

        if args.curvature_report {
            for line in analysis.curvature_report() {
                eprintln!("{}", line);
            }
        }

        let advisory = args
            .vehicle_index
            .and_then(|index| analyzer.advisory(&analysis, index));
        if args.vehicle_index.is_some() && advisory.is_none() {
            warn!("{}: no advisory at vehicle index", path.display());
        }

        reports.push(FileReport {
            input: path.display().to_string(),
            analysis,
            advisory,
        });
    }

    let json = serde_json::to_string_pretty(&reports)?;
    match args.output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
