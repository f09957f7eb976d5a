mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Format;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "capalert", version, about = "Validate and render CAP alerts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List alert files under a directory
    Scan { dir: PathBuf },
    /// Validate alert files and report every finding
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render an accepted alert in another format
    Render {
        path: PathBuf,
        #[arg(long, value_enum, default_value = "cap")]
        format: Format,
        /// Gazetteer root holding kml/ and gml/ boundaries
        #[arg(long)]
        geocode_path: Option<PathBuf>,
    },
    /// Build a GeoRSS feed over several alerts
    Feed {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long)]
        geocode_path: Option<PathBuf>,
    },
    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    SetGeocodePath { dir: PathBuf },
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config() -> config::AppConfig {
    config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        config::AppConfig::default()
    })
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cfg = load_config();

    match cli.command {
        Command::Scan { dir } => {
            for file in commands::scan_folder(&dir)? {
                println!("{}\t{}", file.size_bytes, file.path);
            }
        }
        Command::Validate { paths, json } => {
            let reports = commands::validate_alerts(&paths)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    let verdict = if report.accepted { "accepted" } else { "rejected" };
                    println!("{} [{}] {}", report.path, &report.sha256[..12], verdict);
                    for finding in &report.findings {
                        println!("  {}: {finding}", finding.severity.label());
                    }
                }
            }
            if reports.iter().any(|r| !r.accepted) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Render {
            path,
            format,
            geocode_path,
        } => {
            let resolver = commands::resolver(geocode_path.or_else(|| cfg.geocode_root()));
            print!("{}", commands::render_alert(&path, format, resolver.as_ref())?);
        }
        Command::Feed {
            paths,
            geocode_path,
        } => {
            let resolver = commands::resolver(geocode_path.or_else(|| cfg.geocode_root()));
            print!(
                "{}",
                commands::build_feed(&paths, &cfg.feed, resolver.as_ref())?
            );
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config::path()?.display());
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
            ConfigAction::SetGeocodePath { dir } => {
                let mut cfg = cfg;
                cfg.geocode.root = Some(dir);
                config::store(&cfg)?;
                tracing::info!("Settings updated");
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
