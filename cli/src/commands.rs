use anyhow::{bail, Context, Result};
use cap_alert_core::parsing::compute_sha256_hex;
use cap_alert_core::validation::accepted;
use cap_alert_core::{parse_alert, validate, Alert, Finding};
use chrono::{SecondsFormat, Utc};
use clap::ValueEnum;
use config::FeedConfig;
use render::{DirectoryResolver, Feed, GeocodeResolver, NoopResolver};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Serialize)]
pub struct AlertFile {
    pub path: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub path: String,
    pub sha256: String,
    pub accepted: bool,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Cap,
    Json,
    Kml,
    Georss,
}

pub fn scan_folder(dir: &Path) -> Result<Vec<AlertFile>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let mut result = Vec::new();
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let p = entry.path();
        if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
            if ext.eq_ignore_ascii_case("xml") {
                let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
                result.push(AlertFile {
                    path: p.display().to_string(),
                    size_bytes,
                });
            }
        }
    }
    tracing::info!(dir = %dir.display(), files = result.len(), "scanned folder");
    Ok(result)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let xml = read(path)?;
    let findings = cap_alert_core::validate_xml(&xml);
    Ok(ValidationReport {
        path: path.display().to_string(),
        sha256: compute_sha256_hex(&xml),
        accepted: accepted(&findings),
        findings,
    })
}

pub fn validate_alerts(paths: &[PathBuf]) -> Result<Vec<ValidationReport>> {
    let mut out = Vec::new();
    for p in paths {
        let report = validate_file(p)?;
        tracing::info!(path = %report.path, accepted = report.accepted, findings = report.findings.len(), "validated alert");
        out.push(report);
    }
    Ok(out)
}

/// Ingest and validate; blocking findings abort with the full list.
fn load_accepted(path: &Path) -> Result<Alert> {
    let xml = read(path)?;
    let alert = parse_alert(&xml).with_context(|| format!("Failed to ingest {}", path.display()))?;
    let findings = validate(&alert);
    if !accepted(&findings) {
        let list: Vec<String> = findings.iter().map(|f| format!("  {f}")).collect();
        bail!(
            "{} has blocking findings:\n{}",
            path.display(),
            list.join("\n")
        );
    }
    for advisory in &findings {
        tracing::warn!(path = %path.display(), "{advisory}");
    }
    Ok(alert)
}

pub fn resolver(root: Option<PathBuf>) -> Box<dyn GeocodeResolver> {
    match root {
        Some(root) => {
            tracing::debug!(root = %root.display(), "using geocode directory");
            Box::new(DirectoryResolver::new(root))
        }
        None => Box::new(NoopResolver),
    }
}

pub fn render_alert(path: &Path, format: Format, resolver: &dyn GeocodeResolver) -> Result<String> {
    let alert = load_accepted(path)?;
    let output = match format {
        Format::Cap => render::to_cap(&alert),
        Format::Json => render::to_json(&alert)?,
        Format::Kml => render::to_kml(&alert, resolver),
        Format::Georss => render::to_georss_item(&alert, resolver),
    };
    Ok(output)
}

pub fn build_feed(paths: &[PathBuf], meta: &FeedConfig, resolver: &dyn GeocodeResolver) -> Result<String> {
    let updated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    let mut feed = Feed::new(&meta.id, &meta.title, updated, &meta.name, &meta.link);
    for p in paths {
        feed.push(load_accepted(p)?);
    }
    tracing::info!(alerts = feed.alerts.len(), "built feed");
    Ok(feed.to_georss(resolver))
}
