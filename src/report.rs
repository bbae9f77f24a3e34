use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Route, RouteCatalog};
use crate::error::KodokuError;
use crate::evaluator::evaluate;
use crate::risk::sample_route;
use crate::types::RouteId;

/// One scored route, as the dashboard consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub id: RouteId,
    pub name: String,
    pub survival_rate: f64,
    pub critical_node: String,
    pub max_disruption_risk: f64,
    pub insight: String,
}

/// The full daily report. `routes` follows catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// ISO-8601 UTC, second precision, `Z` suffix.
    pub generated_at: String,
    pub routes: Vec<RouteReport>,
}

/// `2026-10-16T09:30:00Z`
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn score_route(route: &Route, now: DateTime<Utc>) -> Result<RouteReport, KodokuError> {
    if route.chokepoints.is_empty() {
        return Err(KodokuError::EmptyRoute { route_id: route.id.clone() });
    }
    let risks = sample_route(route, now.date_naive());
    evaluate(route, &risks)
}

/// Score every route in catalog order.
///
/// `now` is both the report timestamp and the day the risks are sampled for.
/// Any failing route fails the whole report.
pub fn build_report(catalog: &RouteCatalog, now: DateTime<Utc>) -> Result<Report, KodokuError> {
    catalog.validate()?;
    let routes = catalog
        .routes
        .iter()
        .map(|route| score_route(route, now))
        .collect::<Result<Vec<_>, _>>()?;
    let report = Report { generated_at: format_timestamp(now), routes };
    info!(routes = report.routes.len(), generated_at = %report.generated_at, "built report");
    Ok(report)
}

/// Same as [`build_report`], with routes scored on the rayon pool.
/// Output is identical because each sample owns its generator.
pub fn build_report_parallel(
    catalog: &RouteCatalog,
    now: DateTime<Utc>,
) -> Result<Report, KodokuError> {
    catalog.validate()?;
    let routes = catalog
        .routes
        .par_iter()
        .map(|route| score_route(route, now))
        .collect::<Result<Vec<_>, _>>()?;
    let report = Report { generated_at: format_timestamp(now), routes };
    info!(routes = report.routes.len(), generated_at = %report.generated_at, "built report (parallel)");
    Ok(report)
}

/// Pretty JSON (two-space indent, UTF-8 kept as-is) plus a trailing newline.
pub fn write_report<W: Write>(report: &Report, mut writer: W) -> Result<(), KodokuError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write `report` to `path`, creating parent directories as needed.
pub fn write_report_file(report: &Report, path: impl AsRef<Path>) -> Result<PathBuf, KodokuError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| KodokuError::io(dir, e))?;
    }
    let file = File::create(path).map_err(|e| KodokuError::io(path, e))?;
    write_report(report, BufWriter::new(file)).map_err(|e| match e {
        KodokuError::Sink(source) => KodokuError::io(path, source),
        other => other,
    })?;
    info!(path = %path.display(), routes = report.routes.len(), "wrote report");
    Ok(path.to_path_buf())
}
