//! Run an analysis described by an [`AnalysisConfig`].

use crate::config::AnalysisConfig;
use crate::Result;
use lospath_dem::{FileProfileSource, OpenElevationClient};
use lospath_link::{analyze, PathAnalysis};
use std::time::Duration;
use tracing::info;

/// Fetch the terrain profile from the configured source and analyze the path.
///
/// A profile file, when configured, takes precedence over the elevation
/// service.
pub fn run_analysis(config: &AnalysisConfig) -> Result<PathAnalysis> {
    let request = config.to_request()?;

    let analysis = match config.elevation.profile_file {
        Some(ref path) => {
            info!("Reading terrain profile from {}", path.display());
            let source = FileProfileSource::from_file(path)?;
            analyze(&request, &source)?
        }
        None => {
            let client = OpenElevationClient::with_options(
                config.elevation.service_url.clone(),
                config.elevation.batch_size,
                Duration::from_secs(config.elevation.timeout_secs),
            )?;
            info!("Querying elevation service at {}", client.base_url());
            let analysis = analyze(&request, &client)?;
            let stats = client.query_stats();
            info!(
                "Elevation service: {} requests, {} locations",
                stats.requests_sent, stats.locations_queried
            );
            analysis
        }
    };

    Ok(analysis)
}
