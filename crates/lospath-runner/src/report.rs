//! Human-readable and JSON reports for a path analysis.

use crate::Result;
use lospath_link::{BandQuality, PathAnalysis};
use std::fmt::Write;

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text summary.
    #[default]
    Text,
    /// Pretty-printed JSON of the full analysis.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format \"{}\" (expected text or json)", other)),
        }
    }
}

/// Render the analysis in the requested format.
pub fn render(analysis: &PathAnalysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(analysis),
        OutputFormat::Json => render_json(analysis),
    }
}

/// Pretty-printed JSON of the whole analysis.
pub fn render_json(analysis: &PathAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Plain text summary of the analysis.
pub fn render_text(analysis: &PathAnalysis) -> Result<String> {
    let mut out = String::new();
    write_text(&mut out, analysis)?;
    Ok(out)
}

fn write_text(out: &mut String, analysis: &PathAnalysis) -> std::fmt::Result {
    let terrain = &analysis.terrain;

    writeln!(out, "# Path Analysis")?;
    writeln!(out, "Distance:      {:.2} km", analysis.total_distance_m / 1000.0)?;
    writeln!(
        out,
        "Terrain:       {} samples every {:.1} m, {:.1} m to {:.1} m (mean {:.1} m)",
        terrain.sample_count,
        terrain.resolution_m,
        terrain.min_elevation,
        terrain.max_elevation,
        terrain.mean_elevation
    )?;
    writeln!(out)?;

    match analysis.los.obstruction {
        None => writeln!(out, "Line of sight: CLEAR")?,
        Some(ref obstruction) => {
            writeln!(out, "Line of sight: OBSTRUCTED")?;
            writeln!(
                out,
                "  first obstruction at {:.1} m: terrain {:.1} m, ray {:.1} m ({:.1} m into terrain)",
                obstruction.distance_m,
                obstruction.effective_terrain_height_m,
                obstruction.line_of_sight_height_m,
                obstruction.penetration_m()
            )?;
        }
    }
    writeln!(out)?;

    if analysis.segments.is_empty() {
        writeln!(out, "Constraints:   none")?;
    } else {
        writeln!(out, "Constraints:   {}", analysis.segments.len())?;
        for segment in &analysis.segments {
            let (start, end) = segment.span();
            writeln!(
                out,
                "  {:<20} {:>9.1} m - {:>9.1} m  worst {:>7.1} m  ({} points)",
                segment.classification.as_str(),
                start,
                end,
                segment.worst_clearance_m(),
                segment.len()
            )?;
        }
    }

    writeln!(out, "Bands:")?;
    for band in &analysis.bands {
        let label = match band.quality {
            BandQuality::Good => "good",
            BandQuality::Constrained(classification) => classification.as_str(),
        };
        writeln!(
            out,
            "  {:<20} {:>9.1} m - {:>9.1} m",
            label, band.start_m, band.end_m
        )?;
    }
    writeln!(out)?;

    match analysis.link {
        None if analysis.los.is_clear => writeln!(out, "Link budget:   not requested")?,
        None => writeln!(out, "Link budget:   skipped (path obstructed)")?,
        Some(ref link) => {
            writeln!(out, "Link budget:")?;
            writeln!(out, "  Distance:       {:.2} km", link.distance_km)?;
            writeln!(out, "  Path loss:      {:.2} dB", link.path_loss_db)?;
            writeln!(out, "  Received:       {:.2} dBm", link.received_signal_strength_dbm)?;
            writeln!(out, "  Margin:         {:.2} dB", link.link_margin_db)?;
            writeln!(
                out,
                "  Viable:         {} - {}",
                if link.is_viable { "yes" } else { "no" },
                link.status()
            )?;
        }
    }

    Ok(())
}
