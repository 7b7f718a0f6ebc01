use clap::Parser;
use lospath_link::{GeoPoint, RadioSpecs};
use lospath_runner::{parse_geo_point, render, run_analysis, AnalysisConfig, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lospath", version)]
#[command(about = "Terrain line-of-sight and link budget analysis between two points")]
struct Cli {
    /// YAML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First endpoint as "lat,lon"
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    from: Option<GeoPoint>,

    /// Second endpoint as "lat,lon"
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    to: Option<GeoPoint>,

    /// Antenna A height above ground (meters)
    #[arg(long)]
    height_a: Option<f64>,

    /// Antenna B height above ground (meters)
    #[arg(long)]
    height_b: Option<f64>,

    /// Disable the earth curvature correction
    #[arg(long)]
    no_curvature: bool,

    /// Effective earth radius multiplier
    #[arg(long)]
    k_factor: Option<f64>,

    /// Number of profile intervals to request
    #[arg(long)]
    samples: Option<usize>,

    /// Compute the link budget (default radio specs unless configured)
    #[arg(long)]
    radio: bool,

    /// Carrier frequency (MHz); implies --radio
    #[arg(long)]
    frequency: Option<f64>,

    /// TX power (dBm); implies --radio
    #[arg(long, allow_hyphen_values = true)]
    tx_power: Option<f64>,

    /// TX antenna gain (dBi); implies --radio
    #[arg(long, allow_hyphen_values = true)]
    tx_gain: Option<f64>,

    /// RX antenna gain (dBi); implies --radio
    #[arg(long, allow_hyphen_values = true)]
    rx_gain: Option<f64>,

    /// Receiver sensitivity (dBm); implies --radio
    #[arg(long, allow_hyphen_values = true)]
    rx_sensitivity: Option<f64>,

    /// Read the terrain profile from a JSON file instead of the service
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Elevation service base URL
    #[arg(long)]
    service_url: Option<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn wants_radio(&self) -> bool {
        self.radio
            || self.frequency.is_some()
            || self.tx_power.is_some()
            || self.tx_gain.is_some()
            || self.rx_gain.is_some()
            || self.rx_sensitivity.is_some()
    }

    /// Layer command-line values over the loaded configuration.
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(from) = self.from {
            config.start = Some(from);
        }
        if let Some(to) = self.to {
            config.end = Some(to);
        }
        if let Some(h) = self.height_a {
            config.height_a_m = h;
        }
        if let Some(h) = self.height_b {
            config.height_b_m = h;
        }
        if self.no_curvature {
            config.curvature.enabled = false;
        }
        if let Some(k) = self.k_factor {
            config.curvature.k_factor = k;
        }
        if let Some(n) = self.samples {
            config.intervals = n;
        }

        if self.wants_radio() {
            let radio = config.radio.get_or_insert_with(RadioSpecs::default);
            if let Some(v) = self.frequency {
                radio.frequency_mhz = v;
            }
            if let Some(v) = self.tx_power {
                radio.tx_power_dbm = v;
            }
            if let Some(v) = self.tx_gain {
                radio.tx_antenna_gain_dbi = v;
            }
            if let Some(v) = self.rx_gain {
                radio.rx_antenna_gain_dbi = v;
            }
            if let Some(v) = self.rx_sensitivity {
                radio.rx_sensitivity_dbm = v;
            }
        }

        if let Some(ref path) = self.profile {
            config.elevation.profile_file = Some(path.clone());
        }
        if let Some(ref url) = self.service_url {
            config.elevation.service_url = url.clone();
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> lospath_runner::Result<String> {
    let mut config = match cli.config {
        Some(ref path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    cli.apply(&mut config);

    let analysis = run_analysis(&config)?;
    render(&analysis, cli.format)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
