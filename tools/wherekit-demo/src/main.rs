use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use wherekit_geocode::{GeocoderConfig, NominatimGeocoder};
use wherekit_location::{FixedPositionSource, Position, PositionSource, SystemPositionSource};
use wherekit_permission::{PermissionGate, StaticPermissionGate, SystemPermissionGate};
use wherekit_resolver::{DisplayText, LocationResolver, ResolutionResult};

#[derive(Parser)]
#[command(name = "wherekit-demo")]
#[command(about = "Look up the address of the device's last known location", long_about = None)]
struct Cli {
    /// Use this latitude instead of the device position
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Use this longitude instead of the device position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Nominatim base URL [env: WHEREKIT_GEOCODER_URL]
    #[arg(long)]
    endpoint: Option<String>,

    /// Preferred address language, e.g. pt-BR [env: WHEREKIT_LANGUAGE]
    #[arg(long)]
    language: Option<String>,

    /// Geocoding timeout in seconds [env: WHEREKIT_TIMEOUT_SECS]
    #[arg(long)]
    timeout: Option<u64>,

    /// Refuse location permission
    #[arg(long)]
    deny: bool,
}

impl Cli {
    fn geocoder_config(&self) -> Result<GeocoderConfig> {
        let mut config = GeocoderConfig::from_env().context("Invalid geocoder environment")?;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(language) = &self.language {
            config.language = Some(language.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }

    fn permission(&self) -> Box<dyn PermissionGate> {
        if self.deny {
            Box::new(StaticPermissionGate::denied())
        } else {
            Box::new(SystemPermissionGate::new())
        }
    }

    fn positions(&self) -> Box<dyn PositionSource> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Box::new(FixedPositionSource::at(Position::new(lat, lon))),
            _ => Box::new(SystemPositionSource),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let geocoder = NominatimGeocoder::new(cli.geocoder_config()?)
        .context("Failed to create geocoder")?;
    log::debug!("using geocoder {:?}", geocoder.config());

    let resolver = LocationResolver::new(cli.permission(), cli.positions(), geocoder);

    println!("{}", "📍 Resolving location...".yellow().bold());
    let result = resolver.resolve().await;
    print(&result);

    Ok(())
}

fn print(result: &ResolutionResult) {
    let text = DisplayText::render(result);

    if let Some(notice) = text.notice {
        println!("{}", notice.red().bold());
    }
    if let Some(location) = &text.location_text {
        println!("{location}");
    }
    if let Some(address) = text.address_text.as_deref().filter(|a| !a.is_empty()) {
        println!();
        match result {
            ResolutionResult::Resolved { .. } => println!("{}", address.green()),
            _ => println!("{}", address.red()),
        }
    }
    if let ResolutionResult::LookupFailed { reason, .. } = result {
        println!("{}", format!("({reason})").dimmed());
    }
}
