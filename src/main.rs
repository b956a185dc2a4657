use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use pawcast::advisory::{ForecastAdvisory, HomeAdvisory};
use pawcast::{
    AdvisoryRequest, AdvisoryService, ForecastRequest, GeocodingClient, PawcastConfig,
    PawcastError, PersistentCache, PetAttribute, PetProfile, PetSize, TemperatureUnit,
    WeatherApiClient, logging, web,
};

/// Dog walk safety advisor
#[derive(Parser, Debug)]
#[command(name = "pawcast", version)]
#[command(about = "Is it safe to walk your dog right now?", long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/pawcast/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for pawcast
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current conditions, risk level and pavement advice
    Advise {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        pet: PetArgs,

        /// Shade is available on the route
        #[arg(long, conflicts_with = "no_shade")]
        shade: bool,

        /// No shade on the route
        #[arg(long)]
        no_shade: bool,

        /// Use this temperature (°F) instead of the live reading
        #[arg(long, allow_negative_numbers = true)]
        temp_override: Option<f64>,

        /// Force daytime (true) or night-time (false)
        #[arg(long)]
        is_day: Option<bool>,
    },
    /// Best walk time for each forecast day
    Forecast {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Serve the JSON API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Postal code, place name or "lat,lon"
    #[arg(short, long)]
    location: Option<String>,

    /// Display unit (F or C)
    #[arg(short, long)]
    unit: Option<TemperatureUnit>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PetArgs {
    /// Dog's name
    #[arg(long)]
    name: Option<String>,

    /// Body size (small, medium, large)
    #[arg(short, long, default_value_t = PetSize::Medium)]
    size: PetSize,

    #[arg(long)]
    obese: bool,

    /// Short-nosed breed (pug, bulldog, ...)
    #[arg(long)]
    brachycephalic: bool,

    #[arg(long)]
    senior: bool,

    /// Husky, malamute and similar
    #[arg(long)]
    northern_breed: bool,

    #[arg(long)]
    cold_acclimated: bool,
}

impl PetArgs {
    fn profile(&self) -> PetProfile {
        let mut pet = PetProfile::new(self.size)
            .with(PetAttribute::Obese, self.obese)
            .with(PetAttribute::Brachycephalic, self.brachycephalic)
            .with(PetAttribute::Senior, self.senior)
            .with(PetAttribute::NorthernBreed, self.northern_breed)
            .with(PetAttribute::ColdAcclimated, self.cold_acclimated);
        if let Some(name) = &self.name {
            pet.name.clone_from(name);
        }
        pet
    }
}

type Service = AdvisoryService<WeatherApiClient, GeocodingClient>;

fn build_service(config: &PawcastConfig) -> Result<Service> {
    let weather = WeatherApiClient::new(&config.weather)?;
    let geocoder = GeocodingClient::new(&config.geocoding, &config.weather)?;
    let service = AdvisoryService::new(
        weather,
        geocoder,
        config.defaults.clone(),
        config.weather.forecast_days,
    );

    if config.cache.location.is_empty() {
        return Ok(service);
    }

    let ttl = Duration::from_secs(u64::from(config.cache.ttl_minutes) * 60);
    match PersistentCache::open(&config.cache.location, ttl) {
        Ok(cache) => Ok(service.with_cache(cache)),
        Err(e) => {
            warn!("Forecast cache disabled: {e:#}");
            Ok(service)
        }
    }
}

fn print_home(advisory: &HomeAdvisory) {
    let unit = advisory.unit;
    println!(
        "{}: {} (feels like {}), {}",
        advisory.location.name, advisory.temperature, advisory.feels_like, advisory.condition
    );
    println!(
        "Risk {}/5 - {}: {}",
        advisory.risk.level.level, advisory.risk.level.title, advisory.risk.level.message
    );
    println!(
        "Pavement: {} - {} {}",
        advisory.pavement.label, advisory.pavement.message, advisory.pavement.risk
    );
    println!(
        "Status: {} {}",
        advisory.quick_status.title, advisory.quick_status.message
    );

    let guidance = &advisory.walk_guidance;
    let limit = match guidance.max_minutes {
        None => "no time limit".to_string(),
        Some(0) => "no walking".to_string(),
        Some(minutes) => format!("up to {minutes} minutes"),
    };
    println!(
        "Walk: {} risk, {}; asphalt around {}{}",
        guidance.risk,
        limit,
        unit.format(guidance.asphalt_temp_f),
        if guidance.asphalt_too_hot { " (too hot for paws)" } else { "" }
    );
    println!(
        "Shade: {}, wet weather: {}",
        if advisory.shade { "yes" } else { "no" },
        if advisory.wet_weather { "yes" } else { "no" }
    );
}

fn print_forecast(advisory: &ForecastAdvisory) {
    let symbol = advisory.unit.symbol();
    println!("{}", advisory.location.name);
    for day in &advisory.days {
        let window = day
            .walk_window
            .as_ref()
            .and_then(|w| w.label())
            .map(|label| format!(" ({label})"))
            .unwrap_or_default();
        let note = day
            .scenario
            .map(|s| format!(" - {}", s.message))
            .unwrap_or_default();
        println!(
            "{:<12} {:>4}{symbol} / {:>4}{symbol}  {:<20} {}{}{}",
            day.label, day.high, day.low, day.condition, day.walk_time, window, note
        );
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = PawcastConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose);
    info!("Starting pawcast {}", pawcast::VERSION);

    let service = build_service(&config)?;

    match cli.command {
        Command::Advise {
            target,
            pet,
            shade,
            no_shade,
            temp_override,
            is_day,
        } => {
            let request = AdvisoryRequest {
                location: target.location,
                unit: target.unit,
                pet: pet.profile(),
                shade: match (shade, no_shade) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                temp_override_f: temp_override,
                is_day_override: is_day,
            };
            let advisory = service.home(&request).await?;
            if target.json {
                println!("{}", serde_json::to_string_pretty(&advisory)?);
            } else {
                print_home(&advisory);
            }
        }
        Command::Forecast { target } => {
            let request = ForecastRequest {
                location: target.location,
                unit: target.unit,
            };
            let advisory = service.forecast(&request).await?;
            if target.json {
                println!("{}", serde_json::to_string_pretty(&advisory)?);
            } else {
                print_forecast(&advisory);
            }
        }
        Command::Serve { port } => {
            web::run(Arc::new(service), port.unwrap_or(config.server.port)).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = e
                .downcast_ref::<PawcastError>()
                .map_or_else(|| format!("{e:#}"), PawcastError::user_message);
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_advise() {
        let cli = Cli::parse_from([
            "pawcast", "advise", "--location", "97205", "--size", "small", "--senior",
            "--no-shade", "--temp-override", "-4", "--unit", "C",
        ]);
        let Command::Advise {
            target,
            pet,
            shade,
            no_shade,
            temp_override,
            ..
        } = cli.command
        else {
            panic!("expected advise");
        };
        assert_eq!(target.location.as_deref(), Some("97205"));
        assert_eq!(target.unit, Some(TemperatureUnit::Celsius));
        assert_eq!(pet.profile().size, PetSize::Small);
        assert!(pet.profile().senior);
        assert!(!shade && no_shade);
        assert_eq!(temp_override, Some(-4.0));
    }

    #[test]
    fn test_shade_flags_conflict() {
        let result = Cli::try_parse_from(["pawcast", "advise", "--shade", "--no-shade"]);
        assert!(result.is_err());
    }
}
