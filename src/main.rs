use clap::{Parser, Subcommand};
use geo_tools::country::country_name;
use geo_tools::distance::{distance_km, distance_m};
use geo_tools::geocoding::{GeoCoordinate, Geocoder, GeocoderConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// geotool — geocoding, reverse geocoding, distances and country names.
///
/// Lookups are cached permanently under the cache directory; repeated
/// queries are answered without touching the network.
///
/// Examples:
///   geotool country sg
///   geotool geocode "NTU, Singapore"
///   geotool reverse 1.3483 103.6831
///   geotool distance 1.304833 103.831833 1.346479 103.683478
///   geotool demo
#[derive(Parser)]
#[command(name = "geotool", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Cache directory. Defaults to ~/.geotools.
    #[arg(long, global = true, env = "GEOTOOLS_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Geocoding API key, sent as the `key` parameter.
    #[arg(long, global = true, env = "GEOTOOLS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Geocoding endpoint URL.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Offline mode: answer from the cache only.
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the country name for an ISO 3166-1 alpha-2 code.
    Country { code: String },

    /// Resolve an address to coordinates.
    Geocode { address: String },

    /// Resolve coordinates to an address.
    #[command(allow_negative_numbers = true)]
    Reverse { lat: f64, lng: f64 },

    /// Distance between two points (kilometers unless --meters).
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
        #[arg(long)]
        meters: bool,
    },

    /// Country lookup, two geocodes, and the distance between them.
    Demo {
        #[arg(default_value = "NTU, Singapore")]
        from: String,
        #[arg(default_value = "NUS, Singapore")]
        to: String,
        #[arg(long, default_value = "us")]
        country: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("geo_tools=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Country { code } => match country_name(code) {
            Some(name) => println!("{}", name),
            None => fail(&format!("Unknown country code '{}'", code)),
        },
        Command::Geocode { address } => {
            let geocoder = build_geocoder(&cli);
            let coord = geocode_or_exit(&geocoder, address);
            println!("{} is at {}", address, coord);
        }
        Command::Reverse { lat, lng } => {
            if let Err(e) = GeoCoordinate::new(*lat, *lng) {
                fail(&e.to_string());
            }
            let geocoder = build_geocoder(&cli);
            match geocoder.reverse_geocode(*lat, *lng) {
                Some(address) => println!("{}", address),
                None => fail(&format!("Could not resolve ({}, {})", lat, lng)),
            }
        }
        Command::Distance { lat1, lon1, lat2, lon2, meters } => {
            if *meters {
                println!("{}", distance_m(*lat1, *lon1, *lat2, *lon2));
            } else {
                println!("{}", distance_km(*lat1, *lon1, *lat2, *lon2));
            }
        }
        Command::Demo { from, to, country } => {
            match country_name(country) {
                Some(name) => println!("{}", name),
                None => println!("Unknown country code '{}'", country),
            }
            let geocoder = build_geocoder(&cli);
            let a = geocode_or_exit(&geocoder, from);
            println!("{} is at {}", from, a);
            let b = geocode_or_exit(&geocoder, to);
            println!("{} is at {}", to, b);
            println!("{} is {} km away from {}", from, a.distance_km(&b), to);
        }
    }
}

fn build_geocoder(cli: &Cli) -> Geocoder {
    let mut config = GeocoderConfig::default();
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = dir.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    config.api_key = cli.api_key.clone();

    let mut geocoder = Geocoder::new(config);
    geocoder.set_offline(cli.offline);
    geocoder
}

fn geocode_or_exit(geocoder: &Geocoder, address: &str) -> GeoCoordinate {
    geocoder
        .forward_geocode(address)
        .unwrap_or_else(|e| fail(&format!("Could not resolve '{}': {}", address, e)))
}

fn fail(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}
