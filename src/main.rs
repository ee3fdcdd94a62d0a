use clap::{Parser, Subcommand};
use dishdirect::config::DiscoveryConfig;
use dishdirect::discovery::{
    cuisines, refine, seed_places, Discovery, GeoDiscoveryService, GeoPoint, ListingQuery,
    PointOfInterest, SortKey, DEFAULT_RADIUS_KM,
};
use dishdirect::server;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

/// DishDirect — find restaurants to donate to near a location.
///
/// Queries OpenStreetMap for nearby restaurants and falls back to a
/// built-in dataset when offline or when nothing is found.
///
/// Examples:
///   dishdirect discover --lat 18.1124 --lng 83.3956
///   dishdirect discover --place "Vizianagaram" --radius 5 --sort rating
///   dishdirect discover --offline
///   dishdirect serve --port 3000
#[derive(Parser)]
#[command(name = "dishdirect", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: DiscoveryConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List restaurants near a point or a named place.
    Discover {
        /// Latitude (-90 to 90).
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,

        /// Longitude (-180 to 180).
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,

        /// Place name to geocode when no coordinates are given.
        #[arg(long, short = 'p')]
        place: Option<String>,

        /// Search radius in kilometers.
        #[arg(long, short = 'r', default_value_t = DEFAULT_RADIUS_KM, allow_hyphen_values = true)]
        radius: f64,

        /// Only restaurants whose name contains this text.
        #[arg(long)]
        search: Option<String>,

        /// Only restaurants of this cuisine ("all" for every cuisine).
        #[arg(long)]
        cuisine: Option<String>,

        /// Ordering: distance, rating or donations.
        #[arg(long, default_value = "distance")]
        sort: SortKey,
    },

    /// Run the HTTP API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 3000)]
        port: u16,
    },

    /// Print the built-in restaurant dataset as JSON.
    Seeds,
}

fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Discover { lat, lng, place, radius, search, cuisine, sort } => {
            let service = GeoDiscoveryService::new(&cli.config);
            let reference = lat.zip(lng).map(|(lat, lng)| GeoPoint::new(lat, lng));

            let discovery = service
                .discover_with_source(reference, radius, place.as_deref())
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });

            let listing = ListingQuery { search, cuisine, sort };
            print_summary(&discovery, radius);
            let places = refine(discovery.places, &listing);
            eprint!("{}", render_table(&places));
            print_json(&places);
        }
        Command::Serve { host, port } => {
            let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
                eprintln!("Error: Cannot start runtime: {}", e);
                std::process::exit(1);
            });
            if let Err(e) = runtime.block_on(server::start(&host, port, &cli.config)) {
                eprintln!("Error: Server on {}:{} failed: {}", host, port, e);
                std::process::exit(1);
            }
        }
        Command::Seeds => print_json(&seed_places()),
    }
}

fn print_summary(discovery: &Discovery, radius: f64) {
    match discovery.reference {
        Some(point) => eprintln!(
            "  \u{1F4CD} {} \u{2014} within {} km ({})",
            point, radius, discovery.source
        ),
        None => eprintln!("  \u{1F4CD} No location \u{2014} showing {} restaurants", discovery.source),
    }
    let kinds = cuisines(&discovery.places);
    if !kinds.is_empty() {
        eprintln!("  \u{1F37D}  Cuisines: {}", kinds.join(", "));
    }
}

fn render_table(places: &[PointOfInterest]) -> String {
    if places.is_empty() {
        return "  No restaurants found. Try a larger --radius.\n".to_string();
    }
    let mut out = String::new();
    for (i, p) in places.iter().enumerate() {
        let distance = p
            .distance_km
            .map(|d| format!("{:>6.2} km", d))
            .unwrap_or_else(|| "      \u{2014}  ".to_string());
        let rating = p
            .rating
            .map(|r| format!("{:.1}\u{2605}", r))
            .unwrap_or_else(|| "  ? ".to_string());
        let badge = if p.verified { " \u{2713}" } else { "" };
        out.push_str(&format!(
            "  {:>2}. {} {}  {}{} [{}]\n       {}\n",
            i + 1, distance, rating, p.name, badge, p.category, p.address
        ));
    }
    out
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Cannot serialize output: {}", e);
            std::process::exit(1);
        }
    }
}
