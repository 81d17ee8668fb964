use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farelink::client::{AirportSearch, ClientOptions, DuffelClient};
use farelink::error::ApiError;
use farelink::model::{CabinClass, PricedOffer};
use farelink::query::{FlightQuery, Passengers};
use farelink::table;

#[derive(Parser)]
#[command(
    name = "farelink",
    about = "Search and book flights from the terminal via the Duffel API",
    version,
    after_help = "\
Examples:
  farelink search -f JFK -t LHR -d 2026-04-01
  farelink search -f HEL -t BCN -d 2026-03-01 --json --pretty
  farelink search -f LAX -t NRT -d 2026-05-01 --return-date 2026-05-15
  farelink search -f HEL -t BKK -d 2026-03-01 --cabin business --max-connections 1
  farelink airports \"London\" --limit 5
  farelink airlines --limit 20
  farelink order ord_00009hthhsUZ8W4LxQgkjo
  farelink ping

Authentication:
  Set DUFFEL_API_TOKEN, or pass --token to any command."
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "TOKEN",
        help = "Duffel API token (overrides DUFFEL_API_TOKEN)"
    )]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Search for flights",
        long_about = "Search for flights between airports on specific dates.\n\
            Prices include the storefront markup; the raw upstream amount is \n\
            reported as original_amount in JSON output.",
        after_help = "\
Examples:
  One-way:      farelink search -f JFK -t LHR -d 2026-04-01
  Round-trip:   farelink search -f LAX -t NRT -d 2026-05-01 --return-date 2026-05-15
  Business:     farelink search -f HEL -t BKK -d 2026-03-01 --cabin business --max-connections 1
  JSON output:  farelink search -f HEL -t BCN -d 2026-03-01 --json --pretty
  Agent-optimized: farelink search -f HEL -t BCN -d 2026-03-01 --compact --top 3"
    )]
    Search(SearchArgs),

    #[command(about = "Search airports by name, city, or IATA code")]
    Airports(AirportsArgs),

    #[command(about = "List airlines")]
    Airlines(AirlinesArgs),

    #[command(about = "Fetch a booked order by id")]
    Order(OrderArgs),

    #[command(about = "Probe Duffel API connectivity and report capabilities")]
    Ping(PingArgs),
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(
        short, long,
        value_name = "IATA",
        help = "Departure airport code",
        long_help = "Departure airport IATA code (3 letters, e.g. JFK, HEL, LAX)."
    )]
    from: String,

    #[arg(
        short, long,
        value_name = "IATA",
        help = "Arrival airport code",
        long_help = "Arrival airport IATA code (3 letters, e.g. LHR, BCN, NRT)."
    )]
    to: String,

    #[arg(
        short, long,
        value_name = "YYYY-MM-DD",
        help = "Departure date",
        long_help = "Departure date in YYYY-MM-DD format."
    )]
    date: String,

    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Return date (adds a return slice)",
        long_help = "Return date in YYYY-MM-DD format. Adds a return slice to the search."
    )]
    return_date: Option<String>,

    #[arg(
        long,
        default_value = "economy",
        value_name = "CLASS",
        help = "Cabin class [economy, premium-economy, business, first]"
    )]
    cabin: String,

    #[arg(
        long,
        value_name = "N",
        help = "Maximum connections per slice (0 = nonstop only)"
    )]
    max_connections: Option<u32>,

    #[arg(long, default_value = "1", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Number of child passengers (2-11)")]
    children: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Number of infant passengers (under 2)")]
    infants: u32,

    #[arg(long, value_name = "N", help = "Show only the N cheapest results")]
    top: Option<usize>,

    #[arg(long, help = "One-line-per-offer output (recommended for scripts and AI agents)")]
    compact: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct AirportsArgs {
    #[arg(value_name = "QUERY", help = "Free-text query (city, airport name, or IATA code)")]
    query: String,

    #[arg(long, value_name = "N", help = "Maximum results [default: 8]")]
    limit: Option<usize>,

    #[arg(long, value_name = "DEG", help = "Latitude to bias results toward", requires = "lng")]
    lat: Option<f64>,

    #[arg(long, value_name = "DEG", help = "Longitude to bias results toward", requires = "lat")]
    lng: Option<f64>,

    #[arg(long, value_name = "KM", help = "Search radius in kilometers", requires = "lat")]
    radius: Option<u32>,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct AirlinesArgs {
    #[arg(long, value_name = "N", help = "Page size")]
    limit: Option<u32>,

    #[arg(long, value_name = "CURSOR", help = "Fetch the page after this cursor")]
    after: Option<String>,

    #[arg(long, value_name = "CURSOR", help = "Fetch the page before this cursor")]
    before: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct OrderArgs {
    #[arg(value_name = "ORDER_ID", help = "Duffel order id (ord_...)")]
    id: String,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct PingArgs {
    #[arg(long, help = "Output as JSON")]
    json: bool,
}

fn error_code(err: &ApiError) -> i32 {
    match err {
        ApiError::MissingToken
        | ApiError::InvalidAirport(_)
        | ApiError::InvalidDate(_)
        | ApiError::Validation(_) => 2,
        ApiError::Timeout
        | ApiError::ConnectionFailed(_)
        | ApiError::DnsResolution(_)
        | ApiError::TlsError(_) => 3,
        ApiError::Api { .. } => 4,
        ApiError::Json(_) => 5,
    }
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::MissingToken => "missing_token",
        ApiError::InvalidAirport(_) => "invalid_airport",
        ApiError::InvalidDate(_) => "invalid_date",
        ApiError::Validation(_) => "validation_error",
        ApiError::Timeout => "timeout",
        ApiError::ConnectionFailed(_) => "connection_failed",
        ApiError::DnsResolution(_) => "dns_error",
        ApiError::TlsError(_) => "tls_error",
        ApiError::Api { .. } => "api_error",
        ApiError::Json(_) => "parse_error",
    }
}

fn die(err: &ApiError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{}", serde_json::to_string(&json).unwrap());
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

/// The one place the ambient environment is read; the library itself never
/// touches it.
fn build_client(token: Option<String>) -> DuffelClient {
    let api_token = token.or_else(|| std::env::var("DUFFEL_API_TOKEN").ok());
    DuffelClient::new(ClientOptions {
        api_token,
        base_url: None,
    })
}

fn apply_top(offers: &mut Vec<PricedOffer>, n: usize) {
    offers.sort_by(|a, b| {
        let pa: f64 = a.display_price.parse().unwrap_or(f64::MAX);
        let pb: f64 = b.display_price.parse().unwrap_or(f64::MAX);
        pa.partial_cmp(&pb).unwrap_or(std::cmp::Ordering::Equal)
    });
    offers.truncate(n);
}

fn print_compact(offers: &[PricedOffer]) {
    for priced in offers {
        let offer = &priced.offer;
        let price = table::format_price(&priced.display_price, &offer.total_currency);

        let route: Vec<String> = offer
            .slices
            .iter()
            .map(|s| {
                format!(
                    "{}>{}",
                    s.origin.iata_code.as_deref().unwrap_or("?"),
                    s.destination.iata_code.as_deref().unwrap_or("?"),
                )
            })
            .collect();
        let route_str = route.join(" ");

        let stops: usize = offer
            .slices
            .iter()
            .map(|s| s.segments.len().saturating_sub(1))
            .sum();
        let stops_str = if stops == 0 {
            "nonstop".to_string()
        } else {
            format!("{stops} stop")
        };

        println!(
            "{price} | {route_str} | {stops_str} | {} | expires {}",
            offer.owner.name, offer.expires_at
        );
    }
}

fn print_offers(offers: &[PricedOffer], args: &SearchArgs) {
    if args.compact {
        if offers.is_empty() {
            println!("No offers found.");
            return;
        }
        print_compact(offers);
    } else if args.json || args.pretty {
        let output = if args.pretty {
            serde_json::to_string_pretty(offers).unwrap()
        } else {
            serde_json::to_string(offers).unwrap()
        };
        println!("{output}");
    } else {
        if offers.is_empty() {
            println!("No offers found.");
            return;
        }
        println!("{}", table::render_offers(offers));
    }
}

async fn run_search(client: DuffelClient, args: SearchArgs) {
    let json_mode = args.json || args.pretty;

    let cabin = match CabinClass::from_str_loose(&args.cabin) {
        Ok(c) => c,
        Err(e) => die(&e, json_mode),
    };

    let query = FlightQuery {
        origin: args.from.to_uppercase(),
        destination: args.to.to_uppercase(),
        departure_date: args.date.clone(),
        return_date: args.return_date.clone(),
        passengers: Passengers {
            adults: args.adults,
            children: args.children,
            infants: args.infants,
        },
        cabin,
        max_connections: args.max_connections,
    };

    if let Err(e) = query.validate() {
        die(&e, json_mode);
    }

    match client.search_flights(&query).await {
        Ok(mut offers) => {
            if let Some(n) = args.top {
                apply_top(&mut offers, n);
            }
            print_offers(&offers, &args);
        }
        Err(e) => die(&e, json_mode),
    }
}

async fn run_airports(client: DuffelClient, args: AirportsArgs) {
    let json_mode = args.json || args.pretty;

    let search = AirportSearch {
        query: args.query.clone(),
        limit: args.limit,
        latitude: args.lat,
        longitude: args.lng,
        radius_km: args.radius,
    };

    match client.search_airports(&search).await {
        Ok(airports) => {
            if json_mode {
                let output = if args.pretty {
                    serde_json::to_string_pretty(&airports).unwrap()
                } else {
                    serde_json::to_string(&airports).unwrap()
                };
                println!("{output}");
            } else if airports.is_empty() {
                println!("No airports matched \"{}\".", args.query);
            } else {
                println!("{}", table::render_airports(&airports));
            }
        }
        Err(e) => die(&e, json_mode),
    }
}

async fn run_airlines(client: DuffelClient, args: AirlinesArgs) {
    let json_mode = args.json || args.pretty;

    match client
        .list_airlines(args.limit, args.after.as_deref(), args.before.as_deref())
        .await
    {
        Ok(response) => {
            if json_mode {
                let output = if args.pretty {
                    serde_json::to_string_pretty(&response.data).unwrap()
                } else {
                    serde_json::to_string(&response.data).unwrap()
                };
                println!("{output}");
            } else {
                println!("{}", table::render_airlines(&response.data));
                if let Some(meta) = response.meta {
                    if let Some(after) = meta.after {
                        println!("next page: --after {after}");
                    }
                }
            }
        }
        Err(e) => die(&e, json_mode),
    }
}

async fn run_order(client: DuffelClient, args: OrderArgs) {
    match client.get_order(&args.id).await {
        Ok(order) => {
            let output = if args.pretty {
                serde_json::to_string_pretty(&order).unwrap()
            } else {
                serde_json::to_string(&order).unwrap()
            };
            println!("{output}");
        }
        Err(e) => die(&e, true),
    }
}

async fn run_ping(client: DuffelClient, args: PingArgs) {
    let report = client.test_connection().await;

    if args.json {
        println!("{}", serde_json::to_string(&report).unwrap());
    } else if report.connected {
        println!("connected ({})", report.capabilities.join(", "));
    } else {
        println!("not connected");
    }

    if !report.connected {
        process::exit(3);
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout is reserved for results and JSON output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farelink=error".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = build_client(cli.token);

    match cli.command {
        Commands::Search(args) => run_search(client, args).await,
        Commands::Airports(args) => run_airports(client, args).await,
        Commands::Airlines(args) => run_airlines(client, args).await,
        Commands::Order(args) => run_order(client, args).await,
        Commands::Ping(args) => run_ping(client, args).await,
    }
}
