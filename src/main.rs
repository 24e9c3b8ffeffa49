//! PathX - one-shot route lookup
//!
//! Usage:
//!   pathx --start "49.41461, 8.681495" --end "49.420318, 8.687872" --vehicle Diesel
//!
//! Environment:
//!   ORS_API_KEY      - OpenRouteService key (required)
//!   ORS_BASE_URL     - Provider base URL (default: https://api.openrouteservice.org)
//!   ORS_TIMEOUT_SECS - Request timeout (default: 10)

use clap::Parser;
use eyre::Result;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use pathx::{
    parse_lat_lon, AppError, ErrorKind, MapView, Profile, RouteClient, RouteConfig, RouteResult,
    RouteSummary, VehicleType,
};

#[derive(Debug, Parser)]
#[command(name = "pathx", version, about = "Plan a route and estimate its CO₂ emissions")]
struct Cli {
    /// Start as "lat, lon"
    #[arg(long, allow_hyphen_values = true)]
    start: String,

    /// End as "lat, lon"
    #[arg(long, allow_hyphen_values = true)]
    end: String,

    /// Petrol, Diesel or Electric
    #[arg(long, default_value = "Petrol")]
    vehicle: String,

    /// Travel profile, e.g. driving-car, driving-hgv, foot-walking
    #[arg(long, default_value = "driving-car")]
    profile: String,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let plan = match plan_route(&cli).await {
        Ok(plan) => plan,
        Err(e) => {
            debug!(code = e.code_str(), kind = e.kind().as_str(), "route lookup failed");
            if cli.json {
                let fallback = serde_json::json!({
                    "success": false,
                    "error": {"code": e.code_str(), "message": e.message},
                    "map": MapView::default(),
                });
                println!("{}", serde_json::to_string_pretty(&fallback)?);
            } else {
                eprintln!("❌ {}", e);
                if let Some(hint) = hint_for(&e) {
                    eprintln!("   {}", hint);
                }
            }
            std::process::exit(1);
        }
    };

    if cli.json {
        let body = serde_json::json!({
            "success": true,
            "route": plan.route,
            "summary": plan.summary,
            "vehicle": plan.vehicle.info(),
            "map": plan.map,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

struct Plan {
    profile: Profile,
    vehicle: VehicleType,
    route: RouteResult,
    summary: RouteSummary,
    map: MapView,
}

async fn plan_route(cli: &Cli) -> Result<Plan, AppError> {
    let origin = parse_lat_lon(&cli.start, "start")?;
    let destination = parse_lat_lon(&cli.end, "end")?;
    let vehicle: VehicleType = cli.vehicle.parse()?;
    let profile: Profile = cli.profile.parse()?;

    let client = RouteClient::new(RouteConfig::from_env()?)?;
    let route = client.compute_route(&[origin, destination], profile).await?;

    Ok(Plan {
        profile,
        vehicle,
        summary: RouteSummary::from_route(&route, vehicle),
        map: MapView::for_route(origin, destination, &route),
        route,
    })
}

fn print_plan(plan: &Plan) {
    let summary = &plan.summary;
    let info = plan.vehicle.info();

    println!("🗺️  Route ({}, {} points)", plan.profile, plan.map.polyline.len());
    if let (Some([lat0, lon0]), Some([lat1, lon1])) = (plan.map.start(), plan.map.end()) {
        println!("   From:             {:.5}, {:.5}", lat0, lon0);
        println!("   To:               {:.5}, {:.5}", lat1, lon1);
    }
    println!("   Total Distance:   {:.1} km", summary.distance_km);
    println!("   Total Duration:   {:.1} hours", summary.duration_hours);
    if let Some(speed) = summary.average_speed_kmh {
        println!("   Average Speed:    {:.1} km/h", speed);
    }
    println!("   CO₂ Emissions:    {:.2} kg", summary.emissions_kg);
    if let Some(efficiency) = summary.efficiency_km_per_kg {
        println!("   Fuel Efficiency:  {:.1} km/kg CO₂", efficiency);
    }
    println!();
    println!("🚗 Vehicle: {}", plan.vehicle);
    println!("   Fuel Type:        {}", info.fuel_type);
    println!("   Avg Consumption:  {}", info.avg_consumption);
    println!("   CO₂ per km:       {} kg", info.co2_kg_per_km);
    println!("   Typical Range:    {}", info.typical_range);
}

fn hint_for(err: &AppError) -> Option<&'static str> {
    match err.kind() {
        ErrorKind::Configuration => {
            Some("Set ORS_API_KEY to your OpenRouteService key and try again.")
        }
        ErrorKind::NoRoute => Some("No route found. Try different locations."),
        ErrorKind::Request if err.is_retryable() => {
            Some("The routing service is unreachable right now. Try again later.")
        }
        _ => None,
    }
}
