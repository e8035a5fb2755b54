use std::io::Write as _;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use uav_energy_calculator::config::{load_plan, load_vehicles, select_vehicle};
use uav_energy_calculator::export::segments::{self, Metadata};
use uav_energy_calculator::mission::simulate_mission_with_tuning;
use uav_energy_calculator::power::EfficiencyTuning;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Simulate the energy consumption of a waypoint mission"
)]
struct Cli {
    /// Vehicle catalog (YAML list or single-record TOML)
    #[arg(long, default_value = "configs/vehicles.yaml")]
    vehicles: PathBuf,

    /// Vehicle name from the catalog (defaults to the first entry)
    #[arg(long)]
    vehicle: Option<String>,

    /// Mission plan file (waypoints plus optional wind)
    #[arg(long)]
    plan: PathBuf,

    /// Write per-segment results as CSV ('-' for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full mission result as a JSON report
    #[arg(long)]
    json: Option<PathBuf>,

    /// Scale factor on the efficiency sweet-spot curve
    #[arg(long, default_value_t = 1.0)]
    efficiency_multiplier: f64,

    /// Cap on the efficiency gain relative to hover
    #[arg(long, default_value_t = 0.35)]
    max_efficiency_gain: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let catalog = load_vehicles(&cli.vehicles)?;
    let vehicle = select_vehicle(&catalog, cli.vehicle.as_deref())?;
    let plan = load_plan(&cli.plan)?;

    let waypoints = plan.waypoints();
    let wind = plan.resolve_wind();
    let tuning = EfficiencyTuning {
        curve_multiplier: cli.efficiency_multiplier,
        max_efficiency_gain: cli.max_efficiency_gain,
    };

    let result = simulate_mission_with_tuning(vehicle, &waypoints, &wind, &tuning)?;

    println!("=== Mission Report: {} ===", plan.name);
    println!("Vehicle: {}", result.vehicle);
    println!(
        "Route: {} waypoints, {:.2} km, {} segments",
        waypoints.len(),
        result.total_distance_m / 1000.0,
        result.segments.len()
    );
    for segment in &result.segments {
        println!(
            "  segment {}: {:.0} m in {:.0} s, {:.1} Wh at {:.0} W (headwind {:+.1} m/s)",
            segment.index,
            segment.distance_m,
            segment.duration_s,
            segment.energy_wh,
            segment.average_power_w,
            segment.wind.headwind_ms
        );
    }
    println!(
        "Energy: {:.1} Wh of {:.1} Wh ({:.1}% of battery)",
        result.total_energy_wh, result.summary.battery_capacity_wh, result.battery_usage_percent
    );
    println!(
        "Flight time: {:.1} min, {:.1} Wh/km, average {:.1} m/s",
        result.summary.flight_time_minutes,
        result.summary.energy_per_km_wh,
        result.summary.average_speed_ms
    );
    println!(
        "Feasible: {} (est. max range {:.1} km)",
        if result.summary.is_feasible { "yes" } else { "no" },
        result.summary.max_range_estimate_km
    );
    if result.summary.guard_fallback_segments > 0 {
        println!(
            "Warning: {} segment(s) used the fallback power estimate",
            result.summary.guard_fallback_segments
        );
    }

    if let Some(csv_path) = &cli.csv {
        let mut writer = segments::writer_for_path(csv_path)?;
        segments::write_csv(writer.as_mut(), &result)?;
        writer.flush()?;
    }

    if let Some(json_path) = &cli.json {
        let generated_utc = Utc::now().to_rfc3339();
        let meta = Metadata {
            vehicle: &result.vehicle,
            plan: &plan.name,
            generated_utc: &generated_utc,
        };
        segments::write_report(json_path, &meta, &result)?;
    }

    Ok(())
}
