use std::io::Write as _;
use std::path::PathBuf;

use clap::Parser;

use uav_energy_calculator::core::atmosphere::air_density;
use uav_energy_calculator::config::{load_vehicles, select_vehicle};
use uav_energy_calculator::export::{segments::writer_for_path, sweep};
use uav_energy_calculator::glauert::{
    DEFAULT_USABLE_BATTERY_FRACTION, compare_models, glauert_sweet_spot, primary_sweet_spot,
    range_at_cruise,
};
use uav_energy_calculator::power::EfficiencyTuning;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sweep the empirical power model against the momentum-theory model"
)]
struct Cli {
    /// Vehicle catalog (YAML list or single-record TOML)
    #[arg(long, default_value = "configs/vehicles.yaml")]
    vehicles: PathBuf,

    /// Vehicle name from the catalog (defaults to the first entry)
    #[arg(long)]
    vehicle: Option<String>,

    /// Flight altitude for the air-density lookup (m)
    #[arg(long, default_value_t = 100.0)]
    altitude: f64,

    /// Lowest sweep speed (m/s)
    #[arg(long, default_value_t = 0.0)]
    min_speed: f64,

    /// Highest sweep speed; defaults to the vehicle's maximum
    #[arg(long)]
    max_speed: Option<f64>,

    /// Sweep step (m/s)
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    /// Output CSV path ('-' for stdout)
    #[arg(long, default_value = "artifacts/power_curve.csv")]
    output: PathBuf,

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
    let tuning = EfficiencyTuning {
        curve_multiplier: cli.efficiency_multiplier,
        max_efficiency_gain: cli.max_efficiency_gain,
    };

    let max_speed = cli.max_speed.unwrap_or(vehicle.max_speed_ms);
    if cli.step <= 0.0 || max_speed < cli.min_speed {
        return Err(anyhow::anyhow!("Sweep range is empty"));
    }
    let mut speeds = Vec::new();
    let mut speed = cli.min_speed;
    while speed <= max_speed + 1.0e-9 {
        speeds.push(speed);
        speed += cli.step;
    }

    let density = air_density(cli.altitude);
    let points = compare_models(vehicle, &tuning, &speeds, density);

    let mut writer = writer_for_path(&cli.output)?;
    sweep::write_csv(writer.as_mut(), &points)?;
    writer.flush()?;

    eprintln!(
        "Swept {} speeds for '{}' at {:.0} m (ρ = {:.4} kg/m³)",
        points.len(),
        vehicle.name,
        cli.altitude,
        density
    );
    if let Some((speed_ms, power_w)) = primary_sweet_spot(&points) {
        eprintln!("Empirical sweet spot: {:.1} m/s at {:.0} W", speed_ms, power_w);
        let range = range_at_cruise(vehicle, speed_ms, power_w, DEFAULT_USABLE_BATTERY_FRACTION);
        eprintln!(
            "Endurance at sweet spot: {:.1} min, {:.1} km",
            range.flight_time_minutes, range.range_km
        );
    }
    if let Some((speed_ms, power_w)) = glauert_sweet_spot(&points) {
        eprintln!(
            "Momentum-theory sweet spot: {:.1} m/s at {:.0} W",
            speed_ms, power_w
        );
    }

    Ok(())
}
