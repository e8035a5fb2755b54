use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a power-vs-speed chart from a sweep CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/power_curve.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 700)]
    height: u32,
}

#[derive(Debug, Clone, Copy)]
struct Row {
    speed_ms: f64,
    primary_w: f64,
    glauert_w: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let rows = read_rows(&cli.input)?;
    if rows.is_empty() {
        return Err(anyhow::anyhow!("No sweep rows in the provided CSV"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;

    let speed_min = rows.first().map(|r| r.speed_ms).unwrap_or(0.0);
    let speed_max = rows.last().map(|r| r.speed_ms).unwrap_or(1.0);
    let power_max = rows
        .iter()
        .flat_map(|r| [r.primary_w, r.glauert_w])
        .fold(f64::NEG_INFINITY, f64::max);
    if !power_max.is_finite() || speed_max <= speed_min {
        return Err(anyhow::anyhow!("Sweep CSV does not span a plottable range"));
    }

    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Electrical power vs speed".to_string(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(speed_min..speed_max, 0.0..power_max * 1.05)?;

    chart
        .configure_mesh()
        .x_desc("Ground speed (m/s)")
        .y_desc("Electrical power (W)")
        .label_style(label_font.clone())
        .x_labels(8)
        .y_labels(8)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.speed_ms, r.primary_w)),
            ShapeStyle::from(&BLUE).stroke_width(2),
        ))?
        .label("empirical model")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ShapeStyle::from(&BLUE)));

    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.speed_ms, r.glauert_w)),
            ShapeStyle::from(&RED).stroke_width(2),
        ))?
        .label("momentum theory")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ShapeStyle::from(&RED)));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .label_font(label_font)
        .draw()?;

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_rows(path: &str) -> anyhow::Result<Vec<Row>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let speed_idx = column(&headers, "speed_ms")?;
    let primary_idx = column(&headers, "primary_w")?;
    let glauert_idx = column(&headers, "glauert_w")?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(Row {
            speed_ms: record[speed_idx].parse()?,
            primary_w: record[primary_idx].parse()?,
            glauert_w: record[glauert_idx].parse()?,
        });
    }
    rows.sort_by(|a, b| a.speed_ms.total_cmp(&b.speed_ms));
    Ok(rows)
}

fn column(headers: &csv::StringRecord, name: &str) -> anyhow::Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
}
