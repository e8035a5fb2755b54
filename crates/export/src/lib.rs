//! Export helpers for CSV and JSON artifacts.

pub mod segments {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use uav_mission::{MissionResult, SegmentResult};

    const HEADER: &str = "segment,distance_m,duration_s,energy_wh,average_speed_ms,average_power_w,headwind_ms,crosswind_ms,wind_speed_ms,wind_direction_deg,bearing_deg";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard segment CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Serialize one segment to CSV, matching the standard header ordering.
    pub fn write_segment(writer: &mut dyn Write, segment: &SegmentResult) -> io::Result<()> {
        writeln!(
            writer,
            "{},{:.3},{:.3},{:.6},{:.3},{:.3},{:.3},{:.3},{:.3},{:.1},{:.1}",
            segment.index,
            segment.distance_m,
            segment.duration_s,
            segment.energy_wh,
            segment.average_speed_ms,
            segment.average_power_w,
            segment.wind.headwind_ms,
            segment.wind.crosswind_ms,
            segment.wind.speed_ms,
            segment.wind.direction_deg,
            segment.wind.bearing_deg,
        )
    }

    /// Write header plus all segments of a mission.
    pub fn write_csv(writer: &mut dyn Write, result: &MissionResult) -> io::Result<()> {
        write_header(writer)?;
        for segment in &result.segments {
            write_segment(writer, segment)?;
        }
        Ok(())
    }

    /// Metadata describing the simulation run.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub vehicle: &'a str,
        pub plan: &'a str,
        pub generated_utc: &'a str,
    }

    #[derive(Serialize)]
    struct ReportSidecar<'a> {
        vehicle: &'a str,
        plan: &'a str,
        generated_utc: &'a str,
        result: &'a MissionResult,
    }

    /// Write the full mission result as a pretty-printed JSON report.
    pub fn write_report(
        output: &Path,
        meta: &Metadata<'_>,
        result: &MissionResult,
    ) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let sidecar = ReportSidecar {
            vehicle: meta.vehicle,
            plan: meta.plan,
            generated_utc: meta.generated_utc,
            result,
        };
        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}

pub mod sweep {
    use std::io::{self, Write};

    use uav_glauert::SweepPoint;

    const HEADER: &str = "speed_ms,primary_w,glauert_w,difference_w,difference_percent";

    /// Write a primary-vs-Glauert comparison sweep as CSV.
    pub fn write_csv(writer: &mut dyn Write, points: &[SweepPoint]) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        for point in points {
            writeln!(
                writer,
                "{:.2},{:.3},{:.3},{:.3},{:.2}",
                point.speed_ms,
                point.primary_w,
                point.glauert_w,
                point.difference_w,
                point.difference_percent,
            )?;
        }
        Ok(())
    }
}
