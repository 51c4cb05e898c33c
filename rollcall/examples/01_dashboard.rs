mod common;

use common::get_source;
use rollcall::{Rollcall, Selection, StudentFilter, TimeRange};
use rollcall_mock::fixtures::AREAS;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logging; try RUST_LOG=rollcall=debug with `--features tracing`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Build the engine over the source.
    let rollcall = Rollcall::builder()
        .with_source(get_source()?)
        .areas(AREAS)
        .build()?;

    // 3. Load the roster.
    let summary = rollcall.refresh().await?;
    println!(
        "Loaded {} students from {} ({} omitted, {} warnings)",
        summary.students,
        summary.source,
        summary.omitted,
        summary.warnings.len()
    );
    for w in &summary.warnings {
        println!("  warning: {w}");
    }

    // 4. Rollups for every range.
    for range in TimeRange::ALL {
        let selection = Selection::new(range);
        println!("\n== {} ==", range.label());
        for team in rollcall.team_stats(&selection) {
            println!(
                "  {:<10} {:>2} students  {:>3}%  {:>6.1} h{}",
                team.team,
                team.headcount,
                team.avg_attendance_pct,
                team.hours,
                if team.trending_up() { "  ^" } else { "" }
            );
        }
        for area in rollcall.area_stats(&selection) {
            println!("  {:<12} {:>8.2} h", area.area, area.total_hours);
        }
    }

    // 5. One chart per range for the first student.
    if let Some(student) = rollcall.students(&StudentFilter::new()).first() {
        for range in TimeRange::ALL {
            match rollcall.series(student.id, &Selection::new(range)) {
                Ok(series) => println!("\n{}\n{}", student.name, serde_json::to_string_pretty(&series)?),
                Err(e) => println!("\n{}: {e}", student.name),
            }
        }
    }

    Ok(())
}
