// Entry point: one deterministic pass over the dataset.
//
// Load and type the CSV, apply the fill policies, order and enumerate the
// records, then generate the three reports and the JSON summary. Any failure
// along the way aborts the run with the underlying error; nothing is retried
// or silently recovered.
mod aggregate;
mod clean;
mod enumerate;
mod loader;
mod output;
mod rank;
mod ratio;
mod regress;
mod reports;
mod types;
mod util;

use log::info;
use std::error::Error;

const DEFAULT_INPUT: &str = "nypd_shooting_incidents.csv";

fn main() {
    pretty_env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_INPUT.to_string());

    info!("loading {}", path);
    let records = loader::load_path(&path)?;
    println!(
        "Processing dataset... ({} rows loaded)",
        util::format_int(records.len() as i64)
    );

    let (cleaned, domains) = clean::clean_records(records);
    info!(
        "cleaned: {} boroughs, {} location categories, {} perpetrator race categories",
        domains.borough.len(),
        domains.location_desc.len(),
        domains.perp_race.len()
    );
    let data = enumerate::enumerate_records(cleaned);
    println!();

    let concentration = reports::generate_concentration(&data)?;
    let file1 = "report1_precinct_concentration.csv";
    output::write_aggregate_csv(file1, &concentration.table)?;
    println!("Report 1: Precinct-Day Victim Concentration\n");
    let note = format!(
        "Top {} of {} groups",
        reports::TOP_N,
        concentration.table.rows.len()
    );
    output::preview_aggregate(
        "Borough / Precinct / Day Victim Counts",
        Some(note.as_str()),
        &concentration.top_table(),
        reports::TOP_N,
    );
    println!(
        "The top {} precinct-days account for {}% of all victims.",
        concentration.top.len(),
        util::format_number(concentration.top_share, 2)
    );
    println!("(Full table exported to {})\n", file1);

    let profile = reports::generate_victim_profile(&data)?;
    let file2 = "report2_victim_profile.csv";
    output::write_csv(file2, &profile)?;
    output::preview_table(
        "Report 2: Victim Demographic Profile",
        Some("Grouped by age group, sex, and race"),
        &profile,
        5,
    );
    println!("(Full table exported to {})\n", file2);

    let yearly = reports::generate_yearly_trend(&data)?;
    let file3 = "report3_yearly_trend.csv";
    output::write_csv(file3, &yearly.rows)?;
    output::preview_table(
        "Report 3: Yearly Incidents vs. Murders",
        Some("With fatal share and fitted predictions"),
        &yearly.rows,
        yearly.rows.len(),
    );
    println!(
        "Fitted line: murders = {} + {} x incidents (R^2 = {})",
        util::format_number(yearly.fit.intercept, 2),
        util::format_number(yearly.fit.slope, 4),
        util::format_number(yearly.fit.r_squared, 4)
    );
    println!("(Full table exported to {})\n", file3);

    let summary = reports::generate_summary(&data, &yearly.fit)?;
    output::write_json("summary.json", &summary)?;
    println!(
        "Summary (summary.json): {} victims across {} precincts in {} boroughs; {}% fatal.",
        util::format_int(summary.total_victims),
        util::format_int(summary.distinct_precincts),
        util::format_int(summary.distinct_boroughs),
        util::format_number(summary.percent_fatal, 2)
    );
    Ok(())
}
