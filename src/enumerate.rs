// Chronological ordering and calendar derivation.
//
// Records are sorted ascending by (date, time) with a stable sort, so rows
// sharing a timestamp keep their original relative order. Each record then
// gains its month/day/year fields and a victim unit of 1; nothing else is
// touched.
use crate::types::{AnalysisRecord, CleanRecord};
use chrono::Datelike;

pub fn enumerate_records(mut records: Vec<CleanRecord>) -> Vec<AnalysisRecord> {
    records.sort_by(|a, b| (a.occur_date, a.occur_time).cmp(&(b.occur_date, b.occur_time)));
    records
        .into_iter()
        .map(|r| AnalysisRecord {
            year: r.occur_date.year(),
            month: r.occur_date.month(),
            day: r.occur_date.day(),
            victim_count: 1,
            occur_date: r.occur_date,
            occur_time: r.occur_time,
            borough: r.borough,
            precinct: r.precinct,
            jurisdiction_code: r.jurisdiction_code,
            location_desc: r.location_desc,
            statistical_murder_flag: r.statistical_murder_flag,
            perp_age_group: r.perp_age_group,
            perp_sex: r.perp_sex,
            perp_race: r.perp_race,
            vic_age_group: r.vic_age_group,
            vic_sex: r.vic_sex,
            vic_race: r.vic_race,
        })
        .collect()
}
