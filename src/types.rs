use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Serde view of one raw CSV row. Every field is optional at this point; the
/// loader decides which absences are fatal. The coordinate columns present in
/// the export (`X_COORD_CD`, `Y_COORD_CD`, `Latitude`, `Longitude`,
/// `Lon_Lat`) are checked for header presence and then dropped, so they are
/// deliberately not represented here.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "OCCUR_DATE")]
    pub occur_date: Option<String>,
    #[serde(rename = "OCCUR_TIME")]
    pub occur_time: Option<String>,
    #[serde(rename = "BORO")]
    pub borough: Option<String>,
    #[serde(rename = "PRECINCT")]
    pub precinct: Option<String>,
    #[serde(rename = "JURISDICTION_CODE")]
    pub jurisdiction_code: Option<String>,
    #[serde(rename = "LOCATION_DESC")]
    pub location_desc: Option<String>,
    #[serde(rename = "STATISTICAL_MURDER_FLAG")]
    pub statistical_murder_flag: Option<String>,
    #[serde(rename = "PERP_AGE_GROUP")]
    pub perp_age_group: Option<String>,
    #[serde(rename = "PERP_SEX")]
    pub perp_sex: Option<String>,
    #[serde(rename = "PERP_RACE")]
    pub perp_race: Option<String>,
    #[serde(rename = "VIC_AGE_GROUP")]
    pub vic_age_group: Option<String>,
    #[serde(rename = "VIC_SEX")]
    pub vic_sex: Option<String>,
    #[serde(rename = "VIC_RACE")]
    pub vic_race: Option<String>,
}

/// Typed record straight out of the loader. Columns that the dataset allows
/// to be blank keep an explicit `Option`; everything else is already parsed
/// and non-null.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub occur_date: NaiveDate,
    pub occur_time: NaiveTime,
    pub borough: String,
    pub precinct: u32,
    pub jurisdiction_code: Option<i32>,
    pub location_desc: Option<String>,
    pub statistical_murder_flag: bool,
    pub perp_age_group: Option<String>,
    pub perp_sex: Option<String>,
    pub perp_race: Option<String>,
    pub vic_age_group: String,
    pub vic_sex: String,
    pub vic_race: String,
}

/// Cleaner output: the same record with every fill policy applied, so no
/// field is missing anywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub occur_date: NaiveDate,
    pub occur_time: NaiveTime,
    pub borough: String,
    pub precinct: u32,
    pub jurisdiction_code: i32,
    pub location_desc: String,
    pub statistical_murder_flag: bool,
    pub perp_age_group: String,
    pub perp_sex: String,
    pub perp_race: String,
    pub vic_age_group: String,
    pub vic_sex: String,
    pub vic_race: String,
}

/// Final analysis shape: a clean record plus the derived calendar fields and
/// the per-row victim unit. Produced once, in chronological order, and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRecord {
    pub occur_date: NaiveDate,
    pub occur_time: NaiveTime,
    pub borough: String,
    pub precinct: u32,
    pub jurisdiction_code: i32,
    pub location_desc: String,
    pub statistical_murder_flag: bool,
    pub perp_age_group: String,
    pub perp_sex: String,
    pub perp_race: String,
    pub vic_age_group: String,
    pub vic_sex: String,
    pub vic_race: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub victim_count: u32,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct VictimProfileRow {
    #[serde(rename = "AgeGroup")]
    #[tabled(rename = "AgeGroup")]
    pub age_group: String,
    #[serde(rename = "Sex")]
    #[tabled(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Race")]
    #[tabled(rename = "Race")]
    pub race: String,
    #[serde(rename = "Victims")]
    #[tabled(rename = "Victims")]
    pub victims: u64,
    #[serde(rename = "ShareOfTotal")]
    #[tabled(rename = "ShareOfTotal")]
    pub share_of_total: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct YearlyTrendRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: u64,
    #[serde(rename = "Murders")]
    #[tabled(rename = "Murders")]
    pub murders: u64,
    #[serde(rename = "PercentFatal")]
    #[tabled(rename = "PercentFatal")]
    pub percent_fatal: String,
    #[serde(rename = "PredictedMurders")]
    #[tabled(rename = "PredictedMurders")]
    pub predicted_murders: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_victims: usize,
    pub distinct_precincts: usize,
    pub distinct_boroughs: usize,
    pub percent_fatal: f64,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}
