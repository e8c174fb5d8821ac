use crate::types::{IncidentRecord, RawRow};
use crate::util::{non_empty, parse_bool, parse_date, parse_i32, parse_time, parse_u32};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use thiserror::Error;

/// Fatal ingestion failures. A malformed value in any required column aborts
/// the load and names the offending row and column; rows are never silently
/// dropped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),
    #[error("input is missing required column {0}")]
    MissingColumn(&'static str),
    #[error("row {row}, column {column}: missing required value")]
    MissingValue { row: usize, column: &'static str },
    #[error("row {row}, column {column}: cannot parse {value:?}")]
    BadValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// The fixed column contract of the export. The last five are positional
// coordinate columns: their presence is part of the contract, but their
// values are dropped before a record is built.
static REQUIRED_COLUMNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "OCCUR_DATE",
        "OCCUR_TIME",
        "BORO",
        "PRECINCT",
        "JURISDICTION_CODE",
        "LOCATION_DESC",
        "STATISTICAL_MURDER_FLAG",
        "PERP_AGE_GROUP",
        "PERP_SEX",
        "PERP_RACE",
        "VIC_AGE_GROUP",
        "VIC_SEX",
        "VIC_RACE",
        "X_COORD_CD",
        "Y_COORD_CD",
        "Latitude",
        "Longitude",
        "Lon_Lat",
    ]
    .into_iter()
    .collect()
});

/// Load and type every row from a CSV source. Works over any reader so that
/// the file-fetching collaborator (or a test) can hand in whatever transport
/// it likes.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<IncidentRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let present: HashSet<&str> = headers.iter().collect();
    for &column in REQUIRED_COLUMNS.iter() {
        if !present.contains(column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // 1-based data row numbers, matching what a spreadsheet user counts.
        let row = idx + 1;
        let raw = result?;
        records.push(typed_record(row, raw)?);
    }
    Ok(records)
}

pub fn load_path(path: &str) -> Result<Vec<IncidentRecord>, LoadError> {
    let file = File::open(path)?;
    load_records(file)
}

fn typed_record(row: usize, raw: RawRow) -> Result<IncidentRecord, LoadError> {
    let occur_date = parse_date(raw.occur_date.as_deref())
        .ok_or_else(|| value_error(row, "OCCUR_DATE", &raw.occur_date))?;
    let occur_time = parse_time(raw.occur_time.as_deref())
        .ok_or_else(|| value_error(row, "OCCUR_TIME", &raw.occur_time))?;
    let borough =
        non_empty(raw.borough.as_deref()).ok_or(LoadError::MissingValue { row, column: "BORO" })?;
    let precinct = parse_u32(raw.precinct.as_deref())
        .ok_or_else(|| value_error(row, "PRECINCT", &raw.precinct))?;
    let statistical_murder_flag = parse_bool(raw.statistical_murder_flag.as_deref())
        .ok_or_else(|| value_error(row, "STATISTICAL_MURDER_FLAG", &raw.statistical_murder_flag))?;

    // Nullable numeric column: absence is fine (the cleaner fills it), but a
    // present value that does not parse is still a fatal error.
    let jurisdiction_code = match non_empty(raw.jurisdiction_code.as_deref()) {
        None => None,
        Some(v) => Some(parse_i32(Some(v.as_str())).ok_or(LoadError::BadValue {
            row,
            column: "JURISDICTION_CODE",
            value: v,
        })?),
    };

    let vic_age_group = non_empty(raw.vic_age_group.as_deref()).ok_or(LoadError::MissingValue {
        row,
        column: "VIC_AGE_GROUP",
    })?;
    let vic_sex = non_empty(raw.vic_sex.as_deref()).ok_or(LoadError::MissingValue {
        row,
        column: "VIC_SEX",
    })?;
    let vic_race = non_empty(raw.vic_race.as_deref()).ok_or(LoadError::MissingValue {
        row,
        column: "VIC_RACE",
    })?;

    Ok(IncidentRecord {
        occur_date,
        occur_time,
        borough,
        precinct,
        jurisdiction_code,
        location_desc: non_empty(raw.location_desc.as_deref()),
        statistical_murder_flag,
        perp_age_group: non_empty(raw.perp_age_group.as_deref()),
        perp_sex: non_empty(raw.perp_sex.as_deref()),
        perp_race: non_empty(raw.perp_race.as_deref()),
        vic_age_group,
        vic_sex,
        vic_race,
    })
}

fn value_error(row: usize, column: &'static str, value: &Option<String>) -> LoadError {
    match value {
        Some(v) if !v.trim().is_empty() => LoadError::BadValue {
            row,
            column,
            value: v.clone(),
        },
        _ => LoadError::MissingValue { row, column },
    }
}
