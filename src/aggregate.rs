// Grouping and summation over the analysis records.
//
// `group_sum` is the one generic group-by: an ordered key list drawn from the
// categorical and derived fields, summing either the victim unit or the
// murder flag (bool as 0/1). Output rows appear in first-encounter order of
// their key tuple, which makes downstream tie-breaking deterministic.
use crate::ratio;
use crate::types::AnalysisRecord;
use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One grouping dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Borough,
    Precinct,
    OccurDate,
    JurisdictionCode,
    LocationDesc,
    Year,
    Month,
    Day,
    PerpAgeGroup,
    PerpSex,
    PerpRace,
    VicAgeGroup,
    VicSex,
    VicRace,
}

impl GroupKey {
    pub fn name(self) -> &'static str {
        match self {
            GroupKey::Borough => "Borough",
            GroupKey::Precinct => "Precinct",
            GroupKey::OccurDate => "Date",
            GroupKey::JurisdictionCode => "Jurisdiction",
            GroupKey::LocationDesc => "LocationDesc",
            GroupKey::Year => "Year",
            GroupKey::Month => "Month",
            GroupKey::Day => "Day",
            GroupKey::PerpAgeGroup => "PerpAgeGroup",
            GroupKey::PerpSex => "PerpSex",
            GroupKey::PerpRace => "PerpRace",
            GroupKey::VicAgeGroup => "VicAgeGroup",
            GroupKey::VicSex => "VicSex",
            GroupKey::VicRace => "VicRace",
        }
    }

    fn value(self, r: &AnalysisRecord) -> KeyValue {
        match self {
            GroupKey::Borough => KeyValue::Text(r.borough.clone()),
            GroupKey::Precinct => KeyValue::Int(r.precinct as i64),
            GroupKey::OccurDate => KeyValue::Date(r.occur_date),
            GroupKey::JurisdictionCode => KeyValue::Int(r.jurisdiction_code as i64),
            GroupKey::LocationDesc => KeyValue::Text(r.location_desc.clone()),
            GroupKey::Year => KeyValue::Int(r.year as i64),
            GroupKey::Month => KeyValue::Int(r.month as i64),
            GroupKey::Day => KeyValue::Int(r.day as i64),
            GroupKey::PerpAgeGroup => KeyValue::Text(r.perp_age_group.clone()),
            GroupKey::PerpSex => KeyValue::Text(r.perp_sex.clone()),
            GroupKey::PerpRace => KeyValue::Text(r.perp_race.clone()),
            GroupKey::VicAgeGroup => KeyValue::Text(r.vic_age_group.clone()),
            GroupKey::VicSex => KeyValue::Text(r.vic_sex.clone()),
            GroupKey::VicRace => KeyValue::Text(r.vic_race.clone()),
        }
    }
}

/// A single key cell. Typed so that dates and codes group and render as
/// themselves instead of as ad-hoc strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Text(String),
    Int(i64),
    Date(NaiveDate),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Text(s) => f.write_str(s),
            KeyValue::Int(v) => write!(f, "{}", v),
            KeyValue::Date(d) => write!(f, "{}", d),
        }
    }
}

/// What gets summed within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    VictimCount,
    MurderFlag,
}

impl Measure {
    pub fn name(self) -> &'static str {
        match self {
            Measure::VictimCount => "Victims",
            Measure::MurderFlag => "Murders",
        }
    }

    fn value(self, r: &AnalysisRecord) -> u64 {
        match self {
            Measure::VictimCount => r.victim_count as u64,
            Measure::MurderFlag => r.statistical_murder_flag as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub keys: Vec<KeyValue>,
    pub total: u64,
}

#[derive(Debug, Clone)]
pub struct AggregateTable {
    pub key_names: Vec<&'static str>,
    pub measure: &'static str,
    pub rows: Vec<AggregateRow>,
}

pub fn group_sum(records: &[AnalysisRecord], keys: &[GroupKey], measure: Measure) -> AggregateTable {
    let mut index: HashMap<Vec<KeyValue>, usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();
    for r in records {
        let key: Vec<KeyValue> = keys.iter().map(|k| k.value(r)).collect();
        let v = measure.value(r);
        match index.entry(key) {
            Entry::Occupied(e) => rows[*e.get()].total += v,
            Entry::Vacant(e) => {
                let keys = e.key().clone();
                e.insert(rows.len());
                rows.push(AggregateRow { keys, total: v });
            }
        }
    }
    AggregateTable {
        key_names: keys.iter().map(|k| k.name()).collect(),
        measure: measure.name(),
        rows,
    }
}

/// Distinct values of one column, counted over the records themselves. Never
/// derived from a multi-key aggregate's row count, which would overstate the
/// cardinality.
pub fn distinct_count(records: &[AnalysisRecord], key: GroupKey) -> usize {
    records
        .iter()
        .map(|r| key.value(r))
        .collect::<HashSet<_>>()
        .len()
}

/// Yearly roll-up: victim units and murder flags summed per year, with the
/// fatal share of each year's incidents. Rows come out in ascending year
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySummary {
    pub year: i32,
    pub incidents: u64,
    pub murders: u64,
    pub percent_fatal: f64,
}

pub fn yearly_summary(records: &[AnalysisRecord]) -> Vec<YearlySummary> {
    let mut map: HashMap<i32, (u64, u64)> = HashMap::new();
    for r in records {
        let e = map.entry(r.year).or_insert((0, 0));
        e.0 += r.victim_count as u64;
        e.1 += r.statistical_murder_flag as u64;
    }
    let mut rows: Vec<YearlySummary> = map
        .into_iter()
        .map(|(year, (incidents, murders))| YearlySummary {
            year,
            incidents,
            murders,
            // A year group always holds at least one record.
            percent_fatal: ratio::share_of_total(murders as f64, incidents as f64).unwrap_or(0.0),
        })
        .collect();
    rows.sort_by_key(|r| r.year);
    rows
}
