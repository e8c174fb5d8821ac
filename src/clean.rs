// Missing-value policies and categorical domain collection.
//
// Two ordered fill policies run over every record:
//   1. the jurisdiction-code default, keyed to that single numeric column;
//   2. the "UNKNOWN" sentinel for every remaining nullable categorical column.
// The jurisdiction fill runs first so the generic sentinel can never touch
// it. Both fills are idempotent. Afterwards each categorical column's value
// domain is collected so aggregation and display work over a stable,
// enumerable set of categories (the sentinel becomes a first-class member
// wherever it was introduced).
use crate::types::{CleanRecord, IncidentRecord};
use std::collections::BTreeSet;

/// Sentinel category for a missing categorical value.
pub const UNKNOWN: &str = "UNKNOWN";

/// Code recorded when the reporting jurisdiction is absent. The dataset uses
/// 0 = patrol, 1 = transit, 2 = housing; 2 is the conventional non-patrol
/// default for this export.
pub const DEFAULT_JURISDICTION: i32 = 2;

/// Sorted value domains of every categorical column, observed after filling.
#[derive(Debug, Default, Clone)]
pub struct CategoryDomains {
    pub borough: BTreeSet<String>,
    pub location_desc: BTreeSet<String>,
    pub perp_age_group: BTreeSet<String>,
    pub perp_sex: BTreeSet<String>,
    pub perp_race: BTreeSet<String>,
    pub vic_age_group: BTreeSet<String>,
    pub vic_sex: BTreeSet<String>,
    pub vic_race: BTreeSet<String>,
}

impl CategoryDomains {
    fn observe(&mut self, r: &CleanRecord) {
        self.borough.insert(r.borough.clone());
        self.location_desc.insert(r.location_desc.clone());
        self.perp_age_group.insert(r.perp_age_group.clone());
        self.perp_sex.insert(r.perp_sex.clone());
        self.perp_race.insert(r.perp_race.clone());
        self.vic_age_group.insert(r.vic_age_group.clone());
        self.vic_sex.insert(r.vic_sex.clone());
        self.vic_race.insert(r.vic_race.clone());
    }
}

/// Apply both fill policies to every record and collect the categorical
/// domains. Total function: well-typed input always cleans.
pub fn clean_records(records: Vec<IncidentRecord>) -> (Vec<CleanRecord>, CategoryDomains) {
    let mut domains = CategoryDomains::default();
    let cleaned: Vec<CleanRecord> = records.into_iter().map(clean_record).collect();
    for r in &cleaned {
        domains.observe(r);
    }
    (cleaned, domains)
}

fn clean_record(r: IncidentRecord) -> CleanRecord {
    // Policy 1: numeric default, this column only.
    let jurisdiction_code = fill_jurisdiction(r.jurisdiction_code);
    // Policy 2: categorical sentinel for whatever is still missing.
    CleanRecord {
        occur_date: r.occur_date,
        occur_time: r.occur_time,
        borough: r.borough,
        precinct: r.precinct,
        jurisdiction_code,
        location_desc: fill_category(r.location_desc),
        statistical_murder_flag: r.statistical_murder_flag,
        perp_age_group: fill_category(r.perp_age_group),
        perp_sex: fill_category(r.perp_sex),
        perp_race: fill_category(r.perp_race),
        vic_age_group: r.vic_age_group,
        vic_sex: r.vic_sex,
        vic_race: r.vic_race,
    }
}

fn fill_jurisdiction(code: Option<i32>) -> i32 {
    code.unwrap_or(DEFAULT_JURISDICTION)
}

fn fill_category(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sparse_record() -> IncidentRecord {
        IncidentRecord {
            occur_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            occur_time: NaiveTime::from_hms_opt(1, 30, 0).unwrap(),
            borough: "MANHATTAN".to_string(),
            precinct: 14,
            jurisdiction_code: None,
            location_desc: None,
            statistical_murder_flag: false,
            perp_age_group: None,
            perp_sex: None,
            perp_race: None,
            vic_age_group: "25-44".to_string(),
            vic_sex: "M".to_string(),
            vic_race: "BLACK".to_string(),
        }
    }

    // Re-wrap a cleaned record so the fill policies can run over it again.
    fn reopen(r: &CleanRecord) -> IncidentRecord {
        IncidentRecord {
            occur_date: r.occur_date,
            occur_time: r.occur_time,
            borough: r.borough.clone(),
            precinct: r.precinct,
            jurisdiction_code: Some(r.jurisdiction_code),
            location_desc: Some(r.location_desc.clone()),
            statistical_murder_flag: r.statistical_murder_flag,
            perp_age_group: Some(r.perp_age_group.clone()),
            perp_sex: Some(r.perp_sex.clone()),
            perp_race: Some(r.perp_race.clone()),
            vic_age_group: r.vic_age_group.clone(),
            vic_sex: r.vic_sex.clone(),
            vic_race: r.vic_race.clone(),
        }
    }

    #[test]
    fn fills_jurisdiction_with_default_code() {
        let (cleaned, _) = clean_records(vec![sparse_record()]);
        assert_eq!(cleaned[0].jurisdiction_code, DEFAULT_JURISDICTION);
    }

    #[test]
    fn fills_missing_categoricals_with_sentinel() {
        let (cleaned, _) = clean_records(vec![sparse_record()]);
        assert_eq!(cleaned[0].location_desc, UNKNOWN);
        assert_eq!(cleaned[0].perp_age_group, UNKNOWN);
        assert_eq!(cleaned[0].perp_sex, UNKNOWN);
        assert_eq!(cleaned[0].perp_race, UNKNOWN);
        // Non-null-by-contract columns are untouched.
        assert_eq!(cleaned[0].vic_age_group, "25-44");
    }

    #[test]
    fn filling_twice_equals_filling_once() {
        let (once, _) = clean_records(vec![sparse_record()]);
        let (twice, _) = clean_records(once.iter().map(reopen).collect());
        assert_eq!(once, twice);
    }

    #[test]
    fn sentinel_joins_the_category_domain() {
        let (_, domains) = clean_records(vec![sparse_record()]);
        assert!(domains.location_desc.contains(UNKNOWN));
        assert!(domains.perp_race.contains(UNKNOWN));
        assert!(domains.borough.contains("MANHATTAN"));
        assert!(!domains.borough.contains(UNKNOWN));
    }
}
