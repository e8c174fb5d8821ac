use crate::aggregate::{self, AggregateRow, AggregateTable, GroupKey, Measure};
use crate::rank;
use crate::ratio::{self, RatioError};
use crate::regress::{FitError, LinearFit};
use crate::types::{AnalysisRecord, SummaryStats, VictimProfileRow, YearlyTrendRow};
use crate::util::format_number;

/// How many precinct-day rows the concentration report surfaces.
pub const TOP_N: usize = 10;

/// Where the shootings concentrate: the full borough/precinct/day victim
/// table, its top rows, and how much of the grand total those rows cover.
pub struct ConcentrationReport {
    pub table: AggregateTable,
    pub top: Vec<AggregateRow>,
    pub top_share: f64,
}

impl ConcentrationReport {
    /// The ranked rows re-wrapped as a table, for preview/export alongside
    /// the full aggregate.
    pub fn top_table(&self) -> AggregateTable {
        AggregateTable {
            key_names: self.table.key_names.clone(),
            measure: self.table.measure,
            rows: self.top.clone(),
        }
    }
}

pub fn generate_concentration(data: &[AnalysisRecord]) -> Result<ConcentrationReport, RatioError> {
    let table = aggregate::group_sum(
        data,
        &[GroupKey::Borough, GroupKey::Precinct, GroupKey::OccurDate],
        Measure::VictimCount,
    );
    let top = rank::top_n(&table, TOP_N);
    let grand_total: u64 = table.rows.iter().map(|r| r.total).sum();
    let top_total: u64 = top.iter().map(|r| r.total).sum();
    let top_share = ratio::share_of_total(top_total as f64, grand_total as f64)?;
    Ok(ConcentrationReport {
        table,
        top,
        top_share,
    })
}

/// Who the victims are: counts per (age group, sex, race) combination with
/// each combination's share of all victims, largest groups first.
pub fn generate_victim_profile(data: &[AnalysisRecord]) -> Result<Vec<VictimProfileRow>, RatioError> {
    let table = aggregate::group_sum(
        data,
        &[GroupKey::VicAgeGroup, GroupKey::VicSex, GroupKey::VicRace],
        Measure::VictimCount,
    );
    let grand_total: u64 = table.rows.iter().map(|r| r.total).sum();
    let ranked = rank::top_n(&table, table.rows.len());
    let mut rows = Vec::with_capacity(ranked.len());
    for group in ranked {
        let share = ratio::share_of_total(group.total as f64, grand_total as f64)?;
        rows.push(VictimProfileRow {
            age_group: group.keys[0].to_string(),
            sex: group.keys[1].to_string(),
            race: group.keys[2].to_string(),
            victims: group.total,
            share_of_total: format_number(share, 2),
        });
    }
    Ok(rows)
}

/// Year-over-year trend plus the fitted incidents-to-murders line used for
/// the predicted column.
pub struct YearlyReport {
    pub rows: Vec<YearlyTrendRow>,
    pub fit: LinearFit,
}

pub fn generate_yearly_trend(data: &[AnalysisRecord]) -> Result<YearlyReport, FitError> {
    let summary = aggregate::yearly_summary(data);
    let xs: Vec<f64> = summary.iter().map(|y| y.incidents as f64).collect();
    let ys: Vec<f64> = summary.iter().map(|y| y.murders as f64).collect();
    let fit = LinearFit::fit(&xs, &ys)?;
    let rows = summary
        .iter()
        .map(|y| YearlyTrendRow {
            year: y.year,
            incidents: y.incidents,
            murders: y.murders,
            percent_fatal: format_number(y.percent_fatal, 2),
            predicted_murders: format_number(fit.predict(y.incidents as f64), 2),
        })
        .collect();
    Ok(YearlyReport { rows, fit })
}

pub fn generate_summary(
    data: &[AnalysisRecord],
    fit: &LinearFit,
) -> Result<SummaryStats, RatioError> {
    let total_victims: u64 = data.iter().map(|r| r.victim_count as u64).sum();
    let murders = data.iter().filter(|r| r.statistical_murder_flag).count();
    let percent_fatal = ratio::share_of_total(murders as f64, total_victims as f64)?;
    Ok(SummaryStats {
        total_victims: total_victims as usize,
        distinct_precincts: aggregate::distinct_count(data, GroupKey::Precinct),
        distinct_boroughs: aggregate::distinct_count(data, GroupKey::Borough),
        percent_fatal,
        slope: fit.slope,
        intercept: fit.intercept,
        r_squared: fit.r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, NaiveTime};

    fn record(borough: &str, precinct: u32, date: &str, murder: bool) -> AnalysisRecord {
        let occur_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        AnalysisRecord {
            occur_date,
            occur_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            borough: borough.to_string(),
            precinct,
            jurisdiction_code: 0,
            location_desc: "UNKNOWN".to_string(),
            statistical_murder_flag: murder,
            perp_age_group: "UNKNOWN".to_string(),
            perp_sex: "UNKNOWN".to_string(),
            perp_race: "UNKNOWN".to_string(),
            vic_age_group: "18-24".to_string(),
            vic_sex: "M".to_string(),
            vic_race: "BLACK".to_string(),
            year: occur_date.year(),
            month: occur_date.month(),
            day: occur_date.day(),
            victim_count: 1,
        }
    }

    #[test]
    fn concentration_share_matches_the_worked_example() {
        let data = vec![
            record("BROOKLYN", 1, "2020-01-01", false),
            record("BRONX", 2, "2020-01-01", false),
            record("BROOKLYN", 1, "2020-01-01", false),
        ];
        let report = generate_concentration(&data).unwrap();
        // Two groups; the Brooklyn precinct-day holds 2 of 3 victims, and
        // both groups fit inside the top 10, covering everything.
        assert_eq!(report.table.rows.len(), 2);
        assert_eq!(report.top[0].total, 2);
        assert!((report.top_share - 100.0).abs() < 1e-9);

        let brooklyn_share =
            crate::ratio::share_of_total(report.top[0].total as f64, data.len() as f64).unwrap();
        assert!((brooklyn_share - 66.66666666666667).abs() < 1e-9);
    }

    #[test]
    fn concentration_on_empty_input_reports_the_zero_denominator() {
        assert!(generate_concentration(&[]).is_err());
    }

    #[test]
    fn victim_profile_shares_sum_to_one_hundred() {
        let mut data = vec![
            record("BROOKLYN", 1, "2020-01-01", false),
            record("BRONX", 2, "2020-01-02", false),
            record("QUEENS", 3, "2020-01-03", false),
        ];
        data[1].vic_age_group = "25-44".to_string();
        let rows = generate_victim_profile(&data).unwrap();
        assert_eq!(rows.len(), 2);
        // Largest group first.
        assert_eq!(rows[0].victims, 2);
        assert_eq!(rows[0].age_group, "18-24");
        assert_eq!(rows[0].share_of_total, "66.67");
        assert_eq!(rows[1].share_of_total, "33.33");
    }

    #[test]
    fn yearly_trend_fits_and_predicts() {
        let mut data = Vec::new();
        for i in 0..10 {
            data.push(record("BRONX", 40, "2019-03-01", i < 2));
        }
        for i in 0..12 {
            data.push(record("BRONX", 40, "2020-03-01", i < 3));
        }
        let report = generate_yearly_trend(&data).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].percent_fatal, "20.00");
        assert_eq!(report.rows[1].percent_fatal, "25.00");
        // Two points: exact fit through (10, 2) and (12, 3).
        assert!((report.fit.slope - 0.5).abs() < 1e-9);
        assert!((report.fit.intercept + 3.0).abs() < 1e-9);
        assert!((report.fit.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(report.rows[0].predicted_murders, "2.00");
        assert_eq!(report.rows[1].predicted_murders, "3.00");
    }

    #[test]
    fn single_year_cannot_be_fitted() {
        let data = vec![
            record("BRONX", 40, "2020-03-01", false),
            record("BRONX", 40, "2020-07-01", true),
        ];
        assert_eq!(
            generate_yearly_trend(&data).map(|r| r.rows.len()),
            Err(FitError::TooFewSamples(1))
        );
    }

    #[test]
    fn summary_counts_distinct_keys_over_records() {
        let data = vec![
            record("BROOKLYN", 75, "2019-01-01", true),
            record("BROOKLYN", 75, "2019-06-01", false),
            record("BROOKLYN", 73, "2020-01-01", false),
            record("QUEENS", 103, "2020-06-01", false),
        ];
        let fit = LinearFit::fit(&[3.0, 1.0], &[1.0, 0.0]).unwrap();
        let summary = generate_summary(&data, &fit).unwrap();
        assert_eq!(summary.total_victims, 4);
        assert_eq!(summary.distinct_precincts, 3);
        assert_eq!(summary.distinct_boroughs, 2);
        assert!((summary.percent_fatal - 25.0).abs() < 1e-9);
        assert!((summary.r_squared - 1.0).abs() < 1e-9);
    }
}
