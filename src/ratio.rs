use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RatioError {
    #[error("share-of-total denominator is zero")]
    ZeroDenominator,
}

/// Share of a grand total, expressed as a percentage. A zero denominator is
/// an error rather than an infinity or NaN leaking into report output.
pub fn share_of_total(numerator: f64, denominator: f64) -> Result<f64, RatioError> {
    if denominator == 0.0 {
        return Err(RatioError::ZeroDenominator);
    }
    Ok(numerator / denominator * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anything_over_itself_is_one_hundred() {
        for x in [1.0, 17.0, 27312.0] {
            let share = share_of_total(x, x).unwrap();
            assert!((share - 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn partial_share() {
        let share = share_of_total(2.0, 3.0).unwrap();
        assert!((share - 66.66666666666667).abs() < 1e-9);
    }

    #[test]
    fn zero_denominator_is_an_error() {
        assert_eq!(share_of_total(5.0, 0.0), Err(RatioError::ZeroDenominator));
    }
}
