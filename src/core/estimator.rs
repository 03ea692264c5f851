use crate::domain::model::SalaryBounds;

const LOWER_ONLY_FACTOR: f64 = 1.2;
const UPPER_ONLY_FACTOR: f64 = 0.8;

/// Predicts a single salary from a salary range.
///
/// A closed range gives its midpoint. An open-ended range is pushed up from
/// the lower end or down from the upper end. The result is truncated
/// toward zero in double precision, so values match the historical reports
/// exactly.
pub fn predict_salary(bounds: SalaryBounds) -> Option<u64> {
    let estimate = match (bounds.lower, bounds.upper) {
        (Some(lower), Some(upper)) => (lower + upper) / 2.0,
        (Some(lower), None) => lower * LOWER_ONLY_FACTOR,
        (None, Some(upper)) => upper * UPPER_ONLY_FACTOR,
        (None, None) => return None,
    };
    // `as` truncates and saturates negatives and NaN to zero
    Some(estimate.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(lower: Option<f64>, upper: Option<f64>) -> Option<u64> {
        predict_salary(SalaryBounds::new(lower, upper))
    }

    #[test]
    fn test_no_bounds_no_estimate() {
        assert_eq!(estimate(None, None), None);
    }

    #[test]
    fn test_both_bounds_midpoint() {
        assert_eq!(estimate(Some(100.0), Some(200.0)), Some(150));
        assert_eq!(estimate(Some(100.0), Some(201.0)), Some(150));
    }

    #[test]
    fn test_lower_only_is_raised() {
        assert_eq!(estimate(Some(100.0), None), Some(120));
        assert_eq!(estimate(Some(99.0), None), Some(118));
        assert_eq!(estimate(Some(85000.0), None), Some(102000));
    }

    #[test]
    fn test_upper_only_is_lowered() {
        assert_eq!(estimate(None, Some(200.0)), Some(160));
        assert_eq!(estimate(None, Some(199.0)), Some(159));
    }

    #[test]
    fn test_zero_bound_is_a_value() {
        assert_eq!(estimate(Some(0.0), None), Some(0));
        assert_eq!(estimate(Some(0.0), Some(100.0)), Some(50));
    }
}
