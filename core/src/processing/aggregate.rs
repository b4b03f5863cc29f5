use crate::math::stats::StatsHelper;
use crate::model::Group;
use crate::prelude::{SurveyError, SurveyResult};

/// Arithmetic mean of one group. No outlier rejection is applied.
///
/// An empty group means the segmenter broke its invariant and is reported
/// as `SurveyError::EmptyGroup`.
pub fn aggregate(values: &[f64]) -> SurveyResult<f64> {
    StatsHelper::mean(values).ok_or(SurveyError::EmptyGroup)
}

/// Reduces every group to its representative value, preserving order.
pub fn aggregate_groups(groups: &[Group]) -> SurveyResult<Vec<f64>> {
    groups.iter().map(|group| aggregate(group.values())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_averaged() {
        assert_eq!(aggregate(&[-60.0, -70.0]).unwrap(), -65.0);
    }

    #[test]
    fn single_value_is_returned_unchanged() {
        for value in [-38.6, -117.1, 0.0] {
            assert_eq!(aggregate(&[value]).unwrap(), value);
        }
    }

    #[test]
    fn empty_group_is_an_error() {
        assert_eq!(aggregate(&[]), Err(SurveyError::EmptyGroup));
    }

    #[test]
    fn groups_keep_their_order() {
        let mut first = Group::start("P1", -40.0);
        first.push(-50.0);
        let second = Group::start("P2", -80.0);
        assert_eq!(aggregate_groups(&[first, second]).unwrap(), vec![-45.0, -80.0]);
    }
}
