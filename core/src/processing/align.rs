use crate::model::{AlignedSample, Coordinate};
use crate::prelude::{SurveyError, SurveyResult};

/// Pairs coordinates with aggregated values by position.
///
/// Both sequences are cut to the shorter length first; surplus entries are
/// dropped. The count check afterwards cannot fail for slices truncated
/// here and is kept as an invariant guard only; see `check_counts` for the
/// pre-truncation tolerance.
pub fn align(coords: &[Coordinate], values: &[f64]) -> SurveyResult<Vec<AlignedSample>> {
    let n = coords.len().min(values.len());
    let coords = &coords[..n];
    let values = &values[..n];

    if coords.len() != values.len() {
        return Err(SurveyError::MismatchedCounts {
            coordinates: coords.len(),
            values: values.len(),
        });
    }

    Ok(coords
        .iter()
        .zip(values)
        .map(|(&coordinate, &value)| AlignedSample { coordinate, value })
        .collect())
}

/// Rejects inputs whose counts differ by more than `tolerance`.
/// `None` accepts any difference.
pub fn check_counts(coordinates: usize, values: usize, tolerance: Option<usize>) -> SurveyResult<()> {
    match tolerance {
        Some(tolerance) if coordinates.abs_diff(values) > tolerance => {
            Err(SurveyError::CountMismatchExceeded {
                coordinates,
                values,
                tolerance,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(n: i64) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(i * 10, i * 5)).collect()
    }

    #[test]
    fn longer_coordinate_list_is_truncated() {
        let samples = align(&coords(5), &[-50.0, -60.0, -70.0]).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2].coordinate, Coordinate::new(20, 10));
        assert_eq!(samples[2].value, -70.0);
    }

    #[test]
    fn longer_value_list_is_truncated() {
        let samples = align(&coords(2), &[-50.0, -60.0, -70.0, -80.0]).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].value, -60.0);
    }

    #[test]
    fn equal_lengths_are_preserved_in_order() {
        let values = [-41.0, -52.0, -63.0, -74.0];
        let samples = align(&coords(4), &values).unwrap();
        assert_eq!(samples.len(), 4);
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.coordinate, Coordinate::new(i as i64 * 10, i as i64 * 5));
            assert_eq!(sample.value, values[i]);
        }
    }

    #[test]
    fn empty_side_yields_no_samples() {
        assert!(align(&[], &[-50.0]).unwrap().is_empty());
        assert!(align(&coords(3), &[]).unwrap().is_empty());
    }

    #[test]
    fn tolerance_guard_is_opt_in() {
        assert!(check_counts(10, 2, None).is_ok());
        assert!(check_counts(5, 4, Some(1)).is_ok());
        assert_eq!(
            check_counts(5, 3, Some(1)),
            Err(SurveyError::CountMismatchExceeded {
                coordinates: 5,
                values: 3,
                tolerance: 1
            })
        );
    }
}
