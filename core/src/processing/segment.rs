use crate::model::{CalibratedReading, Group};

/// Splits a time-ordered stream into runs of identical label.
///
/// This is run-length grouping, not a group-by: `A A B A` yields three groups.
pub fn segment<I>(readings: I) -> Vec<Group>
where
    I: IntoIterator<Item = CalibratedReading>,
{
    let (current, mut completed) = readings.into_iter().fold(
        (None::<Group>, Vec::new()),
        |(current, mut completed), reading| match current {
            Some(mut group) if group.label() == reading.label => {
                group.push(reading.calibrated_rssi);
                (Some(group), completed)
            }
            previous => {
                completed.extend(previous);
                (
                    Some(Group::start(reading.label, reading.calibrated_rssi)),
                    completed,
                )
            }
        },
    );
    completed.extend(current);
    completed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(label: &str, value: f64) -> CalibratedReading {
        CalibratedReading {
            timestamp: String::new(),
            label: label.into(),
            measured_rssi: value,
            calibrated_rssi: value,
        }
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(segment(Vec::new()).is_empty());
    }

    #[test]
    fn repeated_label_after_interruption_starts_new_group() {
        let groups = segment(vec![
            reading("A", -60.0),
            reading("A", -61.0),
            reading("B", -70.0),
            reading("B", -71.0),
            reading("A", -62.0),
        ]);
        let sizes: Vec<usize> = groups.iter().map(Group::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(groups[0].values(), &[-60.0, -61.0]);
        assert_eq!(groups[1].values(), &[-70.0, -71.0]);
        assert_eq!(groups[2].label(), "A");
        assert_eq!(groups[2].values(), &[-62.0]);
    }

    #[test]
    fn single_run_is_one_group() {
        let groups = segment(vec![reading("P1", -50.0), reading("P1", -52.0)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].values(), &[-50.0, -52.0]);
    }

    #[test]
    fn groups_are_never_empty() {
        let labels = ["A", "B", "B", "C", "A", "A", "D"];
        let groups = segment(labels.iter().map(|l| reading(l, -80.0)));
        assert_eq!(groups.len(), 5);
        assert!(groups.iter().all(|g| !g.is_empty()));
    }
}
