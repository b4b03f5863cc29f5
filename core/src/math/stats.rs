pub struct StatsHelper;

impl StatsHelper {
    /// Arithmetic mean, or `None` for an empty slice.
    pub fn mean(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let sum: f64 = samples.iter().sum();
        Some(sum / samples.len() as f64)
    }
}
