pub mod kernel;
pub mod stats;

pub use kernel::{correlate_axis, gaussian_kernel, reflect_index};
pub use stats::StatsHelper;
