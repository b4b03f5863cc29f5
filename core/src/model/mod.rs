pub mod band;
pub mod location;
pub mod reading;

pub use band::ColorBand;
pub use location::{AlignedSample, ClassifiedSample, Coordinate};
pub use reading::{CalibratedReading, Group, RawReading};
