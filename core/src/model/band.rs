use serde::{Deserialize, Serialize};

/// Severity tier for a calibrated RSSI value, strongest first.
///
/// Bands are half-open on the strong side: a value sitting exactly on a
/// threshold belongs to the weaker band (`-65.0` is `Good`, not `Strong`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Strong,
    Good,
    Fair,
    Weak,
    VeryWeak,
}

impl ColorBand {
    pub const ALL: [ColorBand; 5] = [
        ColorBand::Strong,
        ColorBand::Good,
        ColorBand::Fair,
        ColorBand::Weak,
        ColorBand::VeryWeak,
    ];

    /// Maps a calibrated dBm value onto its band. NaN lands in `VeryWeak`.
    pub fn classify(rssi: f64) -> Self {
        if rssi > -65.0 {
            ColorBand::Strong
        } else if rssi > -75.0 {
            ColorBand::Good
        } else if rssi > -85.0 {
            ColorBand::Fair
        } else if rssi > -95.0 {
            ColorBand::Weak
        } else {
            ColorBand::VeryWeak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorBand::Strong => "Strong",
            ColorBand::Good => "Good",
            ColorBand::Fair => "Fair",
            ColorBand::Weak => "Weak",
            ColorBand::VeryWeak => "Very weak",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            ColorBand::Strong => "#00A86B",
            ColorBand::Good => "#66CDAA",
            ColorBand::Fair => "#FFD700",
            ColorBand::Weak => "#FF7F7F",
            ColorBand::VeryWeak => "#FF0000",
        }
    }

    /// Range text shown next to the swatch in the map legend.
    pub fn legend_label(self) -> &'static str {
        match self {
            ColorBand::Strong => "> -65 dBm",
            ColorBand::Good => "-75 to -65 dBm",
            ColorBand::Fair => "-85 to -75 dBm",
            ColorBand::Weak => "-95 to -85 dBm",
            ColorBand::VeryWeak => "<= -95 dBm",
        }
    }
}
