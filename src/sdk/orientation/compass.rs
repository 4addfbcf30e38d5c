use super::geometry::Bearing;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 16 points of the compass rose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

/// Width of one compass sector in degrees.
pub const SECTOR_DEGREES: f64 = 360.0 / 16.0;

impl CompassDirection {
    /// All directions, clockwise from north.
    pub const ALL: [CompassDirection; 16] = [
        Self::N,
        Self::NNE,
        Self::NE,
        Self::ENE,
        Self::E,
        Self::ESE,
        Self::SE,
        Self::SSE,
        Self::S,
        Self::SSW,
        Self::SW,
        Self::WSW,
        Self::W,
        Self::WNW,
        Self::NW,
        Self::NNW,
    ];

    /// Buckets a bearing into the sector centred on each label.
    ///
    /// The half-sector offset puts the N/NNE boundary at 11.25°; a bearing
    /// exactly on a boundary belongs to the clockwise sector.
    pub fn from_bearing(bearing: Bearing) -> Self {
        let index = ((bearing.degrees() + SECTOR_DEGREES / 2.0) / SECTOR_DEGREES).floor() as usize;
        Self::ALL[index % 16]
    }

    /// The bearing this label is centred on.
    pub fn center(self) -> Bearing {
        let index = Self::ALL
            .iter()
            .position(|d| *d == self)
            .unwrap_or_default();
        Bearing::from_degrees(index as f64 * SECTOR_DEGREES)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NNE => "NNE",
            Self::NE => "NE",
            Self::ENE => "ENE",
            Self::E => "E",
            Self::ESE => "ESE",
            Self::SE => "SE",
            Self::SSE => "SSE",
            Self::S => "S",
            Self::SSW => "SSW",
            Self::SW => "SW",
            Self::WSW => "WSW",
            Self::W => "W",
            Self::WNW => "WNW",
            Self::NW => "NW",
            Self::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
