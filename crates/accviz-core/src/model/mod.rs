//! Record model for the accident dataset.

mod canton;

pub use canton::Canton;

use serde::{Deserialize, Serialize};

/// Which canton field keys geographic aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoMode {
    /// Key records by the canton where the accident happened.
    #[default]
    AccidentLocation,
    /// Key records by the victim's canton of residence.
    Residence,
}

/// One row of the accident dataset, immutable once loaded.
///
/// Both canton fields are `None` when the source carried an unknown or
/// foreign value; such rows still count toward non-geographic totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentRecord {
    /// Registration year of the accident.
    pub year: i32,

    /// Canton where the accident happened.
    pub canton_of_accident: Option<Canton>,

    /// Canton where the victim lives.
    pub canton_of_residence: Option<Canton>,

    /// Insurance branch (occupational or non-occupational).
    pub branch: String,

    /// Age group label, e.g. "25-34".
    pub age_group: String,

    /// Gender label, normalized to lowercase at load time.
    pub gender: String,

    /// Activity being performed when the accident happened.
    pub activity: String,

    /// Number of accidents this row stands for.
    pub count: u32,
}

impl AccidentRecord {
    /// The canton this record aggregates under in the given mode.
    pub fn active_canton(&self, mode: GeoMode) -> Option<Canton> {
        match mode {
            GeoMode::AccidentLocation => self.canton_of_accident,
            GeoMode::Residence => self.canton_of_residence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AccidentRecord {
        AccidentRecord {
            year: 2020,
            canton_of_accident: Some(Canton::ZH),
            canton_of_residence: Some(Canton::BE),
            branch: "BUV".to_string(),
            age_group: "25-34".to_string(),
            gender: "frauen".to_string(),
            activity: "Fussball".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_active_canton_follows_mode() {
        let r = record();
        assert_eq!(r.active_canton(GeoMode::AccidentLocation), Some(Canton::ZH));
        assert_eq!(r.active_canton(GeoMode::Residence), Some(Canton::BE));
    }

    #[test]
    fn test_default_mode_is_accident_location() {
        assert_eq!(GeoMode::default(), GeoMode::AccidentLocation);
    }
}
