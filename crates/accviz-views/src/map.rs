//! Choropleth map view model: accident rates per canton.

use accviz_core::aggregate;
use accviz_core::dashboard::RenderFrame;
use accviz_core::model::{AccidentRecord, Canton, GeoMode};
use accviz_core::population::PopulationTable;
use serde::Serialize;

/// Everything the map needs for one canton.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CantonStat {
    pub canton: Canton,

    /// Accident total in the selection.
    pub total: u64,

    /// Accidents per 1000 inhabitants per year, `None` when population
    /// data is missing for this canton.
    pub rate: Option<f64>,

    /// Average population over the selected years, for tooltips.
    pub average_population: Option<f64>,
}

/// Data behind the choropleth map for one render cycle.
///
/// Lists all 26 cantons in constitutional order whether or not they have
/// records, so the map never shows holes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapViewModel {
    pub mode: GeoMode,

    /// Canton currently selected, mirrored into the map as an outline.
    pub selected: Option<Canton>,

    pub cantons: Vec<CantonStat>,

    /// Upper bound for the color scale, zero when no canton has a rate.
    pub max_rate: f64,

    /// Number of distinct years the selection covers.
    pub year_count: usize,
}

impl MapViewModel {
    pub fn new(
        records: &[&AccidentRecord],
        population: &PopulationTable,
        mode: GeoMode,
        selected: Option<Canton>,
    ) -> Self {
        let totals = aggregate::sum_by_canton(records, mode);
        let years = aggregate::distinct_years(records);
        let year_count = years.len();

        let cantons: Vec<CantonStat> = Canton::ALL
            .iter()
            .map(|&canton| {
                let total = totals.get(&canton).copied().unwrap_or(0);
                let average_population = population.average(canton, &years);
                let rate = average_population.and_then(|avg| {
                    (avg > 0.0 && year_count > 0)
                        .then(|| total as f64 / (avg * year_count as f64) * 1000.0)
                });
                CantonStat {
                    canton,
                    total,
                    rate,
                    average_population,
                }
            })
            .collect();

        let max_rate = cantons
            .iter()
            .filter_map(|c| c.rate)
            .fold(0.0f64, f64::max);

        Self {
            mode,
            selected,
            cantons,
            max_rate,
            year_count,
        }
    }

    pub fn from_frame(frame: &RenderFrame<'_>) -> Self {
        Self::new(
            &frame.projections.map,
            frame.population,
            frame.filter.geo_mode(),
            frame.filter.selected_canton(),
        )
    }

    /// Stats for one canton. The list covers all 26, so `None` means the
    /// model was built inconsistently.
    pub fn canton(&self, canton: Canton) -> Option<&CantonStat> {
        self.cantons.iter().find(|s| s.canton == canton)
    }
}
