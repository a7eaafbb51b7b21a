//! Demo mode: synthetic accident and population data.
//!
//! Generates a deterministic dataset shaped like the real export, so the
//! dashboard can be exercised without the statistics files. The same seed
//! always produces the same rows.

use accviz_core::model::{AccidentRecord, Canton};
use accviz_core::population::PopulationTable;
use accviz_core::source::{AccidentSource, PopulationSource};
use accviz_core::store::{EXCLUDED_ACTIVITY, EXCLUDED_AGE_GROUP};
use async_trait::async_trait;

const YEARS: std::ops::RangeInclusive<i32> = 2015..=2023;

const CANTONS: [Canton; 8] = [
    Canton::ZH,
    Canton::BE,
    Canton::LU,
    Canton::GR,
    Canton::TI,
    Canton::VD,
    Canton::VS,
    Canton::GE,
];

const ACTIVITIES: [&str; 6] = [
    "Fussball",
    "Skifahren und Snowboarden",
    "Wandern und Bergsteigen",
    "Radfahren",
    "Turnen und Fitness",
    "Schwimmen",
];

const BRANCHES: [&str; 2] = ["BUV", "NBUV"];
const AGE_GROUPS: [&str; 4] = ["15-24", "25-44", "45-64", "65+"];
const GENDERS: [&str; 2] = ["maenner", "frauen"];

/// Small xorshift generator, seeded per source for reproducible data.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn in_range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next() % (hi - lo)
    }
}

/// Synthetic accident rows covering a handful of cantons and activities.
pub struct DemoAccidentSource {
    seed: u64,
}

impl DemoAccidentSource {
    pub fn new() -> Self {
        Self { seed: 0x5EED_CAFE }
    }
}

#[async_trait]
impl AccidentSource for DemoAccidentSource {
    async fn load(&self) -> anyhow::Result<Vec<AccidentRecord>> {
        let mut rng = Rng(self.seed);
        let mut rows = Vec::new();
        for year in YEARS {
            for (canton_idx, &canton) in CANTONS.iter().enumerate() {
                // Residence usually matches, sometimes a neighbour.
                let residence = if rng.next() % 5 == 0 {
                    CANTONS[(canton_idx + 1) % CANTONS.len()]
                } else {
                    canton
                };
                for activity in ACTIVITIES {
                    for branch in BRANCHES {
                        for age_group in AGE_GROUPS {
                            for gender in GENDERS {
                                rows.push(AccidentRecord {
                                    year,
                                    canton_of_accident: Some(canton),
                                    canton_of_residence: Some(residence),
                                    branch: branch.to_string(),
                                    age_group: age_group.to_string(),
                                    gender: gender.to_string(),
                                    activity: activity.to_string(),
                                    count: rng.in_range(1, 120) as u32,
                                });
                            }
                        }
                    }
                }
            }
            // A few rows the store is expected to drop.
            rows.push(AccidentRecord {
                year,
                canton_of_accident: Some(Canton::ZH),
                canton_of_residence: Some(Canton::ZH),
                branch: "NBUV".to_string(),
                age_group: "25-44".to_string(),
                gender: "maenner".to_string(),
                activity: EXCLUDED_ACTIVITY.to_string(),
                count: rng.in_range(1, 50) as u32,
            });
            rows.push(AccidentRecord {
                year,
                canton_of_accident: Some(Canton::BE),
                canton_of_residence: Some(Canton::BE),
                branch: "BUV".to_string(),
                age_group: EXCLUDED_AGE_GROUP.to_string(),
                gender: "frauen".to_string(),
                activity: "Fussball".to_string(),
                count: rng.in_range(1, 50) as u32,
            });
        }
        Ok(rows)
    }

    fn source_name(&self) -> &str {
        "demo accidents"
    }
}

/// Synthetic population figures with mild yearly growth.
pub struct DemoPopulationSource;

impl DemoPopulationSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PopulationSource for DemoPopulationSource {
    async fn load(&self) -> anyhow::Result<PopulationTable> {
        let base: [(Canton, u64); 8] = [
            (Canton::ZH, 1_520_000),
            (Canton::BE, 1_034_000),
            (Canton::LU, 410_000),
            (Canton::GR, 199_000),
            (Canton::TI, 353_000),
            (Canton::VD, 800_000),
            (Canton::VS, 345_000),
            (Canton::GE, 499_000),
        ];
        let mut table = PopulationTable::new();
        for year in YEARS {
            let growth_years = (year - 2015) as u64;
            for (canton, inhabitants) in base {
                table.insert(canton, year, inhabitants + inhabitants / 200 * growth_years);
            }
        }
        Ok(table)
    }

    fn source_name(&self) -> &str {
        "demo population"
    }
}
