//! Population reference table used for accident rates.

use ahash::AHashMap;

use crate::model::Canton;

/// Inhabitant counts keyed by canton and year.
///
/// Kept separate from the record store: the table is optional, and a
/// missing or partial one only disables rates, never filtering.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    entries: AHashMap<(Canton, i32), u64>,
}

impl PopulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one canton-year count. A later insert for the same key wins.
    pub fn insert(&mut self, canton: Canton, year: i32, inhabitants: u64) {
        self.entries.insert((canton, year), inhabitants);
    }

    pub fn get(&self, canton: Canton, year: i32) -> Option<u64> {
        self.entries.get(&(canton, year)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Average population of a canton over the given years.
    ///
    /// The divisor is the number of years asked for, not the number of
    /// entries found, so a year without an entry counts as zero. A canton
    /// with no entry in any of the years yields `None`.
    pub fn average(&self, canton: Canton, years: &[i32]) -> Option<f64> {
        if years.is_empty() {
            return None;
        }
        let mut sum = 0u64;
        let mut found = false;
        for &year in years {
            if let Some(count) = self.get(canton, year) {
                sum += count;
                found = true;
            }
        }
        found.then(|| sum as f64 / years.len() as f64)
    }
}

impl FromIterator<(Canton, i32, u64)> for PopulationTable {
    fn from_iter<I: IntoIterator<Item = (Canton, i32, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (canton, year, inhabitants) in iter {
            table.insert(canton, year, inhabitants);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = PopulationTable::new();
        table.insert(Canton::ZH, 2020, 1_550_000);
        assert_eq!(table.get(Canton::ZH, 2020), Some(1_550_000));
        assert_eq!(table.get(Canton::ZH, 2021), None);
        assert_eq!(table.get(Canton::BE, 2020), None);
    }

    #[test]
    fn test_average_over_full_years() {
        let table: PopulationTable = [
            (Canton::ZH, 2020, 1_500_000),
            (Canton::ZH, 2021, 1_520_000),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.average(Canton::ZH, &[2020, 2021]), Some(1_510_000.0));
    }

    #[test]
    fn test_average_dilutes_missing_years() {
        let table: PopulationTable = [(Canton::ZH, 2020, 1_000_000)].into_iter().collect();
        // One entry over two requested years averages to half.
        assert_eq!(table.average(Canton::ZH, &[2020, 2021]), Some(500_000.0));
    }

    #[test]
    fn test_average_none_without_any_entry() {
        let table: PopulationTable = [(Canton::ZH, 2019, 1_000_000)].into_iter().collect();
        assert_eq!(table.average(Canton::ZH, &[2020, 2021]), None);
        assert_eq!(table.average(Canton::BE, &[2019]), None);
        assert_eq!(table.average(Canton::ZH, &[]), None);
    }
}
