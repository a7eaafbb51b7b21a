//! Immutable record store and the value sets discovered from it.

use indexmap::IndexSet;
use tracing::info;

use crate::model::AccidentRecord;

/// Activity label the source uses for unknown or unclassifiable activity.
pub const EXCLUDED_ACTIVITY: &str = "Unbekannte oder übrige Tätigkeit";

/// Age group label for rows without a usable age.
pub const EXCLUDED_AGE_GROUP: &str = "NA";

/// The loaded dataset plus the distinct values discovered from it.
///
/// Built once from a source and never mutated afterwards. Rows carrying the
/// excluded activity or age group sentinel are dropped here, before any
/// other component sees the data, so no filter can reach them.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<AccidentRecord>,
    year_bounds: Option<(i32, i32)>,
    branches: Vec<String>,
    age_groups: Vec<String>,
    genders: Vec<String>,
}

impl RecordStore {
    /// Build the store from parsed rows. Applies the permanent exclusions
    /// and orders records by year, keeping source order within a year.
    pub fn from_records(mut rows: Vec<AccidentRecord>) -> Self {
        let raw = rows.len();
        rows.retain(|r| r.activity != EXCLUDED_ACTIVITY && r.age_group != EXCLUDED_AGE_GROUP);
        rows.sort_by_key(|r| r.year);

        let mut year_bounds = None;
        let mut branches = IndexSet::new();
        let mut age_groups = IndexSet::new();
        let mut genders = IndexSet::new();
        for row in &rows {
            year_bounds = match year_bounds {
                None => Some((row.year, row.year)),
                Some((min, max)) => Some((min.min(row.year), max.max(row.year))),
            };
            if !row.branch.is_empty() {
                branches.insert(row.branch.clone());
            }
            if !row.age_group.is_empty() {
                age_groups.insert(row.age_group.clone());
            }
            if !row.gender.is_empty() {
                genders.insert(row.gender.clone());
            }
        }

        let mut branches: Vec<String> = branches.into_iter().collect();
        branches.sort();
        let mut age_groups: Vec<String> = age_groups.into_iter().collect();
        age_groups.sort_by(|a, b| age_sort_key(a).cmp(&age_sort_key(b)).then_with(|| a.cmp(b)));
        let mut genders: Vec<String> = genders.into_iter().collect();
        genders.sort();

        info!(
            "record store ready: {} rows kept of {} parsed, years {:?}",
            rows.len(),
            raw,
            year_bounds
        );

        Self {
            records: rows,
            year_bounds,
            branches,
            age_groups,
            genders,
        }
    }

    /// All retained records, ordered by year.
    pub fn records(&self) -> &[AccidentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum and maximum observed year, `None` for an empty store.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    /// Every year from the minimum to the maximum observed year, including
    /// years no record falls in.
    pub fn available_years(&self) -> Vec<i32> {
        match self.year_bounds {
            Some((min, max)) => (min..=max).collect(),
            None => Vec::new(),
        }
    }

    /// Distinct insurance branches, alphabetical.
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    /// Distinct age groups, ordered by the leading age number.
    pub fn age_groups(&self) -> &[String] {
        &self.age_groups
    }

    /// Distinct gender labels, alphabetical.
    pub fn genders(&self) -> &[String] {
        &self.genders
    }
}

/// Numeric sort key for age group labels: "9-14" sorts before "15-19"
/// even though it is lexicographically larger. Labels without a leading
/// number go last.
fn age_sort_key(label: &str) -> u32 {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Canton;

    fn row(year: i32, activity: &str, age_group: &str) -> AccidentRecord {
        AccidentRecord {
            year,
            canton_of_accident: Some(Canton::ZH),
            canton_of_residence: Some(Canton::ZH),
            branch: "BUV".to_string(),
            age_group: age_group.to_string(),
            gender: "maenner".to_string(),
            activity: activity.to_string(),
            count: 1,
        }
    }

    #[test]
    fn test_permanent_exclusions_dropped() {
        let store = RecordStore::from_records(vec![
            row(2020, "Fussball", "25-34"),
            row(2020, EXCLUDED_ACTIVITY, "25-34"),
            row(2020, "Fussball", EXCLUDED_AGE_GROUP),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].activity, "Fussball");
    }

    #[test]
    fn test_records_sorted_by_year() {
        let store = RecordStore::from_records(vec![
            row(2022, "Fussball", "25-34"),
            row(2019, "Skifahren", "25-34"),
            row(2021, "Wandern", "25-34"),
        ]);
        let years: Vec<i32> = store.records().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2021, 2022]);
    }

    #[test]
    fn test_available_years_fills_gaps() {
        let store = RecordStore::from_records(vec![
            row(2019, "Fussball", "25-34"),
            row(2022, "Fussball", "25-34"),
        ]);
        assert_eq!(store.year_bounds(), Some((2019, 2022)));
        assert_eq!(store.available_years(), vec![2019, 2020, 2021, 2022]);
    }

    #[test]
    fn test_age_groups_sorted_numerically() {
        let store = RecordStore::from_records(vec![
            row(2020, "Fussball", "15-19"),
            row(2020, "Fussball", "9-14"),
            row(2020, "Fussball", "65+"),
            row(2020, "Fussball", "20-24"),
        ]);
        assert_eq!(store.age_groups(), &["9-14", "15-19", "20-24", "65+"]);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::from_records(Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.year_bounds(), None);
        assert!(store.available_years().is_empty());
        assert!(store.branches().is_empty());
    }
}
