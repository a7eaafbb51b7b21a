//! Accident row parsing from the semicolon-delimited statistics export.
//!
//! The export carries German column names. Parsing is lenient per field:
//! an unparseable count becomes zero, an unknown canton code becomes "no
//! canton", and only a row without a usable year is dropped. A missing
//! column is a hard error, since it means the wrong file was loaded.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use accviz_core::model::{AccidentRecord, Canton};
use accviz_core::source::AccidentSource;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{DataError, Result};

use super::delimiter_byte;

/// Columns the accident export must carry.
const REQUIRED_COLUMNS: [&str; 8] = [
    "registrierungsjahr",
    "kanton_unfall",
    "kanton_wohnort",
    "versicherungszweig",
    "altersgruppe",
    "geschlecht",
    "taetigkeit",
    "anzahl_unfaelle",
];

/// Parser settings for delimiter-separated files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DsvConfig {
    /// Single-byte field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ';'
}

impl Default for DsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

/// Reads accident rows from a DSV file on disk.
pub struct DsvAccidentSource {
    path: PathBuf,
    config: DsvConfig,
    name: String,
}

impl DsvAccidentSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_config(path, DsvConfig::default())
    }

    pub fn with_config(path: impl AsRef<Path>, config: DsvConfig) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, config, name }
    }
}

#[async_trait]
impl AccidentSource for DsvAccidentSource {
    async fn load(&self) -> anyhow::Result<Vec<AccidentRecord>> {
        let path = self.path.clone();
        let delimiter = delimiter_byte(self.config.delimiter)?;
        let records = tokio::task::spawn_blocking(move || -> Result<Vec<AccidentRecord>> {
            let file = File::open(&path)?;
            parse_accidents(file, delimiter)
        })
        .await??;
        info!("parsed {} accident rows from {}", records.len(), self.name);
        Ok(records)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// One raw row as it appears in the export, before coercion.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "registrierungsjahr")]
    year: String,
    #[serde(rename = "kanton_unfall")]
    canton_of_accident: String,
    #[serde(rename = "kanton_wohnort")]
    canton_of_residence: String,
    #[serde(rename = "versicherungszweig")]
    branch: String,
    #[serde(rename = "altersgruppe")]
    age_group: String,
    #[serde(rename = "geschlecht")]
    gender: String,
    #[serde(rename = "taetigkeit")]
    activity: String,
    #[serde(rename = "anzahl_unfaelle")]
    count: String,
}

/// Parse the export from any reader. Exposed for in-memory tests.
fn parse_accidents<R: Read>(reader: R, delimiter: u8) -> Result<Vec<AccidentRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataError::Dsv(format!("cannot read header row: {e}")))?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::Dsv(format!("missing column '{column}'")));
        }
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.deserialize::<RawRow>() {
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed row: {e}");
                dropped += 1;
                continue;
            }
        };
        match coerce(raw) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!("dropped {dropped} rows without a usable year");
    }
    Ok(records)
}

/// Lenient field coercion. Only a bad year invalidates the row.
fn coerce(raw: RawRow) -> Option<AccidentRecord> {
    let year = raw.year.parse::<i32>().ok()?;
    Some(AccidentRecord {
        year,
        canton_of_accident: Canton::from_code(&raw.canton_of_accident),
        canton_of_residence: Canton::from_code(&raw.canton_of_residence),
        branch: raw.branch,
        age_group: raw.age_group,
        gender: raw.gender.to_lowercase(),
        activity: raw.activity,
        count: raw.count.parse().unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "registrierungsjahr;kanton_unfall;kanton_wohnort;versicherungszweig;altersgruppe;geschlecht;taetigkeit;anzahl_unfaelle";

    fn parse(body: &str) -> Result<Vec<AccidentRecord>> {
        let data = format!("{HEADER}\n{body}");
        parse_accidents(data.as_bytes(), b';')
    }

    #[test]
    fn test_parses_well_formed_rows() {
        let records = parse("2020;ZH;BE;NBUV;25-34;Maenner;Fussball;12").unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.year, 2020);
        assert_eq!(r.canton_of_accident, Some(Canton::ZH));
        assert_eq!(r.canton_of_residence, Some(Canton::BE));
        assert_eq!(r.gender, "maenner");
        assert_eq!(r.count, 12);
    }

    #[test]
    fn test_invalid_year_drops_row() {
        let records = parse("keine Angabe;ZH;ZH;NBUV;25-34;frauen;Fussball;3\n2021;ZH;ZH;NBUV;25-34;frauen;Fussball;3").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2021);
    }

    #[test]
    fn test_invalid_count_becomes_zero() {
        let records = parse("2020;ZH;ZH;NBUV;25-34;frauen;Fussball;n/a").unwrap();
        assert_eq!(records[0].count, 0);
    }

    #[test]
    fn test_unknown_canton_becomes_none() {
        let records = parse("2020;Ausland;ZH;NBUV;25-34;frauen;Fussball;5").unwrap();
        assert_eq!(records[0].canton_of_accident, None);
        assert_eq!(records[0].canton_of_residence, Some(Canton::ZH));
    }

    #[test]
    fn test_fields_are_trimmed_and_gender_lowercased() {
        let records = parse("2020; zh ;BE;NBUV;25-34; FRAUEN ; Fussball ;5").unwrap();
        assert_eq!(records[0].canton_of_accident, Some(Canton::ZH));
        assert_eq!(records[0].gender, "frauen");
        assert_eq!(records[0].activity, "Fussball");
    }

    #[test]
    fn test_missing_column_is_hard_error() {
        let data = "registrierungsjahr;kanton_unfall\n2020;ZH";
        let err = parse_accidents(data.as_bytes(), b';').unwrap_err();
        assert!(matches!(err, DataError::Dsv(_)));
        assert!(err.to_string().contains("kanton_wohnort"));
    }
}
