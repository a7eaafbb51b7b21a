//! File-backed implementations of the core source traits.

mod dsv;
mod population;

pub use dsv::{DsvAccidentSource, DsvConfig};
pub use population::DsvPopulationSource;

use crate::{DataError, Result};

/// The csv reader splits on one raw byte, so only ASCII delimiters can
/// ever match their own UTF-8 encoding in the file.
pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(DataError::Dsv(format!(
            "delimiter {delimiter:?} is not a single-byte character"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_must_be_single_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        let err = delimiter_byte('§').unwrap_err();
        assert!(matches!(err, DataError::Dsv(_)));
        assert!(err.to_string().contains("delimiter"));
    }
}
