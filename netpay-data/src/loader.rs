use std::collections::HashMap;
use std::io::Read;

use netpay_core::{Jurisdiction, RawBracketRow};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading bracket-table data.
#[derive(Debug, Error)]
pub enum BracketTableError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown jurisdiction code '{0}' (expected one of KR, TW, SG, JP, IN, US)")]
    UnknownJurisdiction(String),
}

impl From<csv::Error> for BracketTableError {
    fn from(err: csv::Error) -> Self {
        BracketTableError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket-table CSV file.
///
/// The CSV format:
/// - `jurisdiction`: the two-letter jurisdiction code (KR, TW, SG, JP, IN, US)
/// - `upper_limit`: the slab's upper boundary in local currency (empty for
///   the top-open slab)
/// - `rate`: the marginal rate, as a decimal or a whole percentage (empty
///   defaults to 0)
///
/// Rows are raw input in the engine's sense: order, duplicate caps and
/// percentage-style rates are all tolerated and canonicalized by schedule
/// normalization, not here. File-level problems (unparsable cells, unknown
/// jurisdiction codes) are still rejected.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketTableRecord {
    pub jurisdiction: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub rate: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket-table data from CSV files.
///
/// Parsing and grouping are separate steps so a caller can inspect or
/// report on the raw records before handing rows to the engine.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket-table records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketTableRecord>, BracketTableError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketTableRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group parsed records into per-jurisdiction raw bracket rows.
    ///
    /// File order is preserved within each jurisdiction; normalization
    /// sorts later. A record with a code no [`Jurisdiction`] carries is an
    /// error, since silently dropping a whole table would be worse than
    /// rejecting the file.
    pub fn group(
        records: &[BracketTableRecord],
    ) -> Result<HashMap<Jurisdiction, Vec<RawBracketRow>>, BracketTableError> {
        let mut tables: HashMap<Jurisdiction, Vec<RawBracketRow>> = HashMap::new();

        for record in records {
            let jurisdiction = Jurisdiction::parse(&record.jurisdiction).ok_or_else(|| {
                BracketTableError::UnknownJurisdiction(record.jurisdiction.clone())
            })?;
            tables.entry(jurisdiction).or_default().push(RawBracketRow {
                upper_limit: record.upper_limit,
                rate: record.rate,
            });
        }

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"jurisdiction,upper_limit,rate
SG,20000,0.00
SG,30000,0.02
SG,,0.24
JP,1950000,0.05
JP,,0.45
"#;

    #[test]
    fn parse_single_record() {
        let csv = "jurisdiction,upper_limit,rate\nSG,20000,0.02";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketTableRecord {
                jurisdiction: "SG".to_string(),
                upper_limit: Some(dec!(20000)),
                rate: Some(dec!(0.02)),
            }]
        );
    }

    #[test]
    fn parse_empty_upper_limit_is_open_ended() {
        let csv = "jurisdiction,upper_limit,rate\nJP,,0.45";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_limit, None);
        assert_eq!(records[0].rate, Some(dec!(0.45)));
    }

    #[test]
    fn parse_empty_rate_is_none() {
        let csv = "jurisdiction,upper_limit,rate\nIN,400000,";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].rate, None);
    }

    #[test]
    fn parse_empty_csv_yields_no_records() {
        let csv = "jurisdiction,upper_limit,rate\n";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn parse_missing_column_is_an_error() {
        let csv = "jurisdiction,upper_limit\nSG,20000";

        let result = BracketTableLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let BracketTableError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn parse_bad_decimal_is_an_error() {
        let csv = "jurisdiction,upper_limit,rate\nSG,abc,0.02";

        let result = BracketTableLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(BracketTableError::CsvParse(_))));
    }

    #[test]
    fn group_preserves_file_order_per_jurisdiction() {
        let records = BracketTableLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let tables = BracketTableLoader::group(&records).expect("Failed to group records");

        let sg = &tables[&Jurisdiction::Singapore];
        assert_eq!(sg.len(), 3);
        assert_eq!(sg[0].upper_limit, Some(dec!(20000)));
        assert_eq!(sg[2].upper_limit, None);

        let jp = &tables[&Jurisdiction::Japan];
        assert_eq!(jp.len(), 2);
    }

    #[test]
    fn group_unknown_jurisdiction_is_an_error() {
        let csv = "jurisdiction,upper_limit,rate\nZZ,100,0.10";
        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let result = BracketTableLoader::group(&records);

        match result {
            Err(BracketTableError::UnknownJurisdiction(ref code)) => {
                assert_eq!(code, "ZZ");
            }
            other => panic!("expected UnknownJurisdiction, got {other:?}"),
        }
    }
}
