//! Extraction of star records from HYG-style CSV text
//!
//! The input is a header-delimited CSV stream. Only a handful of columns are
//! recognized:
//!
//! | Column   | Meaning                                    |
//! |----------|--------------------------------------------|
//! | `mag`    | apparent visual magnitude                  |
//! | `ra`     | right ascension in **hours** (0-24)        |
//! | `dec`    | declination in degrees                     |
//! | `proper` | common proper name, e.g. `Sirius`          |
//! | `bf`     | Bayer / Flamsteed designation              |
//! | `gl`     | Gliese / variable-star designation         |
//! | `hr`     | Yale Bright Star (Harvard Revised) number  |
//! | `hip`    | Hipparcos number                           |
//! | `hd`     | Henry Draper number                        |
//!
//! A row is kept when its magnitude is at or below the limit, or when it
//! carries a proper name. Rows with malformed numeric fields are skipped one
//! at a time; a bad row never fails the batch.

use std::collections::HashMap;

use csv::StringRecord;
use log::{debug, info, warn};
use thiserror::Error;

use crate::catalog::{CatalogRecord, UNKNOWN_MAGNITUDE};
use crate::config::DEFAULT_MAGNITUDE_LIMIT;

/// Conversion factor from hours of right ascension to degrees.
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Name used when no identifying column is populated.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One step of the name precedence: if `field` is non-empty, the name is its
/// value, optionally behind a catalog prefix.
#[derive(Debug, Clone, Copy)]
pub struct NameRule {
    pub field: &'static str,
    pub prefix: Option<&'static str>,
}

impl NameRule {
    const fn verbatim(field: &'static str) -> Self {
        Self {
            field,
            prefix: None,
        }
    }

    const fn numbered(field: &'static str, prefix: &'static str) -> Self {
        Self {
            field,
            prefix: Some(prefix),
        }
    }

    /// Project a populated field value into a display name.
    pub fn project(&self, value: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix} {value}"),
            None => value.to_string(),
        }
    }
}

/// Name precedence, most recognizable first. The first rule whose field is
/// non-empty wins; [`UNKNOWN_NAME`] is used when none match.
pub const NAME_RULES: &[NameRule] = &[
    NameRule::verbatim("proper"),
    NameRule::verbatim("bf"),
    NameRule::verbatim("gl"),
    NameRule::numbered("hr", "HR"),
    NameRule::numbered("hip", "HIP"),
    NameRule::numbered("hd", "HD"),
];

/// Resolve the display name of a row through [`NAME_RULES`].
///
/// `lookup` returns the raw value of a column, or `None` if the column is
/// absent.
pub fn resolve_name<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    NAME_RULES
        .iter()
        .find_map(|rule| non_empty(lookup(rule.field)).map(|value| rule.project(value)))
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Why a single row was dropped as malformed.
#[derive(Error, Debug)]
enum RowError {
    #[error("unreadable row: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("declination out of range: {0}")]
    DeclinationOutOfRange(f64),
}

/// Counters describing one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Data rows read (header excluded).
    pub rows: usize,
    /// Rows turned into records.
    pub accepted: usize,
    /// Well-formed rows excluded by the magnitude filter.
    pub filtered: usize,
    /// Rows skipped because a required field was missing or unparsable.
    pub malformed: usize,
}

/// Column positions looked up once from the header row.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Self {
        let index = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { index }
    }

    fn get<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.index.get(field).and_then(|&i| record.get(i))
    }
}

/// Outcome of looking at one well-formed row.
enum RowVerdict {
    Accept(CatalogRecord),
    Filter,
}

/// Filters and normalizes catalog rows.
#[derive(Debug, Clone, Copy)]
pub struct RecordExtractor {
    magnitude_limit: f64,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAGNITUDE_LIMIT)
    }
}

impl RecordExtractor {
    pub fn new(magnitude_limit: f64) -> Self {
        Self { magnitude_limit }
    }

    /// Extract records in source row order.
    pub fn extract(&self, text: &str) -> Vec<CatalogRecord> {
        self.extract_with_stats(text).0
    }

    /// Extract records in source row order, with counters for logging.
    pub fn extract_with_stats(&self, text: &str) -> (Vec<CatalogRecord>, ExtractStats) {
        let mut stats = ExtractStats::default();
        let mut records = Vec::new();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns = match reader.headers() {
            Ok(header) => Columns::from_header(header),
            Err(e) => {
                warn!("Could not read catalog header: {e}");
                return (records, stats);
            }
        };

        for result in reader.records() {
            stats.rows += 1;
            let verdict = result
                .map_err(RowError::from)
                .and_then(|record| self.evaluate(&columns, &record));

            match verdict {
                Ok(RowVerdict::Accept(record)) => {
                    stats.accepted += 1;
                    records.push(record);
                }
                Ok(RowVerdict::Filter) => stats.filtered += 1,
                Err(e) => {
                    stats.malformed += 1;
                    debug!("Skipping row {}: {e}", stats.rows);
                }
            }
        }

        info!(
            "Extracted {} stars from {} rows ({} filtered, {} malformed)",
            stats.accepted, stats.rows, stats.filtered, stats.malformed
        );
        (records, stats)
    }

    fn evaluate(&self, columns: &Columns, record: &StringRecord) -> Result<RowVerdict, RowError> {
        let field = |name: &str| columns.get(record, name);

        let has_proper = non_empty(field("proper")).is_some();
        let magnitude = match parse_number(field("mag"), "mag") {
            Ok(mag) => mag,
            // Proper names override the filter even without a usable magnitude.
            Err(_) if has_proper => UNKNOWN_MAGNITUDE,
            Err(e) => return Err(e),
        };

        if !(magnitude <= self.magnitude_limit || has_proper) {
            return Ok(RowVerdict::Filter);
        }

        let ra_hours = parse_number(field("ra"), "ra")?;
        let dec_deg = parse_number(field("dec"), "dec")?;
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(RowError::DeclinationOutOfRange(dec_deg));
        }

        Ok(RowVerdict::Accept(CatalogRecord::new(
            resolve_name(field),
            hours_to_degrees(ra_hours),
            dec_deg,
            magnitude,
        )))
    }
}

fn parse_number(value: Option<&str>, field: &'static str) -> Result<f64, RowError> {
    let raw = value.ok_or(RowError::Missing(field))?.trim();
    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(RowError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Convert right ascension from hours to degrees in `[0, 360)`.
pub fn hours_to_degrees(hours: f64) -> f64 {
    let degrees = (hours * DEGREES_PER_HOUR).rem_euclid(360.0);
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const HEADER: &str = "id,hip,hd,hr,gl,bf,proper,ra,dec,mag";

    fn extract(rows: &[&str]) -> (Vec<CatalogRecord>, ExtractStats) {
        let text = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        RecordExtractor::default().extract_with_stats(&text)
    }

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> {
        move |field: &str| pairs.iter().find(|(k, _)| *k == field).map(|(_, v)| *v)
    }

    #[rstest]
    #[case(&[("proper", "Sirius"), ("hr", "2491")], "Sirius")]
    #[case(&[("proper", ""), ("bf", "9Alp CMa"), ("gl", "Gl 244A")], "9Alp CMa")]
    #[case(&[("bf", " "), ("gl", "Gl 244A"), ("hr", "2491")], "Gl 244A")]
    #[case(&[("hr", "2491"), ("hip", "32349"), ("hd", "48915")], "HR 2491")]
    #[case(&[("hr", ""), ("hip", "32349"), ("hd", "48915")], "HIP 32349")]
    #[case(&[("hd", "48915")], "HD 48915")]
    #[case(&[("proper", ""), ("hd", "")], "Unknown")]
    #[case(&[], "Unknown")]
    fn test_name_precedence(#[case] pairs: &[(&str, &str)], #[case] expected: &str) {
        assert_eq!(resolve_name(lookup(pairs)), expected);
    }

    #[test]
    fn test_name_rules_order() {
        let fields: Vec<_> = NAME_RULES.iter().map(|rule| rule.field).collect();
        assert_eq!(fields, ["proper", "bf", "gl", "hr", "hip", "hd"]);
    }

    #[test]
    fn test_ra_is_converted_to_degrees() {
        let (records, _) = extract(&["1,,,,,,Sirius,6.75,-16.716,-1.44"]);
        assert_eq!(records.len(), 1);
        assert_relative_eq!(records[0].ra_deg, 101.25, epsilon = 1e-12);
        assert_relative_eq!(records[0].dec_deg, -16.716, epsilon = 1e-12);
        assert_eq!(records[0].to_canonical().ra, "101.250000");
    }

    #[test]
    fn test_bright_rows_included_faint_rows_filtered() {
        let (records, stats) = extract(&[
            "1,,,100,,,,1.0,10.0,4.9",
            "2,,,101,,,,2.0,20.0,5.0",
            "3,,,102,,,,3.0,30.0,5.01",
        ]);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["HR 100", "HR 101"]);
        assert_eq!(
            stats,
            ExtractStats {
                rows: 3,
                accepted: 2,
                filtered: 1,
                malformed: 0
            }
        );
    }

    #[test]
    fn test_proper_name_overrides_faint_magnitude() {
        let (records, _) = extract(&["1,,,,,,Proxima Centauri,14.495,-62.68,11.01"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Proxima Centauri");
        assert_relative_eq!(records[0].magnitude, 11.01);
    }

    #[test]
    fn test_proper_name_overrides_missing_magnitude() {
        let (records, stats) = extract(&[
            "1,,,,,,Nameless Mag,1.0,2.0,",
            "2,,,,,,Garbled Mag,1.0,2.0,bright",
            "3,,,7001,,,,1.0,2.0,",
        ]);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Nameless Mag", "Garbled Mag"]);
        assert!(records.iter().all(|r| r.magnitude == UNKNOWN_MAGNITUDE));
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn test_proper_name_still_requires_coordinates() {
        let (records, stats) = extract(&[
            "1,,,,,,Broken Ra,,2.0,1.0",
            "2,,,,,,Broken Dec,1.0,north,1.0",
            "3,,,,,,Fine,1.0,2.0,1.0",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Fine");
        assert_eq!(stats.malformed, 2);
    }

    #[test]
    fn test_malformed_rows_do_not_abort_batch() {
        let (records, stats) = extract(&[
            "1,,,,,,Vega,18.6156,38.7837,0.03",
            "2,,,,,,Smudged,18.x,1.0,1.0",
            "3,,,,,,Deneb,20.6905,45.2803,1.25",
            "4,,,,,,Nowhere,1.0,95.0,1.0",
            "5,,,,,,Infinite,inf,1.0,1.0",
        ]);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Vega", "Deneb"]);
        assert_eq!(stats.malformed, 3);
        assert_eq!(stats.rows, 5);
    }

    #[test]
    fn test_unterminated_quote_only_costs_trailing_rows() {
        let (records, stats) = extract(&[
            "1,,,,,,Vega,18.6156,38.7837,0.03",
            "2,,,,,,\"Unterminated,1.0,2.0,1.0",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let (records, _) = extract(&["1,,,,,,\"Rigil Kentaurus, A\",14.66,-60.83,-0.01"]);
        assert_eq!(records[0].name, "Rigil Kentaurus, A");
    }

    #[test]
    fn test_source_row_order_is_preserved() {
        let (records, _) = extract(&[
            "1,,,1,,,,1.0,0.0,2.0",
            "2,,,2,,,,1.0,0.0,-1.5",
            "3,,,3,,,,1.0,0.0,0.3",
        ]);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["HR 1", "HR 2", "HR 3"]);
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let text = "mag,dec,ra,proper\n0.5,7.407,5.919,Betelgeuse\n";
        let records = RecordExtractor::default().extract(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Betelgeuse");
        assert_relative_eq!(records[0].ra_deg, 88.785, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_required_columns_yield_nothing() {
        let text = "proper,mag\nSirius,-1.44\n";
        let (records, stats) = RecordExtractor::default().extract_with_stats(text);
        assert!(records.is_empty());
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn test_custom_magnitude_limit() {
        let text = format!("{HEADER}\n1,,,1,,,,1.0,0.0,5.5\n");
        assert!(RecordExtractor::default().extract(&text).is_empty());
        assert_eq!(RecordExtractor::new(6.0).extract(&text).len(), 1);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(6.75, 101.25)]
    #[case(23.999, 359.985)]
    #[case(24.0, 0.0)]
    #[case(-1.0, 345.0)]
    fn test_hours_to_degrees(#[case] hours: f64, #[case] degrees: f64) {
        assert_relative_eq!(hours_to_degrees(hours), degrees, epsilon = 1e-9);
    }
}
