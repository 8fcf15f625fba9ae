//! Star records produced by extraction and their on-disk projection.

/// Magnitude assigned to stars whose catalog magnitude is unknown.
///
/// Sorts after every measured magnitude and compares equal to itself, so a
/// stable sort keeps such stars in their original order.
pub const UNKNOWN_MAGNITUDE: f64 = f64::INFINITY;

/// A single accepted star.
///
/// Right ascension and declination are both in degrees. The magnitude is only
/// used to order the output and is not written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub name: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub magnitude: f64,
}

impl CatalogRecord {
    pub fn new(name: impl Into<String>, ra_deg: f64, dec_deg: f64, magnitude: f64) -> Self {
        Self {
            name: name.into(),
            ra_deg,
            dec_deg,
            magnitude,
        }
    }

    /// Project onto the canonical `name,ra,dec` schema.
    pub fn to_canonical(&self) -> CanonicalRow {
        CanonicalRow {
            name: self.name.clone(),
            ra: format!("{:.6}", self.ra_deg),
            dec: format!("{:.6}", self.dec_deg),
        }
    }
}

/// One output row with coordinates fixed to 6 decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRow {
    pub name: String,
    pub ra: String,
    pub dec: String,
}

impl CanonicalRow {
    /// Column names of the canonical schema, in order.
    pub const HEADER: [&'static str; 3] = ["name", "ra", "dec"];

    pub fn fields(&self) -> [&str; 3] {
        [&self.name, &self.ra, &self.dec]
    }
}
