//! Embedded bright-star table used when no mirror yields a catalog.
//!
//! Coordinates are J2000 right ascension and declination in degrees. The
//! table is already in display order and carries no magnitudes.

use crate::catalog::{CatalogRecord, UNKNOWN_MAGNITUDE};

/// `(name, ra_deg, dec_deg)` for 45 well-known bright stars.
pub static FALLBACK_STARS: [(&str, f64, f64); 45] = [
    ("Sirius", 101.28708, -16.716111),
    ("Canopus", 95.98791, -52.695833),
    ("Arcturus", 213.91542, 19.179722),
    ("Rigil Kentaurus", 219.89958, -60.835278),
    ("Vega", 279.23458, 38.783611),
    ("Capella", 79.1725, 45.998056),
    ("Rigel", 78.63458, -8.201667),
    ("Procyon", 114.82542, 5.225),
    ("Achernar", 24.42875, -57.236667),
    ("Betelgeuse", 88.79292, 7.406944),
    ("Hadar", 210.95583, -60.373056),
    ("Altair", 297.70833, 8.868333),
    ("Aldebaran", 68.98, -16.509167),
    ("Antares", 247.35167, -26.431944),
    ("Spica", 201.29833, -11.164167),
    ("Pollux", 116.32875, 28.026111),
    ("Fomalhaut", 344.41292, -29.622222),
    ("Mimosa", 191.97167, -59.688611),
    ("Deneb", 310.35792, 45.280278),
    ("Acrux", 186.64958, -63.099167),
    ("Regulus", 152.09292, 11.967222),
    ("Adhara", 104.65625, -28.972222),
    ("Gacrux", 187.79125, -57.113333),
    ("Shaula", 263.40208, -37.103889),
    ("Bellatrix", 81.28292, 6.349722),
    ("El Nath", 81.57292, 28.6075),
    ("Miaplacidus", 138.3, -69.717222),
    ("Alnilam", 84.05333, -1.201944),
    ("Al Na'ir", 332.05833, -46.961111),
    ("Alioth", 193.50708, 55.959722),
    ("Alnitak", 85.18958, -1.942778),
    ("Mirfak", 51.08083, 49.628056),
    ("Wezen", 108.625, -26.833333),
    ("Kaus Australis", 274.09167, -34.375),
    ("Alkaid", 206.24167, 49.316667),
    ("Sargas", 259.08333, -42.916667),
    ("Castor", 113.64833, 31.888889),
    ("Gienah", 185.25, -17.533333),
    ("Adara", 104.65625, -28.972222),
    ("Peacock", 304.77083, -56.716667),
    ("Alhhena", 109.95833, 16.408333),
    ("Dubhe", 165.03333, 61.75),
    ("Polaris", 37.95, 89.266667),
    ("Mirzam", 100.0, -17.95),
    ("Alpheratz", 2.133333, 29.091667),
];

/// The fallback table as catalog records, in table order.
///
/// Every record has the same (unknown) magnitude, so sorting by magnitude
/// leaves the order unchanged.
pub fn fallback_records() -> Vec<CatalogRecord> {
    FALLBACK_STARS
        .iter()
        .map(|&(name, ra, dec)| CatalogRecord::new(name, ra, dec, UNKNOWN_MAGNITUDE))
        .collect()
}
