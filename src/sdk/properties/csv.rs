use super::source::Property;
use crate::sdk::error::ProviderError;
use crate::sdk::orientation::GeoPoint;
use csv::ReaderBuilder;
use std::{fs::File, path::Path};

/// Reads properties from a CSV file with an `address,lat,lon` header.
///
/// Rows with missing or unparseable coordinates are skipped with a warning;
/// structural CSV errors abort the load.
pub fn load_properties_csv<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Property>, ProviderError> {
    let file = File::open(csv_path)?;
    let mut rdr = ReaderBuilder::new().delimiter(b',').trim(csv::Trim::All).from_reader(file);

    let mut properties = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let address = record.get(0).unwrap_or_default().to_string();

        let lat = record.get(1).and_then(|v| v.parse::<f64>().ok());
        let lon = record.get(2).and_then(|v| v.parse::<f64>().ok());
        match (lat, lon) {
            (Some(lat), Some(lon)) if GeoPoint::new(lat, lon).is_finite() => {
                properties.push(Property {
                    address,
                    location: GeoPoint::new(lat, lon),
                });
            }
            _ => log::warn!(
                "Property missing coordinates, skipping row {} ({:?})",
                line + 2,
                address
            ),
        }
    }

    Ok(properties)
}
