use crate::sdk::orientation::{GeoPoint, RoadGeometry, RoadId};
use serde::Deserialize;
use std::collections::HashMap;

// --- Data structures for parsing Overpass `[out:json]` responses ---

#[derive(Deserialize, Debug, Default)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Element {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    // Only present with `out geom`
    #[serde(default)]
    pub geometry: Option<Vec<LatLon>>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassResponse {
    /// The remark, if Overpass used it to report a failed query.
    pub fn runtime_error(&self) -> Option<&str> {
        self.remark
            .as_deref()
            .filter(|remark| remark.to_ascii_lowercase().contains("error"))
    }

    /// Road geometries for every way carrying a geometry, in response
    /// order. Other element types and ways without one are dropped.
    pub fn into_roads(self) -> Vec<RoadGeometry> {
        self.elements
            .into_iter()
            .filter(|element| element.kind == "way")
            .filter_map(|mut element| {
                let geometry = element.geometry.take()?;
                let vertices = geometry.iter().map(|p| GeoPoint::new(p.lat, p.lon)).collect();
                let name = element.tags.remove("name");
                Some(RoadGeometry::new(RoadId(element.id), name, vertices))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": 0.6,
        "generator": "Overpass API",
        "elements": [
            {
                "type": "way",
                "id": 101,
                "bounds": {"minlat": -33.9, "minlon": 151.0, "maxlat": -33.8, "maxlon": 151.1},
                "nodes": [1, 2],
                "geometry": [{"lat": -33.95, "lon": 151.00}, {"lat": -33.94, "lon": 151.00}],
                "tags": {"highway": "residential", "name": "Kennedy Street"}
            },
            {"type": "way", "id": 102, "tags": {"highway": "service"}},
            {
                "type": "relation",
                "id": 900,
                "geometry": [{"lat": -33.95, "lon": 151.00}, {"lat": -33.96, "lon": 151.00}],
                "tags": {"highway": "pedestrian", "name": "Plaza"}
            },
            {
                "type": "way",
                "id": 103,
                "geometry": [{"lat": -33.95, "lon": 151.01}, {"lat": -33.95, "lon": 151.02}],
                "tags": {"highway": "footway"}
            }
        ]
    }"#;

    #[test]
    fn keeps_only_ways_with_geometry_in_order() {
        let response: OverpassResponse = serde_json::from_str(SAMPLE).unwrap();
        assert!(response.runtime_error().is_none());

        let roads = response.into_roads();
        assert_eq!(roads.len(), 2);
        assert_eq!(roads[0].id(), RoadId(101));
        assert_eq!(roads[0].name(), Some("Kennedy Street"));
        assert_eq!(roads[0].vertices()[1], GeoPoint::new(-33.94, 151.00));
        assert_eq!(roads[1].id(), RoadId(103));
        assert_eq!(roads[1].display_name(), "Unnamed road");
    }

    #[test]
    fn detects_runtime_error_remarks() {
        let body = r#"{"elements": [], "remark": "runtime error: Query timed out in \"query\" at line 3 after 26 seconds."}"#;
        let response: OverpassResponse = serde_json::from_str(body).unwrap();
        assert!(response.runtime_error().unwrap().contains("timed out"));

        let empty: OverpassResponse = serde_json::from_str(r#"{"elements": []}"#).unwrap();
        assert!(empty.runtime_error().is_none());
        assert!(empty.into_roads().is_empty());
    }
}
