use super::resolver::Facing;
use crate::sdk::orientation::{CompassDirection, GeoPoint, RoadId};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, fs, io::Result as IoResult, path::Path, str::FromStr};

/// Coordinates rounded to micro-degrees (~0.1 m), usable as a map key.
#[derive(Serialize, Deserialize, Eq, PartialEq, Hash, Clone, Copy, Debug)]
pub struct CoordKey {
    lat_e6: i64,
    lon_e6: i64,
}

impl CoordKey {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            lat_e6: (point.lat * 1e6).round() as i64,
            lon_e6: (point.lon * 1e6).round() as i64,
        }
    }
}

impl From<GeoPoint> for CoordKey {
    fn from(point: GeoPoint) -> Self {
        Self::new(point)
    }
}

impl fmt::Display for CoordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6},{:.6}",
            self.lat_e6 as f64 / 1e6,
            self.lon_e6 as f64 / 1e6
        )
    }
}

impl FromStr for CoordKey {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or("Invalid CoordKey format")?;
        let lat: f64 = lat.trim().parse().map_err(|_| "Invalid CoordKey latitude")?;
        let lon: f64 = lon.trim().parse().map_err(|_| "Invalid CoordKey longitude")?;
        Ok(Self::new(GeoPoint::new(lat, lon)))
    }
}

// --- Serde helper: JSON object keys must be strings ---
mod coord_map {
    use super::{CachedFacing, CoordKey};
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
    use std::{collections::HashMap, str::FromStr};

    pub fn serialize<S: Serializer>(
        map: &HashMap<CoordKey, CachedFacing>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let string_map: HashMap<String, &CachedFacing> =
            map.iter().map(|(k, v)| (k.to_string(), v)).collect();
        string_map.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<CoordKey, CachedFacing>, D::Error> {
        let string_map = HashMap::<String, CachedFacing>::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(k, v)| Ok((CoordKey::from_str(&k).map_err(Error::custom)?, v)))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CachedFacing {
    pub direction: CompassDirection,
    pub road_id: RoadId,
    pub road_name: Option<String>,
    pub distance_m: f64,
    /// Search radius the road was selected under. Entries written before this
    /// was recorded load as 0 and never match.
    #[serde(default)]
    pub radius_m: f64,
}

impl CachedFacing {
    pub fn new(facing: &Facing, radius_m: f64) -> Self {
        Self {
            direction: facing.direction,
            road_id: facing.road_id,
            road_name: facing.road_name.clone(),
            distance_m: facing.distance_m,
            radius_m,
        }
    }
}

/// Successful resolutions from earlier runs, persisted as JSON.
#[derive(Serialize, Deserialize, Default)]
pub struct FacingCache {
    #[serde(with = "coord_map")]
    facings: HashMap<CoordKey, CachedFacing>,
}

impl FacingCache {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        if path.as_ref().exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
    }

    /// The entry for `point`, if it was resolved with the same search radius.
    pub fn get(&self, point: GeoPoint, radius_m: f64) -> Option<&CachedFacing> {
        self.facings
            .get(&CoordKey::new(point))
            .filter(|cached| cached.radius_m == radius_m)
    }

    pub fn insert(&mut self, point: GeoPoint, facing: CachedFacing) {
        self.facings.insert(CoordKey::new(point), facing);
    }

    pub fn len(&self) -> usize {
        self.facings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(direction: CompassDirection) -> CachedFacing {
        CachedFacing {
            direction,
            road_id: RoadId(4242),
            road_name: Some("Kennedy Street".into()),
            distance_m: 12.5,
            radius_m: 80.0,
        }
    }

    #[test]
    fn key_rounds_to_micro_degrees() {
        let a = CoordKey::new(GeoPoint::new(-33.970_100_04, 150.993_2));
        let b = CoordKey::new(GeoPoint::new(-33.970_1, 150.993_200_3));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "-33.970100,150.993200");
        assert_eq!("-33.970100,150.993200".parse::<CoordKey>().unwrap(), a);
        assert!("nonsense".parse::<CoordKey>().is_err());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let cache = FacingCache::load_from_file(dir.path().join("absent.json")).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn survives_a_save_and_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("facing_cache.json");

        let house = GeoPoint::new(-33.9701, 150.9932);
        let mut cache = FacingCache::default();
        cache.insert(house, cached(CompassDirection::ENE));
        cache.save_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"-33.970100,150.993200\""));
        assert!(text.contains("\"ENE\""));

        let loaded = FacingCache::load_from_file(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(house, 80.0), Some(&cached(CompassDirection::ENE)));
        assert!(loaded.get(GeoPoint::new(-33.9702, 150.9932), 80.0).is_none());
    }

    #[test]
    fn entries_only_match_their_search_radius() {
        let house = GeoPoint::new(-33.9701, 150.9932);
        let mut cache = FacingCache::default();
        cache.insert(house, cached(CompassDirection::N));

        assert!(cache.get(house, 80.0).is_some());
        assert!(cache.get(house, 150.0).is_none());

        cache.insert(house, CachedFacing { radius_m: 150.0, ..cached(CompassDirection::S) });
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(house, 150.0).map(|c| c.direction), Some(CompassDirection::S));
        assert!(cache.get(house, 80.0).is_none());
    }

    #[test]
    fn entries_without_a_radius_are_stale() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("facing_cache.json");
        std::fs::write(
            &path,
            r#"{"facings": {"-33.970100,150.993200": {"direction": "E", "road_id": 7, "road_name": null, "distance_m": 3.0}}}"#,
        )
        .unwrap();

        let cache = FacingCache::load_from_file(&path).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(cache.get(GeoPoint::new(-33.9701, 150.9932), 80.0).is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("facing_cache.json");
        std::fs::write(&path, r#"{"facings": {"not-a-coord": {}}}"#).unwrap();
        assert!(FacingCache::load_from_file(&path).is_err());
    }
}
