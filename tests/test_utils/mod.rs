use serde::Deserialize;
use travelbar_core::coordinate::Coordinate;
use travelbar_core::gps_processor::RawData;

pub const DUBLIN_START: Coordinate = Coordinate {
    latitude: 53.345905,
    longitude: -6.294289,
};
pub const DUBLIN_DESTINATION: Coordinate = Coordinate {
    latitude: 53.347799,
    longitude: -6.243922,
};

#[derive(Deserialize)]
struct Row {
    timestamp_ms: i64,
    latitude: f64,
    longitude: f64,
    accuracy: f32,
}

// A walk across Dublin, one fix every 3 seconds, with one inaccurate fix and
// one stale fix mixed in.
pub fn load_dublin_trip() -> Vec<RawData> {
    let mut reader = csv::Reader::from_path("./tests/data/dublin_trip.csv").unwrap();
    reader
        .deserialize::<Row>()
        .map(|row| {
            let row = row.unwrap();
            RawData {
                latitude: row.latitude,
                longitude: row.longitude,
                timestamp_ms: Some(row.timestamp_ms),
                accuracy: Some(row.accuracy),
            }
        })
        .collect()
}

// Distance that grows linearly with longitude along the equator, so progress
// numbers can be checked exactly.
pub fn equator(a: &Coordinate, b: &Coordinate) -> f64 {
    (a.longitude - b.longitude).abs() * 111_195.0
}
