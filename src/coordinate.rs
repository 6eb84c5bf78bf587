use std::fmt;

// WGS84 mean radius.
const EARTH_RADIUS_IN_M: f64 = 6_371_008.8;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    // Range checking is left to whoever produced the value.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn haversine_distance(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_IN_M * h.sqrt().min(1.0).asin()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Distance between two coordinates in meters.
///
/// Implementations are expected to be symmetric and to return zero iff both
/// coordinates are equal. `JourneyTracker` relies on this but never checks it.
pub trait Distance {
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> f64;
}

/// Great-circle distance, good enough for the scale of a single trip.
#[derive(Copy, Clone, Debug, Default)]
pub struct Haversine;

impl Distance for Haversine {
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        a.haversine_distance(b)
    }
}

impl<F> Distance for F
where
    F: Fn(&Coordinate, &Coordinate) -> f64,
{
    fn distance(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        self(a, b)
    }
}
