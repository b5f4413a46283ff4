/// Geographical boundaries of the visible map view, defined by minimum and
/// maximum latitude and longitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl MapBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        MapBounds {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Checks whether a given coordinate falls within the view.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_checks_both_axes() {
        let bounds = MapBounds::new(35.0, 45.0, 20.0, 40.0);
        assert!(bounds.contains(41.275, 28.751));
        assert!(!bounds.contains(51.47, 28.751));
        assert!(!bounds.contains(41.275, -0.454));
        // Edges are inclusive.
        assert!(bounds.contains(35.0, 20.0));
        assert!(bounds.contains(45.0, 40.0));
    }
}
