/// Represents an airport with its IATA code, geographical position, country,
/// and the relative weight used when drawing departure points.
#[derive(Clone, Debug, PartialEq)]
pub struct Airport {
    pub iata_code: String,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub weight: f64,
}

impl Airport {
    pub fn new(
        iata_code: &str,
        name: &str,
        country: &str,
        latitude: f64,
        longitude: f64,
        weight: f64,
    ) -> Self {
        Airport {
            iata_code: iata_code.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            latitude,
            longitude,
            weight,
        }
    }
}
