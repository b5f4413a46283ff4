use super::aircraft::AircraftType;
use super::airport::Airport;

/// A country flights may originate from, with the relative weight used to
/// bias departures toward busier regions.
#[derive(Clone, Debug, PartialEq)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub weight: f64,
}

impl Country {
    pub fn new(code: &str, name: &str, weight: f64) -> Self {
        Country {
            code: code.to_string(),
            name: name.to_string(),
            weight,
        }
    }
}

/// Immutable catalog the generator draws from. Built once and injected at
/// construction time rather than living in globals.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub airports: Vec<Airport>,
    pub countries: Vec<Country>,
    pub aircraft: Vec<AircraftType>,
}

impl Catalog {
    pub fn new(airports: Vec<Airport>, countries: Vec<Country>, aircraft: Vec<AircraftType>) -> Self {
        Catalog {
            airports,
            countries,
            aircraft,
        }
    }

    /// Airports whose country matches `country_code`.
    pub fn airports_in(&self, country_code: &str) -> Vec<&Airport> {
        self.airports
            .iter()
            .filter(|a| a.country == country_code)
            .collect()
    }

    /// The built-in catalog of major airports, countries, and aircraft types.
    pub fn builtin() -> Self {
        let airports = [
            ("IST", "Istanbul", "tr", 41.275, 28.751, 100.0),
            ("LHR", "London Heathrow", "gb", 51.47, -0.454, 95.0),
            ("JFK", "New York JFK", "us", 40.641, -73.778, 90.0),
            ("DXB", "Dubai Intl", "ae", 25.253, 55.365, 92.0),
            ("HND", "Tokyo Haneda", "jp", 35.549, 139.779, 88.0),
            ("CDG", "Paris CDG", "fr", 49.009, 2.547, 85.0),
            ("AMS", "Amsterdam Schiphol", "nl", 52.31, 4.768, 82.0),
            ("FRA", "Frankfurt", "de", 50.037, 8.562, 75.0),
            ("SIN", "Singapore Changi", "sg", 1.364, 103.991, 70.0),
            ("LAX", "Los Angeles Intl", "us", 33.941, -118.408, 78.0),
            ("SYD", "Sydney Kingsford Smith", "au", -33.939, 151.175, 45.0),
            ("GRU", "Sao Paulo", "br", -23.435, -46.473, 40.0),
            ("DEL", "Delhi Indira Gandhi", "in", 28.556, 77.1, 65.0),
            ("YYZ", "Toronto Pearson", "ca", 43.677, -79.624, 55.0),
            ("DOH", "Doha Hamad", "qa", 25.273, 51.608, 72.0),
            ("CPT", "Cape Town", "za", -33.971, 18.602, 25.0),
            ("SCL", "Santiago", "cl", -33.393, -70.785, 20.0),
            ("AKL", "Auckland", "nz", -37.008, 174.783, 15.0),
            ("HEL", "Helsinki", "fi", 60.317, 24.963, 30.0),
            ("ESB", "Ankara Esenboga", "tr", 40.128, 32.995, 50.0),
        ]
        .into_iter()
        .map(|(code, name, country, lat, lon, weight)| {
            Airport::new(code, name, country, lat, lon, weight)
        })
        .collect();

        let countries = [
            ("tr", "Turkiye", 100.0),
            ("us", "USA", 85.0),
            ("gb", "UK", 70.0),
            ("de", "Germany", 65.0),
            ("fr", "France", 60.0),
            ("ae", "UAE", 55.0),
            ("jp", "Japan", 50.0),
            ("qa", "Qatar", 45.0),
            ("nl", "Netherlands", 40.0),
            ("ch", "Switzerland", 30.0),
            ("br", "Brazil", 25.0),
            ("au", "Australia", 20.0),
            ("no", "Norway", 15.0),
            ("is", "Iceland", 5.0),
        ]
        .into_iter()
        .map(|(code, name, weight)| Country::new(code, name, weight))
        .collect();

        let aircraft = [
            ("Airbus A320neo", 450, 36000, 100.0),
            ("Boeing 737-800", 440, 35000, 95.0),
            ("Airbus A321neo", 455, 37000, 85.0),
            ("Boeing 787-9", 510, 39000, 60.0),
            ("Airbus A350-1000", 515, 40000, 55.0),
            ("Boeing 777-300ER", 500, 38000, 50.0),
            ("Airbus A380", 490, 41000, 15.0),
            ("Bombardier CRJ-900", 420, 31000, 40.0),
            ("Embraer E195", 430, 33000, 35.0),
            ("Gulfstream G650", 530, 45000, 10.0),
            ("Cessna 172", 120, 6000, 20.0),
            ("Piper PA-28", 130, 7500, 15.0),
            ("Bell 407", 130, 3000, 8.0),
            ("Sikorsky S-76", 155, 4500, 5.0),
            ("Airbus H145", 140, 4000, 7.0),
        ]
        .into_iter()
        .map(|(model, speed, alt, weight)| AircraftType::new(model, speed, alt, weight))
        .collect();

        Catalog::new(airports, countries, aircraft)
    }
}
