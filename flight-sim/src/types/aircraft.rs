/// Model names treated as rotary-wing aircraft.
const ROTARY_MODELS: [&str; 3] = ["Bell 407", "Sikorsky S-76", "Airbus H145"];

/// A catalog entry describing an aircraft model and its nominal cruise
/// figures. The rotary-wing flag is derived from a fixed model-name set.
#[derive(Clone, Debug, PartialEq)]
pub struct AircraftType {
    pub model: String,
    pub cruise_speed_kts: i32,
    pub cruise_altitude_ft: i32,
    pub weight: f64,
    pub rotary_wing: bool,
}

impl AircraftType {
    pub fn new(model: &str, cruise_speed_kts: i32, cruise_altitude_ft: i32, weight: f64) -> Self {
        AircraftType {
            model: model.to_string(),
            cruise_speed_kts,
            cruise_altitude_ft,
            weight,
            rotary_wing: ROTARY_MODELS.contains(&model),
        }
    }

    /// Altitude in feet a flight of this type starts its climb from.
    /// Helicopters and light types lift off lower than airliners.
    pub fn departure_altitude_ft(&self) -> i32 {
        if self.rotary_wing || self.cruise_altitude_ft <= 7500 {
            500
        } else {
            1000
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotary_flag_follows_model_name() {
        assert!(AircraftType::new("Bell 407", 130, 3000, 8.0).rotary_wing);
        assert!(AircraftType::new("Airbus H145", 140, 4000, 7.0).rotary_wing);
        assert!(!AircraftType::new("Airbus A320neo", 450, 36000, 100.0).rotary_wing);
    }

    #[test]
    fn departure_altitude_depends_on_type() {
        assert_eq!(
            AircraftType::new("Cessna 172", 120, 6000, 20.0).departure_altitude_ft(),
            500
        );
        assert_eq!(
            AircraftType::new("Boeing 737-800", 440, 35000, 95.0).departure_altitude_ft(),
            1000
        );
    }
}
