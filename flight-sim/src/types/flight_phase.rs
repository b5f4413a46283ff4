/// Progress fraction where the climb ends.
pub const CLIMB_END: f64 = 0.10;
/// Progress fraction where the descent begins.
pub const DESCENT_START: f64 = 0.90;

/// The portion of the journey a flight is currently in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightPhase {
    Climb,
    Cruise,
    Descent,
}

impl FlightPhase {
    /// Maps a progress fraction in `[0, 1]` to its phase.
    pub fn from_progress(progress: f64) -> Self {
        if progress < CLIMB_END {
            FlightPhase::Climb
        } else if progress >= DESCENT_START {
            FlightPhase::Descent
        } else {
            FlightPhase::Cruise
        }
    }

    /// Converts the `FlightPhase` variant to its string representation.
    pub fn as_str(&self) -> &str {
        match self {
            FlightPhase::Climb => "climb",
            FlightPhase::Cruise => "cruise",
            FlightPhase::Descent => "descent",
        }
    }
}
