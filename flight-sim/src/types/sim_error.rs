use std::fmt;

/// Represents errors that can occur in the flight simulator application.
#[derive(Debug)]
pub enum SimError {
    InvalidInput,
    UnknownFlight(String),   // Callsign not present in the live pool
    EmptyCatalog(String),    // The named catalog table holds no entries
    InvalidInterval(String), // A timer interval outside the accepted range
    TimerStartError(String), // Errors spawning the timer thread
    LockPoisoned(String),    // A shared-state lock could not be acquired
    LoggerError(String),     // The logger could not be set up
    Other(String),           // Generic error case with a custom message
}

/// Implement the Display trait for user-friendly error messages
impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidInput => {
                write!(f, "Invalid input. Please check your input and try again.")
            }
            SimError::UnknownFlight(ref callsign) => {
                write!(f, "No flight with callsign: {}", callsign)
            }
            SimError::EmptyCatalog(ref table) => {
                write!(f, "Catalog has no {} entries", table)
            }
            SimError::InvalidInterval(msg) => write!(f, "Invalid interval: {}", msg),
            SimError::TimerStartError(msg) => write!(f, "Timer start error: {}", msg),
            SimError::LockPoisoned(msg) => write!(f, "Lock error: {}", msg),
            SimError::LoggerError(msg) => write!(f, "Logger error: {}", msg),
            SimError::Other(ref message) => write!(f, "Error: {}", message),
        }
    }
}
