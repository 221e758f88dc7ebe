use thiserror::Error;

/// Failures while loading the doctor list. Each one leaves the directory empty.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to fetch doctors: {0}")]
    Fetch(String),

    #[error("Failed to fetch doctors: HTTP status {0}")]
    Status(u16),

    #[error("Failed to parse doctors: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DirectoryError {
    /// Text for the single notification shown to the user
    pub fn user_message(&self) -> &'static str {
        "Failed to load doctors data. Please try again later."
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please enter your {0}")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please select date and time for your appointment")]
    MissingSlot,

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Appointments must be booked for a future date")]
    PastDate,

    #[error("The clinic is closed on Sundays")]
    Sunday,

    #[error("Unknown time slot '{0}'")]
    UnknownTimeSlot(String),
}
