//! Appointment dialog validation. A valid request only produces the
//! confirmation text; nothing is stored or sent anywhere.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

pub const TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "02:00 PM", "02:30 PM",
    "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

pub const CONFIRMATION_TITLE: &str = "Appointment booked successfully!";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingRequest {
    pub doctor_name: String,
    pub clinic_name: String,
    pub patient_name: String,
    pub phone: String,
    pub email: String,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
}

fn require(value: &str, field: &'static str) -> Result<(), BookingError> {
    if value.trim().is_empty() {
        return Err(BookingError::MissingField(field));
    }
    Ok(())
}

/// Same shape the browser accepts for `<input type="email">`
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

fn looks_like_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// A blank date or time counts as not chosen
fn selected(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Only dates after `today`, never a Sunday
pub fn is_bookable_date(date: NaiveDate, today: NaiveDate) -> bool {
    date > today && date.weekday() != Weekday::Sun
}

pub fn validate_booking(
    request: &BookingRequest,
    today: NaiveDate,
) -> Result<BookingConfirmation, BookingError> {
    require(&request.patient_name, "name")?;
    require(&request.phone, "phone number")?;
    require(&request.email, "email")?;
    if !looks_like_email(&request.email) {
        return Err(BookingError::InvalidEmail);
    }

    let slot = (
        selected(request.date.as_deref()),
        selected(request.time.as_deref()),
    );
    let (Some(raw_date), Some(time)) = slot else {
        return Err(BookingError::MissingSlot);
    };

    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(raw_date.to_string()))?;
    if date <= today {
        return Err(BookingError::PastDate);
    }
    if date.weekday() == Weekday::Sun {
        return Err(BookingError::Sunday);
    }
    if !TIME_SLOTS.contains(&time) {
        return Err(BookingError::UnknownTimeSlot(time.to_string()));
    }

    Ok(BookingConfirmation {
        title: CONFIRMATION_TITLE.to_string(),
        description: format!(
            "Your appointment with {} is scheduled for {} at {}",
            request.doctor_name,
            date.format("%d/%m/%Y"),
            time
        ),
        date,
        time: time.to_string(),
    })
}
