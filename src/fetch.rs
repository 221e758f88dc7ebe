use crate::error::DirectoryError;
use crate::log;
use crate::transform::parse_api_data;
use crate::types::Doctor;

/// GET the directory endpoint once and transform the payload.
/// No retry, no custom timeout.
pub fn fetch_doctors(url: &str) -> Result<Vec<Doctor>, DirectoryError> {
    log::info(&format!("fetching doctors from {}", url));

    let response =
        reqwest::blocking::get(url).map_err(|e| DirectoryError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DirectoryError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| DirectoryError::Fetch(e.to_string()))?;

    let doctors = parse_api_data(&body)?;
    log::info(&format!("loaded {} doctors", doctors.len()));
    Ok(doctors)
}
