use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::log;

/// Treat an explicit `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Specialty object as sent by the API: `{"name": "Dentist"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSpecialty {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicAddress {
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<ClinicAddress>,
}

/// Doctor record in the wire shape returned by the directory endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDoctor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_initials: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub specialities: Vec<ApiSpecialty>,
    #[serde(default, deserialize_with = "nullable")]
    pub experience: String,
    #[serde(default, deserialize_with = "nullable")]
    pub fees: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub doctor_introduction: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub clinic: Option<Clinic>,
    #[serde(default, deserialize_with = "nullable")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub in_clinic: bool,
}

/// Consultation-type label derived from a doctor's two mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationType {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
    #[serde(rename = "Both")]
    Both,
}

impl ConsultationType {
    /// Label derivation. A doctor with neither flag set still reads "In Clinic".
    pub fn from_flags(video_consult: bool, in_clinic: bool) -> Self {
        match (video_consult, in_clinic) {
            (true, true) => ConsultationType::Both,
            (true, false) => ConsultationType::VideoConsult,
            _ => ConsultationType::InClinic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::VideoConsult => "Video Consult",
            ConsultationType::InClinic => "In Clinic",
            ConsultationType::Both => "Both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Video Consult" => Some(ConsultationType::VideoConsult),
            "In Clinic" => Some(ConsultationType::InClinic),
            "Both" => Some(ConsultationType::Both),
            _ => None,
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Doctor record in the display shape used by every stage after loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub name_initials: Option<String>,
    pub specialty: Vec<String>,
    pub experience: String,
    pub fees: String,
    pub consultation_type: ConsultationType,
    pub photo: Option<String>,
    pub doctor_introduction: Option<String>,
    pub languages: Vec<String>,
    pub clinic: Option<Clinic>,
    pub video_consult: bool,
    pub in_clinic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Fees,
    Experience,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortKey::Fees),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }
}

/// Every user-adjustable search, filter and sort parameter at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub consultation: Option<ConsultationType>,
    pub specialties: BTreeSet<String>,
    pub sort: Option<SortKey>,
}

/// A specialty can be selected only if it survives the comma-joined URL parameter
pub fn is_selectable_specialty(specialty: &str) -> bool {
    if specialty.is_empty() {
        return false;
    }
    if specialty.contains(',') {
        log::warn(&format!(
            "ignoring specialty '{}': commas cannot be kept in the URL",
            specialty
        ));
        return false;
    }
    true
}

impl FilterState {
    /// Add the specialty if absent, remove it if present. Blank names and
    /// names containing a comma are ignored.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        if !is_selectable_specialty(specialty) {
            return;
        }
        if !self.specialties.remove(specialty) {
            self.specialties.insert(specialty.to_string());
        }
    }

    /// Reset the filter panel. The search box is not part of the panel and keeps its term.
    pub fn clear_filters(&mut self) {
        self.consultation = None;
        self.specialties.clear();
        self.sort = None;
    }
}
