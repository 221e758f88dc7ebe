use serde::{Deserialize, Serialize};

use crate::types::{ConsultationType, Doctor};

pub const CLINIC_FALLBACK: &str = "Clinic information unavailable";

/// Everything a doctor card shows, with the render-time defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorCard {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub specialties: Vec<String>,
    pub experience: String,
    pub introduction: Option<String>,
    pub clinic_name: String,
    pub clinic_location: String,
    pub clinic_address: Option<String>,
    pub consultation_badges: Vec<ConsultationType>,
    pub languages: Option<String>,
    pub fees: String,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl DoctorCard {
    pub fn from_doctor(doctor: &Doctor, photo_placeholder: &str) -> Self {
        let clinic = doctor.clinic.as_ref();
        let address = clinic.and_then(|c| c.address.as_ref());

        let locality = non_empty(address.and_then(|a| a.locality.as_ref()));
        let city = non_empty(address.and_then(|a| a.city.as_ref()));
        let clinic_location = match (locality, city) {
            (Some(locality), Some(city)) => format!("{}, {}", locality, city),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => String::new(),
        };

        let mut consultation_badges = Vec::new();
        if doctor.video_consult {
            consultation_badges.push(ConsultationType::VideoConsult);
        }
        if doctor.in_clinic {
            consultation_badges.push(ConsultationType::InClinic);
        }

        DoctorCard {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            photo: non_empty(doctor.photo.as_ref())
                .unwrap_or(photo_placeholder)
                .to_string(),
            specialties: doctor.specialty.clone(),
            experience: doctor.experience.clone(),
            introduction: non_empty(doctor.doctor_introduction.as_ref()).map(str::to_string),
            clinic_name: non_empty(clinic.and_then(|c| c.name.as_ref()))
                .unwrap_or(CLINIC_FALLBACK)
                .to_string(),
            clinic_location,
            clinic_address: non_empty(address.and_then(|a| a.address_line1.as_ref()))
                .map(str::to_string),
            consultation_badges,
            languages: (!doctor.languages.is_empty()).then(|| doctor.languages.join(", ")),
            fees: doctor.fees.clone(),
        }
    }
}

/// Heading above the card list
pub fn result_summary(count: usize) -> String {
    if count == 0 {
        "No doctors found".to_string()
    } else {
        format!("{} Doctors found", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PHOTO_PLACEHOLDER;
    use crate::testing::doctor;
    use crate::types::{Clinic, ClinicAddress};

    #[test]
    fn test_card_defaults_for_sparse_record() {
        let d = doctor("1", "Dr. Sparse").with_modes(false, false);
        let card = DoctorCard::from_doctor(&d, DEFAULT_PHOTO_PLACEHOLDER);

        assert_eq!(card.photo, DEFAULT_PHOTO_PLACEHOLDER);
        assert_eq!(card.clinic_name, CLINIC_FALLBACK);
        assert_eq!(card.clinic_location, "");
        assert_eq!(card.clinic_address, None);
        assert_eq!(card.introduction, None);
        assert_eq!(card.languages, None);
        assert!(card.consultation_badges.is_empty());
    }

    #[test]
    fn test_card_full_record() {
        let mut d = doctor("2", "Dr. Full").with_modes(true, true);
        d.photo = Some("https://example.org/full.jpg".to_string());
        d.doctor_introduction = Some("Senior consultant".to_string());
        d.languages = vec!["English".to_string(), "Hindi".to_string()];
        d.clinic = Some(Clinic {
            name: Some("Apollo Clinic".to_string()),
            address: Some(ClinicAddress {
                locality: Some("Indiranagar".to_string()),
                city: Some("Bangalore".to_string()),
                address_line1: Some("12 CMH Road".to_string()),
                ..Default::default()
            }),
        });

        let card = DoctorCard::from_doctor(&d, DEFAULT_PHOTO_PLACEHOLDER);
        assert_eq!(card.photo, "https://example.org/full.jpg");
        assert_eq!(card.clinic_name, "Apollo Clinic");
        assert_eq!(card.clinic_location, "Indiranagar, Bangalore");
        assert_eq!(card.clinic_address.as_deref(), Some("12 CMH Road"));
        assert_eq!(card.languages.as_deref(), Some("English, Hindi"));
        assert_eq!(
            card.consultation_badges,
            vec![ConsultationType::VideoConsult, ConsultationType::InClinic]
        );
    }

    #[test]
    fn test_location_with_city_only() {
        let mut d = doctor("3", "Dr. City");
        d.clinic = Some(Clinic {
            name: Some(String::new()),
            address: Some(ClinicAddress {
                city: Some("Pune".to_string()),
                ..Default::default()
            }),
        });
        let card = DoctorCard::from_doctor(&d, DEFAULT_PHOTO_PLACEHOLDER);
        assert_eq!(card.clinic_location, "Pune");
        assert_eq!(card.clinic_name, CLINIC_FALLBACK);
    }

    #[test]
    fn test_result_summary() {
        assert_eq!(result_summary(0), "No doctors found");
        assert_eq!(result_summary(12), "12 Doctors found");
    }
}
