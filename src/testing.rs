//! Doctor fixtures shared by the unit tests

use crate::types::{ConsultationType, Doctor};

pub fn doctor(id: &str, name: &str) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        name_initials: None,
        specialty: Vec::new(),
        experience: String::new(),
        fees: String::new(),
        consultation_type: ConsultationType::InClinic,
        photo: None,
        doctor_introduction: None,
        languages: Vec::new(),
        clinic: None,
        video_consult: false,
        in_clinic: true,
    }
}

impl Doctor {
    pub fn with_specialties(mut self, specialties: &[&str]) -> Self {
        self.specialty = specialties.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_fees(mut self, fees: &str) -> Self {
        self.fees = fees.to_string();
        self
    }

    pub fn with_experience(mut self, experience: &str) -> Self {
        self.experience = experience.to_string();
        self
    }

    pub fn with_modes(mut self, video_consult: bool, in_clinic: bool) -> Self {
        self.video_consult = video_consult;
        self.in_clinic = in_clinic;
        self.consultation_type = ConsultationType::from_flags(video_consult, in_clinic);
        self
    }
}

pub fn ids(doctors: &[Doctor]) -> Vec<&str> {
    doctors.iter().map(|d| d.id.as_str()).collect()
}
