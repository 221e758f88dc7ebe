use crate::types::{ApiDoctor, ConsultationType, Doctor};
use std::collections::BTreeSet;

#[cfg(feature = "native")]
use rayon::prelude::*;

/// Convert one API record into the display shape
pub fn transform_doctor(doctor: ApiDoctor) -> Doctor {
    Doctor {
        consultation_type: ConsultationType::from_flags(doctor.video_consult, doctor.in_clinic),
        specialty: doctor
            .specialities
            .into_iter()
            .map(|spec| spec.name)
            .collect(),
        id: doctor.id,
        name: doctor.name,
        name_initials: doctor.name_initials,
        experience: doctor.experience,
        fees: doctor.fees,
        photo: doctor.photo,
        doctor_introduction: doctor.doctor_introduction,
        languages: doctor.languages,
        clinic: doctor.clinic,
        video_consult: doctor.video_consult,
        in_clinic: doctor.in_clinic,
    }
}

/// Convert the API payload into display records, preserving order
#[cfg(not(feature = "native"))]
pub fn transform_api_data(api_data: Vec<ApiDoctor>) -> Vec<Doctor> {
    api_data.into_iter().map(transform_doctor).collect()
}

/// Convert the API payload into display records, preserving order
#[cfg(feature = "native")]
pub fn transform_api_data(api_data: Vec<ApiDoctor>) -> Vec<Doctor> {
    api_data.into_par_iter().map(transform_doctor).collect()
}

/// Parse the raw endpoint body and transform it
pub fn parse_api_data(json: &str) -> Result<Vec<Doctor>, serde_json::Error> {
    let api_data: Vec<ApiDoctor> = serde_json::from_str(json)?;
    Ok(transform_api_data(api_data))
}

/// Unique specialty names across all doctors, sorted ascending
pub fn extract_specialties(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|doctor| doctor.specialty.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
