use crate::rank::sort_doctors;
use crate::search::{name_matches, parse_term};
use crate::types::{ConsultationType, Doctor, FilterState};

fn consultation_matches(doctor: &Doctor, wanted: ConsultationType) -> bool {
    doctor.consultation_type == wanted
        || (wanted == ConsultationType::Both
            && matches!(
                doctor.consultation_type,
                ConsultationType::VideoConsult | ConsultationType::InClinic
            ))
}

fn specialty_matches(doctor: &Doctor, state: &FilterState) -> bool {
    doctor
        .specialty
        .iter()
        .any(|spec| state.specialties.contains(spec))
}

/// Run the search, consultation, specialty and sort stages in that order.
/// Neither input is modified; the result only holds clones of input doctors.
pub fn apply_filters(doctors: &[Doctor], state: &FilterState) -> Vec<Doctor> {
    let needle = parse_term(&state.search);

    let mut filtered: Vec<Doctor> = doctors
        .iter()
        .filter(|doctor| needle.as_deref().map_or(true, |n| name_matches(doctor, n)))
        .filter(|doctor| {
            state
                .consultation
                .map_or(true, |wanted| consultation_matches(doctor, wanted))
        })
        .filter(|doctor| state.specialties.is_empty() || specialty_matches(doctor, state))
        .cloned()
        .collect();

    if let Some(key) = state.sort {
        sort_doctors(&mut filtered, key);
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{doctor, ids};
    use crate::types::SortKey;

    fn sample() -> Vec<Doctor> {
        vec![
            doctor("1", "Dr. Asha Rao")
                .with_specialties(&["Cardiology", "Derma"])
                .with_modes(true, false)
                .with_fees("₹ 700")
                .with_experience("12 Years of experience"),
            doctor("2", "Dr. Vikram Rao")
                .with_specialties(&["Dentist"])
                .with_modes(true, true)
                .with_fees("₹ 300")
                .with_experience("4 Years of experience"),
            doctor("3", "Dr. Meera Nair")
                .with_specialties(&["Derma"])
                .with_modes(false, true)
                .with_fees("₹ 500")
                .with_experience("20 Years of experience"),
            doctor("4", "Dr. Farhan Ali")
                .with_modes(false, false)
                .with_fees("free")
                .with_experience("no data"),
        ]
    }

    #[test]
    fn test_default_state_is_identity() {
        let doctors = sample();
        assert_eq!(apply_filters(&doctors, &FilterState::default()), doctors);
    }

    #[test]
    fn test_search_stage() {
        let doctors = sample();
        let state = FilterState {
            search: "RAO".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&doctors, &state)), vec!["1", "2"]);

        let state = FilterState {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&doctors, &state), doctors);

        let state = FilterState {
            search: "zzz-no-match".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&doctors, &state).is_empty());
    }

    #[test]
    fn test_consultation_stage() {
        let doctors = sample();
        let video = FilterState {
            consultation: Some(ConsultationType::VideoConsult),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&doctors, &video)), vec!["1"]);

        let clinic = FilterState {
            consultation: Some(ConsultationType::InClinic),
            ..Default::default()
        };
        // doctor 4 offers neither mode but carries the "In Clinic" label
        assert_eq!(ids(&apply_filters(&doctors, &clinic)), vec!["3", "4"]);

        let both = FilterState {
            consultation: Some(ConsultationType::Both),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&doctors, &both)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_video_filter_excludes_both() {
        let doctors = vec![
            doctor("video", "Dr. Video").with_modes(true, false),
            doctor("both", "Dr. Both").with_modes(true, true),
        ];
        let state = FilterState {
            consultation: Some(ConsultationType::VideoConsult),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&doctors, &state)), vec!["video"]);
    }

    #[test]
    fn test_specialty_stage_is_any_of() {
        let doctors = sample();
        let mut state = FilterState::default();
        state.toggle_specialty("Cardiology");
        state.toggle_specialty("Dentist");
        assert_eq!(ids(&apply_filters(&doctors, &state)), vec!["1", "2"]);

        let mut state = FilterState::default();
        state.toggle_specialty("Derma");
        assert_eq!(ids(&apply_filters(&doctors, &state)), vec!["1", "3"]);
    }

    #[test]
    fn test_sort_stage() {
        let doctors = sample();
        let fees = FilterState {
            sort: Some(SortKey::Fees),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&doctors, &fees)), vec!["4", "2", "3", "1"]);

        let experience = FilterState {
            sort: Some(SortKey::Experience),
            ..Default::default()
        };
        assert_eq!(
            ids(&apply_filters(&doctors, &experience)),
            vec!["3", "1", "2", "4"]
        );
    }

    #[test]
    fn test_stages_combine() {
        let doctors = sample();
        let mut state = FilterState {
            search: "dr.".to_string(),
            consultation: Some(ConsultationType::InClinic),
            sort: Some(SortKey::Experience),
            ..Default::default()
        };
        state.toggle_specialty("Derma");
        state.toggle_specialty("Dentist");
        assert_eq!(ids(&apply_filters(&doctors, &state)), vec!["3"]);
    }

    #[test]
    fn test_inputs_untouched() {
        let doctors = sample();
        let before = doctors.clone();
        let state = FilterState {
            sort: Some(SortKey::Fees),
            ..Default::default()
        };
        let snapshot = state.clone();
        let _ = apply_filters(&doctors, &state);
        assert_eq!(doctors, before);
        assert_eq!(state, snapshot);
    }
}
