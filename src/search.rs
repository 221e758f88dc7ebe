use crate::types::Doctor;

/// Normalize a typed search term. Returns None when the stage should be skipped.
pub fn parse_term(term: &str) -> Option<String> {
    if term.trim().is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Case-insensitive substring match against the doctor's name.
/// `needle` must already be lowercased (see `parse_term`).
pub fn name_matches(doctor: &Doctor, needle: &str) -> bool {
    doctor.name.to_lowercase().contains(needle)
}

/// Autocomplete entries for the search box: the first `limit` doctors of the
/// full list whose name contains the term
pub fn suggestions<'a>(doctors: &'a [Doctor], term: &str, limit: usize) -> Vec<&'a Doctor> {
    let Some(needle) = parse_term(term) else {
        return Vec::new();
    };
    doctors
        .iter()
        .filter(|doctor| name_matches(doctor, &needle))
        .take(limit)
        .collect()
}
