use crate::types::{Doctor, SortKey};
use std::cmp::Ordering;

/// Numeric fee: drop every character that is not a digit or '.', then read the
/// longest leading decimal number. Nothing readable gives 0.
pub fn fee_value(fees: &str) -> f64 {
    let stripped: String = fees
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    // "1.2.5" reads as 1.2, "." reads as nothing
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in stripped.char_indices() {
        match c {
            '.' if !seen_dot => seen_dot = true,
            '.' => break,
            _ => seen_digit = true,
        }
        end = i + 1;
    }

    if !seen_digit {
        return 0.0;
    }
    stripped[..end].parse::<f64>().unwrap_or(0.0)
}

/// Years of experience: the first run of digits anywhere in the text, or 0
pub fn experience_value(experience: &str) -> u64 {
    let digits: String = experience
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Order doctors in place. `sort_by` is stable, so ties keep their input order.
pub fn sort_doctors(doctors: &mut [Doctor], key: SortKey) {
    match key {
        SortKey::Fees => doctors.sort_by(|a, b| {
            fee_value(&a.fees)
                .partial_cmp(&fee_value(&b.fees))
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::Experience => doctors.sort_by(|a, b| {
            experience_value(&b.experience).cmp(&experience_value(&a.experience))
        }),
    }
}
