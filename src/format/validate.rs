//! Customer form validation and sanitization

use crate::customer::CustomerForm;

use super::text::{phone_digits, title_case};

/// Check a customer form and describe every problem found.
///
/// Missing fields are reported first, then format problems. An empty list
/// means the form can be saved; the caller decides what a non-empty list blocks.
pub fn validate_customer(form: &CustomerForm) -> Vec<String> {
    let mut errors: Vec<String> = form
        .fields()
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| required_message(field))
        .collect();

    if !form.first_name.is_empty() && !is_letters_and_spaces(form.first_name.trim()) {
        errors.push("First name must contain only letters/spaces.".to_string());
    }
    if !form.last_name.is_empty() && !is_letters_and_spaces(form.last_name.trim()) {
        errors.push("Last name must contain only letters/spaces.".to_string());
    }

    if !form.email.is_empty() && (!form.email.contains('@') || !form.email.contains('.')) {
        errors.push("Invalid email address.".to_string());
    }

    if phone_digits(&form.phone).len() != 10 {
        errors.push("Phone number must be exactly 10 digits.".to_string());
    }

    if !form.state.is_empty() && !is_state_name(form.state.trim()) {
        errors.push("State must contain only letters (2-20 characters).".to_string());
    }

    errors
}

/// Message reported for an empty required field
pub fn required_message(field: &str) -> String {
    format!("{} is required.", field)
}

/// Normalize a valid form into the values that get persisted
pub fn sanitize(form: &CustomerForm) -> CustomerForm {
    CustomerForm {
        first_name: title_case(form.first_name.trim()),
        last_name: title_case(form.last_name.trim()),
        email: form.email.trim().to_string(),
        phone: phone_digits(&form.phone),
        address: title_case(form.address.trim()),
        city: title_case(form.city.trim()),
        state: form.state.trim().to_uppercase(),
        zipcode: form.zipcode.trim().to_string(),
        date_of_birth: form.date_of_birth.trim().to_string(),
    }
}

fn is_letters_and_spaces(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

fn is_state_name(text: &str) -> bool {
    (2..=20).contains(&text.len()) && text.chars().all(|c| c.is_ascii_alphabetic())
}
