//! Field validators.
//!
//! Every validator follows the same three tiers: an empty value is a
//! `required` error, a present but malformed value is a `format` or `range`
//! error, anything else is accepted. Email and age only treat the raw empty
//! string as missing; blanks are malformed input. The same functions back the company
//! form and every employee panel.

use crate::error::FieldError;

/// Youngest accepted employee age, in years.
pub const MIN_EMPLOYEE_AGE: i64 = 18;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_FORMAT: &str = "Invalid email format";
pub const AGE_REQUIRED: &str = "Age is required";
pub const AGE_RANGE: &str = "Age must be a positive number and at least 18";

/// Fails with `required` when the trimmed value is empty.
///
/// `label` names the field in the message (`"Name"` gives `Name is required`).
pub fn validate_required_text(label: &str, value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::required(format!("{label} is required")))
    } else {
        None
    }
}

/// Validates a `local@domain.tld` address.
pub fn validate_email(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::required(EMAIL_REQUIRED));
    }
    if !is_email_shaped(value.trim()) {
        return Some(FieldError::format(EMAIL_FORMAT));
    }
    None
}

/// Validates an age typed as free text.
pub fn validate_age(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::required(AGE_REQUIRED));
    }
    match value.trim().parse::<i64>() {
        Ok(age) if age > 0 && age >= MIN_EMPLOYEE_AGE => None,
        _ => Some(FieldError::range(AGE_RANGE)),
    }
}

/// Non-empty local part, one `@`, and a domain holding a dot with at least
/// one character on each side. Only printable ASCII, so no whitespace.
fn is_email_shaped(value: &str) -> bool {
    if !value.chars().all(|c| c.is_ascii_graphic()) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let bytes = domain.as_bytes();
    bytes.len() >= 3 && bytes[1..bytes.len() - 1].contains(&b'.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    fn kind(err: Option<FieldError>) -> Option<ErrorKind> {
        err.map(|e| e.kind)
    }

    #[test]
    fn required_text_rejects_blank_values() {
        let err = validate_required_text("Name", "   ").unwrap();
        assert_eq!(err.kind, ErrorKind::Required);
        assert_eq!(err.message, "Name is required");
        assert!(validate_required_text("Name", "Alice").is_none());
    }

    #[test]
    fn email_tiers() {
        assert_eq!(kind(validate_email("")), Some(ErrorKind::Required));
        assert_eq!(kind(validate_email("acme")), Some(ErrorKind::Format));
        assert_eq!(kind(validate_email("a@acme")), Some(ErrorKind::Format));
        assert_eq!(kind(validate_email("a@.com")), Some(ErrorKind::Format));
        assert_eq!(kind(validate_email("a@acme.")), Some(ErrorKind::Format));
        assert_eq!(kind(validate_email("@acme.com")), Some(ErrorKind::Format));
        assert_eq!(kind(validate_email("a b@acme.com")), Some(ErrorKind::Format));
        assert_eq!(kind(validate_email("a@b@acme.com")), Some(ErrorKind::Format));
        assert_eq!(kind(validate_email("é@acme.com")), Some(ErrorKind::Format));
        assert_eq!(validate_email("a@acme.com"), None);
        assert_eq!(validate_email("  first.last@mail.acme.co.uk "), None);
    }

    #[test]
    fn blank_email_and_age_are_malformed_not_missing() {
        assert_eq!(kind(validate_email("   ")), Some(ErrorKind::Format));
        assert_eq!(validate_email("\t").unwrap().message, "Invalid email format");
        assert_eq!(kind(validate_age("  ")), Some(ErrorKind::Range));
        assert_eq!(
            validate_age("  ").unwrap().message,
            "Age must be a positive number and at least 18"
        );
        assert_eq!(validate_age(" 25 "), None);
    }

    #[test]
    fn email_messages() {
        assert_eq!(validate_email("").unwrap().message, "Email is required");
        assert_eq!(validate_email("nope").unwrap().message, "Invalid email format");
    }

    #[test]
    fn age_tiers() {
        assert_eq!(kind(validate_age("")), Some(ErrorKind::Required));
        assert_eq!(validate_age("").unwrap().message, "Age is required");
        assert_eq!(kind(validate_age("abc")), Some(ErrorKind::Range));
        assert_eq!(kind(validate_age("25abc")), Some(ErrorKind::Range));
        assert_eq!(kind(validate_age("0")), Some(ErrorKind::Range));
        assert_eq!(kind(validate_age("-30")), Some(ErrorKind::Range));
        assert_eq!(
            validate_age("17").unwrap().message,
            "Age must be a positive number and at least 18"
        );
        assert_eq!(validate_age("18"), None);
        assert_eq!(validate_age("25"), None);
    }

    proptest! {
        #[test]
        fn strings_without_at_sign_are_format_errors(s in "[a-z0-9.]{1,24}") {
            prop_assert_eq!(kind(validate_email(&s)), Some(ErrorKind::Format));
        }

        #[test]
        fn domains_without_dot_are_format_errors(
            local in "[a-z0-9]{1,12}",
            domain in "[a-z0-9]{1,12}",
        ) {
            let email = format!("{local}@{domain}");
            prop_assert_eq!(kind(validate_email(&email)), Some(ErrorKind::Format));
        }

        #[test]
        fn well_formed_addresses_are_accepted(
            local in "[a-z0-9._%+-]{1,16}",
            host in "[a-z0-9-]{1,16}",
            tld in "[a-z]{2,6}",
        ) {
            let email = format!("{local}@{host}.{tld}");
            prop_assert_eq!(validate_email(&email), None);
        }

        #[test]
        fn ages_below_eighteen_are_range_errors(age in -1000i64..18) {
            prop_assert_eq!(kind(validate_age(&age.to_string())), Some(ErrorKind::Range));
        }

        #[test]
        fn adult_ages_are_accepted(age in 18i64..10_000) {
            prop_assert_eq!(validate_age(&age.to_string()), None);
        }

        #[test]
        fn non_numeric_ages_are_range_errors(s in "[a-zA-Z ]{1,10}") {
            prop_assert_eq!(kind(validate_age(&s)), Some(ErrorKind::Range));
        }
    }
}
