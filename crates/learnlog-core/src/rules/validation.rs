//! Input rules re-checked by the core on every write
//!
//! The presentation layer validates forms too, but these checks never rely
//! on that having happened.

use std::ops::RangeInclusive;

use chrono::Datelike;

use crate::errors::{JournalError, Result};
use crate::model::{EntryDraft, EntryFields};
use crate::rules::slug::slugify;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Years that render as four-digit ISO dates, whose text order is date order
pub const ENTRY_YEARS: RangeInclusive<i32> = 0..=9999;

/// Trim and lowercase an email, then check it looks like `local@domain.tld`
///
/// # Errors
///
/// Returns `Validation` if the email is blank or malformed.
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(JournalError::validation("email", "required"));
    }

    let malformed = || JournalError::validation("email", "not a valid email address");
    if email.chars().any(char::is_whitespace) {
        return Err(malformed());
    }
    let (local, domain) = email.split_once('@').ok_or_else(malformed)?;
    if local.is_empty() || domain.contains('@') {
        return Err(malformed());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(malformed)?;
    if host.is_empty() || tld.is_empty() {
        return Err(malformed());
    }

    Ok(email)
}

/// Check a registration password (and its confirmation, when given)
///
/// # Errors
///
/// Returns `Validation` if the password is too short or the confirmation differs.
pub fn validate_new_password(password: &str, confirmation: Option<&str>) -> Result<()> {
    if password.is_empty() {
        return Err(JournalError::validation("password", "required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(JournalError::validation(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    if let Some(confirmation) = confirmation {
        if confirmation != password {
            return Err(JournalError::validation("password", "passwords must match"));
        }
    }
    Ok(())
}

/// Login only requires both fields to be present
///
/// # Errors
///
/// Returns `Validation` if either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(JournalError::validation("email", "required"));
    }
    if password.is_empty() {
        return Err(JournalError::validation("password", "required"));
    }
    Ok(())
}

/// Validate entry fields and derive the base slug
///
/// Title, date, time spent and "what I learned" are required; resources may
/// be absent and default to empty.
///
/// # Errors
///
/// Returns `Validation` naming the first missing or malformed field.
pub fn validate_entry(fields: &EntryFields) -> Result<EntryDraft> {
    let title = required_text("title", fields.title.as_deref())?;
    let date = fields
        .date
        .ok_or_else(|| JournalError::validation("date", "required"))?;
    if !ENTRY_YEARS.contains(&date.year()) {
        return Err(JournalError::validation(
            "date",
            "year must be between 0 and 9999",
        ));
    }
    let time_spent = match fields.time_spent {
        None => return Err(JournalError::validation("time_spent", "required")),
        Some(0) => {
            return Err(JournalError::validation(
                "time_spent",
                "must be a positive number of minutes",
            ))
        }
        Some(minutes) => minutes,
    };
    let learned = required_text("learned", fields.learned.as_deref())?;
    let resources = fields
        .resources
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(EntryDraft {
        slug: slugify(&title),
        title,
        date,
        time_spent,
        learned,
        resources,
    })
}

/// Trim and lowercase a tag name
///
/// # Errors
///
/// Returns `Validation` if the name is blank.
pub fn normalize_tag_name(name: &str) -> Result<String> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(JournalError::validation("tag", "name cannot be blank"));
    }
    Ok(name)
}

fn required_text(field: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(JournalError::validation(field, "required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  A@Example.COM ").unwrap(),
            "a@example.com"
        );
        for bad in ["", "plain", "@example.com", "a@b", "a@@b.com", "a b@c.com", "a@.com"] {
            assert!(normalize_email(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_new_password("pw123456", None).is_ok());
        assert!(validate_new_password("pw123456", Some("pw123456")).is_ok());
        assert!(validate_new_password("short", None).is_err());
        assert_eq!(
            validate_new_password("pw123456", Some("pw654321")),
            Err(JournalError::validation("password", "passwords must match"))
        );
    }

    #[test]
    fn test_validate_entry_accepts_complete_fields() {
        let fields = EntryFields::new("Day 1", day(1), 45, "Ownership").with_resources(" book ");
        let draft = validate_entry(&fields).unwrap();
        assert_eq!(draft.slug, "day-1");
        assert_eq!(draft.resources, "book");
        assert_eq!(draft.time_spent, 45);
    }

    #[test]
    fn test_validate_entry_resources_optional() {
        let draft = validate_entry(&EntryFields::new("t", day(2), 1, "l")).unwrap();
        assert_eq!(draft.resources, "");
    }

    #[test]
    fn test_validate_entry_reports_missing_field() {
        let complete = EntryFields::new("Day 1", day(1), 45, "Ownership");

        let mut no_title = complete.clone();
        no_title.title = Some("   ".into());
        assert_eq!(
            validate_entry(&no_title),
            Err(JournalError::validation("title", "required"))
        );

        let mut no_date = complete.clone();
        no_date.date = None;
        assert!(matches!(
            validate_entry(&no_date),
            Err(JournalError::Validation { field, .. }) if field == "date"
        ));

        let mut zero_minutes = complete.clone();
        zero_minutes.time_spent = Some(0);
        assert!(validate_entry(&zero_minutes).is_err());

        let mut no_learned = complete;
        no_learned.learned = None;
        assert!(validate_entry(&no_learned).is_err());
    }

    #[test]
    fn test_validate_entry_rejects_years_beyond_four_digits() {
        let mut fields = EntryFields::new("Far", day(1), 10, "x");
        for year in [10_000, -1] {
            fields.date = NaiveDate::from_ymd_opt(year, 1, 1);
            assert!(matches!(
                validate_entry(&fields),
                Err(JournalError::Validation { field, .. }) if field == "date"
            ));
        }

        for year in [0, 9999] {
            fields.date = NaiveDate::from_ymd_opt(year, 12, 31);
            assert!(validate_entry(&fields).is_ok(), "year {} should be accepted", year);
        }
    }

    #[test]
    fn test_normalize_tag_name() {
        assert_eq!(normalize_tag_name(" Python ").unwrap(), "python");
        assert!(normalize_tag_name("  ").is_err());
    }
}
