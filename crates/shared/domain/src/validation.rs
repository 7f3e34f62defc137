//! Field-level validation for client-supplied user attributes.
//!
//! Validation is a pure function of the input and the current date, so it
//! never touches storage and can be exercised in isolation.

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use validator::ValidateEmail;

use crate::constants::{
    FIELD_DATE_OF_BIRTH, FIELD_EMAIL_ADDRESS, FIELD_FIRST_NAME, FIELD_LAST_NAME, MSG_BLANK,
    MSG_EMAIL, MSG_NULL, MSG_PAST,
};
use crate::error::{DomainError, DomainResult};
use crate::user::{UserFields, UserProfile};

/// A single rule broken by a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldViolation {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Renders as `"<field>, <message>"`.
impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.field, self.message)
    }
}

/// Current calendar date used for the past-date rule.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_not_blank(field: &'static str, value: &str, out: &mut Vec<FieldViolation>) {
    if is_blank(value) {
        out.push(FieldViolation::new(field, MSG_BLANK));
    }
}

impl UserFields {
    /// Collect every violated rule, evaluating the past-date rule against `today`.
    ///
    /// Violations are reported in field order; an empty vector means the
    /// input is valid.
    pub fn violations_at(&self, today: NaiveDate) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        check_not_blank(FIELD_FIRST_NAME, &self.first_name, &mut violations);
        check_not_blank(FIELD_LAST_NAME, &self.last_name, &mut violations);

        if is_blank(&self.email_address) {
            violations.push(FieldViolation::new(FIELD_EMAIL_ADDRESS, MSG_BLANK));
        } else if !self.email_address.validate_email() {
            violations.push(FieldViolation::new(FIELD_EMAIL_ADDRESS, MSG_EMAIL));
        }

        match self.date_of_birth {
            None => violations.push(FieldViolation::new(FIELD_DATE_OF_BIRTH, MSG_NULL)),
            Some(date) if date >= today => {
                violations.push(FieldViolation::new(FIELD_DATE_OF_BIRTH, MSG_PAST))
            }
            Some(_) => {}
        }

        violations
    }

    /// Collect every violated rule against today's date.
    pub fn violations(&self) -> Vec<FieldViolation> {
        self.violations_at(today())
    }

    /// Validate against `today` and turn the input into a [`UserProfile`].
    pub fn into_profile_at(self, today: NaiveDate) -> DomainResult<UserProfile> {
        let violations = self.violations_at(today);
        match self.date_of_birth {
            Some(date_of_birth) if violations.is_empty() => Ok(UserProfile {
                first_name: self.first_name,
                last_name: self.last_name,
                email_address: self.email_address,
                date_of_birth,
            }),
            _ => Err(DomainError::validation(violations)),
        }
    }

    /// Validate against today's date and turn the input into a [`UserProfile`].
    pub fn into_profile(self) -> DomainResult<UserProfile> {
        self.into_profile_at(today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_fields() -> UserFields {
        UserFields {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email_address: "jane@x.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
        }
    }

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_valid_fields_have_no_violations() {
        assert!(valid_fields().violations_at(fixed_today()).is_empty());
    }

    #[test]
    fn test_blank_names_are_reported_per_field() {
        let fields = UserFields {
            first_name: "   ".to_string(),
            last_name: String::new(),
            ..valid_fields()
        };

        let violations = fields.violations_at(fixed_today());

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].to_string(), "firstName, must not be blank");
        assert_eq!(violations[1].to_string(), "lastName, must not be blank");
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let fields = UserFields {
            email_address: "not-an-email".to_string(),
            ..valid_fields()
        };

        let violations = fields.violations_at(fixed_today());

        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "emailAddress, must be a well-formed email address"
        );
    }

    #[test]
    fn test_blank_email_reports_blank_only() {
        let fields = UserFields {
            email_address: String::new(),
            ..valid_fields()
        };

        let violations = fields.violations_at(fixed_today());

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, MSG_BLANK);
    }

    #[test]
    fn test_missing_date_of_birth() {
        let fields = UserFields {
            date_of_birth: None,
            ..valid_fields()
        };

        let violations = fields.violations_at(fixed_today());

        assert_eq!(violations, vec![FieldViolation::new(FIELD_DATE_OF_BIRTH, MSG_NULL)]);
    }

    #[test]
    fn test_date_of_birth_today_or_later_is_rejected() {
        let today = fixed_today();
        for date in [today, today + Duration::days(1), today + Duration::days(365)] {
            let fields = UserFields {
                date_of_birth: Some(date),
                ..valid_fields()
            };
            let violations = fields.violations_at(today);
            assert_eq!(violations.len(), 1, "date {} should be rejected", date);
            assert_eq!(violations[0].to_string(), "dateOfBirth, must be a past date");
        }
    }

    #[test]
    fn test_date_of_birth_yesterday_is_accepted() {
        let today = fixed_today();
        let fields = UserFields {
            date_of_birth: Some(today - Duration::days(1)),
            ..valid_fields()
        };

        assert!(fields.violations_at(today).is_empty());
    }

    #[test]
    fn test_into_profile_carries_fields() {
        let profile = valid_fields().into_profile_at(fixed_today()).unwrap();

        assert_eq!(profile.first_name, "Jane");
        assert_eq!(profile.last_name, "Doe");
        assert_eq!(profile.email_address, "jane@x.com");
        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    }

    #[test]
    fn test_into_profile_returns_all_violations() {
        let fields = UserFields {
            first_name: String::new(),
            email_address: "bad".to_string(),
            date_of_birth: None,
            ..valid_fields()
        };

        let err = fields.into_profile_at(fixed_today()).unwrap_err();

        let DomainError::Validation(violations) = err;
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec![FIELD_FIRST_NAME, FIELD_EMAIL_ADDRESS, FIELD_DATE_OF_BIRTH]);
    }
}
