//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Wire format
// =============================================================================

/// `dateOfBirth` format on the wire (dd-MM-yyyy)
pub const DATE_OF_BIRTH_FORMAT: &str = "%d-%m-%Y";

// =============================================================================
// Field names (as exposed to clients)
// =============================================================================

pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_EMAIL_ADDRESS: &str = "emailAddress";
pub const FIELD_DATE_OF_BIRTH: &str = "dateOfBirth";

// =============================================================================
// Validation
// =============================================================================

/// Message for empty or whitespace-only text
pub const MSG_BLANK: &str = "must not be blank";

/// Message for malformed email addresses
pub const MSG_EMAIL: &str = "must be a well-formed email address";

/// Message for a missing date
pub const MSG_NULL: &str = "must not be null";

/// Message for a date that is not strictly in the past
pub const MSG_PAST: &str = "must be a past date";
