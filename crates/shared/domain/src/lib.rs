//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record, the client-supplied attributes and their validation rules.

pub mod constants;
pub mod error;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{ErrorMessage, User, UserFields, UserProfile};
pub use validation::{today, FieldViolation};
