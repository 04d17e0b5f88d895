//! Domain layer - Core business entities and logic
//!
//! The user entity, its input/update shapes, and the validation rules.
//! No infrastructure dependencies.

pub mod user;
pub mod validation;

pub use user::{parse_user_id, NewUser, User, UserChanges, UserInput};
pub use validation::{is_valid_email, normalize_email, validate_user, ValidationReport};
