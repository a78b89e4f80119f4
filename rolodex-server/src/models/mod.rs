//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod email;
pub mod person;

pub use validation::ValidationError;
pub use email::EmailAddress;
pub use person::{Education, NewPerson, Skill};
