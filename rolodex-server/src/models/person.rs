//! Person input types
//!
//! `NewPerson` is the validated form of a create request. Education and
//! skill entries travel unchanged from request to storage to response.

use serde::{Deserialize, Serialize};

use super::{EmailAddress, ValidationError};

/// One education entry owned by a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub cgpa: f64,
    pub institute: String,
}

/// One skill entry owned by a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_name: String,
    pub proficiency: String,
}

/// Validated person ready for insertion
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub email: EmailAddress,
    pub phone_number: String,
    pub educations: Vec<Education>,
    pub skills: Vec<Skill>,
}

impl NewPerson {
    /// Validate raw fields into a person ready for storage.
    ///
    /// Fails on a malformed email or a non-finite cgpa. Nothing here
    /// touches storage.
    pub fn new(
        name: String,
        email: &str,
        phone_number: String,
        educations: Vec<Education>,
        skills: Vec<Skill>,
    ) -> Result<Self, ValidationError> {
        let email = EmailAddress::parse(email)?;

        if educations.iter().any(|e| !e.cgpa.is_finite()) {
            return Err(ValidationError::InvalidFormat {
                field: "cgpa",
                reason: "must be a finite number",
            });
        }

        Ok(Self {
            name,
            email,
            phone_number,
            educations,
            skills,
        })
    }
}
