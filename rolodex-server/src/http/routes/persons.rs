//! Person endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Person, PersonRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, PersonId};
use crate::http::server::AppState;
use crate::models::{Education, NewPerson, Skill};

/// Create person request
#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Person response
#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub educations: Vec<Education>,
    pub skills: Vec<Skill>,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            phone_number: p.phone_number,
            educations: p.educations,
            skills: p.skills,
        }
    }
}

/// POST /persons/ - create a person with nested educations and skills
async fn create_person(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    // Validate fully before touching storage
    let person = NewPerson::new(
        req.name,
        &req.email,
        req.phone_number,
        req.educations,
        req.skills,
    )?;

    let created = PersonRepo::new(&state.pool).create(person).await?;
    Ok(Json(PersonResponse::from(created)))
}

/// GET /persons/{person_id} - get a single person
async fn read_person(
    State(state): State<Arc<AppState>>,
    PersonId(id): PersonId,
) -> Result<Json<PersonResponse>, ApiError> {
    let person = PersonRepo::new(&state.pool).get(id).await?;
    Ok(Json(PersonResponse::from(person)))
}

/// Person routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/persons/", post(create_person))
        .route("/persons", post(create_person))
        .route("/persons/{person_id}", get(read_person))
}
