//! Person repository
//!
//! - create: existence check + person + children in one transaction
//! - get: person row, then explicit child queries in insertion order

use sqlx::{FromRow, Row, SqliteExecutor, SqlitePool};

use super::DbError;
use crate::models::{Education, EmailAddress, NewPerson, Skill};

/// Person row as stored
#[derive(Debug, Clone, FromRow)]
struct PersonRow {
    id: i64,
    name: String,
    email: String,
    phone_number: String,
}

/// Person with all owned education and skill entries
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub educations: Vec<Education>,
    pub skills: Vec<Skill>,
}

/// Person repository
pub struct PersonRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PersonRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a person together with its education and skill entries (atomic).
    ///
    /// The transaction takes SQLite's write lock up front (`BEGIN IMMEDIATE`),
    /// so concurrent creators queue on the busy timeout instead of failing
    /// when a deferred read lock tries to upgrade. Fails with `DuplicateEmail`
    /// before any write if the email is already registered; the UNIQUE
    /// constraint maps to the same error. Any failure before commit rolls the
    /// whole person back.
    pub async fn create(&self, person: NewPerson) -> Result<Person, DbError> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        if email_taken(&mut *tx, person.email.as_str()).await? {
            tracing::debug!(email = %person.email, "Rejecting duplicate email");
            return Err(DbError::DuplicateEmail {
                email: person.email.into_string(),
            });
        }

        let id = insert_person(&mut *tx, &person.name, &person.email, &person.phone_number).await?;

        for edu in &person.educations {
            sqlx::query(
                r#"
                INSERT INTO education (degree, cgpa, institute, person_id)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&edu.degree)
            .bind(edu.cgpa)
            .bind(&edu.institute)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        for skill in &person.skills {
            sqlx::query(
                r#"
                INSERT INTO skill (skill_name, proficiency, person_id)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(&skill.skill_name)
            .bind(&skill.proficiency)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            person_id = id,
            educations = person.educations.len(),
            skills = person.skills.len(),
            "Created person"
        );

        Ok(Person {
            id,
            name: person.name,
            email: person.email.into_string(),
            phone_number: person.phone_number,
            educations: person.educations,
            skills: person.skills,
        })
    }

    /// Get a single person by id with its education and skill entries.
    pub async fn get(&self, id: i64) -> Result<Person, DbError> {
        let row: PersonRow = sqlx::query_as(
            r#"
            SELECT id, name, email, phone_number
            FROM person
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "Person",
            id: id.to_string(),
        })?;

        let educations = sqlx::query(
            r#"
            SELECT degree, cgpa, institute
            FROM education
            WHERE person_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|r| Education {
            degree: r.get("degree"),
            cgpa: r.get("cgpa"),
            institute: r.get("institute"),
        })
        .collect();

        let skills = sqlx::query(
            r#"
            SELECT skill_name, proficiency
            FROM skill
            WHERE person_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|r| Skill {
            skill_name: r.get("skill_name"),
            proficiency: r.get("proficiency"),
        })
        .collect();

        Ok(Person {
            id: row.id,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            educations,
            skills,
        })
    }
}

async fn email_taken<'e, E>(executor: E, email: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let (found,): (i64,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM person WHERE email = ?)")
        .bind(email)
        .fetch_one(executor)
        .await?;
    Ok(found != 0)
}

async fn insert_person<'e, E>(
    executor: E,
    name: &str,
    email: &EmailAddress,
    phone_number: &str,
) -> Result<i64, DbError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO person (name, email, phone_number)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email.as_str())
    .bind(phone_number)
    .fetch_one(executor)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => DbError::DuplicateEmail {
            email: email.to_string(),
        },
        other => DbError::Sqlx(other),
    })
}
