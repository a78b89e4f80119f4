//! Schema bootstrap for person tables
//!
//! Every statement is `IF NOT EXISTS`, so running this on each startup is safe.

use sqlx::SqlitePool;

use super::DbError;

/// Create the person, education and skill tables if they don't exist
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Bootstrapping person schema...");

    // Unique email backs up the existence check against concurrent creators
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS person (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone_number TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS education (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            degree TEXT NOT NULL,
            cgpa REAL NOT NULL,
            institute TEXT NOT NULL,
            person_id INTEGER NOT NULL REFERENCES person(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skill (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            skill_name TEXT NOT NULL,
            proficiency TEXT NOT NULL,
            person_id INTEGER NOT NULL REFERENCES person(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_education_person_id ON education(person_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_skill_person_id ON skill(person_id)")
        .execute(pool)
        .await?;

    tracing::info!("Person schema ready");
    Ok(())
}
