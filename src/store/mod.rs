//! Storage layer for opinar.
//!
//! `SQLite`-backed persistence for users, forms, and responses. Forms are
//! keyed by a unique short share code for public lookups; deleting a form
//! cascades to its responses.

pub mod schema;

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde_json::Value;

use crate::error::OpinarError;

/// Hash a password for storage.
///
/// Hashing strength is intentionally out of scope; this is a plain keyless
/// BLAKE3 digest in hex.
pub fn hash_password(password: &str) -> String {
    blake3::hash(password.as_bytes()).to_hex().to_string()
}

/// A registered account.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// A stored feedback form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Form {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub form_code: String,
    pub fields: Value,
    pub logo_data: Option<String>,
    pub created_at: String,
}

/// A form plus its response count, as listed on the owner's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct FormSummary {
    #[serde(flatten)]
    pub form: Form,
    pub response_count: i64,
}

/// Data for a new form; the caller supplies the generated share code.
#[derive(Debug, Clone)]
pub struct NewForm {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub form_code: String,
    pub fields: Value,
    pub logo_data: Option<String>,
}

/// Receipt returned after a response row is committed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResponseReceipt {
    pub id: i64,
    pub submitted_at: String,
}

/// A stored response as listed for the form owner.
#[derive(Debug, Clone, Serialize)]
pub struct StoredResponse {
    pub id: i64,
    pub response_data: Value,
    pub submitted_at: String,
}

/// Per-day response count.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: String,
    pub count: i64,
}

/// Aggregate response statistics for a form.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseStats {
    pub total: i64,
    pub daily_stats: Vec<DailyCount>,
}

/// Storage engine for users, forms, and responses.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    conn: Connection,
}

impl Store {
    /// Open or create a store database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OpinarError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;
        Self::initialize(conn, path)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self, OpinarError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn, PathBuf::from(":memory:"))
    }

    fn initialize(conn: Connection, path: PathBuf) -> Result<Self, OpinarError> {
        // WAL for concurrent reads; foreign keys ON so deletes cascade.
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        for statement in schema::SCHEMA_STATEMENTS {
            conn.execute(statement, [])?;
        }

        println!("[store] database ready at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Get the path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // === Users ===

    /// Create an account. Returns `None` if the email is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn create_user(&self, email: &str, password_hash: &str) -> Result<Option<User>, OpinarError> {
        let created_at = Utc::now().to_rfc3339();
        let result = self.conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![email, password_hash, created_at],
        );

        match result {
            Ok(_) => Ok(Some(User {
                id: self.conn.last_insert_rowid(),
                email: email.to_string(),
            })),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up an account by email and password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn authenticate(&self, email: &str, password_hash: &str) -> Result<Option<User>, OpinarError> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email FROM users WHERE email = ?1 AND password_hash = ?2",
                params![email, password_hash],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Get the email address for a user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn user_email(&self, user_id: i64) -> Result<Option<String>, OpinarError> {
        let email = self
            .conn
            .query_row(
                "SELECT email FROM users WHERE id = ?1",
                [user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(email)
    }

    // === Forms ===

    /// Insert a form and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails (including a share
    /// code collision, which violates the unique index).
    pub fn create_form(&self, form: &NewForm) -> Result<Form, OpinarError> {
        let created_at = Utc::now().to_rfc3339();
        let fields_json = serde_json::to_string(&form.fields)?;

        self.conn.execute(
            r"
            INSERT INTO forms (user_id, title, description, form_code, fields, logo_data, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                form.user_id,
                form.title,
                form.description,
                form.form_code,
                fields_json,
                form.logo_data,
                created_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        println!("[store] created form {} with code {}", id, form.form_code);

        Ok(Form {
            id,
            user_id: form.user_id,
            title: form.title.clone(),
            description: form.description.clone(),
            form_code: form.form_code.clone(),
            fields: form.fields.clone(),
            logo_data: form.logo_data.clone(),
            created_at,
        })
    }

    /// List a user's forms with response counts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn forms_for_user(&self, user_id: i64) -> Result<Vec<FormSummary>, OpinarError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT f.id, f.user_id, f.title, f.description, f.form_code,
                   f.fields, f.logo_data, f.created_at, COUNT(r.id)
            FROM forms f
            LEFT JOIN responses r ON r.form_id = f.id
            WHERE f.user_id = ?1
            GROUP BY f.id
            ORDER BY f.created_at DESC
            ",
        )?;

        let summaries = stmt
            .query_map([user_id], |row| {
                Ok(FormSummary {
                    form: Self::row_to_form(row)?,
                    response_count: row.get(8)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    /// Get a form by its public share code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn form_by_code(&self, code: &str) -> Result<Option<Form>, OpinarError> {
        let form = self
            .conn
            .query_row(
                r"
                SELECT id, user_id, title, description, form_code, fields, logo_data, created_at
                FROM forms WHERE form_code = ?1
                ",
                [code],
                Self::row_to_form,
            )
            .optional()?;
        Ok(form)
    }

    /// Get a form by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn form_by_id(&self, id: i64) -> Result<Option<Form>, OpinarError> {
        let form = self
            .conn
            .query_row(
                r"
                SELECT id, user_id, title, description, form_code, fields, logo_data, created_at
                FROM forms WHERE id = ?1
                ",
                [id],
                Self::row_to_form,
            )
            .optional()?;
        Ok(form)
    }

    /// Delete a form and, via cascade, its responses.
    ///
    /// Returns `true` if a form was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_form(&self, id: i64) -> Result<bool, OpinarError> {
        let affected = self.conn.execute("DELETE FROM forms WHERE id = ?1", [id])?;
        if affected > 0 {
            println!("[store] deleted form {}", id);
        }
        Ok(affected > 0)
    }

    // === Responses ===

    /// Insert a response for a form.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert_response(&self, form_id: i64, data: &Value) -> Result<ResponseReceipt, OpinarError> {
        let submitted_at = Utc::now().to_rfc3339();
        let data_json = serde_json::to_string(data)?;

        self.conn.execute(
            "INSERT INTO responses (form_id, response_data, submitted_at) VALUES (?1, ?2, ?3)",
            params![form_id, data_json, submitted_at],
        )?;

        Ok(ResponseReceipt {
            id: self.conn.last_insert_rowid(),
            submitted_at,
        })
    }

    /// List responses for a form, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn responses_for_form(&self, form_id: i64) -> Result<Vec<StoredResponse>, OpinarError> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, response_data, submitted_at
            FROM responses WHERE form_id = ?1
            ORDER BY submitted_at DESC
            ",
        )?;

        let responses = stmt
            .query_map([form_id], |row| {
                let data_json: String = row.get(1)?;
                Ok(StoredResponse {
                    id: row.get(0)?,
                    response_data: serde_json::from_str(&data_json)
                        .unwrap_or(Value::Null),
                    submitted_at: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(responses)
    }

    /// Aggregate response statistics: total count plus per-day counts over
    /// the last 7 days, ascending by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn response_stats(&self, form_id: i64) -> Result<ResponseStats, OpinarError> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM responses WHERE form_id = ?1",
            [form_id],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            r"
            SELECT DATE(submitted_at) AS day, COUNT(*)
            FROM responses
            WHERE form_id = ?1 AND DATE(submitted_at) >= DATE('now', '-7 days')
            GROUP BY day
            ORDER BY day
            ",
        )?;

        let daily_stats = stmt
            .query_map([form_id], |row| {
                Ok(DailyCount {
                    date: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ResponseStats { total, daily_stats })
    }

    // === Seeding ===

    /// Idempotently create the demo account and its sample form.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn seed_demo(&self) -> Result<(), OpinarError> {
        const DEMO_EMAIL: &str = "admin@example.com";
        const DEMO_PASSWORD: &str = "admin123";
        const DEMO_CODE: &str = "DEMO123";

        let user = match self.create_user(DEMO_EMAIL, &hash_password(DEMO_PASSWORD))? {
            Some(user) => {
                println!("[store] demo account created: {}", DEMO_EMAIL);
                user
            }
            None => return Ok(()), // already seeded
        };

        if self.form_by_code(DEMO_CODE)?.is_none() {
            let fields = serde_json::json!([
                {"label": "Your Name", "type": "text"},
                {"label": "Email Address", "type": "email"},
                {"label": "Rating (1-5)", "type": "number"},
                {"label": "Comments", "type": "textarea"}
            ]);

            self.create_form(&NewForm {
                user_id: user.id,
                title: "Sample Feedback Form".to_string(),
                description: "Please share your feedback with us".to_string(),
                form_code: DEMO_CODE.to_string(),
                fields,
                logo_data: None,
            })?;
            println!("[store] sample form created with code {}", DEMO_CODE);
        }

        Ok(())
    }

    /// Convert a database row to a Form. Expects the column order used by
    /// all form queries.
    fn row_to_form(row: &rusqlite::Row) -> rusqlite::Result<Form> {
        let fields_json: String = row.get(5)?;
        let fields = serde_json::from_str(&fields_json).unwrap_or_else(|_| {
            eprintln!("[store] malformed fields JSON on form row, substituting empty list");
            Value::Array(Vec::new())
        });

        Ok(Form {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            form_code: row.get(4)?,
            fields,
            logo_data: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}
