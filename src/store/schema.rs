//! `SQLite` schema definitions for the opinar store.

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create the forms table. Deleting a user cascades to
/// their forms.
pub const CREATE_FORMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS forms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    form_code TEXT UNIQUE NOT NULL,
    fields TEXT NOT NULL,
    logo_data TEXT,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create the responses table. Deleting a form cascades to
/// its responses.
pub const CREATE_RESPONSES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS responses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    form_id INTEGER NOT NULL REFERENCES forms(id) ON DELETE CASCADE,
    response_data TEXT NOT NULL,
    submitted_at TEXT NOT NULL
)
";

/// SQL statement to create an index on `form_code` for public lookups.
pub const CREATE_FORM_CODE_INDEX: &str = r"
CREATE UNIQUE INDEX IF NOT EXISTS idx_forms_code ON forms(form_code)
";

/// SQL statement to create an index on `user_id` for dashboard queries.
pub const CREATE_FORM_USER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_forms_user ON forms(user_id)
";

/// SQL statement to create an index on `form_id` for response listings.
pub const CREATE_RESPONSE_FORM_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_responses_form ON responses(form_id)
";

/// SQL statement to create an index on `submitted_at` for stats queries.
pub const CREATE_RESPONSE_TIME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_responses_time ON responses(submitted_at DESC)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_FORMS_TABLE,
    CREATE_RESPONSES_TABLE,
    CREATE_FORM_CODE_INDEX,
    CREATE_FORM_USER_INDEX,
    CREATE_RESPONSE_FORM_INDEX,
    CREATE_RESPONSE_TIME_INDEX,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_users_table_contains_required_columns() {
        assert!(CREATE_USERS_TABLE.contains("email TEXT UNIQUE NOT NULL"));
        assert!(CREATE_USERS_TABLE.contains("password_hash TEXT NOT NULL"));
    }

    #[test]
    fn test_cascade_deletes_declared() {
        assert!(CREATE_FORMS_TABLE.contains("ON DELETE CASCADE"));
        assert!(CREATE_RESPONSES_TABLE.contains("ON DELETE CASCADE"));
    }
}
