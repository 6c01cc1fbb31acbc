use crate::validation::FieldError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB server error code for duplicate keys on a unique index
const DUPLICATE_KEY: i32 = 11000;
/// MongoDB server error code for a document rejected by a `$jsonSchema` validator
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// Unique key violation
    #[error("Unique constraint violation")]
    UniqueViolation {
        collection: String,
        /// The key set that collided, e.g. `["name"]`
        fields: Vec<String>,
        message: String,
    },

    /// A referenced document does not exist
    #[error("Reference violation on {collection}.{field}")]
    ForeignKeyViolation {
        collection: String,
        field: String,
        message: String,
    },

    /// Cross-document consistency rule failed
    #[error("Check violation on {collection}: {message}")]
    CheckViolation { collection: String, message: String },

    /// Field-level schema validation failed
    #[error("Schema validation failed on {collection}")]
    SchemaViolation { collection: String, errors: Vec<FieldError> },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    pub fn check(collection: &str, message: impl Into<String>) -> Self {
        DbError::CheckViolation {
            collection: collection.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_reference(collection: &str, field: &str, id: impl std::fmt::Display) -> Self {
        DbError::ForeignKeyViolation {
            collection: collection.to_string(),
            field: field.to_string(),
            message: format!("{field} refers to {id}, which does not exist"),
        }
    }
}

/// Convert from the MongoDB driver error, categorising server write errors
impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        let write_error = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error),
            _ => None,
        };

        match write_error {
            Some(write_error) if write_error.code == DUPLICATE_KEY => DbError::UniqueViolation {
                collection: String::new(),
                fields: duplicate_key_fields(&write_error.message),
                message: write_error.message.clone(),
            },
            Some(write_error) if write_error.code == DOCUMENT_VALIDATION_FAILURE => DbError::CheckViolation {
                collection: String::new(),
                message: "Document failed schema validation".to_string(),
            },
            // All other driver errors are non-recoverable - convert to anyhow
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Other(anyhow::Error::from(err).context("Failed to (de)serialize document"))
    }
}

impl From<mongodb::bson::ser::Error> for DbError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        DbError::Other(anyhow::Error::from(err).context("Failed to encode BSON document"))
    }
}

impl From<mongodb::bson::de::Error> for DbError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        DbError::Other(anyhow::Error::from(err).context("Failed to decode BSON document"))
    }
}

/// Extract the key fields from a MongoDB duplicate key message.
///
/// Messages look like:
/// "E11000 duplicate key error collection: club.stadiums index: name_1 dup key: { name: \"Anfield\" }"
fn duplicate_key_fields(message: &str) -> Vec<String> {
    let Some(start) = message.find("dup key: {") else {
        return Vec::new();
    };
    let body = &message[start + "dup key: {".len()..];
    let body = body.split('}').next().unwrap_or_default();
    body.split(',')
        .filter_map(|pair| pair.split(':').next())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect()
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_fields() {
        let message = r#"E11000 duplicate key error collection: club.stadiums index: name_1 dup key: { name: "Anfield" }"#;
        assert_eq!(duplicate_key_fields(message), vec!["name".to_string()]);

        let compound = r#"E11000 duplicate key error collection: club.player_stats index: player_id_1_season_id_1 dup key: { player_id: "a", season_id: "b" }"#;
        assert_eq!(
            duplicate_key_fields(compound),
            vec!["player_id".to_string(), "season_id".to_string()]
        );

        assert!(duplicate_key_fields("something else").is_empty());
    }

    #[test]
    fn test_missing_reference_message() {
        let err = DbError::missing_reference("contracts", "player_id", "abc");
        match err {
            DbError::ForeignKeyViolation { field, message, .. } => {
                assert_eq!(field, "player_id");
                assert_eq!(message, "player_id refers to abc, which does not exist");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
