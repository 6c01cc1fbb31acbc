use crate::db::errors::DbError;
use crate::types::Resource;
use async_graphql::ErrorExtensions;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Malformed input, such as an unknown sort field
    #[error("{message}")]
    BadRequest { message: String },

    /// No document with the requested ID
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Internal failure described by the operation that failed
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Rejected or failed store operation
    #[error(transparent)]
    Database(#[from] DbError),

    /// Anything else, with its context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(resource: Resource, id: impl ToString) -> Self {
        Error::NotFound {
            resource: resource.singular().to_string(),
            id: id.to_string(),
        }
    }

    /// Name the resource in a repository `NotFound`; other errors pass through.
    pub fn in_resource(resource: Resource, id: impl ToString) -> impl FnOnce(DbError) -> Self {
        move |err| match err {
            DbError::NotFound => Error::not_found(resource, id),
            err => Error::Database(err),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::SchemaViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show clients; internal details stay in the logs
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { collection, fields, .. } => unique_violation_message(collection, fields),
                DbError::ForeignKeyViolation { message, .. } => format!("Invalid reference: {message}"),
                DbError::CheckViolation { message, .. } => message.clone(),
                DbError::SchemaViolation { .. } => "Validation failed".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }

    /// Machine-readable code exposed to GraphQL clients in `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            Error::Database(DbError::SchemaViolation { .. }) => "VALIDATION_FAILED",
            Error::Database(DbError::UniqueViolation { .. }) => "CONFLICT",
            _ => match self.status_code() {
                StatusCode::BAD_REQUEST => "BAD_REQUEST",
                StatusCode::NOT_FOUND => "NOT_FOUND",
                _ => "INTERNAL",
            },
        }
    }

    fn log(&self) {
        // Different log levels based on severity
        match self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(DbError::UniqueViolation { .. }) => {
                tracing::warn!("Conflict error: {}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }
    }
}

fn unique_violation_message(collection: &str, fields: &[String]) -> String {
    let resource = Resource::from_collection(collection).map_or("Resource", |r| r.singular());
    if fields.is_empty() {
        format!("{resource} already exists")
    } else {
        format!("{resource} with this {} already exists", fields.join(", "))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();

        match &self {
            // Unique violations carry the colliding resource
            Error::Database(DbError::UniqueViolation { collection, .. }) => {
                let body = json!({
                    "message": self.user_message(),
                    "resource": collection,
                });
                (status, Json(body)).into_response()
            }
            Error::Database(DbError::SchemaViolation { errors, .. }) => {
                let body = json!({
                    "message": self.user_message(),
                    "errors": errors,
                });
                (status, Json(body)).into_response()
            }
            _ if status == StatusCode::BAD_REQUEST => (status, Json(json!({ "message": self.user_message() }))).into_response(),
            _ => {
                // For all other errors, return simple text message
                (status, self.user_message()).into_response()
            }
        }
    }
}

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        self.log();
        async_graphql::Error::new(self.user_message()).extend_with(|_, e| {
            e.set("code", self.code());
            if let Error::Database(DbError::SchemaViolation { errors, .. }) = self
                && let Ok(fields) = async_graphql::Value::from_json(json!(errors))
            {
                e.set("fields", fields);
            }
        })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn test_status_codes_and_codes() {
        let conflict = Error::Database(DbError::UniqueViolation {
            collection: "stadiums".to_string(),
            fields: vec!["name".to_string()],
            message: String::new(),
        });
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(conflict.code(), "CONFLICT");
        assert_eq!(conflict.user_message(), "Stadium with this name already exists");

        let missing = Error::Database(DbError::missing_reference("contracts", "player_id", "abc"));
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.code(), "BAD_REQUEST");
        assert!(missing.user_message().starts_with("Invalid reference"));

        let invalid = Error::Database(DbError::SchemaViolation {
            collection: "players".to_string(),
            errors: vec![FieldError {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            }],
        });
        assert_eq!(invalid.code(), "VALIDATION_FAILED");

        assert_eq!(Error::not_found(Resource::Players, "x").code(), "NOT_FOUND");
        let named = Error::in_resource(Resource::Matches, "abc")(DbError::NotFound);
        assert_eq!(named.user_message(), "Match with ID abc not found");
        let passed = Error::in_resource(Resource::Matches, "abc")(DbError::check("matches", "bad"));
        assert_eq!(passed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::Other(anyhow::anyhow!("boom")).code(), "INTERNAL");
    }

    #[test]
    fn test_graphql_extension_includes_fields() {
        let err = Error::Database(DbError::SchemaViolation {
            collection: "players".to_string(),
            errors: vec![FieldError {
                field: "shirt_number".to_string(),
                message: "must be between 1 and 99".to_string(),
            }],
        })
        .extend();

        let extensions = serde_json::to_value(&err.extensions).unwrap();
        assert_eq!(extensions["code"], "VALIDATION_FAILED");
        assert_eq!(extensions["fields"][0]["field"], "shirt_number");
    }
}
