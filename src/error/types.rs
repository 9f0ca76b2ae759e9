// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error taxonomy.
///
/// The first group are domain errors with a stable kind the transport layer
/// can map onto status codes. The second group are infrastructure failures,
/// surfaced opaquely and never retried here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Only orderers can perform this action.")]
    ForbiddenRole,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("There are no pending items to fulfill.")]
    EmptyList,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Stable machine-readable kind, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not-found",
            AppError::ForbiddenRole => "forbidden-role",
            AppError::InvalidInput(_) | AppError::Domain(_) => "invalid-input",
            AppError::Conflict(_) => "conflict",
            AppError::EmptyList => "empty-list",
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Other(_) => "internal",
        }
    }

    /// Status code the HTTP collaborator should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::ForbiddenRole => 403,
            AppError::InvalidInput(_) | AppError::Domain(_) => 400,
            AppError::Conflict(_) => 409,
            AppError::EmptyList => 400,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Other(_) => 500,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_kinds_are_stable() {
        assert_eq!(AppError::NotFound("Item not found.".into()).kind(), "not-found");
        assert_eq!(AppError::ForbiddenRole.kind(), "forbidden-role");
        assert_eq!(AppError::EmptyList.kind(), "empty-list");
        assert_eq!(AppError::Conflict("dup".into()).http_status(), 409);
        assert_eq!(AppError::ForbiddenRole.http_status(), 403);
    }
}
