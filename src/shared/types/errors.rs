use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{entity} not found: {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("invalid data provided: {0}")]
    InvalidData(String),

    #[error("invalid date format, expected MM-YYYY: {0:?}")]
    InvalidDateFormat(String),

    #[error("invalid UUID format: {0:?}")]
    InvalidUuid(String),

    #[error("invalid date range: start date must be before or equal to end date")]
    InvalidDateRange,

    #[error("price must be a positive integer")]
    InvalidPrice,

    #[error("invalid pagination parameters: {0}")]
    InvalidPagination(String),

    /// Connection or query failure in the persistence layer.
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn subscription_not_found(id: i32) -> Self {
        DomainError::NotFound {
            entity: "subscription",
            field: "id",
            value: id.to_string(),
        }
    }

    /// Client-input errors, i.e. everything except lookups and storage failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidData(_)
                | DomainError::InvalidDateFormat(_)
                | DomainError::InvalidUuid(_)
                | DomainError::InvalidDateRange
                | DomainError::InvalidPrice
                | DomainError::InvalidPagination(_)
        )
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = DomainError::subscription_not_found(42);
        assert_eq!(err.to_string(), "subscription not found: id=42");
        assert!(!err.is_validation());
    }

    #[test]
    fn storage_errors_are_not_validation_errors() {
        let err: DomainError = sea_orm::DbErr::Custom("connection reset".into()).into();
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(!err.is_validation());
        assert!(DomainError::InvalidPrice.is_validation());
        assert!(DomainError::InvalidDateRange.is_validation());
    }
}
