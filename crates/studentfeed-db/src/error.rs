use thiserror::Error;

/// Failure of a repository call.
///
/// Constraint violations are split out so that callers can answer with a
/// precise status (409 for a duplicate email, 404 for a vanished parent)
/// instead of a blanket 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint `{0}` violated")]
    UniqueViolation(String),
    #[error("foreign key constraint `{0}` violated")]
    ForeignKeyViolation(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return Self::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(constraint);
            }
        }
        Self::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_display() {
        let err = StoreError::UniqueViolation("students_email_key".to_string());
        assert_eq!(err.to_string(), "unique constraint `students_email_key` violated");
        assert!(err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }
}
