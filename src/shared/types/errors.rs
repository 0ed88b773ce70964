use chrono::{DateTime, Utc};
use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

/// Coarse classification of a [`DomainError`], for callers that only need to
/// decide how to react (report, pick another window, give up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    Conflict,
    Validation,
    StoreUnavailable,
    Internal,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Payment {0} not found or already paid")]
    PaymentNotFoundOrAlreadyPaid(i32),

    #[error("Booking {0} not found or cannot be cancelled")]
    BookingNotCancellable(i32),

    #[error("Room {room_id} is already booked between {starts_at} and {ends_at}")]
    BookingConflict {
        room_id: i32,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Data integrity fault: {0}")]
    Integrity(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] DbErr),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::PaymentNotFoundOrAlreadyPaid(_) => ErrorKind::NotFound,
            Self::BookingNotCancellable(_) => ErrorKind::InvalidState,
            Self::BookingConflict { .. } | Self::Conflict(_) => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Integrity(_) => ErrorKind::Internal,
            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if the caller decides to run it again.
    /// Nothing in this crate retries on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::StoreUnavailable(DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            DomainError::Validation("validation failed".into())
        } else {
            DomainError::Validation(messages.join("; "))
        }
    }
}

/// SQLSTATE reported by the database driver for a failed statement, if any.
pub fn sql_state(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e)))
        | DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e))) => {
            e.code().map(|code| code.into_owned())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_kinds() {
        assert_eq!(
            DomainError::PaymentNotFoundOrAlreadyPaid(7).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::BookingNotCancellable(7).kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            DomainError::BookingConflict {
                room_id: 1,
                starts_at: Utc::now(),
                ends_at: Utc::now(),
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            DomainError::Integrity("x".into()).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            DomainError::not_found("Room", 3).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn connection_errors_are_transient() {
        let err = DomainError::StoreUnavailable(DbErr::Conn(RuntimeErr::Internal(
            "connection refused".into(),
        )));
        assert!(err.is_transient());
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);

        let err = DomainError::StoreUnavailable(DbErr::Custom("boom".into()));
        assert!(!err.is_transient());
        assert!(!DomainError::Validation("bad".into()).is_transient());
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = DomainError::not_found("Payment", 42);
        assert_eq!(err.to_string(), "Not found: Payment with id=42");
    }
}
