use platform_api::ApiError;
use thiserror::Error;

use crate::store::StoreError;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("an employee with email {0} already exists")]
    DuplicateEmail(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("employee store failure")]
    Store(#[source] StoreError),
}

impl From<StoreError> for HrError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::EmailTaken(email) => HrError::DuplicateEmail(email),
            other => HrError::Store(other),
        }
    }
}

impl From<HrError> for ApiError {
    fn from(value: HrError) -> Self {
        match value {
            HrError::DuplicateEmail(_) => ApiError::Conflict(value.to_string()),
            HrError::InvalidInput(message) => ApiError::InvalidInput(message),
            HrError::Store(err) => ApiError::internal(anyhow::Error::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn taken_email_becomes_duplicate() {
        let err = HrError::from(StoreError::EmailTaken("a@b.c".into()));
        assert!(matches!(err, HrError::DuplicateEmail(ref email) if email == "a@b.c"));
    }

    #[test]
    fn api_mapping_follows_error_kind() {
        let conflict = ApiError::from(HrError::DuplicateEmail("a@b.c".into()));
        assert!(matches!(conflict, ApiError::Conflict(_)));

        let invalid = ApiError::from(HrError::InvalidInput("email is required".into()));
        assert!(matches!(invalid, ApiError::InvalidInput(ref m) if m == "email is required"));

        let internal = ApiError::from(HrError::from(StoreError::Db(DbErr::Custom(
            "connection reset".into(),
        ))));
        assert!(matches!(internal, ApiError::Internal(_)));
    }
}
