use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use platform_authz::AuthzError;
use products_hr::HrError;
use thiserror::Error;
use tracing::error;

/// Shared GraphQL result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("resource not found")]
    NotFound,
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<AuthzError> for ApiError {
    fn from(value: AuthzError) -> Self {
        Self::Forbidden(value.to_string())
    }
}

impl From<HrError> for ApiError {
    fn from(value: HrError) -> Self {
        match value {
            HrError::NotFound(_) => Self::NotFound,
            err @ HrError::SelfReview(_) => Self::Forbidden(err.to_string()),
            HrError::Store(detail) => {
                error!(%detail, "hr store failure");
                Self::internal(anyhow::anyhow!(detail))
            }
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        if let ApiError::InvalidInput(_) = self {
            err = err.extend_with(|_err, e| {
                e.set("type", "BAD_REQUEST");
            });
        }
        err
    }
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    ApiError::internal(err.into()).extend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;
    use uuid::Uuid;

    fn code_of(err: &Error) -> Option<Value> {
        err.extensions
            .as_ref()
            .and_then(|map| map.get("code"))
            .cloned()
    }

    #[test]
    fn internal_errors_are_masked() {
        let err = internal_error(anyhow::anyhow!("boom"));
        assert_eq!(err.message, "internal server error");
        assert_eq!(code_of(&err), Some(Value::from("INTERNAL")));
    }

    #[test]
    fn store_failures_do_not_leak() {
        let err = ApiError::from(HrError::Store("connection reset".into())).extend();
        assert_eq!(err.message, "internal server error");
    }

    #[test]
    fn domain_errors_map_to_codes() {
        let missing = ApiError::from(HrError::MissingSalary(Uuid::nil())).extend();
        assert_eq!(code_of(&missing), Some(Value::from("INVALID_INPUT")));

        let not_found = ApiError::from(HrError::NotFound("employee".into())).extend();
        assert_eq!(code_of(&not_found), Some(Value::from("NOT_FOUND")));

        let self_review = ApiError::from(HrError::SelfReview(Uuid::nil())).extend();
        assert_eq!(code_of(&self_review), Some(Value::from("FORBIDDEN")));

        let denied = ApiError::from(AuthzError::Denied {
            action: "approve_overtime".into(),
            resource: "overtime".into(),
        })
        .extend();
        assert_eq!(code_of(&denied), Some(Value::from("FORBIDDEN")));
    }
}
