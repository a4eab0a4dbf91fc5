use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::error::{ErrorCode, ErrorResponse};
use thiserror::Error;
use tracing::{error, warn};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Voter {0} already exists")]
    Conflict(u64),
    #[error("Storage failure")]
    StorageFailure(String),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::MalformedRequest(_) => ErrorCode::MalformedRequest,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Conflict(_) => ErrorCode::Conflict,
            ApiError::StorageFailure(_) => ErrorCode::StorageFailure,
        }
    }

    pub fn poll_not_found(voter_id: u64, poll_id: u64) -> Self {
        ApiError::NotFound(format!("Poll {} not found for voter {}", poll_id, voter_id))
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound(e.to_string()),
            StoreError::AlreadyExists(id) => ApiError::Conflict(id),
            other => ApiError::StorageFailure(other.to_string()),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let code = self.code();
        let status = Status::new(code.status());

        match &self {
            ApiError::StorageFailure(detail) => {
                error!("{} {} failed: {}", req.method(), req.uri(), detail)
            }
            other => warn!("{} {} rejected: {}", req.method(), req.uri(), other),
        }

        let body = ErrorResponse::new(code, self.to_string());
        rocket::Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}
