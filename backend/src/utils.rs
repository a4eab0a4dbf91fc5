use rocket::serde::json::{self, Json};
use crate::error::ApiError;

pub fn parse_id(name: &str, raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::MalformedRequest(format!("Invalid {}: {}", name, raw)))
}

pub fn parse_body<T>(body: Result<Json<T>, json::Error<'_>>) -> Result<T, ApiError> {
    body.map(Json::into_inner)
        .map_err(|e| ApiError::MalformedRequest(format!("Invalid body: {}", e)))
}
