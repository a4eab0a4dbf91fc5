use std::sync::Arc;
use rocket::{State, get, post, put, delete, serde::json::{self, Json}};
use tracing::{debug, info, instrument};
use shared::models::*;
use crate::{
   error::ApiError,
   stats::ServiceStats,
   store::VoterStore,
   utils::{parse_body, parse_id},
};

pub struct AppState {
    pub store: Arc<dyn VoterStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn VoterStore>) -> Self {
        Self { store }
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[get("/voters")]
pub async fn list_voters(state: &State<AppState>) -> ApiResult<Vec<Voter>> {
    let voters = state.store.list().await?;
    debug!("Listing {} voters", voters.len());
    Ok(Json(voters))
}

#[get("/voters/health")]
pub async fn health(stats: &State<ServiceStats>) -> Json<HealthStatus> {
    Json(stats.health())
}

#[instrument(skip(state), fields(voter_id = %id))]
#[get("/voters/<id>")]
pub async fn get_voter(state: &State<AppState>, id: &str) -> ApiResult<Voter> {
    let id = parse_id("voter id", id)?;
    Ok(Json(state.store.get(id).await?))
}

#[instrument(skip(state, body), fields(voter_id = %id))]
#[post("/voters/<id>", data = "<body>")]
pub async fn add_voter(
    state: &State<AppState>,
    id: &str,
    body: Result<Json<CreateVoterRequest>, json::Error<'_>>,
) -> ApiResult<Voter> {
    let id = parse_id("voter id", id)?;
    let voter = parse_body(body)?
        .into_voter(id)
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;

    state.store.add(voter.clone()).await?;
    info!("Added voter {}", voter.id);
    Ok(Json(voter))
}

#[instrument(skip(state, body), fields(voter_id = %id))]
#[put("/voters/<id>", data = "<body>")]
pub async fn update_voter(
    state: &State<AppState>,
    id: &str,
    body: Result<Json<VoterPatch>, json::Error<'_>>,
) -> ApiResult<Voter> {
    let id = parse_id("voter id", id)?;
    let mut voter = state.store.get(id).await?;
    voter.apply(parse_body(body)?);

    state.store.update(voter.clone()).await?;
    info!("Updated voter {}", id);
    Ok(Json(voter))
}

#[delete("/voters")]
pub async fn delete_all_voters(state: &State<AppState>) -> Result<(), ApiError> {
    state.store.clear().await?;
    info!("Cleared all voters");
    Ok(())
}

#[instrument(skip(state), fields(voter_id = %id))]
#[delete("/voters/<id>")]
pub async fn delete_voter(state: &State<AppState>, id: &str) -> Result<(), ApiError> {
    let id = parse_id("voter id", id)?;
    state.store.delete(id).await?;
    info!("Deleted voter {}", id);
    Ok(())
}

#[instrument(skip(state), fields(voter_id = %id))]
#[get("/voters/<id>/polls")]
pub async fn get_voter_polls(state: &State<AppState>, id: &str) -> ApiResult<Vec<PollRecord>> {
    let id = parse_id("voter id", id)?;
    let voter = state.store.get(id).await?;
    Ok(Json(voter.history))
}

#[instrument(skip(state), fields(voter_id = %id, poll_id = %poll_id))]
#[get("/voters/<id>/polls/<poll_id>")]
pub async fn get_voter_poll(state: &State<AppState>, id: &str, poll_id: &str) -> ApiResult<PollRecord> {
    let id = parse_id("voter id", id)?;
    let poll_id = parse_id("poll id", poll_id)?;

    let voter = state.store.get(id).await?;
    voter.poll(poll_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::poll_not_found(id, poll_id))
}

#[instrument(skip(state), fields(voter_id = %id, poll_id = %poll_id))]
#[post("/voters/<id>/polls/<poll_id>")]
pub async fn add_voter_poll(state: &State<AppState>, id: &str, poll_id: &str) -> ApiResult<Voter> {
    let id = parse_id("voter id", id)?;
    let poll_id = parse_id("poll id", poll_id)?;

    let mut voter = state.store.get(id).await?;
    voter.record_poll(poll_id);

    state.store.update(voter.clone()).await?;
    info!("Recorded poll {} for voter {} ({} total)", poll_id, id, voter.total_polls());
    Ok(Json(voter))
}

#[instrument(skip(state, body), fields(voter_id = %id, poll_id = %poll_id))]
#[put("/voters/<id>/polls/<poll_id>", data = "<body>")]
pub async fn update_voter_poll(
    state: &State<AppState>,
    id: &str,
    poll_id: &str,
    body: Result<Json<PollPatch>, json::Error<'_>>,
) -> ApiResult<PollRecord> {
    let id = parse_id("voter id", id)?;
    let poll_id = parse_id("poll id", poll_id)?;

    let mut voter = state.store.get(id).await?;
    let record = voter
        .poll_mut(poll_id)
        .ok_or_else(|| ApiError::poll_not_found(id, poll_id))?;
    record.apply(parse_body(body)?);
    let updated = record.clone();

    state.store.update(voter).await?;
    info!("Updated poll {} for voter {}", poll_id, id);
    Ok(Json(updated))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> rocket::http::Status {
    rocket::http::Status::Ok
}
