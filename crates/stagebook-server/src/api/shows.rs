use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiError;
use super::extract::FormBody;
use super::forms::ShowForm;
use super::MutationResponse;
use stagebook_db::entities::show;
use stagebook_db::query::{self, ShowListing};
use stagebook_db::{mutation, AppState};

#[derive(Debug, Serialize)]
pub struct ShowListResponse {
    pub shows: Vec<ShowListing>,
}

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ShowListResponse>, ApiError> {
    let shows = query::show_list(&state.db).await?;
    Ok(Json(ShowListResponse { shows }))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::blank())
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<ShowForm>,
) -> Result<(StatusCode, Json<MutationResponse<show::Model>>), ApiError> {
    let input = form.into_input()?;

    let created = mutation::create_show(&state.db, input).await.map_err(|e| {
        ApiError::mutation(e, "An error occurred. Show could not be listed.".to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(
            "Show was successfully listed!".to_string(),
            "/",
            created,
        )),
    ))
}
