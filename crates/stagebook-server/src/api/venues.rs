use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiError;
use super::extract::{FormBody, IdPath};
use super::forms::{SearchForm, VenueForm};
use super::MutationResponse;
use stagebook_db::entities::venue;
use stagebook_db::query::{self, SearchResults, VenueArea, VenueDetail};
use stagebook_db::{mutation, AppState};

#[derive(Debug, Serialize)]
pub struct VenueAreasResponse {
    pub areas: Vec<VenueArea>,
}

#[derive(Debug, Serialize)]
pub struct VenueSearchResponse {
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Debug, Serialize)]
pub struct VenueEditResponse {
    pub form: VenueForm,
    pub venue: venue::Model,
}

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VenueAreasResponse>, ApiError> {
    let areas = query::venue_areas(&state.db, Utc::now().fixed_offset()).await?;
    Ok(Json(VenueAreasResponse { areas }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<SearchForm>,
) -> Result<Json<VenueSearchResponse>, ApiError> {
    let results =
        query::search_venues(&state.db, &form.search_term, Utc::now().fixed_offset()).await?;
    Ok(Json(VenueSearchResponse {
        search_term: form.search_term,
        results,
    }))
}

/// GET /venues/{id}
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<VenueDetail>, ApiError> {
    let detail = query::venue_detail(&state.db, id, Utc::now().fixed_offset()).await?;
    Ok(Json(detail))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<VenueForm>,
) -> Result<(StatusCode, Json<MutationResponse<venue::Model>>), ApiError> {
    let name = form.display_name().to_string();
    let input = form.into_input()?;

    let created = mutation::create_venue(&state.db, input)
        .await
        .map_err(|e| {
            ApiError::mutation(e, format!("An error occurred. Venue {name} could not be listed."))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(
            format!("Venue {name} was successfully listed!"),
            "/",
            created,
        )),
    ))
}

/// DELETE /venues/{id}
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<MutationResponse<venue::Model>>, ApiError> {
    let removed = mutation::delete_venue(&state.db, id).await.map_err(|e| {
        ApiError::mutation(e, "An error occurred. Venue could not be deleted.".to_string())
    })?;

    Ok(Json(MutationResponse::new(
        format!("Venue {} was successfully deleted.", removed.name),
        "/",
        removed,
    )))
}

/// GET /venues/{id}/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<VenueEditResponse>, ApiError> {
    let venue = query::find_venue(&state.db, id).await?;
    Ok(Json(VenueEditResponse {
        form: VenueForm::from(venue.clone()),
        venue,
    }))
}

/// POST /venues/{id}/edit
pub async fn edit_venue(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i32>,
    FormBody(form): FormBody<VenueForm>,
) -> Result<Json<MutationResponse<venue::Model>>, ApiError> {
    let name = form.display_name().to_string();
    let input = form.into_input()?;

    let updated = mutation::update_venue(&state.db, id, input)
        .await
        .map_err(|e| {
            ApiError::mutation(e, format!("An error occurred. Venue {name} could not be edited."))
        })?;

    Ok(Json(MutationResponse::new(
        format!("Venue {name} was successfully edited!"),
        format!("/venues/{id}"),
        updated,
    )))
}
