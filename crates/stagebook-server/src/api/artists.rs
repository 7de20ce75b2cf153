use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiError;
use super::extract::{FormBody, IdPath};
use super::forms::{ArtistForm, SearchForm};
use super::MutationResponse;
use stagebook_db::entities::artist;
use stagebook_db::query::{self, ArtistDetail, ArtistEntry, SearchResults};
use stagebook_db::{mutation, AppState};

#[derive(Debug, Serialize)]
pub struct ArtistListResponse {
    pub artists: Vec<ArtistEntry>,
}

#[derive(Debug, Serialize)]
pub struct ArtistSearchResponse {
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Debug, Serialize)]
pub struct ArtistEditResponse {
    pub form: ArtistForm,
    pub artist: artist::Model,
}

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ArtistListResponse>, ApiError> {
    let artists = query::artist_list(&state.db).await?;
    Ok(Json(ArtistListResponse { artists }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<SearchForm>,
) -> Result<Json<ArtistSearchResponse>, ApiError> {
    let results =
        query::search_artists(&state.db, &form.search_term, Utc::now().fixed_offset()).await?;
    Ok(Json(ArtistSearchResponse {
        search_term: form.search_term,
        results,
    }))
}

/// GET /artists/{id}
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let detail = query::artist_detail(&state.db, id, Utc::now().fixed_offset()).await?;
    Ok(Json(detail))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<ArtistForm>,
) -> Result<(StatusCode, Json<MutationResponse<artist::Model>>), ApiError> {
    let name = form.display_name().to_string();
    let input = form.into_input()?;

    let created = mutation::create_artist(&state.db, input)
        .await
        .map_err(|e| {
            ApiError::mutation(e, format!("An error occurred. Artist {name} could not be listed."))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(
            format!("Artist {name} was successfully listed!"),
            "/",
            created,
        )),
    ))
}

/// GET /artists/{id}/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<ArtistEditResponse>, ApiError> {
    let artist = query::find_artist(&state.db, id).await?;
    Ok(Json(ArtistEditResponse {
        form: ArtistForm::from(artist.clone()),
        artist,
    }))
}

/// POST /artists/{id}/edit
pub async fn edit_artist(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i32>,
    FormBody(form): FormBody<ArtistForm>,
) -> Result<Json<MutationResponse<artist::Model>>, ApiError> {
    let name = form.display_name().to_string();
    let input = form.into_input()?;

    let updated = mutation::update_artist(&state.db, id, input)
        .await
        .map_err(|e| {
            ApiError::mutation(e, format!("An error occurred. Artist {name} could not be edited."))
        })?;

    Ok(Json(MutationResponse::new(
        format!("Artist {name} was successfully edited!"),
        format!("/artists/{id}"),
        updated,
    )))
}
