pub mod api;
pub mod config;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use stagebook_db::AppState;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use config::ServerConfig;

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.cors_origins.is_empty() {
        let own = config.own_origin();
        tracing::warn!(
            origin = %own,
            "CORS_ORIGINS not set, allowing same-origin requests only"
        );
        AllowOrigin::exact(
            HeaderValue::from_str(&own)
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost")),
        )
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        tracing::info!("CORS allowed origins: {:?}", origins);
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}

/// Build the full HTTP surface over the given state.
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let venue_routes = Router::new()
        .route("/", get(api::venues::list_venues))
        .route("/search", post(api::venues::search_venues))
        .route(
            "/create",
            get(api::venues::create_venue_form).post(api::venues::create_venue),
        )
        .route(
            "/{id}",
            get(api::venues::get_venue).delete(api::venues::delete_venue),
        )
        .route(
            "/{id}/edit",
            get(api::venues::edit_venue_form).post(api::venues::edit_venue),
        );

    let artist_routes = Router::new()
        .route("/", get(api::artists::list_artists))
        .route("/search", post(api::artists::search_artists))
        .route(
            "/create",
            get(api::artists::create_artist_form).post(api::artists::create_artist),
        )
        .route("/{id}", get(api::artists::get_artist))
        .route(
            "/{id}/edit",
            get(api::artists::edit_artist_form).post(api::artists::edit_artist),
        );

    let show_routes = Router::new()
        .route("/", get(api::shows::list_shows))
        .route(
            "/create",
            get(api::shows::create_show_form).post(api::shows::create_show),
        );

    Router::new()
        .route("/", get(api::home))
        .route("/healthz", get(api::healthz))
        .nest("/venues", venue_routes)
        .nest("/artists", artist_routes)
        .nest("/shows", show_routes)
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
