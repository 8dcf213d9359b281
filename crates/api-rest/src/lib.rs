//! # API REST
//!
//! HTTP surface of the doctor directory.
//!
//! Handles:
//! - The server-rendered directory page, whose URL query is the filter state
//! - Form and link "events", answered with a redirect to the canonical URL
//! - JSON endpoints with OpenAPI/Swagger documentation
//!
//! Uses `api-shared` for response types and `directory-core` for all filtering.

#![warn(rust_2018_idioms)]

pub mod render;

use std::sync::Arc;

use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use minijinja::Environment;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    DoctorRes, ErrorRes, HealthRes, HealthService, ListDoctorsRes, ListSpecialtiesRes,
    ListSuggestionsRes, SuggestionRes,
};
use directory_core::constants::{SEARCH_PARAM, SORT_PARAM, TYPE_PARAM};
use directory_core::{
    default_suggestions, href, Action, Catalogue, ConsultationType, Directory, DirectoryResult,
    SortKey,
};
use render::PAGE_PATH;

/// Form field carrying one checked specialty; repeated once per checkbox.
const SPECIALTY_FIELD: &str = "specialty";

/// Outcome of the startup load.
#[derive(Clone)]
enum CatalogueStatus {
    Loaded(Arc<Catalogue>),
    /// The load failed; the message is kept for logs and JSON errors.
    Failed(Arc<str>),
}

/// Application state shared across request handlers.
///
/// The catalogue is immutable after startup; each request builds its own
/// [`Directory`] from the URL, so nothing here is mutated while serving.
#[derive(Clone)]
pub struct AppState {
    catalogue: CatalogueStatus,
    templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Build the state from the result of the startup load.
    ///
    /// A failed load is logged here and leaves the app inert: every page shows
    /// only the load-failure notice.
    pub fn new(loaded: DirectoryResult<Catalogue>) -> Result<Self, minijinja::Error> {
        let catalogue = match loaded {
            Ok(catalogue) => CatalogueStatus::Loaded(Arc::new(catalogue)),
            Err(e) => {
                tracing::error!("Error loading doctor data: {}", e);
                CatalogueStatus::Failed(Arc::from(e.to_string()))
            }
        };

        Ok(Self {
            catalogue,
            templates: Arc::new(render::templates()?),
        })
    }

    fn loaded(&self) -> Option<&Arc<Catalogue>> {
        match &self.catalogue {
            CatalogueStatus::Loaded(catalogue) => Some(catalogue),
            CatalogueStatus::Failed(_) => None,
        }
    }

    fn unavailable(&self) -> (StatusCode, Json<ErrorRes>) {
        let message = match &self.catalogue {
            CatalogueStatus::Failed(message) => message.to_string(),
            CatalogueStatus::Loaded(_) => String::new(),
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorRes { message }))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_doctors, list_suggestions, list_specialties),
    components(schemas(
        HealthRes,
        DoctorRes,
        ListDoctorsRes,
        SuggestionRes,
        ListSuggestionsRes,
        ListSpecialtiesRes,
        ErrorRes
    ))
)]
pub struct ApiDoc;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(PAGE_PATH, get(directory_page))
        .route("/apply", get(apply_form))
        .route(render::SELECT_SUGGESTION_PATH, get(select_suggestion))
        .route("/health", get(health))
        .route("/api/doctors", get(list_doctors))
        .route("/api/suggestions", get(list_suggestions))
        .route("/api/specialties", get(list_specialties))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve `router(state)` on `addr` until the server stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Doctor directory listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Directory page for the filter state in the query string.
///
/// Back/forward navigation lands here with the previous URL, so the state is
/// re-derived from the URL without touching the data source.
#[axum::debug_handler]
async fn directory_page(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let Some(catalogue) = state.loaded() else {
        return match render::render_load_failure(&state.templates) {
            Ok(html) => (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response(),
            Err(e) => render_error(e),
        };
    };

    let query = query.as_deref().unwrap_or("");
    let directory = Directory::from_query(catalogue.clone(), query);
    tracing::debug!("rendering directory page for {:?}", directory.filters());

    let show_suggestions = render::wants_suggestions(query);
    match render::render_page(&state.templates, &directory, show_suggestions) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_error(e),
    }
}

/// Filter form submission.
///
/// The form posts the state it was rendered for (`state`) and every control
/// (`search`, `type`, `sort` and one `specialty` per checked box). The new state
/// is reached through reducer actions and the browser is redirected to its
/// canonical URL, which adds a history entry. The suggestion list stays closed
/// unless the suggest button was used.
#[axum::debug_handler]
async fn apply_form(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let Some(catalogue) = state.loaded() else {
        return Redirect::to(PAGE_PATH).into_response();
    };

    let query = query.as_deref().unwrap_or("");
    let directory = apply_submission(catalogue.clone(), query);

    let location = if render::wants_suggestions(query) {
        render::suggestions_href(directory.filters())
    } else {
        href(PAGE_PATH, directory.filters())
    };
    Redirect::to(&location).into_response()
}

/// Replays a form submission on top of the state it was rendered for.
///
/// Selected specialties keep their order. Only those shown as checkboxes can be
/// unchecked; a selected name the catalogue does not list survives the submit.
/// Unknown `type`/`sort` values are ignored.
fn apply_submission(catalogue: Arc<Catalogue>, query: &str) -> Directory {
    let fields: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    let current = fields
        .iter()
        .find(|(key, _)| key == render::CURRENT_STATE_FIELD)
        .map(|(_, value)| value.as_str())
        .unwrap_or("");
    let mut directory = Directory::from_query(catalogue, current);

    let checked: Vec<&str> = fields
        .iter()
        .filter(|(key, _)| key == SPECIALTY_FIELD)
        .map(|(_, value)| value.as_str())
        .collect();
    let shown = directory.catalogue().specialty_names();
    let unchecked: Vec<String> = directory
        .filters()
        .specialties
        .iter()
        .filter(|name| shown.contains(&name.as_str()) && !checked.contains(&name.as_str()))
        .cloned()
        .collect();

    let mut actions: Vec<Action> = unchecked.into_iter().map(Action::DeselectSpecialty).collect();
    for (key, value) in &fields {
        match key.as_str() {
            SEARCH_PARAM => actions.push(Action::SetSearch(value.clone())),
            TYPE_PARAM => {
                if let Ok(consultation) = value.parse::<ConsultationType>() {
                    actions.push(Action::SetConsultation(consultation));
                }
            }
            SORT_PARAM => {
                if let Ok(sort) = value.parse::<SortKey>() {
                    actions.push(Action::SetSort(sort));
                }
            }
            SPECIALTY_FIELD => actions.push(Action::SelectSpecialty(value.clone())),
            _ => {}
        }
    }

    for action in actions {
        directory.dispatch(action);
    }
    directory
}

#[derive(Debug, Deserialize)]
struct SelectSuggestionParams {
    #[serde(default)]
    id: String,
}

/// A suggestion was picked: search becomes that doctor's name, other filters stay.
#[axum::debug_handler]
async fn select_suggestion(
    State(state): State<AppState>,
    Query(params): Query<SelectSuggestionParams>,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(catalogue) = state.loaded() else {
        return Redirect::to(PAGE_PATH).into_response();
    };

    let mut directory = Directory::from_query(catalogue.clone(), query.as_deref().unwrap_or(""));
    directory.dispatch(Action::SelectSuggestion {
        doctor_id: params.id,
    });

    Redirect::to(&href(PAGE_PATH, directory.filters())).into_response()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Always answers 200; `ok` is false when the doctor data failed to load.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.loaded().is_some()))
}

#[utoipa::path(
    get,
    path = "/api/doctors",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("type" = Option<String>, Query, description = "`video` (default) or `clinic`"),
        ("specialties" = Option<String>, Query, description = "Comma-joined specialty names"),
        ("sort" = Option<String>, Query, description = "`fees_asc` (default), `fees_desc`, `experience_asc` or `experience_desc`")
    ),
    responses(
        (status = 200, description = "Filtered and sorted doctors", body = ListDoctorsRes),
        (status = 503, description = "Doctor data failed to load", body = ErrorRes)
    )
)]
/// Derived view for the filter state in the query string
///
/// Accepts the same parameters as the directory page URL.
///
/// # Errors
/// Returns `503 Service Unavailable` if the doctor data failed to load at startup.
#[axum::debug_handler]
async fn list_doctors(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListDoctorsRes>, (StatusCode, Json<ErrorRes>)> {
    let catalogue = state.loaded().ok_or_else(|| state.unavailable())?;
    let directory = Directory::from_query(catalogue.clone(), query.as_deref().unwrap_or(""));

    let doctors: Vec<DoctorRes> = directory.view().into_iter().map(DoctorRes::from).collect();
    Ok(Json(ListDoctorsRes {
        count: doctors.len(),
        query: directory.query(),
        doctors,
    }))
}

#[derive(Debug, Deserialize)]
struct SuggestionParams {
    #[serde(default)]
    search: String,
}

#[utoipa::path(
    get,
    path = "/api/suggestions",
    params(
        ("search" = Option<String>, Query, description = "Text typed so far")
    ),
    responses(
        (status = 200, description = "Up to three matching doctors", body = ListSuggestionsRes),
        (status = 503, description = "Doctor data failed to load", body = ErrorRes)
    )
)]
/// Search suggestions for the text typed so far
///
/// # Errors
/// Returns `503 Service Unavailable` if the doctor data failed to load at startup.
#[axum::debug_handler]
async fn list_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<ListSuggestionsRes>, (StatusCode, Json<ErrorRes>)> {
    let catalogue = state.loaded().ok_or_else(|| state.unavailable())?;
    let suggestions = default_suggestions(catalogue, &params.search)
        .into_iter()
        .map(SuggestionRes::from)
        .collect();
    Ok(Json(ListSuggestionsRes { suggestions }))
}

#[utoipa::path(
    get,
    path = "/api/specialties",
    responses(
        (status = 200, description = "Every specialty in the directory", body = ListSpecialtiesRes),
        (status = 503, description = "Doctor data failed to load", body = ErrorRes)
    )
)]
/// Union of specialty names across all doctors, in first-seen order
///
/// # Errors
/// Returns `503 Service Unavailable` if the doctor data failed to load at startup.
#[axum::debug_handler]
async fn list_specialties(
    State(state): State<AppState>,
) -> Result<Json<ListSpecialtiesRes>, (StatusCode, Json<ErrorRes>)> {
    let catalogue = state.loaded().ok_or_else(|| state.unavailable())?;
    let specialties = catalogue
        .specialty_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(Json(ListSpecialtiesRes { specialties }))
}

fn render_error(e: minijinja::Error) -> Response {
    tracing::error!("Render directory page error: {:?}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
}
