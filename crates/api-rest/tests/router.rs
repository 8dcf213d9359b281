use api_rest::{router, AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use directory_core::{Catalogue, DirectoryError};
use http_body_util::BodyExt;
use tower::ServiceExt;

const DOCTORS: &str = r#"[
  {"id": "1", "name": "Dr. Asha Menon", "fees": "₹ 500", "experience": "10 Years",
   "languages": ["English", "Malayalam"],
   "specialities": [{"name": "Dentist"}], "video_consult": true, "in_clinic": true},
  {"id": "2", "name": "Dr. Ravi Kumar", "fees": "₹ 300", "experience": "4 Years",
   "specialities": [{"name": "General Physician"}], "video_consult": true, "in_clinic": false},
  {"id": "3", "name": "Dr. Meena Iyer", "fees": "₹ 350", "experience": "15 Years",
   "specialities": [{"name": "Dentist"}, {"name": "Orthodontist"}],
   "video_consult": false, "in_clinic": true}
]"#;

fn app() -> Router {
    let catalogue = Catalogue::from_json(DOCTORS).expect("parse doctors");
    router(AppState::new(Ok(catalogue)).expect("build state"))
}

fn failed_app() -> Router {
    let err = DirectoryError::SourceStatus { status: 502 };
    router(AppState::new(Err(err)).expect("build state"))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("location header").to_string());
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, location, String::from_utf8(bytes.to_vec()).expect("utf8 body"))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

#[tokio::test]
async fn page_lists_default_view_in_fee_order() {
    let (status, _, html) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(html.matches("data-testid=\"doctor-card\"").count(), 2);
    let ravi = html.find("Dr. Ravi Kumar").expect("ravi listed");
    let asha = html.find("Dr. Asha Menon").expect("asha listed");
    assert!(ravi < asha);
    assert!(!html.contains("Dr. Meena Iyer</h3>"));
}

#[tokio::test]
async fn page_shows_only_notice_when_nothing_matches() {
    let (status, _, html) = get(app(), "/?search=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No doctors found matching your criteria."));
    assert!(!html.contains("data-testid=\"doctor-card\""));
}

#[tokio::test]
async fn form_submission_redirects_to_canonical_url() {
    let (status, location, _) = get(
        app(),
        "/apply?search=&type=clinic&sort=fees_asc&specialty=Dentist&specialty=Orthodontist",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("/?type=clinic&specialties=Dentist%2COrthodontist")
    );
}

#[tokio::test]
async fn default_form_submission_redirects_to_bare_page() {
    let (status, location, _) = get(app(), "/apply?search=&type=video&sort=fees_asc").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
}

#[tokio::test]
async fn suggestion_pick_sets_full_name_and_keeps_filters() {
    let (status, location, _) =
        get(app(), "/suggestions/select?search=mee&type=clinic&id=3").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("/?search=Dr.+Meena+Iyer&type=clinic")
    );
}

#[tokio::test]
async fn api_doctors_returns_derived_view() {
    let (status, json) = get_json(app(), "/api/doctors?type=clinic&sort=experience_desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["query"], "type=clinic&sort=experience_desc");
    assert_eq!(json["doctors"][0]["name"], "Dr. Meena Iyer");
    assert_eq!(json["doctors"][1]["name"], "Dr. Asha Menon");
    assert_eq!(json["doctors"][1]["fee_amount"], 500);
}

#[tokio::test]
async fn api_suggestions_and_specialties() {
    let (status, json) = get_json(app(), "/api/suggestions?search=DR").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["suggestions"].as_array().map(Vec::len), Some(3));

    let (_, json) = get_json(app(), "/api/suggestions").await;
    assert_eq!(json["suggestions"].as_array().map(Vec::len), Some(0));

    let (status, json) = get_json(app(), "/api/specialties").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["specialties"],
        serde_json::json!(["Dentist", "General Physician", "Orthodontist"])
    );
}

#[tokio::test]
async fn failed_load_leaves_ui_inert() {
    let (status, _, html) = get(failed_app(), "/?type=clinic").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains("Failed to load doctor data. Please try again later."));
    assert!(!html.contains("specialtiesFilter"));

    let (status, json) = get_json(failed_app(), "/api/doctors").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["message"].as_str().unwrap_or_default().contains("502"));

    let (status, json) = get_json(failed_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], false);
}

#[tokio::test]
async fn picked_suggestion_closes_the_list() {
    let (_, location, _) = get(app(), "/suggestions/select?search=mee&type=clinic&id=3").await;
    let location = location.expect("redirect location");

    let (status, _, html) = get(app(), &location).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Dr. Meena Iyer</h3>"));
    assert!(!html.contains("data-testid=\"suggestion-item\""));
}

#[tokio::test]
async fn suggest_button_opens_the_list() {
    let (status, location, _) =
        get(app(), "/apply?state=&search=mee&type=video&sort=fees_asc&suggest=1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.expect("redirect location");
    assert_eq!(location, "/?search=mee&suggest=1");

    let (_, _, html) = get(app(), &location).await;
    assert_eq!(html.matches("data-testid=\"suggestion-item\"").count(), 1);

    // Plain Enter submits without the flag and leaves the list closed.
    let (_, location, _) = get(app(), "/apply?state=&search=mee&type=video&sort=fees_asc").await;
    let (_, _, html) = get(app(), &location.expect("redirect location")).await;
    assert!(!html.contains("data-testid=\"suggestion-item\""));
}

#[tokio::test]
async fn sort_change_keeps_specialty_selection() {
    let (_, location, _) = get(
        app(),
        "/apply?state=specialties%3DOrthodontist%252CDentist&search=&type=clinic\
         &sort=fees_desc&specialty=Dentist&specialty=Orthodontist",
    )
    .await;
    assert_eq!(
        location.as_deref(),
        Some("/?type=clinic&specialties=Orthodontist%2CDentist&sort=fees_desc")
    );
}
