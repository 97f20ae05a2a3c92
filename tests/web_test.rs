mod common;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tower::ServiceExt;

use spamsift::web::{AppState, SESSION_COOKIE, router};

async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
    router(Arc::clone(state)).oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn session_cookie(response: &Response) -> String {
    let value = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    value.split(';').next().unwrap().to_string()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_index_starts_a_session() {
    let dir = common::artifact_dir();
    let state = common::app_state(dir.path());

    let response = send(&state, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie(&response);
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));

    let html = body_text(response).await;
    assert!(html.contains("<title>Email Spam Detector</title>"));
    assert!(html.contains("Selected model: <strong>none</strong>"));
    assert!(!html.contains("notice error"));

    // a known session does not get a new cookie
    let response = send(&state, get("/", Some(&cookie))).await;
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_select_then_predict() {
    let dir = common::artifact_dir();
    let state = common::app_state(dir.path());

    let response = send(&state, get("/", None)).await;
    let cookie = session_cookie(&response);

    let response = send(
        &state,
        post_form("/select/nb", Some(&cookie), "text=draft+message"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Selected model: <strong>Naïve Bayes</strong>"));
    assert!(html.contains(">draft message</textarea>"));

    let response = send(
        &state,
        post_form(
            "/predict",
            Some(&cookie),
            "text=WIN+A+FREE+IPHONE+NOW%21%21%21",
        ),
    )
    .await;
    let html = body_text(response).await;
    assert!(html.contains("<span class=\"spam\">Spam</span>"));
    assert!(html.contains(">WIN A FREE IPHONE NOW!!!</textarea>"));

    send(&state, post_form("/select/lr", Some(&cookie), "")).await;
    let response = send(
        &state,
        post_form(
            "/predict",
            Some(&cookie),
            "text=Let%27s+meet+for+lunch+tomorrow+at+noon.",
        ),
    )
    .await;
    let html = body_text(response).await;
    assert!(html.contains("<span class=\"not-spam\">Not Spam</span>"));
    assert!(html.contains("Let&#39;s meet for lunch tomorrow at noon."));
}

#[tokio::test]
async fn test_predict_notices() {
    let dir = common::artifact_dir();
    let state = common::app_state(dir.path());

    let response = send(&state, post_form("/predict", None, "text=free+money")).await;
    let cookie = session_cookie(&response);
    let html = body_text(response).await;
    assert!(html.contains("Please select a model first."));

    send(&state, post_form("/select/lr", Some(&cookie), "")).await;
    let response = send(&state, post_form("/predict", Some(&cookie), "text=+++")).await;
    let html = body_text(response).await;
    assert!(html.contains("Please enter some text."));
    assert!(!html.contains("<span class=\"spam\">"));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let dir = common::artifact_dir();
    let state = common::app_state(dir.path());

    let first = session_cookie(&send(&state, get("/", None)).await);
    let second = session_cookie(&send(&state, get("/", None)).await);
    assert_ne!(first, second);

    send(&state, post_form("/select/nb", Some(&first), "")).await;

    let html = body_text(send(&state, get("/", Some(&first))).await).await;
    assert!(html.contains("Selected model: <strong>Naïve Bayes</strong>"));

    let html = body_text(send(&state, get("/", Some(&second))).await).await;
    assert!(html.contains("Selected model: <strong>none</strong>"));

    let response = send(&state, post_form("/predict", Some(&second), "text=free+money")).await;
    let html = body_text(response).await;
    assert!(html.contains("Please select a model first."));
}

#[tokio::test]
async fn test_unknown_model_is_not_found() {
    let dir = common::artifact_dir();
    let state = common::app_state(dir.path());

    let response = send(&state, post_form("/select/svm", None, "")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.sessions.len(), 0);
}

#[tokio::test]
async fn test_load_failures_are_shown_on_every_render() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = common::app_state(dir.path());

    let response = send(&state, get("/", None)).await;
    let cookie = session_cookie(&response);
    let html = body_text(response).await;
    assert_eq!(html.matches("<p class=\"notice error\">").count(), 3);

    send(&state, post_form("/select/nb", Some(&cookie), "")).await;
    let response = send(&state, post_form("/predict", Some(&cookie), "text=hello")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    // three load failures plus the unavailable notice for this submit
    assert_eq!(html.matches("<p class=\"notice error\">").count(), 4);
    assert!(html.contains("Classification is unavailable"));
}

#[tokio::test]
async fn test_health_reports_artifacts() {
    let dir = common::artifact_dir();
    let state = common::app_state(dir.path());

    let response = send(&state, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let health: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(health["ready"], true);
    let artifacts = health["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 3);
    assert_eq!(artifacts[0]["kind"], "vectorizer");
    assert!(artifacts.iter().all(|a| a["loaded"] == true));
}
