//! Route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactStatus;
use crate::ml::ModelKind;
use crate::service::{Session, SessionId, SessionStore};
use crate::web::AppState;
use crate::web::error::WebError;
use crate::web::page::{PageView, render};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "spamsift_session";

/// Form posted by the page.
#[derive(Debug, Default, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct Health {
    pub ready: bool,
    pub sessions: usize,
    pub artifacts: Vec<ArtifactStatus>,
}

pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (id, session, created) = resolve_session(&state, &headers);
    let view = PageView::new(session.selection(), state.load_notices());
    page_response(view, id, created)
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    headers: HeaderMap,
    form: Option<Form<TextForm>>,
) -> Result<Response, WebError> {
    let kind = ModelKind::from_tag(&model).ok_or(WebError::UnknownModel(model))?;
    let (id, _, created) = resolve_session(&state, &headers);
    let (id, created) = record_selection(&state.sessions, id, created, kind);
    log::debug!("Session {id} selected {kind}");

    let text = form.map(|Form(form)| form.text).unwrap_or_default();
    let view = PageView::new(Some(kind), state.load_notices()).with_text(text);
    Ok(page_response(view, id, created))
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<TextForm>,
) -> Response {
    let (id, session, created) = resolve_session(&state, &headers);

    let outcome = state.service.classify(&form.text, session.selection());
    if let Err(notice) = &outcome {
        log::info!("Session {id}: {notice}");
    }

    let view = PageView::new(session.selection(), state.load_notices())
        .with_text(form.text)
        .with_outcome(outcome);
    page_response(view, id, created)
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    let store = state.service.store();
    Json(Health {
        ready: store.is_ready(),
        sessions: state.sessions.len(),
        artifacts: store.statuses(),
    })
}

/// Find the caller's session, starting a new one when the cookie is missing
/// or refers to a session that no longer exists.
fn resolve_session(state: &AppState, headers: &HeaderMap) -> (SessionId, Session, bool) {
    if let Some(id) = session_cookie(headers)
        && let Some(session) = state.sessions.get(&id)
    {
        return (id, session, false);
    }
    (state.sessions.create(), Session::new(), true)
}

/// Store the choice in the session. A session purged since it was resolved
/// is replaced by a new one holding the choice.
fn record_selection(
    sessions: &SessionStore,
    id: SessionId,
    created: bool,
    kind: ModelKind,
) -> (SessionId, bool) {
    if sessions.select(&id, kind) {
        return (id, created);
    }
    log::debug!("Session {id} expired before selecting {kind}");
    let id = sessions.create();
    sessions.select(&id, kind);
    (id, true)
}

fn page_response(view: PageView, id: SessionId, created: bool) -> Response {
    let mut response = Html(render(&view)).into_response();
    if created
        && let Ok(value) = HeaderValue::from_str(&set_cookie(&id))
    {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Extract the session id from the `Cookie` headers.
pub fn session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse_str(value.trim()).ok())
}

fn set_cookie(id: &SessionId) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}
