//! Interactive summarizer page
//!
//! Every action is a form POST followed by a redirect back to `/`; the page
//! renders the session state and shows pending notices once.

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::server::state::AppState;
use crate::shell::{render_page, InteractionState, Notice};

use super::export::artifact_response;
use super::form::SummarizerForm;

/// Cookie holding the session id
pub const SESSION_COOKIE: &str = "summarizer_session";

pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/generate", post(generate))
        .route("/clear", post(clear))
        .route("/download/:format", get(download))
}

fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

fn with_session_cookie(jar: CookieJar, id: Uuid) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

fn load_session(state: &AppState, jar: &CookieJar) -> (Uuid, InteractionState) {
    state.sessions().load(session_id(jar))
}

fn finish(state: &AppState, jar: CookieJar, id: Uuid, session: InteractionState) -> Response {
    state.sessions().save(id, session);
    (with_session_cookie(jar, id), Redirect::to("/")).into_response()
}

/// GET / - Render the page
async fn index(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (id, mut session) = load_session(&state, &jar);
    let notices = session.take_notices();
    let html = render_page(&session, &notices, state.config().input.preview_chars);
    state.sessions().save(id, session);
    (with_session_cookie(jar, id), Html(html))
}

/// Apply the submitted form; a chosen file is extracted first.
/// Returns whether the form carried a file.
async fn apply_form(
    state: &AppState,
    session: &mut InteractionState,
    multipart: Multipart,
) -> Result<bool> {
    let form = SummarizerForm::read(multipart).await?;
    session.set_inputs(form.manual_text, form.length);

    let Some(file) = form.file else {
        return Ok(false);
    };
    session
        .upload(
            state.extractor(),
            &file.filename,
            file.content_type.as_deref(),
            file.data,
        )
        .await;
    Ok(true)
}

fn reject_form(session: &mut InteractionState, e: Error) {
    tracing::warn!("Rejected form submission: {}", e);
    session.notices.push(Notice::error(e.to_string()));
}

/// POST /upload - Extract text from the chosen PDF
async fn upload(State(state): State<AppState>, jar: CookieJar, multipart: Multipart) -> Response {
    let (id, mut session) = load_session(&state, &jar);
    match apply_form(&state, &mut session, multipart).await {
        Ok(true) => {}
        Ok(false) => session
            .notices
            .push(Notice::warning("Choose a PDF file to upload.")),
        Err(e) => reject_form(&mut session, e),
    }
    finish(&state, jar, id, session)
}

/// POST /generate - Summarize the current text
async fn generate(State(state): State<AppState>, jar: CookieJar, multipart: Multipart) -> Response {
    let (id, mut session) = load_session(&state, &jar);
    match apply_form(&state, &mut session, multipart).await {
        Ok(_) => session.generate(state.invoker()).await,
        Err(e) => reject_form(&mut session, e),
    }
    finish(&state, jar, id, session)
}

/// POST /clear - Discard the session and start over under a new id
async fn clear(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (old, mut session) = load_session(&state, &jar);
    state.sessions().remove(&old);
    session.clear();
    tracing::debug!("Session {} cleared", old);
    finish(&state, jar, Uuid::new_v4(), session)
}

/// GET /download/:format - Download the current summary
async fn download(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(format): Path<ExportFormat>,
) -> Result<Response> {
    let (id, mut session) = load_session(&state, &jar);
    let result = session.export(format);
    state.sessions().save(id, session);
    Ok(artifact_response(result?))
}
