use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    serve, Form, Json, Router,
};
use minijinja::{path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use serde::{Deserialize, Serialize};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use crate::llm_interaction::AnswerRequester;
use crate::presentation::{self, PageView, SubmitForm};
use crate::Question;

// Shared application state. Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    templates: Arc<AutoReloader>,
    requester: Arc<AnswerRequester>,
}

impl AppState {
    pub fn new(templates: AutoReloader, requester: AnswerRequester) -> Self {
        Self {
            templates: Arc::new(templates),
            requester: Arc::new(requester),
        }
    }
}

/// Where the server finds its templates and static assets.
#[derive(Debug, Clone)]
pub struct ServerPaths {
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

// Minijinja Environment setup
pub fn create_minijinja_env(templates_dir: impl AsRef<Path>) -> AutoReloader {
    let templates_dir = templates_dir.as_ref().to_path_buf();
    AutoReloader::new(move |notifier| {
        let mut env = Environment::new();
        env.set_loader(path_loader(&templates_dir));
        // Watch the templates directory for changes
        notifier.watch_path(&templates_dir, true);
        Ok(env)
    })
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AskResponse {
    Success { answer: String },
    Error { error: String },
}

fn render_page(state: &AppState, view: &PageView) -> Response {
    match view.render(&state.templates) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to get or render template: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Internal Server Error: {}", e)),
            )
                .into_response()
        }
    }
}

async fn index_handler(State(state): State<AppState>) -> Response {
    render_page(&state, &PageView::idle())
}

async fn submit_handler(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Response {
    let view = presentation::handle_submission(&state.requester, form).await;
    render_page(&state, &view)
}

async fn api_ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> (StatusCode, Json<AskResponse>) {
    let Some(question) = Question::new(request.question) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(AskResponse::Error {
                error: "question must not be empty".to_string(),
            }),
        );
    };

    match state.requester.request_answer(&question).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(AskResponse::Success {
                answer: answer.into_string(),
            }),
        ),
        Err(e) => {
            error!(error = %e, "API question could not be answered");
            (
                StatusCode::BAD_GATEWAY,
                Json(AskResponse::Error {
                    error: presentation::failure_message(&e),
                }),
            )
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Builds the application router; split out so tests can drive it directly.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_files_service = ServeDir::new(static_dir.as_ref()).not_found_service(
        tower::service_fn(|_| async {
            Ok::<_, std::convert::Infallible>(
                (StatusCode::NOT_FOUND, "Not Found").into_response(),
            )
        }),
    );

    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/api/ask", post(api_ask_handler))
        .route("/healthz", get(health_handler))
        .nest_service("/static", static_files_service)
        .with_state(state)
        .layer(TraceLayer::new_for_http()) // Add request logging
}

pub async fn start_web_server(
    addr: SocketAddr,
    requester: AnswerRequester,
    paths: ServerPaths,
) -> Result<()> {
    let templates = create_minijinja_env(&paths.templates_dir);
    let state = AppState::new(templates, requester);
    let app = router(state, &paths.static_dir);

    // Bind using tokio::net::TcpListener
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;
    info!("Web server listening on http://{}", addr);

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
