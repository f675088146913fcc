//! Inbound HTTP boundary for the generation pipeline.

use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use handoff_core::classify::{select_sources, CandidateFile};
use handoff_core::prompt::GenerationMode;

use crate::generate::{
    create_completion_client, generate_data, GenerateConfig, GenerationRequest, GenerationResult,
};

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Override the completion service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the completion model
    #[arg(long)]
    pub model: Option<String>,
}

/// Completion service handle shared by all requests: immutable config
/// plus one pooled HTTP client. Absent when the credential was missing
/// at startup, in which case every generation request fails with
/// ConfigMissing until an operator fixes the deployment.
pub(crate) struct Upstream {
    config: GenerateConfig,
    client: reqwest::Client,
}

pub(crate) struct AppState {
    upstream: Option<Upstream>,
}

pub async fn run_serve(options: ServeOptions, global: crate::Global) -> Result<()> {
    let upstream = match GenerateConfig::from_env() {
        Ok(config) => {
            let config = config.with_overrides(options.base_url, options.model);
            let client = create_completion_client(&config)?;
            Some(Upstream { config, client })
        }
        Err(err) => {
            log::error!("Generation disabled at startup: {err}");
            None
        }
    };

    if global.verbose {
        eprintln!(
            "Starting handoff server on {}:{}...",
            options.host, options.port
        );
    }

    let addr = format!("{}:{}", options.host, options.port);
    let app_router = router(Arc::new(AppState { upstream }));

    if global.verbose {
        eprintln!("Generate endpoint: http://{addr}/v1/generate");
        eprintln!("Health endpoint: http://{addr}/healthz");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/generate", post(generate_handler))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Inbound request body. Callers either supply the two text bodies
/// directly or a set of uploaded files for the classifier to select
/// from; `files` takes precedence when present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateBody {
    #[serde(default)]
    chat_text: Option<String>,
    #[serde(default)]
    code_text: Option<String>,
    #[serde(default)]
    files: Option<Vec<CandidateFile>>,
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerationResult>, (StatusCode, Json<ErrorBody>)> {
    let request = resolve_request(body).map_err(|e| error_response(&e))?;

    let Some(upstream) = &state.upstream else {
        log::error!("Generation request received but no upstream credential is configured");
        return Err(error_response(&Error::ConfigMissing));
    };

    let result = generate_data(&upstream.client, &upstream.config, &request)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(result))
}

/// Turn the inbound body into a validated [`GenerationRequest`].
///
/// Fails fast with BadInput before the orchestrator is ever invoked:
/// uploads missing a required category and blank text bodies never reach
/// the upstream call.
fn resolve_request(body: GenerateBody) -> Result<GenerationRequest, Error> {
    let mode = match body.mode.as_deref() {
        None => GenerationMode::Summary,
        Some(mode) => GenerationMode::parse(mode),
    };

    let (chat_text, code_text) = match &body.files {
        Some(files) => {
            let selected = select_sources(files);
            match (selected.chat, selected.code) {
                (Some(chat), Some(code)) => (chat.content.clone(), code.content.clone()),
                _ => {
                    return Err(Error::BadInput(
                        "upload must include one chat transcript (.md or .txt) \
                         and one code file (.js or .ts)"
                            .to_string(),
                    ))
                }
            }
        }
        None => (
            body.chat_text.unwrap_or_default(),
            body.code_text.unwrap_or_default(),
        ),
    };

    if chat_text.trim().is_empty() {
        return Err(Error::BadInput("chatText must be non-empty".to_string()));
    }
    if code_text.trim().is_empty() {
        return Err(Error::BadInput("codeText must be non-empty".to_string()));
    }

    Ok(GenerationRequest {
        chat_text,
        code_text,
        mode,
    })
}

fn error_response(err: &Error) -> (StatusCode, Json<ErrorBody>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}
