use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info, warn};

use scriptlink::{AudioClip, DataLayout, LinkOpts, MatchOpts, MatchReport, Opts, Project};

/// Route under which audio files are served; linked paths point here.
const AUDIO_ROUTE: &str = "/static/audio";

/// Shown instead of an error when the sheet dump has not been synced yet.
const UNSYNCED_NOTICE: &str = "Metadata not found. Run sync.";

#[derive(Parser, Debug)]
#[command(name = "scriptlink-server")]
#[command(about = "HTTP server for script-linked audio clips")]
struct Params {
    /// Directory holding `script.txt` and `metadata.json`.
    #[arg(short = 'd', long = "data-dir", default_value = "data")]
    data_dir: PathBuf,

    /// Directory holding the downloaded audio files.
    #[arg(short = 'a', long = "audio-dir", default_value = "static/audio")]
    audio_dir: PathBuf,

    /// Host interface to bind to.
    #[arg(long = "host", default_value = "127.0.0.1")]
    host: String,

    /// TCP port to listen on.
    #[arg(long = "port", default_value_t = 8000)]
    port: u16,
}

#[derive(Clone)]
struct AppState {
    project: Arc<Project>,
}

#[derive(Debug, Deserialize)]
struct DiagnosticsQuery {
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    sample: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SectionBody {
    section: String,
    clips: Vec<AudioClip>,
}

#[derive(Debug, Serialize)]
struct SectionsBody {
    sections: Vec<SectionBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[tokio::main]
async fn main() {
    scriptlink::init_logging();

    if let Err(err) = run().await {
        error!(error = ?err, "scriptlink-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let params = Params::parse();

    let addr: SocketAddr = format!("{}:{}", params.host, params.port)
        .parse()
        .context("invalid host/port bind address")?;

    let layout = DataLayout {
        data_dir: params.data_dir,
        audio_dir: params.audio_dir,
    };
    let opts = Opts {
        link: LinkOpts {
            url_prefix: AUDIO_ROUTE.to_owned(),
        },
        ..Opts::default()
    };

    let app = router(Project::new(layout, opts)).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            .on_response(DefaultOnResponse::new().level(Level::INFO))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    );

    let listener = TcpListener::bind(addr).await.context("bind failed")?;
    info!(%addr, "listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn router(project: Project) -> Router {
    let audio = ServeDir::new(project.layout().audio_dir.clone());
    let state = AppState {
        project: Arc::new(project),
    };

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/v1/sections", get(sections))
        .route("/v1/diagnostics", get(diagnostics))
        .nest_service(AUDIO_ROUTE, audio)
        .with_state(state)
}

async fn root() -> &'static str {
    "scriptlink-server: GET /v1/sections, GET /v1/diagnostics?threshold=0.6"
}

async fn healthz() -> &'static str {
    "ok"
}

/// Linked clips grouped by section, rebuilt from disk on every request.
///
/// A missing sheet dump means nothing has been synced yet: the page stays empty and carries a
/// notice rather than failing.
async fn sections(
    State(state): State<AppState>,
) -> std::result::Result<Json<SectionsBody>, AppError> {
    let project = state.project.clone();
    let grouped = tokio::task::spawn_blocking(move || project.sections())
        .await
        .map_err(|err| AppError::internal(format!("sections task failed: {err}")))?;

    let grouped = match grouped {
        Ok(grouped) => grouped,
        Err(err) if err.is_not_found() => {
            warn!(error = %err, "sheet dump missing");
            return Ok(Json(SectionsBody {
                sections: Vec::new(),
                notice: Some(UNSYNCED_NOTICE.to_owned()),
            }));
        }
        Err(err) => return Err(AppError::internal(err.to_string())),
    };

    let sections = grouped
        .into_iter()
        .map(|(section, clips)| SectionBody { section, clips })
        .collect();
    Ok(Json(SectionsBody {
        sections,
        notice: None,
    }))
}

async fn diagnostics(
    State(state): State<AppState>,
    Query(query): Query<DiagnosticsQuery>,
) -> std::result::Result<Json<MatchReport>, AppError> {
    let matching = match_opts(&query)?;
    let project = Project::new(
        state.project.layout().clone(),
        Opts {
            matching,
            ..state.project.opts().clone()
        },
    );

    let report = tokio::task::spawn_blocking(move || project.diagnostics())
        .await
        .map_err(|err| AppError::internal(format!("diagnostics task failed: {err}")))?
        .map_err(|err| AppError::internal(err.to_string()))?;

    Ok(Json(report))
}

fn match_opts(query: &DiagnosticsQuery) -> std::result::Result<MatchOpts, AppError> {
    let defaults = MatchOpts::default();
    let threshold = query.threshold.unwrap_or(defaults.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(AppError::bad_request(format!(
            "threshold must be between 0 and 1, got {threshold}"
        )));
    }

    Ok(MatchOpts {
        threshold,
        sample_size: query.sample.unwrap_or(defaults.sample_size),
    })
}
