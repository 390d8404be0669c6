//! Axum handlers for the tree-building API.

use arbol_dot::TreeRenderer;
use arbol_id3::{BuildLog, TreeBuilder, TreeMetrics};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{info, instrument, warn};

use crate::server::{artifact, parse, ApiError, AppState, BuildTreeRequest, BuildTreeResponse};

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "OK"
}

/// Build a decision tree from the posted dataset, render it, and return
/// the build log, base64 image, and metrics summary.
pub async fn build_tree(
    State(state): State<AppState>,
    Json(request): Json<BuildTreeRequest>,
) -> Response {
    match handle_build(&state, &request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[instrument(skip_all)]
fn handle_build(
    state: &AppState,
    request: &BuildTreeRequest,
) -> Result<BuildTreeResponse, ApiError> {
    let parsed = parse::parse_request(request)?;

    // Configuration was validated at startup; a failure here is a bug.
    let builder = TreeBuilder::new(state.config.tree_config())
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let renderer = TreeRenderer::new().with_engine(state.config.engine());

    let mut metrics = TreeMetrics::new(&parsed.features, &parsed.target);
    metrics.attach(Box::new(renderer.clone()));
    let mut log = BuildLog::new();

    let root = builder.build_with(
        &parsed.dataset,
        &parsed.features,
        &parsed.target,
        &mut metrics,
        &mut log,
    )?;

    let image = renderer.render(&root)?;
    let summary = metrics.finalize();

    if let Some(dir) = state.config.output_dir() {
        // Artifact persistence must not fail an otherwise successful build.
        match artifact::write_metrics(dir, &summary) {
            Ok(path) => info!(path = %path.display(), "metrics artifact written"),
            Err(err) => warn!(error = %err, "failed to write metrics artifact"),
        }
    }

    info!(
        n_nodes = summary.node_count,
        n_leaves = summary.leaf_count,
        max_depth = summary.max_depth,
        "tree built and rendered"
    );

    Ok(BuildTreeResponse {
        success: true,
        logs: log.into_lines(),
        visualization: STANDARD.encode(&image),
        metrics: summary,
    })
}
