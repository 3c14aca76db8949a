//! Stream resource handler.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use filelist_core::{StreamRequest, StreamResponse};

use crate::state::AppState;

/// GET /stream/{type}/{id}.json
///
/// Always answers 200; failures inside the pipeline yield an empty list.
pub async fn get_streams(
    State(state): State<Arc<AppState>>,
    Path((media_type, id)): Path<(String, String)>,
) -> Json<StreamResponse> {
    let id = id.strip_suffix(".json").unwrap_or(&id);
    debug!(media_type = %media_type, id = %id, "Stream request");

    let request = StreamRequest::new(media_type.as_str(), id);
    Json(state.resolver().resolve(&request).await)
}
