//! .torrent pass-through for proxy stream links.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::state::AppState;

pub const TORRENT_CONTENT_TYPE: &str = "application/x-bittorrent";

/// GET /torrent/{id}
///
/// Downloads the .torrent from FileList with the configured passkey and
/// relays the bytes unchanged.
pub async fn proxy_torrent(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let Some(passkey) = state.config().filelist.passkey() else {
        error!(id = %id, "Cannot proxy torrent, FILELIST_PASSKEY is not configured");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "FileList credentials are not configured",
        )
            .into_response();
    };

    match state.resolver().index().download_descriptor(&id, passkey).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, TORRENT_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => {
            warn!(id = %id, error = %e, "Error fetching torrent");
            (StatusCode::BAD_GATEWAY, "Failed to fetch torrent file").into_response()
        }
    }
}
