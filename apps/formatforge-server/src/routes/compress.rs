//! Compression endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::convert::{compress_file, compressed_filename, run_blocking};
use crate::db::{ActionType, HistoryRepository, NewConversionEvent};
use crate::error::Result;
use crate::routes::SUCCESS;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompressRequest {
    /// Data-URI of the file
    pub file: String,
    /// Original filename; its extension picks the compressor
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct CompressResponse {
    pub status: &'static str,
    /// Base64 encoded compressed file
    pub file: String,
    pub mime: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/compress", post(compress))
}

/// POST /compress
async fn compress(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CompressRequest>, JsonRejection>,
) -> Result<Json<CompressResponse>> {
    let Json(request) = payload?;

    let quality = state.config().conversion.jpeg_quality;
    let CompressRequest { file, filename } = request;
    let (compressed, filename) = run_blocking(move || {
        let compressed = compress_file(&file, &filename, quality)?;
        Ok((compressed, filename))
    })
    .await?;

    HistoryRepository::new(state.db())
        .record(&NewConversionEvent::success(
            filename.as_str(),
            compressed.original_type,
            ActionType::Compress,
            compressed_filename(&filename),
            compressed.output_type,
        ))
        .await?;

    Ok(Json(CompressResponse {
        status: SUCCESS,
        file: BASE64.encode(&compressed.bytes),
        mime: compressed.mime,
    }))
}
