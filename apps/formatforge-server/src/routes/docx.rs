//! PDF to DOCX endpoint

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Serialize;

use crate::db::{ActionType, HistoryRepository, NewConversionEvent, OriginalType, OutputType};
use crate::docx::convert_pdf_to_docx;
use crate::error::{AppError, Result};
use crate::routes::SUCCESS;
use crate::state::AppState;

/// Filename suggested to clients for the converted document
pub const DOCX_OUTPUT_NAME: &str = "converted.docx";

const DEFAULT_UPLOAD_NAME: &str = "upload.pdf";

#[derive(Debug, Serialize)]
pub struct DocxResponse {
    pub status: &'static str,
    /// Base64 encoded DOCX
    pub docx: String,
    pub filename: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/convert-pdf-to-docx", post(pdf_to_docx))
}

/// POST /convert-pdf-to-docx
///
/// Multipart upload; the `file` field, or the first field carrying a file.
async fn pdf_to_docx(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<DocxResponse>> {
    let (upload_name, data) = read_upload(multipart?).await?;
    tracing::debug!("Received {} ({} bytes) for DOCX conversion", upload_name, data.len());

    let docx = convert_pdf_to_docx(
        state.docx_converter(),
        state.config().conversion.temp_dir.as_deref(),
        &data,
    )
    .await?;

    HistoryRepository::new(state.db())
        .record(&NewConversionEvent::success(
            upload_name.as_str(),
            OriginalType::Pdf,
            ActionType::Convert,
            DOCX_OUTPUT_NAME,
            OutputType::Docx,
        ))
        .await?;

    tracing::info!("Converted {} to DOCX ({} bytes)", upload_name, docx.len());

    Ok(Json(DocxResponse {
        status: SUCCESS,
        docx: BASE64.encode(&docx),
        filename: DOCX_OUTPUT_NAME,
    }))
}

async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());
        let data = field.bytes().await?;
        return Ok((name, data));
    }

    Err(AppError::BadRequest("no file field in upload".to_string()))
}
