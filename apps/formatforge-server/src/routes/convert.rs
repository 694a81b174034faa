//! Image(s) to PDF endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::convert::{images_to_pdf, run_blocking};
use crate::db::{ActionType, HistoryRepository, NewConversionEvent, OriginalType, OutputType};
use crate::error::Result;
use crate::routes::SUCCESS;
use crate::state::AppState;

/// Name recorded as the source of an image batch
pub const IMAGE_BATCH_NAME: &str = "Multiple Images";

/// Name recorded for the generated document
pub const PDF_OUTPUT_NAME: &str = "formatforge.pdf";

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Data-URIs, one page each, in page order
    pub images: Vec<String>,
    /// Reserved; accepted and ignored
    #[serde(default = "default_enhance")]
    pub enhance: bool,
}

fn default_enhance() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub status: &'static str,
    /// Base64 encoded PDF
    pub pdf: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/convert-to-pdf", post(convert_to_pdf))
}

/// POST /convert-to-pdf
async fn convert_to_pdf(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>> {
    let Json(request) = payload?;
    let image_count = request.images.len();
    tracing::debug!("Converting {} image(s), enhance={} (unused)", image_count, request.enhance);

    let config = state.config().conversion.clone();
    let images = request.images;
    let pdf = run_blocking(move || images_to_pdf(&images, &config)).await?;

    HistoryRepository::new(state.db())
        .record(&NewConversionEvent::success(
            IMAGE_BATCH_NAME,
            OriginalType::Image,
            ActionType::Convert,
            PDF_OUTPUT_NAME,
            OutputType::Pdf,
        ))
        .await?;

    tracing::info!("Converted {} image(s) into a {} byte PDF", image_count, pdf.len());

    Ok(Json(ConvertResponse {
        status: SUCCESS,
        pdf: BASE64.encode(&pdf),
    }))
}
