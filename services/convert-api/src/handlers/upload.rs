//! Upload handler: multipart image in, letterboxed GIF out.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Extension, Multipart,
    },
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use gifbox_common::{ConvertError, ConvertResult, OutputImage, SourceImage};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::state::AppState;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "image";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// The file part of an upload.
#[derive(Debug)]
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /upload - Convert an uploaded PNG or SVG into a 400x160 GIF
pub async fn upload_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("upload", %request_id);

    let mut response = async move {
        state.metrics.record_upload();

        match convert(&state, multipart).await {
            Ok(output) => gif_response(output),
            Err(e) => {
                state.metrics.record_failure(&e);
                if e.is_pipeline_error() {
                    error!(kind = e.kind(), error = %e, "Conversion failed");
                } else {
                    warn!(kind = e.kind(), error = %e, "Upload rejected");
                }
                error_response(&e)
            }
        }
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

async fn convert(
    state: &Arc<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ConvertResult<OutputImage> {
    let multipart = multipart.map_err(|e| ConvertError::InvalidUpload(e.body_text()))?;
    let upload = read_upload(multipart).await?;

    let source = SourceImage::new(upload.bytes, upload.content_type.as_deref())?;
    let format = source.format();
    let input_bytes = source.len();

    info!(
        file_name = upload.file_name.as_deref().unwrap_or(""),
        %format,
        input_bytes,
        "Converting upload"
    );

    let worker_state = Arc::clone(state);
    let (output, timings) =
        tokio::task::spawn_blocking(move || worker_state.pipeline.run_timed(&source))
            .await
            .map_err(|e| ConvertError::Internal(format!("conversion task failed: {}", e)))??;

    state
        .metrics
        .record_conversion(format, input_bytes, output.bytes.len(), &timings)
        .await;

    info!(
        output_bytes = output.bytes.len(),
        decode_ms = timings.decode.as_secs_f64() * 1000.0,
        fit_ms = timings.fit.as_secs_f64() * 1000.0,
        composite_ms = timings.composite.as_secs_f64() * 1000.0,
        encode_ms = timings.encode.as_secs_f64() * 1000.0,
        "Conversion complete"
    );

    Ok(output)
}

/// Pull the `image` part out of the multipart body.
///
/// Other fields are drained and ignored. A browser form submitted without a
/// selection sends the field with an empty filename and no data; that counts
/// as no file.
async fn read_upload(mut multipart: Multipart) -> ConvertResult<Upload> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
            return Err(ConvertError::MissingFile);
        }

        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(ConvertError::MissingFile)
}

fn multipart_error(e: MultipartError) -> ConvertError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ConvertError::UploadTooLarge(e.body_text())
    } else {
        ConvertError::InvalidUpload(e.body_text())
    }
}

fn gif_response(output: OutputImage) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, OutputImage::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, OutputImage::content_disposition()),
        ],
        output.into_bytes(),
    )
        .into_response()
}

/// Plain-text error response carrying the error message as the body.
pub fn error_response(error: &ConvertError) -> Response {
    let status =
        StatusCode::from_u16(error.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        error.to_string(),
    )
        .into_response()
}
