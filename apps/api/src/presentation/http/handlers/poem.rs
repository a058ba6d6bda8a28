use crate::{
    application::generate_poem::dto::GeneratePoemResponse,
    domain::poem::{
        entity::UploadedImage, errors::ImageValidationError, value_objects::MAX_IMAGE_BYTES,
    },
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use bytes::{Bytes, BytesMut};

/// Form field carrying the image.
pub const IMAGE_FIELD: &str = "image";

pub async fn generate_poem(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GeneratePoemResponse>, AppError> {
    // A body that is not a multipart form cannot contain the field.
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!(%rejection, "Request is not a multipart form");
        AppError::from(ImageValidationError::Missing)
    })?;

    let image = read_image_field(&mut multipart).await?;
    let generated = state.generate_poem.execute(image).await?;

    Ok(Json(generated.into()))
}

/// Finds the first `image` field and validates it. Other fields are ignored.
async fn read_image_field(multipart: &mut Multipart) -> Result<UploadedImage, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = if file_name.is_some() {
            read_capped(&mut field, MAX_IMAGE_BYTES).await?
        } else {
            Bytes::new()
        };

        return Ok(UploadedImage::from_form_field(
            file_name,
            content_type.as_deref(),
            data,
        )?);
    }

    Err(ImageValidationError::Missing.into())
}

/// Buffers a field, stopping as soon as more than `max` bytes have arrived.
async fn read_capped(field: &mut Field<'_>, max: usize) -> Result<Bytes, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        buf.extend_from_slice(&chunk);
        if buf.len() > max {
            break;
        }
    }
    Ok(buf.freeze())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ImageValidationError::TooLarge.into()
    } else {
        AppError::BadRequest(err.body_text())
    }
}
