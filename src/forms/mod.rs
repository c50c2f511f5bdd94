//! Validated forms that turn operator input into request payloads.

use thiserror::Error;
use validator::ValidationErrors;

use crate::dto::payload::{FilePart, Payload};

pub mod banner;
pub mod blog;
pub mod trip;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("an image is required")]
    MissingImage,

    #[error("unsupported image type '{0}'")]
    InvalidImage(String),

    #[error("image is larger than {MAX_IMAGE_BYTES} bytes")]
    ImageTooLarge,
}

/// Operator input that becomes the body of a create or update request.
pub trait RecordForm {
    /// Validates the form and builds the body of an edit.
    fn to_payload(&self) -> Result<Payload, FormError>;

    /// Body for a new record. Same as an edit unless creation needs more.
    fn to_create_payload(&self) -> Result<Payload, FormError> {
        self.to_payload()
    }
}

/// Upper bound for uploaded images.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Checks that an upload is a reasonably sized image.
fn check_image(image: &FilePart) -> Result<(), FormError> {
    if !image.content_type.starts_with("image/") {
        return Err(FormError::InvalidImage(image.content_type.clone()));
    }
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(FormError::ImageTooLarge);
    }
    Ok(())
}
