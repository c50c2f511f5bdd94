use serde::Deserialize;
use validator::Validate;

use crate::dto::payload::{FilePart, MultipartBody, Payload};
use crate::forms::{FormError, RecordForm, check_image};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for a home page banner. Banners always carry an image, so the
/// body is always multipart.
pub struct BannerForm {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(url)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(skip)]
    pub image: Option<FilePart>,
}

impl RecordForm for BannerForm {
    /// Payload for a new banner; the image is mandatory.
    fn to_create_payload(&self) -> Result<Payload, FormError> {
        if self.image.is_none() {
            return Err(FormError::MissingImage);
        }
        self.to_payload()
    }

    /// Payload for an edit; the stored image is kept when none is attached.
    fn to_payload(&self) -> Result<Payload, FormError> {
        self.validate()?;

        let mut body = MultipartBody::new()
            .text("title", self.title.trim())
            .optional_text("link", self.link.as_deref())
            .text("isActive", self.is_active.to_string());

        if let Some(image) = &self.image {
            check_image(image)?;
            body = body.file(image.clone());
        }

        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::MAX_IMAGE_BYTES;

    fn image(bytes: usize) -> FilePart {
        FilePart {
            field: "image".into(),
            file_name: "everest.webp".into(),
            content_type: "image/webp".into(),
            bytes: vec![0; bytes],
        }
    }

    #[test]
    fn creation_requires_an_image() {
        let form = BannerForm {
            title: "Autumn departures".into(),
            ..BannerForm::default()
        };

        assert!(matches!(
            form.to_create_payload(),
            Err(FormError::MissingImage)
        ));
        assert!(form.to_payload().is_ok());
    }

    #[test]
    fn rejects_bad_link_and_oversized_image() {
        let bad_link = BannerForm {
            title: "Autumn departures".into(),
            link: Some("not a url".into()),
            ..BannerForm::default()
        };
        assert!(matches!(
            bad_link.to_payload(),
            Err(FormError::Validation(_))
        ));

        let huge = BannerForm {
            title: "Autumn departures".into(),
            image: Some(image(MAX_IMAGE_BYTES + 1)),
            ..BannerForm::default()
        };
        assert!(matches!(huge.to_payload(), Err(FormError::ImageTooLarge)));
    }

    #[test]
    fn attaches_the_image() {
        let form = BannerForm {
            title: "Autumn departures".into(),
            link: Some("https://example.com/autumn".into()),
            is_active: true,
            image: Some(image(16)),
        };

        let Payload::Multipart(body) = form.to_create_payload().expect("valid form") else {
            panic!("expected a multipart payload");
        };
        assert_eq!(body.files[0].file_name, "everest.webp");
        assert!(body.fields.contains(&("isActive".into(), "true".into())));
    }
}
