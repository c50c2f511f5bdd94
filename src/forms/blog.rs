use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::dto::payload::{FilePart, MultipartBody, Payload};
use crate::forms::{FormError, RecordForm, check_image};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for a blog post.
pub struct BlogForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub category: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    /// Cover image. Sent as multipart when present.
    #[serde(skip)]
    pub cover: Option<FilePart>,
}

impl RecordForm for BlogForm {
    fn to_payload(&self) -> Result<Payload, FormError> {
        self.validate()?;

        let Some(cover) = &self.cover else {
            return Ok(Payload::Json(json!({
                "title": self.title.trim(),
                "content": self.content,
                "category": self.category,
                "author": self.author,
                "isActive": self.is_active,
            })));
        };

        check_image(cover)?;
        let body = MultipartBody::new()
            .text("title", self.title.trim())
            .text("content", self.content.as_str())
            .optional_text("category", self.category.as_deref())
            .optional_text("author", self.author.as_deref())
            .text("isActive", self.is_active.to_string())
            .file(cover.clone());

        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BlogForm {
        BlogForm {
            title: "Packing for the Himalaya".into(),
            content: "Layers, layers, layers.".into(),
            category: Some("guides".into()),
            ..BlogForm::default()
        }
    }

    #[test]
    fn without_cover_sends_json() {
        let Payload::Json(body) = form().to_payload().expect("valid form") else {
            panic!("expected a JSON payload");
        };
        assert_eq!(body["title"], "Packing for the Himalaya");
        assert_eq!(body["author"], serde_json::Value::Null);
    }

    #[test]
    fn cover_switches_to_multipart() {
        let blog = BlogForm {
            cover: Some(FilePart {
                field: "image".into(),
                file_name: "cover.jpg".into(),
                content_type: "image/jpeg".into(),
                bytes: vec![0xff, 0xd8, 0xff],
            }),
            ..form()
        };

        let Payload::Multipart(body) = blog.to_payload().expect("valid form") else {
            panic!("expected a multipart payload");
        };
        assert_eq!(body.files.len(), 1);
        assert!(body.fields.contains(&("category".into(), "guides".into())));
        assert!(!body.fields.iter().any(|(name, _)| name == "author"));
    }

    #[test]
    fn non_image_cover_is_rejected() {
        let blog = BlogForm {
            cover: Some(FilePart {
                field: "image".into(),
                file_name: "notes.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: vec![1, 2, 3],
            }),
            ..form()
        };

        assert!(matches!(blog.to_payload(), Err(FormError::InvalidImage(_))));
    }
}
