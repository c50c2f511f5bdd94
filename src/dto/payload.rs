//! Request bodies for create and update calls.

use serde_json::Value;

/// Body of a `POST`/`PATCH`/`PUT` call.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    /// Form fields plus uploaded files, sent as `multipart/form-data`.
    Multipart(MultipartBody),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

/// A file attached to a multipart body.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Adds the field only when a value is present.
    pub fn optional_text(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }
}

impl From<MultipartBody> for Payload {
    fn from(body: MultipartBody) -> Self {
        Payload::Multipart(body)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}
