use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::resource::ResourceKind;
use crate::domain::types::EntityId;

/// A record managed through a list screen.
///
/// The controller never looks past the identifier and the label: everything
/// else is opaque backend data that only the projection renders.
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the record belongs to.
    const KIND: ResourceKind;

    fn id(&self) -> &EntityId;

    /// Short text naming the record in prompts and notifications.
    fn label(&self) -> &str;
}

/// Decodes one record as the backend sent it.
///
/// The identifier may arrive as `_id`, as `id` or as both (documents with
/// virtual ids); `_id` wins. Numeric identifiers are read as text.
pub fn decode_record<E: Entity>(mut record: Value) -> Result<E, serde_json::Error> {
    if let Value::Object(fields) = &mut record {
        if let Some(id) = fields.remove("id") {
            fields.entry("_id").or_insert(id);
        }
        if let Some(id) = fields.get_mut("_id").filter(|id| id.is_number()) {
            *id = Value::String(id.to_string());
        }
    }
    serde_json::from_value(record)
}
