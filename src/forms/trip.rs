use serde::Deserialize;
use serde_json::{Map, Value, json};
use validator::Validate;

use crate::dto::payload::Payload;
use crate::forms::{FormError, RecordForm};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for creating or editing a tour or a trek.
pub struct TripForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub destination: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 1, max = 60))]
    pub duration_days: Option<u32>,
    /// Trek only.
    pub difficulty: Option<String>,
    /// Trek only, in metres.
    #[validate(range(max = 8849))]
    pub max_altitude: Option<u32>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl RecordForm for TripForm {
    /// Validates the form and builds the JSON body the backend expects.
    fn to_payload(&self) -> Result<Payload, FormError> {
        self.validate()?;

        let mut body = Map::new();
        body.insert("name".into(), json!(self.name.trim()));
        insert_text(&mut body, "destination", self.destination.as_deref());
        insert_text(&mut body, "difficulty", self.difficulty.as_deref());
        insert_text(&mut body, "description", self.description.as_deref());
        if let Some(price) = self.price {
            body.insert("price".into(), json!(price));
        }
        if let Some(days) = self.duration_days {
            body.insert("durationDays".into(), json!(days));
        }
        if let Some(altitude) = self.max_altitude {
            body.insert("maxAltitude".into(), json!(altitude));
        }
        body.insert("isActive".into(), Value::Bool(self.is_active));
        body.insert("isFeatured".into(), Value::Bool(self.is_featured));

        Ok(Payload::Json(Value::Object(body)))
    }
}

/// Blank optional text is left out rather than sent empty.
fn insert_text(body: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        body.insert(key.to_string(), json!(value));
    }
}
