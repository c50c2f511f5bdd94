use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;
use crate::domain::lenient;
use crate::domain::resource::ResourceKind;
use crate::domain::types::EntityId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub full_name: String,
    /// Older sign-ups only carry a single `name`.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Client {
    const KIND: ResourceKind = ResourceKind::Clients;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        match self.full_name.trim() {
            "" => self.name.as_deref().unwrap_or(self.id.as_str()),
            full_name => full_name,
        }
    }
}
