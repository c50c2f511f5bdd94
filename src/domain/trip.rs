//! Bookable products: tours, treks, and where they stay and go.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;
use crate::domain::lenient;
use crate::domain::resource::ResourceKind;
use crate::domain::types::EntityId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub duration_days: Option<u32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Tour {
    const KIND: ResourceKind = ResourceKind::Tours;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trek {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub difficulty: Option<String>,
    /// Highest point of the route in metres.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub max_altitude: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub duration_days: Option<u32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Trek {
    const KIND: ResourceKind = ResourceKind::Treks;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub rating: Option<u8>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Accommodation {
    const KIND: ResourceKind = ResourceKind::Accommodations;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Destination {
    const KIND: ResourceKind = ResourceKind::Destinations;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}
