//! Requests coming in from the public site: quotes and tailor-made trips.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;
use crate::domain::lenient;
use crate::domain::resource::ResourceKind;
use crate::domain::types::EntityId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub email: Option<String>,
    /// Name of the tour or trek the quote was requested for.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub trip: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub travellers: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Quote {
    const KIND: ResourceKind = ResourceKind::Quotes;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.full_name
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TailorMadeRequest {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub travel_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub travellers: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for TailorMadeRequest {
    const KIND: ResourceKind = ResourceKind::TailorMade;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.full_name
    }
}
