//! Marketing content: blog posts and home page banners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Entity;
use crate::domain::lenient;
use crate::domain::resource::ResourceKind;
use crate::domain::types::EntityId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Blog {
    const KIND: ResourceKind = ResourceKind::Blogs;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    /// Public URL of the uploaded image.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Banner {
    const KIND: ResourceKind = ResourceKind::Banners;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}
