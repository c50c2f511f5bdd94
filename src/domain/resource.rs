//! Catalog of the remote collections managed by the console.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{EntityId, SortKey, TypeConstraintError};

/// Collections exposed by the booking backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Tours,
    Treks,
    Accommodations,
    Destinations,
    Blogs,
    Clients,
    Banners,
    Quotes,
    TailorMade,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Tours,
        ResourceKind::Treks,
        ResourceKind::Accommodations,
        ResourceKind::Destinations,
        ResourceKind::Blogs,
        ResourceKind::Clients,
        ResourceKind::Banners,
        ResourceKind::Quotes,
        ResourceKind::TailorMade,
    ];

    /// Path segment and config key of the collection.
    pub const fn slug(self) -> &'static str {
        match self {
            ResourceKind::Tours => "tours",
            ResourceKind::Treks => "treks",
            ResourceKind::Accommodations => "accommodations",
            ResourceKind::Destinations => "destinations",
            ResourceKind::Blogs => "blogs",
            ResourceKind::Clients => "clients",
            ResourceKind::Banners => "banners",
            ResourceKind::Quotes => "quotes",
            ResourceKind::TailorMade => "tailor-made",
        }
    }

    /// Human readable name of a single record, used in notifications.
    pub const fn display_name(self) -> &'static str {
        match self {
            ResourceKind::Tours => "Tour",
            ResourceKind::Treks => "Trek",
            ResourceKind::Accommodations => "Accommodation",
            ResourceKind::Destinations => "Destination",
            ResourceKind::Blogs => "Blog",
            ResourceKind::Clients => "Client",
            ResourceKind::Banners => "Banner",
            ResourceKind::Quotes => "Quote",
            ResourceKind::TailorMade => "Tailor-made request",
        }
    }

    /// Sort keys offered by the list screen, the first one being the default.
    pub fn sort_options(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Tours | ResourceKind::Treks => {
                &["-createdAt", "createdAt", "name", "-name", "price", "-price"]
            }
            ResourceKind::Blogs => &["-createdAt", "createdAt", "title", "-title"],
            ResourceKind::Clients | ResourceKind::Quotes | ResourceKind::TailorMade => {
                &["-createdAt", "createdAt", "fullName", "-fullName"]
            }
            ResourceKind::Accommodations | ResourceKind::Destinations | ResourceKind::Banners => {
                &["-createdAt", "createdAt", "name", "-name"]
            }
        }
    }

    /// Filter keys the list endpoint understands.
    pub fn filter_keys(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Tours | ResourceKind::Treks => &["destination", "isActive", "isFeatured"],
            ResourceKind::Accommodations => &["destination", "isActive"],
            ResourceKind::Destinations | ResourceKind::Banners => &["isActive"],
            ResourceKind::Blogs => &["category", "isActive"],
            ResourceKind::Clients => &["country"],
            ResourceKind::Quotes | ResourceKind::TailorMade => &["status"],
        }
    }

    pub fn default_sort(self) -> SortKey {
        SortKey::newest_first()
    }

    /// Endpoints following the backend's `/<slug>` and `/<slug>/<id>` layout.
    pub fn default_endpoints(self) -> Endpoints {
        let base = format!("/{}", self.slug());
        Endpoints::new(base.clone(), base.clone(), base)
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown resource '{s}'")))
    }
}

/// Paths of the three endpoints a collection exposes, relative to the API base.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// `GET` target returning a page of records.
    pub list: String,
    /// Prefix for `PATCH`/`PUT`/`DELETE` on `<item>/<id>`.
    pub item: String,
    /// `POST` target creating a record.
    pub collection: String,
    #[serde(default)]
    pub update_method: UpdateMethod,
}

/// HTTP verb used to update a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateMethod {
    #[default]
    Patch,
    Put,
}

impl Endpoints {
    pub fn new(
        list: impl Into<String>,
        item: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            list: list.into(),
            item: item.into(),
            collection: collection.into(),
            update_method: UpdateMethod::default(),
        }
    }

    pub fn with_update_method(mut self, method: UpdateMethod) -> Self {
        self.update_method = method;
        self
    }

    /// Path of a single record.
    pub fn item_path(&self, id: &EntityId) -> String {
        format!("{}/{}", self.item.trim_end_matches('/'), id)
    }
}
