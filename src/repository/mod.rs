//! Seams between the controller and the booking backend.
//!
//! The traits work on undecoded JSON so that one transport serves every
//! resource; decoding into entity records happens in the service layer.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::resource::Endpoints;
use crate::domain::types::{EntityId, FlagName};
use crate::dto::api::{Acknowledgement, ListPage, ListQuery};
use crate::dto::payload::Payload;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

#[async_trait]
pub trait CollectionReader: Send + Sync {
    async fn list_records(
        &self,
        endpoints: &Endpoints,
        query: &ListQuery,
    ) -> RepositoryResult<ListPage>;
}

#[async_trait]
pub trait CollectionWriter: Send + Sync {
    async fn create_record(
        &self,
        endpoints: &Endpoints,
        payload: &Payload,
    ) -> RepositoryResult<Acknowledgement>;

    async fn update_record(
        &self,
        endpoints: &Endpoints,
        id: &EntityId,
        payload: &Payload,
    ) -> RepositoryResult<Acknowledgement>;

    async fn delete_record(
        &self,
        endpoints: &Endpoints,
        id: &EntityId,
    ) -> RepositoryResult<Acknowledgement>;

    /// Writes the literal `value` into the boolean field `flag`.
    async fn set_flag(
        &self,
        endpoints: &Endpoints,
        id: &EntityId,
        flag: &FlagName,
        value: bool,
    ) -> RepositoryResult<Acknowledgement>;
}

#[async_trait]
pub trait DashboardReader: Send + Sync {
    /// Record counts per resource slug.
    async fn resource_counts(&self, endpoint: &str) -> RepositoryResult<BTreeMap<String, u64>>;
}
